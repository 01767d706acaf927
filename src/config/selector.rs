use indexmap::IndexMap;
use std::{borrow::Borrow, hash::Hash};

/// How a user reference to a target or context should be looked up.
///
/// A reference that is a nonnegative integer written in its own canonical
/// form ("0", "12", not "012" or "+1") is a position in iteration order.
/// Anything else is a literal key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Index(usize),
    Key(&'a str),
}

impl<'a> Selector<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw.parse::<usize>() {
            Ok(index) if index.to_string() == raw => Selector::Index(index),
            _ => Selector::Key(raw),
        }
    }

    /// Finds the stored key this selector points at.
    pub fn resolve<'m, K, V>(&self, map: &'m IndexMap<K, V>) -> Option<&'m K>
    where
        K: Borrow<str> + Hash + Eq,
    {
        match *self {
            Selector::Index(index) => map.get_index(index).map(|(key, _)| key),
            Selector::Key(key) => map.get_key_value(key).map(|(key, _)| key),
        }
    }
}
