use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::{borrow::Borrow, fmt};

/// Free-form attributes stored beside a target or a context.
pub type Attrs = IndexMap<String, Value>;

/// Canonical server identifier: scheme, lowercased host, no trailing slash.
///
/// Only the normalizer in `target` builds these from user input; everything
/// else receives them already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub(crate) fn from_canonical(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TargetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    #[serde(default, skip_serializing_if = "is_false")]
    pub current: bool,
    #[serde(flatten)]
    pub attrs: Attrs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetEntry {
    #[serde(default, skip_serializing_if = "is_false")]
    pub current: bool,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub contexts: IndexMap<String, ContextEntry>,
    #[serde(flatten)]
    pub attrs: Attrs,
}

/// Every known target, in the order it was first stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    pub(super) targets: IndexMap<TargetId, TargetEntry>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
