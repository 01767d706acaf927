use super::{Attrs, Config, ConfigError, ConfigResult, ContextEntry, Selector, TargetEntry, TargetId};
use serde_yaml::Value;
use tracing::{debug, warn};

const TARGET_RESERVED: &[&str] = &["current", "contexts"];
const CONTEXT_RESERVED: &[&str] = &["current"];

/// Which attribute map `Config::remove_attr` works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The current target.
    Target,
    /// The current context of the current target.
    Context,
}

impl Config {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = (&TargetId, &TargetEntry)> {
        self.targets.iter()
    }

    pub fn target(&self, id: &TargetId) -> Option<&TargetEntry> {
        self.targets.get(id)
    }

    pub fn contains_target(&self, id: &TargetId) -> bool {
        self.targets.contains_key(id)
    }

    /// Positions are only stable until the next load of the store.
    pub fn target_by_index(&self, index: usize) -> Option<&TargetId> {
        self.targets.get_index(index).map(|(id, _)| id)
    }

    pub fn context_by_index(&self, target: &TargetId, index: usize) -> Option<&str> {
        self.targets
            .get(target)?
            .contexts
            .get_index(index)
            .map(|(name, _)| name.as_str())
    }

    pub fn current_target(&self) -> Option<&TargetId> {
        self.targets
            .iter()
            .find(|(_, entry)| entry.current)
            .map(|(id, _)| id)
    }

    pub fn current_context(&self) -> Option<&str> {
        let target = self.current_target()?;
        self.targets[target]
            .contexts
            .iter()
            .find(|(_, ctx)| ctx.current)
            .map(|(name, _)| name.as_str())
    }

    /// Marks `id` as the only current target, creating an empty entry for it
    /// when it is new. Context markers are left alone.
    pub fn set_current_target(&mut self, id: TargetId) {
        debug!(server = %id, "setting current target");
        self.targets.entry(id.clone()).or_default();

        for (key, entry) in self.targets.iter_mut() {
            entry.current = *key == id;
        }
    }

    /// Makes the context named (or positioned) by `raw` current within the
    /// current target and returns its canonical name.
    pub fn set_context(&mut self, raw: &str) -> ConfigResult<String> {
        let target = self
            .current_target()
            .cloned()
            .ok_or(ConfigError::NoCurrentTarget)?;
        let entry = &mut self.targets[&target];

        let name = Selector::parse(raw)
            .resolve(&entry.contexts)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownContext {
                target: target.clone(),
                name: raw.to_owned(),
            })?;

        for (key, ctx) in entry.contexts.iter_mut() {
            ctx.current = *key == name;
        }

        debug!(server = %target, context = %name, "setting current context");
        Ok(name)
    }

    /// Shallow merge; incoming keys win. Creates the entry when absent.
    /// Keys owned by the entry itself (`current`, `contexts`) are dropped.
    pub fn merge_target_attrs(&mut self, id: &TargetId, attrs: Attrs) {
        self.targets
            .entry(id.clone())
            .or_default()
            .attrs
            .extend(without_reserved(attrs, TARGET_RESERVED));
    }

    /// Shallow merge into a context of the current target, creating the
    /// context when absent.
    pub fn merge_context_attrs(&mut self, name: &str, attrs: Attrs) -> ConfigResult<()> {
        let target = self
            .current_target()
            .cloned()
            .ok_or(ConfigError::NoCurrentTarget)?;

        self.targets[&target]
            .contexts
            .entry(name.to_owned())
            .or_default()
            .attrs
            .extend(without_reserved(attrs, CONTEXT_RESERVED));

        Ok(())
    }

    pub fn remove_attr(&mut self, scope: Scope, key: &str) -> ConfigResult<Option<Value>> {
        let target = self
            .current_target()
            .cloned()
            .ok_or(ConfigError::NoCurrentTarget)?;

        let attrs = match scope {
            Scope::Target => &mut self.targets[&target].attrs,
            Scope::Context => {
                let name = self
                    .current_context()
                    .map(str::to_owned)
                    .ok_or_else(|| ConfigError::NoCurrentContext {
                        target: target.clone(),
                    })?;
                &mut self.targets[&target].contexts[&name].attrs
            }
        };

        Ok(attrs.shift_remove(key))
    }

    /// Drops duplicate `current` markers left by hand edits, keeping the
    /// first one at each level.
    pub(super) fn repair_markers(&mut self) {
        let mut seen_target = false;

        for (id, entry) in self.targets.iter_mut() {
            if entry.current {
                if seen_target {
                    warn!(server = %id, "ignoring duplicate current target marker");
                    entry.current = false;
                }
                seen_target = true;
            }

            let mut seen_context = false;
            for (name, ctx) in entry.contexts.iter_mut() {
                if ctx.current {
                    if seen_context {
                        warn!(server = %id, context = %name, "ignoring duplicate current context marker");
                        ctx.current = false;
                    }
                    seen_context = true;
                }
            }
        }
    }
}

fn without_reserved(attrs: Attrs, reserved: &[&str]) -> impl Iterator<Item = (String, Value)> {
    attrs.into_iter().filter(move |(key, _)| {
        let keep = !reserved.contains(&key.as_str());
        if !keep {
            warn!(key = %key, "ignoring reserved attribute");
        }
        keep
    })
}

impl TargetEntry {
    pub fn context(&self, name: &str) -> Option<&ContextEntry> {
        self.contexts.get(name)
    }
}
