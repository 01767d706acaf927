use crate::config::{Attrs, Config, ConfigError, ConfigResult, Scope, TargetId};
use serde_yaml::Value;
use tracing::debug;

/// Session flag stored on the current context while tracing is on.
pub const TRACE: &str = "trace";

/// One context as seen when listing, with its positions for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextListing<'c> {
    pub target: &'c TargetId,
    pub target_index: usize,
    pub name: &'c str,
    pub index: usize,
    pub attrs: &'c Attrs,
    pub current_target: bool,
    /// Only true when the owning target is current too.
    pub current_context: bool,
}

/// Context operations, which only make sense inside the current target.
pub struct ContextManager<'a> {
    config: &'a mut Config,
}

impl<'a> ContextManager<'a> {
    pub fn new(config: &'a mut Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn select_context(&mut self, raw: &str) -> ConfigResult<ContextListing<'_>> {
        let target = self
            .config
            .current_target()
            .cloned()
            .ok_or(ConfigError::NoCurrentTarget)?;

        let name = self.config.set_context(raw)?;
        self.find(&target, &name)
            .ok_or_else(|| ConfigError::UnknownContext {
                target: target.clone(),
                name: name.clone(),
            })
    }

    /// The current context of the current target, if both are set.
    pub fn current(&self) -> Option<ContextListing<'_>> {
        let target = self.config.current_target()?;
        let name = self.config.current_context()?;
        self.find(target, name)
    }

    /// Stores or clears the trace flag on the current context.
    pub fn set_trace(&mut self, enabled: bool) -> ConfigResult<()> {
        let target = self
            .config
            .current_target()
            .cloned()
            .ok_or(ConfigError::NoCurrentTarget)?;
        let name = self
            .config
            .current_context()
            .map(str::to_owned)
            .ok_or(ConfigError::NoCurrentContext { target })?;

        debug!(context = %name, enabled, "updating trace flag");
        if enabled {
            let attrs = Attrs::from([(TRACE.to_owned(), Value::Bool(true))]);
            self.config.merge_context_attrs(&name, attrs)
        } else {
            self.config.remove_attr(Scope::Context, TRACE).map(drop)
        }
    }

    /// See [`list_contexts`].
    pub fn list_contexts<'s>(
        &'s self,
        target_filter: Option<&'s TargetId>,
        context_filter: Option<&'s str>,
    ) -> impl Iterator<Item = ContextListing<'s>> + 's {
        list_contexts(self.config, target_filter, context_filter)
    }

    fn find(&self, target: &TargetId, name: &str) -> Option<ContextListing<'_>> {
        let (target_index, (id, entry)) = self
            .config
            .targets()
            .enumerate()
            .find(|(_, (id, _))| *id == target)?;
        let (index, name, ctx) = entry.contexts.get_full(name)?;

        Some(ContextListing {
            target: id,
            target_index,
            name,
            index,
            attrs: &ctx.attrs,
            current_target: entry.current,
            current_context: entry.current && ctx.current,
        })
    }
}

/// Walks every context, optionally narrowed to one target and one context
/// name. Reads the store as it is when iterated.
pub fn list_contexts<'s>(
    config: &'s Config,
    target_filter: Option<&'s TargetId>,
    context_filter: Option<&'s str>,
) -> impl Iterator<Item = ContextListing<'s>> + 's {
    config
        .targets()
        .enumerate()
        .filter(move |(_, (id, _))| target_filter.is_none_or(|wanted| wanted == *id))
        .flat_map(move |(target_index, (id, entry))| {
            entry
                .contexts
                .iter()
                .enumerate()
                .filter(move |(_, (name, _))| context_filter.is_none_or(|wanted| wanted == name.as_str()))
                .map(move |(index, (name, ctx))| ContextListing {
                    target: id,
                    target_index,
                    name,
                    index,
                    attrs: &ctx.attrs,
                    current_target: entry.current,
                    current_context: entry.current && ctx.current,
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;

    const STORE: &str = r#"---
"https://a.com":
  prompts: {}
  contexts:
    alice:
      current: true
      access_token: t1
    bob:
      access_token: t2
"https://b.com":
  current: true
  contexts:
    carol:
      access_token: t3
"#;

    fn config() -> Config {
        ConfigSource::from_arg(STORE).load().unwrap()
    }

    #[test]
    fn current_context_needs_current_target() {
        let mut config = config();
        let manager = ContextManager::new(&mut config);

        // alice is flagged but her target is not the current one
        assert!(manager.current().is_none());
        let alice = manager
            .list_contexts(None, Some("alice"))
            .next()
            .unwrap();
        assert!(!alice.current_context);
    }

    #[test]
    fn select_by_index_within_current_target() {
        let mut config = config();
        let mut manager = ContextManager::new(&mut config);

        let selected = manager.select_context("0").unwrap();
        assert_eq!(selected.name, "carol");
        assert_eq!(selected.target.as_str(), "https://b.com");
        assert!(selected.current_context);
    }

    #[test]
    fn select_without_target_fails() {
        let mut config = Config::default();
        let mut manager = ContextManager::new(&mut config);
        assert!(matches!(
            manager.select_context("alice"),
            Err(ConfigError::NoCurrentTarget)
        ));
    }

    #[test]
    fn trace_flag_round_trip() {
        let mut config = config();
        let mut manager = ContextManager::new(&mut config);
        manager.select_context("carol").unwrap();

        manager.set_trace(true).unwrap();
        assert_eq!(manager.current().unwrap().attrs[TRACE], Value::Bool(true));

        manager.set_trace(false).unwrap();
        assert!(!manager.current().unwrap().attrs.contains_key(TRACE));
    }

    #[test]
    fn trace_without_context_fails() {
        let mut config = config();
        let mut manager = ContextManager::new(&mut config);
        assert!(matches!(
            manager.set_trace(true),
            Err(ConfigError::NoCurrentContext { .. })
        ));
    }

    #[test]
    fn listing_needs_only_shared_access() {
        let config = config();
        let names: Vec<_> = list_contexts(&config, None, Some("bob"))
            .map(|c| (c.target.as_str(), c.index))
            .collect();
        assert_eq!(names, vec![("https://a.com", 1)]);
    }

    #[test]
    fn listing_filters_and_orders() {
        let mut config = config();
        let manager = ContextManager::new(&mut config);

        let all: Vec<_> = manager
            .list_contexts(None, None)
            .map(|c| (c.target_index, c.index, c.name))
            .collect();
        assert_eq!(all, vec![(0, 0, "alice"), (0, 1, "bob"), (1, 0, "carol")]);

        let target = config_target(&manager, 0);
        let names: Vec<_> = manager
            .list_contexts(Some(&target), None)
            .map(|c| c.name.to_owned())
            .collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    fn config_target(manager: &ContextManager<'_>, index: usize) -> TargetId {
        manager
            .list_contexts(None, None)
            .find(|c| c.target_index == index)
            .map(|c| c.target.clone())
            .unwrap()
    }
}
