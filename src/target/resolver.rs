use super::{
    ProbeFailure, Probe, Scheme, ServerInfo, TargetError, TargetResult, normalize, normalize_with,
};
use crate::config::{Attrs, Config, Selector, TargetId};
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

pub const PROMPTS: &str = "prompts";
pub const TOKEN_ENDPOINT: &str = "token_endpoint";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Accept a target without asking the server anything.
    pub force: bool,
}

/// The winning target and, when it was probed, what the server said.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub target: TargetId,
    pub server_info: Option<ServerInfo>,
}

/// The selection state after a `target` command, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub target: Option<TargetId>,
    pub context: Option<String>,
}

pub struct TargetResolver<'a, P> {
    config: &'a mut Config,
    probe: P,
    options: ResolveOptions,
}

impl<'a, P: Probe> TargetResolver<'a, P> {
    pub fn new(config: &'a mut Config, probe: P, options: ResolveOptions) -> Self {
        Self {
            config,
            probe,
            options,
        }
    }

    /// Picks the canonical target for `raw` without touching the store.
    ///
    /// Order: a positional index into the known targets, then an address
    /// with an explicit scheme, then the bare address under `https` and
    /// finally `http`. Known targets are never probed.
    pub fn resolve(&self, raw: &str) -> TargetResult<Resolution> {
        let raw = raw.trim();

        if let Selector::Index(index) = Selector::parse(raw) {
            let target = self.config.target_by_index(index).cloned().ok_or_else(|| {
                TargetError::UnknownTargetIndex {
                    index,
                    count: self.config.targets().count(),
                }
            })?;
            debug!(index, server = %target, "resolved target by index");
            return Ok(known(target));
        }

        if let Some(target) = normalize(raw, None)? {
            if self.options.force || self.config.contains_target(&target) {
                debug!(server = %target, force = self.options.force, "accepting target without probe");
                return Ok(known(target));
            }
            return self.check(target).map_err(|failure| TargetError::UnreachableTarget {
                input: raw.to_owned(),
                attempts: vec![failure],
            });
        }

        let candidates = [
            normalize_with(raw, Scheme::Https)?,
            normalize_with(raw, Scheme::Http)?,
        ];

        if let Some(target) = candidates.iter().find(|c| self.config.contains_target(c)) {
            debug!(server = %target, "bare address matches a known target");
            return Ok(known(target.clone()));
        }

        let [https, http] = candidates;
        if self.options.force {
            debug!(server = %https, "forcing https target");
            return Ok(known(https));
        }

        let mut attempts = Vec::with_capacity(2);
        for candidate in [https, http] {
            match self.check(candidate) {
                Ok(resolution) => return Ok(resolution),
                Err(failure) => attempts.push(failure),
            }
        }

        Err(TargetError::UnreachableTarget {
            input: raw.to_owned(),
            attempts,
        })
    }

    /// Resolves `raw` and makes the result the current target. Blank or
    /// absent input only reports the current selection.
    pub fn select(&mut self, raw: Option<&str>) -> TargetResult<TargetReport> {
        if let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            let Resolution {
                target,
                server_info,
            } = self.resolve(raw)?;

            self.config.set_current_target(target.clone());
            if let Some(info) = server_info {
                update_target_info(self.config, &target, info);
            }
        }

        Ok(TargetReport {
            target: self.config.current_target().cloned(),
            context: self.config.current_context().map(str::to_owned),
        })
    }

    fn check(&self, target: TargetId) -> Result<Resolution, ProbeFailure> {
        match self.probe.probe(&target) {
            Ok(info) => {
                debug!(server = %target, "target answered probe");
                Ok(Resolution {
                    target,
                    server_info: Some(info),
                })
            }
            Err(err) => {
                debug!(server = %target, error = %err, "target failed probe");
                Err(ProbeFailure {
                    target,
                    message: err.to_string(),
                })
            }
        }
    }
}

fn known(target: TargetId) -> Resolution {
    Resolution {
        target,
        server_info: None,
    }
}

/// Caches freshly probed server metadata on `target`.
///
/// Prompts are replaced, except that an empty prompt set never replaces a
/// non-empty cached one. The token endpoint is only written when reported.
pub fn update_target_info(config: &mut Config, target: &TargetId, info: ServerInfo) {
    let cached = config
        .target(target)
        .and_then(|entry| entry.attrs.get(PROMPTS))
        .is_some_and(has_content);

    let mut attrs = Attrs::new();
    if info.prompts.is_empty() && cached {
        warn!(server = %target, "server reported no prompts, keeping cached prompts");
    } else {
        let prompts: Mapping = info
            .prompts
            .into_iter()
            .map(|(key, value)| (Value::String(key), value))
            .collect();
        attrs.insert(PROMPTS.to_owned(), Value::Mapping(prompts));
    }

    if let Some(endpoint) = info.token_endpoint {
        attrs.insert(TOKEN_ENDPOINT.to_owned(), Value::String(endpoint));
    }

    config.merge_target_attrs(target, attrs);
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Mapping(map) => !map.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        _ => true,
    }
}
