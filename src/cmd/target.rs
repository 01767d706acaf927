use super::render;
use crate::config::{Config, TargetId};
use crate::error::Result;
use crate::target::{HttpProbe, Probe, ProbeResult, ResolveOptions, ServerInfo, TargetResolver};
use indicatif::ProgressBar;
use std::time::Duration;

/// Shows a spinner on stderr while the server is being asked.
struct Spinning<P>(P);

impl<P: Probe> Probe for Spinning<P> {
    fn probe(&self, target: &TargetId) -> ProbeResult<ServerInfo> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("contacting {target}"));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.0.probe(target);
        spinner.finish_and_clear();
        result
    }
}

pub fn handle(config: &mut Config, target: Option<&str>, force: bool, timeout: Duration) -> Result<()> {
    let probe = Spinning(HttpProbe::new(timeout)?);
    let report = TargetResolver::new(config, probe, ResolveOptions { force }).select(target)?;

    render::target_report(&report);
    Ok(())
}

pub fn list(config: &Config) {
    render::targets(config);
}
