use super::render;
use crate::config::Config;
use crate::context::ContextManager;
use crate::error::Result;

pub fn handle(config: &mut Config, context: Option<&str>, trace: Option<bool>) -> Result<()> {
    let mut manager = ContextManager::new(config);

    if let Some(context) = context {
        manager.select_context(context)?;
    }
    if let Some(enabled) = trace {
        manager.set_trace(enabled)?;
    }

    match manager.current() {
        Some(current) => render::contexts(manager.config(), Some(current.target), Some(current.name)),
        None => render::no_context(manager.config().current_target()),
    }
    Ok(())
}

pub fn list(config: &Config) {
    render::contexts(config, None, None);
}
