use super::TargetId;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to determine configuration directory")]
    MissingConfigDir,
    #[error("No target set")]
    NoCurrentTarget,
    #[error("No context set in target {target}")]
    NoCurrentContext { target: TargetId },
    #[error("Context '{name}' not found in target {target}")]
    UnknownContext { target: TargetId, name: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration data: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
