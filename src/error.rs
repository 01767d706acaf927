use crate::{config::ConfigError, target::ProbeError, target::TargetError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Target(#[from] TargetError),
    #[error("Unable to set up server probe: {0}")]
    Probe(#[from] ProbeError),
}
