use crate::config::{ConfigError, TargetId};
use std::fmt;
use thiserror::Error;

pub type TargetResult<T> = Result<T, TargetError>;
pub type ProbeResult<T> = Result<T, ProbeError>;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Invalid target address '{input}': {reason}")]
    InvalidInput { input: String, reason: String },
    #[error("Invalid target index {index} ({count} targets known)")]
    UnknownTargetIndex { index: usize, count: usize },
    #[error("Unable to reach a target for '{input}':{}", Attempts(.attempts))]
    UnreachableTarget {
        input: String,
        attempts: Vec<ProbeFailure>,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One candidate that was probed and rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub target: TargetId,
    pub message: String,
}

struct Attempts<'a>(&'a [ProbeFailure]);

impl fmt::Display for Attempts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in self.0 {
            write!(f, "\n  failed to access {}: {}", failure.target, failure.message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid response from {url}: no login prompts")]
    InvalidResponse { url: String },
}
