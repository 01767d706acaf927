//! Target and context selection for authorization server clients.
//!
//! A target is a server, canonicalized by [`target::normalize`]. Each target
//! keeps the identities (contexts) that were used against it. The
//! [`config::Config`] holds both levels and remembers which target, and which
//! context within it, is current.

pub mod cmd;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod target;
