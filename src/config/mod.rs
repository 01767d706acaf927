mod error;
mod model;
mod selector;
mod service;
mod store;

pub use error::*;
pub use model::*;
pub use selector::*;
pub use service::*;
pub use store::*;
