mod error;
mod normalize;
mod probe;
mod resolver;

pub use error::*;
pub use normalize::*;
pub use probe::*;
pub use resolver::*;
