pub mod error;
pub mod model;

pub use error::CoordinationError;
pub use model::*;
