mod audit;
mod moderator;

pub use audit::*;
pub use moderator::*;
