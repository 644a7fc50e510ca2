mod advisor;
mod directives;

pub use advisor::*;
pub use directives::*;
