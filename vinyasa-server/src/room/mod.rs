mod room;
mod rooms;

pub use room::*;
pub use rooms::*;
