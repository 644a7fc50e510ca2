pub mod mock_event_sink;

pub use mock_event_sink::*;
pub use sample_helpers::*;
