pub mod config;
pub mod coordinator;
pub mod moderation;
pub mod quality;
pub mod registry;
pub mod relay;
pub mod room;
pub mod signaling;

pub use config::CoordinatorConfig;
pub use coordinator::Coordinator;
pub use moderation::{AuditSink, MemoryAuditLog, ModerationResult, Moderator, TracingAuditLog};
pub use quality::QualityAdvisor;
pub use registry::{Connection, ConnectionRegistry};
pub use relay::SignalingRelay;
pub use room::Rooms;
pub use signaling::{EventSink, GatewayState, SignalingService, router, ws_handler};
