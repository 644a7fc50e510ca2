use std::sync::Mutex;
use tracing::info;
use vinyasa_core::{ModerationAction, ModerationRecord};

/// Sink for moderation audit records. Appended once per successful
/// action; never called for a rejected one. The production embedding
/// hands records to a durable moderation log store.
pub trait AuditSink: Send + Sync {
    fn append(&self, record: ModerationRecord);
}

/// Default sink: structured log only.
pub struct TracingAuditLog;

impl AuditSink for TracingAuditLog {
    fn append(&self, record: ModerationRecord) {
        info!(
            "Moderation: {} {} -> {} in session {} (reason: {:?})",
            record.moderator_id,
            record.action.name(),
            record.target_user_id,
            record.session_id,
            record.reason
        );
    }
}

/// In-memory sink for tests and local runs.
#[derive(Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<ModerationRecord>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ModerationRecord> {
        self.records.lock().expect("audit log poisoned").clone()
    }

    pub fn count_for(&self, action: ModerationAction) -> usize {
        self.records
            .lock()
            .expect("audit log poisoned")
            .iter()
            .filter(|r| r.action == action)
            .count()
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&self, record: ModerationRecord) {
        self.records.lock().expect("audit log poisoned").push(record);
    }
}
