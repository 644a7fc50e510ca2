/// Tunables for the coordination core. Constructed by the embedding
/// server; the defaults match the production platform.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Capacity recorded on newly created rooms. Enforcement happens in
    /// the admission caller against the booking database, not here.
    pub default_max_participants: usize,

    /// Warning count at which a warn auto-escalates to a ban.
    pub warn_threshold: u32,

    /// Duration of the ban issued by warn auto-escalation.
    pub auto_ban_minutes: i64,

    /// Quality samples retained per (session, user) pair.
    pub quality_history: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            default_max_participants: 100,
            warn_threshold: 3,
            auto_ban_minutes: 60,
            quality_history: 30,
        }
    }
}
