use crate::quality::directive_for;
use crate::room::Rooms;
use crate::signaling::EventSink;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};
use vinyasa_core::{
    AdaptationDirective, IssueType, QualitySample, ServerEvent, SessionId, UserId,
};

/// Ingests per-connection quality reports, scores them, and emits
/// advisory events. Scoring thresholds are deliberately tighter than
/// alerting thresholds: the score degrades before the room is told.
pub struct QualityAdvisor {
    rooms: Arc<Rooms>,
    sink: Arc<dyn EventSink>,
    samples: DashMap<(SessionId, UserId), VecDeque<QualitySample>>,
    history: usize,
}

/// 0-100 health score. Deductions are independent and additive; the
/// result is floored at zero.
pub fn score(sample: &QualitySample) -> u8 {
    let mut score: i32 = 100;
    if sample.packet_loss_pct > 5.0 {
        score -= 20;
    }
    if sample.latency_ms > 200.0 {
        score -= 15;
    }
    if sample.bitrate_kbps < 500.0 {
        score -= 25;
    }
    if sample.jitter_ms > 30.0 {
        score -= 10;
    }
    score.max(0) as u8
}

/// Alerting predicate, looser than the scoring deductions so alerts fire
/// less eagerly than the score degrades.
pub fn needs_alert(sample: &QualitySample) -> bool {
    sample.packet_loss_pct > 5.0
        || sample.latency_ms > 300.0
        || sample.bitrate_kbps < 500.0
        || sample.jitter_ms > 50.0
}

impl QualityAdvisor {
    pub fn new(rooms: Arc<Rooms>, sink: Arc<dyn EventSink>, history: usize) -> Self {
        Self {
            rooms,
            sink,
            samples: DashMap::new(),
            history,
        }
    }

    /// Store one sample (bounded window per pair), compute its score,
    /// and broadcast a one-shot `quality-alert` when the sample trips
    /// the alerting thresholds.
    pub async fn record_sample(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        sample: QualitySample,
    ) -> u8 {
        let sample_score = score(&sample);
        let alert = needs_alert(&sample);

        {
            let mut window = self
                .samples
                .entry((session_id.clone(), user_id.clone()))
                .or_default();
            window.push_back(sample);
            while window.len() > self.history {
                window.pop_front();
            }
        }

        if alert {
            warn!(
                "Poor connection quality for {user_id} in session {session_id} (score {sample_score})"
            );
            self.rooms
                .broadcast(
                    session_id,
                    ServerEvent::QualityAlert {
                        session_id: session_id.clone(),
                        user_id: user_id.clone(),
                        score: sample_score,
                    },
                    None,
                )
                .await;
        }

        sample_score
    }

    /// Latest score for a pair, if any samples are retained.
    pub fn latest_score(&self, session_id: &SessionId, user_id: &UserId) -> Option<u8> {
        self.samples
            .get(&(session_id.clone(), user_id.clone()))
            .and_then(|w| w.back().map(score))
    }

    /// Resolve a named issue to its fixed directive and send it to the
    /// affected user's own connection. Never fails: an unknown issue
    /// yields `maintain-current`, and a missing connection just means
    /// nobody to advise.
    pub async fn adapt(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        issue: IssueType,
    ) -> AdaptationDirective {
        let directive = directive_for(issue);

        if let Some(target) = self.rooms.connection_of(session_id, user_id) {
            self.sink
                .deliver(
                    target,
                    ServerEvent::QualityAdaptation {
                        session_id: session_id.clone(),
                        directive: directive.clone(),
                    },
                )
                .await;
        } else {
            debug!("No live connection for {user_id} in {session_id}, directive not delivered");
        }

        directive
    }

    /// Drop retained history for a departed connection.
    pub(crate) fn forget(&self, session_id: &SessionId, user_id: &UserId) {
        self.samples.remove(&(session_id.clone(), user_id.clone()));
    }
}
