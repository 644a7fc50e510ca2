use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reported connection quality measurement for a (session, user)
/// pair. Append-only; the advisor keeps only a short rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySample {
    pub bitrate_kbps: f64,
    pub latency_ms: f64,
    pub packet_loss_pct: f64,
    pub jitter_ms: f64,
    pub resolution: Option<String>,
    pub frame_rate: Option<u32>,
    pub cpu_usage_pct: Option<f64>,
    pub memory_usage_pct: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Named degradation cause a client (or the alerting path) reports when
/// asking for an adaptation. Unrecognized names deserialize to `Unknown`
/// so the advisory path never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    HighLatency,
    HighPacketLoss,
    LowBandwidth,
    HighCpu,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdaptationAction {
    ReduceResolution,
    ReduceBitrate,
    ReduceFramerate,
    AudioOnly,
    MaintainCurrent,
}

/// Advisory directive sent back to the affected connection. Fields left
/// `None` mean "keep current".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationDirective {
    pub action: AdaptationAction,
    pub resolution: Option<String>,
    pub bitrate_kbps: Option<u32>,
    pub frame_rate: Option<u32>,
}

impl AdaptationDirective {
    pub fn maintain_current() -> Self {
        Self {
            action: AdaptationAction::MaintainCurrent,
            resolution: None,
            bitrate_kbps: None,
            frame_rate: None,
        }
    }
}
