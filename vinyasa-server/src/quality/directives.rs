use vinyasa_core::{AdaptationAction, AdaptationDirective, IssueType};

/// Static issue-to-directive lookup. Advisory only: unknown issues map
/// to a no-op directive rather than an error, so this path can never
/// block the media pipeline.
pub fn directive_for(issue: IssueType) -> AdaptationDirective {
    match issue {
        IssueType::HighLatency => AdaptationDirective {
            action: AdaptationAction::ReduceResolution,
            resolution: Some("854x480".to_string()),
            bitrate_kbps: Some(600),
            frame_rate: Some(20),
        },
        IssueType::HighPacketLoss => AdaptationDirective {
            action: AdaptationAction::ReduceBitrate,
            resolution: Some("640x360".to_string()),
            bitrate_kbps: Some(400),
            frame_rate: Some(15),
        },
        IssueType::LowBandwidth => AdaptationDirective {
            action: AdaptationAction::AudioOnly,
            resolution: None,
            bitrate_kbps: Some(64),
            frame_rate: None,
        },
        IssueType::HighCpu => AdaptationDirective {
            action: AdaptationAction::ReduceFramerate,
            resolution: Some("640x360".to_string()),
            bitrate_kbps: Some(500),
            frame_rate: Some(15),
        },
        IssueType::Unknown => AdaptationDirective::maintain_current(),
    }
}
