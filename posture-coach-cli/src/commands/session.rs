use anyhow::{Context, Result};
use clap::Args;
use posture_coach_core::{
    AlertKind, PostureAlert, PostureAnalyzer, PostureSnapshot, PostureStatus, SessionSummary,
    SessionTracker,
};
use serde::Serialize;

use super::LayoutArg;
use crate::config::Config;
use crate::input::{self, FrameReader};

/// Alert text when a poor snapshot carries no specific issue
const GENERIC_ALERT: &str = "Poor posture detected — take a moment to reset";

#[derive(Args)]
pub struct SessionCommand {
    /// JSON Lines recording to read ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Keypoint layout of the recording (defaults to the configured layout)
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Snapshot interval in milliseconds (defaults to the configured interval)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Include every snapshot and alert alongside the summary
    #[arg(long)]
    detailed: bool,
}

#[derive(Serialize)]
struct SessionReport {
    summary: SessionSummary,
    snapshots: Vec<PostureSnapshot>,
    alerts: Vec<PostureAlert>,
}

impl SessionCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let analyzer = PostureAnalyzer::with_policy(config.scoring.clone())
            .context("Invalid scoring policy")?;
        let layout = self
            .layout
            .map(Into::into)
            .unwrap_or(config.analysis.layout);
        let interval_ms = self
            .interval_ms
            .unwrap_or(config.analysis.snapshot_interval_ms);

        let source = input::open(&self.input)
            .with_context(|| format!("Failed to open input: {}", self.input))?;
        let mut frames = FrameReader::new(source, layout);

        // The session starts with the first usable frame
        let first = frames.next().transpose()?;
        let started_at_ms = match &first {
            Some(timed) => timed.timestamp_ms,
            None => {
                tracing::warn!("No frames to analyze, reporting an empty session");
                0
            }
        };
        let mut session = SessionTracker::with_interval(started_at_ms, interval_ms)
            .context("Invalid snapshot interval")?;
        let mut ended_at_ms = started_at_ms;

        for timed in first.map(Ok).into_iter().chain(frames.by_ref()) {
            let timed = timed?;
            ended_at_ms = ended_at_ms.max(timed.timestamp_ms);

            let metrics = analyzer.analyze(&timed.frame);
            let poor_snapshot = session
                .observe(timed.timestamp_ms, &metrics)
                .map(|snapshot| snapshot.posture_state == PostureStatus::Poor)
                .unwrap_or(false);

            if poor_snapshot {
                let (kind, message) = match metrics.issues.first() {
                    Some(&issue) => (AlertKind::from(issue), issue.message()),
                    None => (AlertKind::General, GENERIC_ALERT),
                };
                session.record_alert(timed.timestamp_ms, kind, message);
            }
        }

        tracing::debug!(
            skipped_empty = frames.skipped_empty(),
            skipped_invalid = frames.skipped_invalid(),
            "Input exhausted"
        );

        let snapshots = session.snapshots().to_vec();
        let alerts = session.alerts().to_vec();
        let summary = session.finish(ended_at_ms);

        let output = if self.detailed {
            serde_json::to_string_pretty(&SessionReport {
                summary,
                snapshots,
                alerts,
            })?
        } else {
            serde_json::to_string_pretty(&summary)?
        };
        println!("{}", output);

        Ok(())
    }
}
