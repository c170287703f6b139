/// Session Tracker
///
/// Samples per-frame posture metrics into a monitoring session:
/// - Throttles input to one observation per distinct, increasing frame timestamp
/// - Captures a snapshot of the latest metrics on a fixed interval
/// - Counts alerts raised by the caller
/// - Produces an end-of-session summary

use crate::error::{PostureError, Result};
use crate::models::posture::{PostureMetrics, PostureStatus};
use crate::models::session::{AlertKind, PostureAlert, PostureSnapshot, SessionSummary};

/// Default snapshot cadence
pub const DEFAULT_SNAPSHOT_INTERVAL_MS: u64 = 5_000;

/// Session tracker state
#[derive(Debug, Clone)]
pub struct SessionTracker {
    started_at_ms: u64,
    interval_ms: u64,
    /// Timestamp at which the next snapshot becomes due
    next_snapshot_ms: u64,
    last_frame_ms: Option<u64>,
    frames_analyzed: u64,
    latest: Option<PostureMetrics>,
    snapshots: Vec<PostureSnapshot>,
    alerts: Vec<PostureAlert>,
}

impl SessionTracker {
    /// Start a session with the default snapshot interval
    pub fn new(started_at_ms: u64) -> Self {
        Self::build(started_at_ms, DEFAULT_SNAPSHOT_INTERVAL_MS)
    }

    /// Start a session with a custom snapshot interval
    pub fn with_interval(started_at_ms: u64, interval_ms: u64) -> Result<Self> {
        if interval_ms == 0 {
            return Err(PostureError::InvalidInterval);
        }
        Ok(Self::build(started_at_ms, interval_ms))
    }

    fn build(started_at_ms: u64, interval_ms: u64) -> Self {
        tracing::debug!(started_at_ms, interval_ms, "Posture session started");

        Self {
            started_at_ms,
            interval_ms,
            next_snapshot_ms: started_at_ms.saturating_add(interval_ms),
            last_frame_ms: None,
            frames_analyzed: 0,
            latest: None,
            snapshots: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// Record the metrics of one analyzed frame
    ///
    /// Returns the snapshot captured by this observation, if one became due.
    /// Frames whose timestamp does not advance past the previous frame are
    /// ignored. Snapshot ticks missed during a gap are not backfilled.
    pub fn observe(&mut self, timestamp_ms: u64, metrics: &PostureMetrics) -> Option<&PostureSnapshot> {
        if self.last_frame_ms.is_some_and(|last| timestamp_ms <= last) {
            tracing::trace!(timestamp_ms, "Skipping repeated frame timestamp");
            return None;
        }

        self.last_frame_ms = Some(timestamp_ms);
        self.frames_analyzed += 1;
        self.latest = Some(metrics.clone());

        if timestamp_ms < self.next_snapshot_ms {
            return None;
        }

        let elapsed_intervals = (timestamp_ms - self.next_snapshot_ms) / self.interval_ms + 1;
        self.next_snapshot_ms = self
            .next_snapshot_ms
            .saturating_add(elapsed_intervals.saturating_mul(self.interval_ms));

        let snapshot = PostureSnapshot::from_metrics(timestamp_ms, metrics);
        tracing::debug!(
            captured_at_ms = snapshot.captured_at_ms,
            posture_score = snapshot.posture_score,
            posture_state = %snapshot.posture_state,
            "Captured posture snapshot"
        );
        self.snapshots.push(snapshot);
        self.snapshots.last()
    }

    /// Record an alert shown to the user
    pub fn record_alert(
        &mut self,
        timestamp_ms: u64,
        alert_type: AlertKind,
        message: impl Into<String>,
    ) {
        let alert = PostureAlert {
            raised_at_ms: timestamp_ms,
            alert_type,
            message: message.into(),
        };
        tracing::debug!(
            raised_at_ms = alert.raised_at_ms,
            alert_type = %alert.alert_type,
            message = %alert.message,
            "Posture alert"
        );
        self.alerts.push(alert);
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Most recently observed metrics
    pub fn latest(&self) -> Option<&PostureMetrics> {
        self.latest.as_ref()
    }

    pub fn snapshots(&self) -> &[PostureSnapshot] {
        &self.snapshots
    }

    pub fn alerts(&self) -> &[PostureAlert] {
        &self.alerts
    }

    pub fn frames_analyzed(&self) -> u64 {
        self.frames_analyzed
    }

    /// Number of recorded alerts of one kind
    pub fn alert_count(&self, kind: AlertKind) -> usize {
        self.alerts.iter().filter(|a| a.alert_type == kind).count()
    }

    /// End the session and aggregate its snapshots
    pub fn finish(self, ended_at_ms: u64) -> SessionSummary {
        let snapshot_count = self.snapshots.len();

        let (avg_posture_score, good_posture_percent) = if snapshot_count == 0 {
            (None, None)
        } else {
            let total: u64 = self
                .snapshots
                .iter()
                .map(|s| u64::from(s.posture_score))
                .sum();
            let good = self
                .snapshots
                .iter()
                .filter(|s| s.posture_state == PostureStatus::Good)
                .count();

            let avg = (total as f64 / snapshot_count as f64).round() as u8;
            let percent = good as f64 / snapshot_count as f64 * 100.0;
            (Some(avg), Some(percent))
        };

        let summary = SessionSummary {
            started_at_ms: self.started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(self.started_at_ms),
            frames_analyzed: self.frames_analyzed,
            snapshot_count,
            avg_posture_score,
            good_posture_percent,
            total_alerts: self.alerts.len(),
            neck_alerts: self.alert_count(AlertKind::Neck),
            shoulder_alerts: self.alert_count(AlertKind::Shoulder),
            spine_alerts: self.alert_count(AlertKind::Spine),
        };

        tracing::info!(
            duration_ms = summary.duration_ms,
            snapshots = summary.snapshot_count,
            alerts = summary.total_alerts,
            "Posture session finished"
        );

        summary
    }
}
