use anyhow::{Context, Result};
use clap::Args;
use posture_coach_core::{PostureAnalyzer, PostureMetrics};
use serde::Serialize;
use std::io::{self, Write};

use super::LayoutArg;
use crate::config::Config;
use crate::input::{self, FrameReader};

#[derive(Args)]
pub struct AnalyzeCommand {
    /// JSON Lines recording to read ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Keypoint layout of the recording (defaults to the configured layout)
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Pretty-print each result
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct FrameResult<'a> {
    timestamp_ms: u64,
    metrics: &'a PostureMetrics,
}

impl AnalyzeCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let analyzer = PostureAnalyzer::with_policy(config.scoring.clone())
            .context("Invalid scoring policy")?;
        let layout = self
            .layout
            .map(Into::into)
            .unwrap_or(config.analysis.layout);

        let source = input::open(&self.input)
            .with_context(|| format!("Failed to open input: {}", self.input))?;
        let mut frames = FrameReader::new(source, layout);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut analyzed = 0usize;

        for timed in frames.by_ref() {
            let timed = timed?;
            let metrics = analyzer.analyze(&timed.frame);
            let result = FrameResult {
                timestamp_ms: timed.timestamp_ms,
                metrics: &metrics,
            };

            if self.pretty {
                serde_json::to_writer_pretty(&mut out, &result)?;
            } else {
                serde_json::to_writer(&mut out, &result)?;
            }
            writeln!(out)?;
            analyzed += 1;
        }

        out.flush()?;
        tracing::info!(
            analyzed,
            skipped_empty = frames.skipped_empty(),
            skipped_invalid = frames.skipped_invalid(),
            layout = %layout,
            "Analysis complete"
        );

        Ok(())
    }
}
