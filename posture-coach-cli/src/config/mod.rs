use anyhow::{Context, Result};
use posture_coach_core::services::DEFAULT_SNAPSHOT_INTERVAL_MS;
use posture_coach_core::{LandmarkLayout, ScoringPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub scoring: ScoringPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Keypoint layout of recorded frames
    #[serde(default)]
    pub layout: LandmarkLayout,

    /// Snapshot cadence for session summaries
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval_ms: u64,
}

// Default value functions
fn default_snapshot_interval() -> u64 {
    DEFAULT_SNAPSHOT_INTERVAL_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            scoring: ScoringPolicy::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            layout: LandmarkLayout::default(),
            snapshot_interval_ms: default_snapshot_interval(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.posture-coach/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".posture-coach"))
    }

    /// Get config file path (~/.posture-coach/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default location
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from file
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_file = Self::resolve_path(explicit)?;

        if !config_file.exists() {
            if explicit.is_some() {
                anyhow::bail!("Config file not found: {}", config_file.display());
            }
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.validate()?;

        tracing::debug!(path = %config_file.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate().context("Invalid [scoring] section")?;
        if self.analysis.snapshot_interval_ms == 0 {
            anyhow::bail!("analysis.snapshot_interval_ms must be greater than zero");
        }
        Ok(())
    }
}
