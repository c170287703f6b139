mod analyze;
mod config_cmd;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use posture_coach_core::LandmarkLayout;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;

pub use analyze::AnalyzeCommand;
pub use session::SessionCommand;

#[derive(Parser)]
#[command(name = "posture-coach")]
#[command(about = "Seated posture analysis for recorded pose landmarks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "POSTURE_COACH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every frame of a recording
    Analyze(AnalyzeCommand),

    /// Summarize a recording as a monitoring session
    Session(SessionCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration file location
    Path,
}

/// Keypoint layout as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// MediaPipe pose landmarker (33 points)
    Mediapipe,
    /// COCO keypoints (17 points)
    Coco,
}

impl From<LayoutArg> for LandmarkLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Mediapipe => LandmarkLayout::MediaPipe,
            LayoutArg::Coco => LandmarkLayout::Coco,
        }
    }
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_path = self.config.as_deref();

        match self.command {
            Commands::Analyze(cmd) => cmd.execute(&Config::load(config_path)?),
            Commands::Session(cmd) => cmd.execute(&Config::load(config_path)?),
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path),
                ConfigSubcommands::Init { force } => config_cmd::init_config(config_path, force),
                ConfigSubcommands::Path => config_cmd::config_path(config_path),
            },
            Commands::Completions { shell } => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                write_completions(shell, &mut out)
            }
        }
    }
}

/// Write a completion script; a reader that hangs up early is not an error
fn write_completions(shell: clap_complete::Shell, out: &mut impl Write) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut cmd, name, &mut script);

    match out.write_all(&script).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.context("Failed to write completions"),
    }
}
