use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trigger local and cloud actions from hand gestures.
#[derive(Debug, Parser)]
#[command(name = "gesture", version, about)]
pub struct Cli {
    /// TOML config file (defaults to the built-in gesture vocabulary).
    #[arg(long, global = true, env = "GESTURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug-level logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the gesture a finger vector maps to.
    Classify {
        /// Finger vector, thumb first: "01100" or "0,1,1,0,0".
        fingers: String,
    },

    /// Process one capture event and print its outcome as JSON.
    Run {
        /// Finger vector, or "none" when no hand was detected.
        capture: String,

        /// Log the action instead of executing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Read one capture event per stdin line and process them in order.
    Watch {
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the gesture guide.
    Guide {
        #[arg(long)]
        json: bool,
    },
}
