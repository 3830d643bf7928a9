//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};

/// Daemon address used when neither --url nor $SENSED_URL is set
pub const DEFAULT_URL: &str = "http://127.0.0.1:8001";

/// SupportSense CLI
#[derive(Debug, Parser)]
#[command(name = "sensectl")]
#[command(about = "SupportSense - support ticket triage client", long_about = None)]
#[command(version = sense_shared::VERSION)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Base URL of the sensed API
    #[arg(long, global = true, env = "SENSED_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check daemon health
    Status,

    /// List tickets, most urgent first
    List,

    /// Submit a new ticket
    Create {
        /// Ticket text
        text: String,

        /// Origin tag (defaults to "web" on the daemon)
        #[arg(long)]
        source: Option<String>,
    },

    /// Update status, assignee or rating of a ticket
    Update {
        /// Ticket id
        id: i64,

        #[arg(long)]
        status: Option<String>,

        /// Agent name
        #[arg(long = "assign")]
        assigned_to: Option<String>,

        /// Customer rating
        #[arg(long, allow_negative_numbers = true)]
        rating: Option<i64>,
    },

    /// Ask the daemon for a canned reply
    Suggest {
        text: String,
    },

    /// Ask the daemon for a priority estimate
    Analyze {
        text: String,
    },

    /// Classify text locally without contacting the daemon
    Classify {
        text: String,
    },
}
