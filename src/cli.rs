// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "doomsday",
    version = env!("CARGO_PKG_VERSION"),
    about = "Days since the last incident"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[arg(long, action)]
    pub no_color: bool,

    /// Start counting from this instant instead of the configured one (RFC 3339)
    #[arg(long, value_name = "TIMESTAMP")]
    pub since: Option<String>,

    /// Frames per second
    #[arg(long, value_name = "N")]
    pub fps: Option<u64>,

    /// Draw a single frame and exit
    #[arg(long, action)]
    pub once: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Reset the incident timer (asks for confirmation)")]
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    #[command(about = "Show the time since the last incident")]
    Info {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "List past incidents, most recent first")]
    History,

    #[command(about = "Stop the running counter")]
    Stop,

    #[command(about = "Print the color legend")]
    Legend,
}
