//! CLI argument definitions for the `recall` binary.

use clap::Parser;

pub mod chat;

#[derive(Parser)]
#[command(
    name = "recall",
    about = "Chat agent with Postgres-backed long-term memory",
    version
)]
pub struct Cli {
    /// Conversation thread id (partitions history and remembered facts)
    #[arg(long, default_value = "demo-thread")]
    pub thread: String,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
