//! Command implementations for the HL7 processor CLI
//!
//! Each command lives in its own module:
//! - `parse`: batch parsing with summary or JSON row output
//! - `inspect`: segment tree outline of each message in a file

pub mod inspect;
pub mod parse;
pub mod shared;

pub use shared::RunStats;

use crate::Result;
use crate::cli::args::Commands;

/// Dispatch to the subcommand handler
pub async fn run(command: Commands) -> Result<RunStats> {
    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args).await,
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args),
    }
}
