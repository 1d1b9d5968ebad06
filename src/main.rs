use anyhow::Context;
use clap::Parser;
use hl7_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<commands::RunStats> = runtime.block_on(async {
        let shutdown_signal = async {
            // Without a handler, never resolve and let the command finish
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(command) => result.context("Command failed"),
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, stopping batch...");
                Err(anyhow::anyhow!("Processing interrupted by user"))
            }
        }
    });

    match result {
        Ok(stats) => {
            if stats.files_failed > 0 {
                process::exit(2);
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("HL7 Processor - Bedside Monitor Feed Parser");
    println!("===========================================");
    println!();
    println!("Parse HL7 v2 waveform, alarm, vitals and admission messages into");
    println!("typed records with canonical bed locations.");
    println!();
    println!("USAGE:");
    println!("    hl7-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse message files or directories (main command)");
    println!("    inspect     Print the segment tree of each message in a file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Summarize a directory of feeds:");
    println!("    hl7-processor parse /data/feeds");
    println!();
    println!("    # Emit channel rows as JSON with custom location tables:");
    println!("    hl7-processor parse feed.hl7 --format json --tables beds.json");
    println!();
    println!("    # Show message structure:");
    println!("    hl7-processor inspect feed.hl7");
}
