//! mcp-setup - register the current project with desktop MCP clients

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use mcp_init_core::setup::{known_clients, register, server_name, ServerEntry, SetupOutcome};

#[derive(Parser, Debug)]
#[command(name = "mcp-setup")]
#[command(about = "Set up MCP clients: Cursor, Windsurf, and Claude Desktop")]
#[command(version)]
pub struct Args {}

fn run() -> Result<()> {
    let project = std::env::current_dir()?;
    let name = server_name(&project)?;
    let entry = ServerEntry::for_project(&project);

    for client in known_clients() {
        match register(&client, &name, &entry)? {
            SetupOutcome::Added => println!(
                "{} Added \"{}\" to {} config.",
                "✓".green(),
                name,
                client.name
            ),
            SetupOutcome::AlreadyConfigured => println!(
                "{} MCP server \"{}\" already exists in {} config. Skipping...",
                "-".dimmed(),
                name,
                client.name
            ),
            SetupOutcome::ClientNotInstalled => println!(
                "{} {} is not installed. Skipping...",
                "-".dimmed(),
                client.name
            ),
        }
    }

    Ok(())
}

fn main() {
    let _ = Args::parse();
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
