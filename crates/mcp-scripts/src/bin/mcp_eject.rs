//! mcp-eject - stop depending on mcp-scripts
//!
//! Copies the setup script into the project, rewrites the managed scripts to
//! call the build tool directly and swaps the mcp-scripts dependency for it.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use mcp_init_core::eject::{own_package_root, AssetSearch, EjectionPlan, Ejector};
use mcp_init_core::ProxyConfig;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "mcp-eject")]
#[command(about = "Eject from mcp-scripts. This is a one-way operation.")]
#[command(version)]
pub struct Args {
    /// Show what ejection would change without touching the project
    #[arg(long)]
    pub dry_run: bool,
}

fn print_plan(plan: &EjectionPlan, proxy: &ProxyConfig) {
    for rewrite in &plan.script_rewrites {
        match &rewrite.to {
            Some(to) => println!(
                "  {} script {}: {} {} {}",
                "~".yellow(),
                rewrite.name.bold(),
                rewrite.from.dimmed(),
                "->".blue(),
                to
            ),
            None => println!("  {} script {}", "-".red(), rewrite.name.bold()),
        }
    }
    if let Some(pin) = &plan.build_tool {
        if pin.added {
            println!(
                "  {} devDependency {}@{}",
                "+".green(),
                pin.package.bold(),
                pin.version
            );
        } else {
            println!(
                "  {} {} already exists in project devDependencies",
                "=".dimmed(),
                pin.package.bold()
            );
        }
    }
    for table in &plan.removed_from {
        println!("  {} {} from {}", "-".red(), proxy.package_name.bold(), table);
    }
    println!(
        "  {} {}",
        "+".green(),
        relative(&plan.project_root, &plan.setup_target)
    );
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn run(args: &Args) -> Result<()> {
    let proxy = ProxyConfig::default();
    let root = std::env::current_dir()?;
    let search = AssetSearch::new(&proxy, &root, own_package_root().as_deref());
    let mut ejector = Ejector::new(&root, proxy.clone(), search);

    println!("{}", format!("Ejecting from {}...", proxy.package_name).cyan().bold());
    println!("Performing pre-flight checks...");
    let plan = ejector.preflight()?;
    println!("{}", "Pre-flight checks passed.".green());

    for warning in &plan.warnings {
        println!("{} {}", "Warning:".yellow().bold(), warning);
    }

    println!();
    print_plan(&plan, &proxy);
    println!();

    if args.dry_run {
        println!("{}", "Dry run: no files were changed.".dimmed());
        return Ok(());
    }

    ejector.apply(&plan)?;

    println!("{}", "Ejection successful!".green().bold());
    println!(
        "Please run '{}' (or 'yarn install' or 'pnpm install') to update your dependencies.",
        "npm install".cyan()
    );
    println!("Your build, dev, and setup scripts have been updated to run directly.");
    println!(
        "Configuration files like {} have been copied to the '{}' directory.",
        proxy.setup_asset, proxy.scripts_dir
    );
    println!("You are now responsible for maintaining these configurations and dependencies.");

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!();
        eprintln!("{} {:#}", "Ejection failed:".red().bold(), e);
        std::process::exit(1);
    }
}
