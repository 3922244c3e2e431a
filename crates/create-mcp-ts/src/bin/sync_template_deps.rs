//! Re-pin mcp-scripts in the templates shipped with this repository (for development use)

use anyhow::Result;
use clap::Parser;
use create_mcp_ts::{CreateMcpTsConfig, CLI_VERSION};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sync-template-deps")]
#[command(about = "Pin the mcp-scripts dependency of every template to ^<version>")]
#[command(disable_version_flag = true)]
pub struct Args {
    /// mcp-scripts version to pin; defaults to this workspace's version
    #[arg(long)]
    pub version: Option<String>,

    /// Directory containing one template per subdirectory
    #[arg(long = "templates-dir", default_value = "templates")]
    pub templates_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let version = args.version.as_deref().unwrap_or(CLI_VERSION);

    mcp_init_core::templates::sync_template_deps(
        &CreateMcpTsConfig::default(),
        &args.templates_dir,
        version,
    )?;

    Ok(())
}
