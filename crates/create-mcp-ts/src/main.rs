//! create-mcp-ts CLI - Project scaffolding for TypeScript MCP servers

use clap::Parser;
use create_mcp_ts::{CreateMcpTsConfig, AFTER_HELP, CLI_VERSION};
use mcp_init_core::tui::CreateArgs;
use mcp_init_core::{PackageManager, ProductConfig, ScaffoldError};

#[derive(Parser, Debug)]
#[command(name = "create-mcp-ts")]
#[command(about = "Create a new TypeScript MCP server")]
#[command(version)]
#[command(override_usage = "create-mcp-ts <project-directory> [options]")]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Directory to create the server in
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<String>,

    /// Specify a template for the created project
    #[arg(long, value_name = "path-to-template")]
    pub template: Option<String>,

    /// Package manager used to install the template and dependencies
    #[arg(long, value_enum, default_value_t = PackageManager::Npm)]
    pub package_manager: PackageManager,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project_dir: args.project_directory,
            template: args.template,
        }
    }
}

/// Options that take a value in the following argument
const VALUE_OPTIONS: &[&str] = &["--template", "--package-manager"];

/// Flags clap handles itself
const BUILTIN_FLAGS: &[&str] = &["-h", "--help", "-V", "--version"];

/// Drop unknown options so they never hide the known ones around them
///
/// Keeps the program name, the known options with their values, and the first
/// positional. Everything after `--` is treated as positional.
fn known_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<String> = args.next().into_iter().collect();
    let mut positional = false;
    let mut only_positionals = false;

    while let Some(arg) = args.next() {
        if only_positionals || !arg.starts_with('-') || arg == "-" {
            if !positional {
                positional = true;
                if arg.starts_with('-') {
                    kept.push("--".to_string());
                }
                kept.push(arg);
            }
            continue;
        }
        if arg == "--" {
            only_positionals = true;
            continue;
        }

        let flag = arg.split_once('=').map_or(arg.as_str(), |(flag, _)| flag);
        if VALUE_OPTIONS.contains(&flag) {
            let inline = flag.len() != arg.len();
            kept.push(arg);
            if !inline {
                kept.extend(args.next());
            }
        } else if BUILTIN_FLAGS.contains(&flag) {
            kept.push(arg);
        }
    }
    kept
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse_from(known_args(std::env::args()));
    let config = CreateMcpTsConfig {
        package_manager: args.package_manager,
    };

    let result = mcp_init_core::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        let _ = cliclack::outro_cancel(format!("{:#}", e));
        if e.downcast_ref::<ScaffoldError>().is_some() {
            eprintln!("If you think this is a bug, please file an issue: {}", config.issues_url());
        }
        std::process::exit(1);
    }
}
