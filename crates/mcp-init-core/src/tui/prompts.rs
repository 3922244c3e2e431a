//! Charm-style CLI output using cliclack

use crate::builder::{BuildObserver, CreatedProject, ProjectBuilder, Stage};
use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::runtime::{check_runtimes, SystemRunner};
use anyhow::Result;
use console::style;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create; its basename becomes the package name
    pub project_dir: Option<String>,

    /// Template reference: a registry package or `file:<path>`
    pub template: Option<String>,
}

/// Logs each stage as a cliclack step
struct StageLog;

impl BuildObserver for StageLog {
    fn stage_started(&self, stage: Stage) {
        let _ = cliclack::log::step(format!("{}...", stage));
    }

    fn warning(&self, _stage: Stage, error: &ScaffoldError) {
        let _ = cliclack::log::warning(error.to_string());
    }
}

/// Shown when no project directory was given
pub fn specify_project_directory(program: &str) -> String {
    format!(
        "Please specify the project directory:\n  {} {}\n\nFor example:\n  {} {}\n\nRun {} to see all options.",
        style(program).cyan(),
        style("<project-directory>").green(),
        style(program).cyan(),
        style("my-mcp-server").green(),
        style(format!("{} --help", program)).cyan(),
    )
}

/// Generate a project, reporting progress with cliclack
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    let Some(project_dir) = args
        .project_dir
        .as_deref()
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
    else {
        anyhow::bail!(specify_project_directory(config.name()));
    };

    cliclack::intro(format!("{} {}", config.display_name(), cli_version))?;

    let cwd = std::env::current_dir()?;
    let builder = ProjectBuilder::from_config(config, project_dir, args.template.as_deref(), &cwd);

    check_tools(config)?;

    cliclack::log::info(format!(
        "Creating a new MCP server in {}.",
        style(builder.project_dir().display()).green()
    ))?;
    cliclack::log::info(format!(
        "Using template {}.",
        style(builder.template()).green()
    ))?;

    let project = builder.build(&SystemRunner, &StageLog).await?;

    print_next_steps(config, &project)?;

    Ok(())
}

/// Report missing tools; the pipeline surfaces the real failure later
fn check_tools<C: ProductConfig>(config: &C) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let tools = check_runtimes(config.package_manager());
    let summary: Vec<String> = tools
        .iter()
        .map(|t| {
            if t.available {
                format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown"))
            } else {
                format!("{} (not installed)", t.name)
            }
        })
        .collect();
    spinner.stop(format!("Detected tools: {}", summary.join(", ")));

    for tool in tools.iter().filter(|t| !t.available) {
        cliclack::log::warning(format!("{} was not found on PATH", tool.name))?;
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, project: &CreatedProject) -> Result<()> {
    cliclack::log::success(format!(
        "Created {} at {}",
        style(&project.name).green(),
        style(project.dir.display()).green()
    ))?;

    let steps = config.next_steps(&project.dir, &project.name);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specify_project_directory_mentions_program() {
        let message = console::strip_ansi_codes(&specify_project_directory("create-mcp-ts"))
            .to_string();
        assert!(message.contains("create-mcp-ts <project-directory>"));
        assert!(message.contains("create-mcp-ts my-mcp-server"));
        assert!(message.contains("create-mcp-ts --help"));
    }

    #[tokio::test]
    async fn test_run_without_directory_fails_before_any_work() {
        let err = run(&crate::product::tests::TestConfig, CreateArgs::default(), "0.1.0")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Please specify the project directory"));
    }
}
