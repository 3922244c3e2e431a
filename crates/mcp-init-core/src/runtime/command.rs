//! External command execution
//!
//! Package managers and git are black boxes: spawn, wait, look at the exit
//! code. The [`CommandRunner`] trait is the seam tests use to simulate them.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// A program invocation in a working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands to completion
pub trait CommandRunner {
    fn run(&self, command: &ExternalCommand)
        -> impl Future<Output = std::io::Result<CommandStatus>>;
}

/// Runs commands as real child processes with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ExternalCommand) -> std::io::Result<CommandStatus> {
        let status = TokioCommand::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

/// Run a command and turn anything but a zero exit into a readable message
pub async fn run_checked<R: CommandRunner>(
    runner: &R,
    command: &ExternalCommand,
) -> Result<(), String> {
    match runner.run(command).await {
        Ok(status) if status.success() => Ok(()),
        Ok(CommandStatus { code: Some(code) }) => {
            Err(format!("`{}` failed with exit code {}", command, code))
        }
        Ok(CommandStatus { code: None }) => {
            Err(format!("`{}` was terminated by a signal", command))
        }
        Err(e) => Err(format!("failed to run `{}`: {}", command, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = ExternalCommand::new("git", Path::new("/tmp"))
            .arg("commit")
            .args(["-m", "Initial commit"]);
        assert_eq!(cmd.to_string(), "git commit -m Initial commit");
        assert_eq!(cmd.cwd, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_status_success_requires_zero() {
        assert!(CommandStatus { code: Some(0) }.success());
        assert!(!CommandStatus { code: Some(1) }.success());
        assert!(!CommandStatus { code: None }.success());
    }

    #[tokio::test]
    async fn test_run_checked_reports_spawn_failure() {
        let dir = std::env::temp_dir();
        let cmd = ExternalCommand::new("definitely-not-a-real-binary-mcp", &dir);
        let err = run_checked(&SystemRunner, &cmd).await.unwrap_err();
        assert!(err.starts_with("failed to run `definitely-not-a-real-binary-mcp`"));
    }
}
