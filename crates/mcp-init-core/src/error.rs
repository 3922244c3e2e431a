//! Error taxonomy for generation and ejection

use std::path::PathBuf;
use thiserror::Error;

use crate::eject::{ApplyStep, EjectPhase};

/// Failures while loading or writing a `package.json`
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find package.json at {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("field '{field}' in {} {reason}", .path.display())]
    Shape {
        path: PathBuf,
        field: String,
        reason: String,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of the project generation pipeline
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("could not create a project called \"{name}\" because of npm naming restrictions:\n{}", format_problems(.problems))]
    InvalidProjectName { name: String, problems: Vec<String> },

    #[error("the directory {} already exists, please use a different directory name", .0.display())]
    DirectoryConflict(PathBuf),

    #[error("failed to create {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("local template path does not exist: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("failed to install template '{template}': {reason}")]
    TemplateInstallFailure { template: String, reason: String },

    #[error("failed to update package.json: {0}")]
    ManifestUpdateFailure(#[from] ManifestError),

    #[error("failed to initialize a git repository: {0}")]
    VersionControlInitFailure(String),

    #[error("failed to install dependencies: {0}")]
    DependencyInstallFailure(String),
}

impl ScaffoldError {
    /// Whether generation may still report success after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScaffoldError::VersionControlInitFailure(_))
    }
}

fn format_problems(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("    * {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failures of the eject engine
#[derive(Debug, Error)]
pub enum EjectError {
    #[error(transparent)]
    ManifestUpdateFailure(#[from] ManifestError),

    #[error(
        "script '{script}' in your package.json has been modified from the default ('{expected}'). \
         Ejection cannot proceed automatically. Please revert the script or eject manually."
    )]
    ScriptFidelityViolation {
        script: String,
        expected: String,
        found: String,
    },

    #[error("conflict: {reason} at {}. Ejection cannot proceed.", .path.display())]
    DestinationConflict { path: PathBuf, reason: String },

    #[error("could not find {what}; searched:\n{}", format_paths(.searched))]
    MissingInternalAsset {
        what: String,
        searched: Vec<PathBuf>,
    },

    #[error("ejection cannot continue from the '{0}' state")]
    InvalidState(EjectPhase),

    #[error("ejection failed while {step}: {source} ({})", rollback_note(.rolled_back))]
    Apply {
        step: ApplyStep,
        rolled_back: bool,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while registering a server with MCP clients
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("could not infer MCP server name from {}", .0.display())]
    ServerName(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{field}' in {} must be a JSON object", .path.display())]
    NotAnObject { path: PathBuf, field: String },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn rollback_note(rolled_back: &bool) -> &'static str {
    if *rolled_back {
        "no changes were kept"
    } else {
        "the project may be partially ejected"
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_lists_every_problem() {
        let err = ScaffoldError::InvalidProjectName {
            name: "My App".to_string(),
            problems: vec![
                "name can only contain URL-friendly characters".to_string(),
                "name can no longer contain capital letters".to_string(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"My App\""));
        assert!(msg.contains("    * name can only contain URL-friendly characters"));
        assert!(msg.contains("    * name can no longer contain capital letters"));
    }

    #[test]
    fn test_only_vcs_failures_are_recoverable() {
        assert!(ScaffoldError::VersionControlInitFailure("git".into()).is_recoverable());
        assert!(!ScaffoldError::DependencyInstallFailure("npm".into()).is_recoverable());
        assert!(!ScaffoldError::DirectoryConflict(PathBuf::from("x")).is_recoverable());
    }
}
