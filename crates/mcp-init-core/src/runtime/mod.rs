//! External tools
//!
//! This module provides:
//! - A [`CommandRunner`] seam for package managers and git
//! - Package manager selection and tool detection

pub mod check;
pub mod command;

pub use check::{check_runtimes, check_tool, PackageManager, RuntimeInfo};
pub use command::{run_checked, CommandRunner, CommandStatus, ExternalCommand, SystemRunner};
