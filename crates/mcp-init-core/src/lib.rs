//! MCP Init Core - Shared library for the create-mcp-ts and mcp-scripts CLIs
//!
//! This library generates TypeScript MCP server projects from templates and
//! implements the `mcp-scripts` build-tooling proxy those projects depend on,
//! including the one-way ejection away from it.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Manifest handling, template resolution and copying,
//!   external commands, the dispatcher table, the eject engine, client setup
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `ProjectBuilder` for custom UIs
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use mcp_init_core::{ProjectBuilder, SystemRunner, TemplateReference};
//!
//! let builder = ProjectBuilder::new(
//!     "/work/my-server",
//!     TemplateReference::Registry("mcpi-template-default".into()),
//! );
//! let project = builder.build(&SystemRunner, &()).await?;
//! println!("created {}", project.name);
//! ```

pub mod builder;
pub mod dispatch;
pub mod eject;
pub mod error;
pub mod naming;
pub mod product;
pub mod proxy;
pub mod runtime;
pub mod setup;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use builder::{BuildObserver, CreatedProject, ProjectBuilder, Stage};
pub use dispatch::{dispatch, CommandTable};
pub use eject::{eject, EjectionPlan, Ejector};
pub use error::{EjectError, ManifestError, ScaffoldError, SetupError};
pub use product::ProductConfig;
pub use proxy::ProxyConfig;
pub use runtime::{check_runtimes, CommandRunner, PackageManager, RuntimeInfo, SystemRunner};
pub use templates::{copy_template, PackageManifest, TemplateReference};

#[cfg(feature = "tui")]
pub use tui::run;
