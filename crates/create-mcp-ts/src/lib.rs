//! create-mcp-ts product configuration

use mcp_init_core::{PackageManager, ProductConfig};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extra help shown after the option list
pub const AFTER_HELP: &str = "\
Only <project-directory> is required.

A custom --template can be one of:
  - a custom template published on npm: mcpi-template-default
  - a local path relative to the current working directory: file:../my-custom-template

If you have any problems, do not hesitate to file an issue:
  https://github.com/stephencme/mcp-init/issues/new";

/// create-mcp-ts product configuration
#[derive(Clone, Debug, Default)]
pub struct CreateMcpTsConfig {
    pub package_manager: PackageManager,
}

impl ProductConfig for CreateMcpTsConfig {
    fn name(&self) -> &'static str {
        "create-mcp-ts"
    }

    fn display_name(&self) -> &'static str {
        "create-mcp-ts"
    }

    fn default_template(&self) -> &'static str {
        "mcpi-template-default"
    }

    fn template_env(&self) -> &'static str {
        "CREATE_MCP_TS_TEMPLATE"
    }

    fn issues_url(&self) -> &'static str {
        "https://github.com/stephencme/mcp-init/issues/new"
    }

    fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_message_names_the_cli() {
        let config = CreateMcpTsConfig::default();
        assert_eq!(config.commit_message(), "Initial commit from create-mcp-ts");
        assert_eq!(config.package_manager(), PackageManager::Npm);
    }

    #[test]
    fn test_package_manager_is_configurable() {
        let config = CreateMcpTsConfig {
            package_manager: PackageManager::Pnpm,
        };
        assert_eq!(config.package_manager(), PackageManager::Pnpm);
        assert!(config.next_steps(std::path::Path::new("/nowhere/x"), "x")[1].starts_with("pnpm dev"));
    }
}
