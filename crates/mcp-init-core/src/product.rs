//! Product configuration trait for CLI binaries
//!
//! The generation CLI implements this trait to configure naming, the default
//! template, the package manager and the proxy package it scaffolds against.

use crate::proxy::ProxyConfig;
use crate::runtime::PackageManager;
use std::path::Path;

/// Configuration trait for the scaffolding product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command and commit message)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Registry template used when `--template` is not given
    fn default_template(&self) -> &'static str;

    /// Environment variable overriding the default template
    fn template_env(&self) -> &'static str;

    /// URL for reporting problems, shown after a failed run
    fn issues_url(&self) -> &'static str;

    /// Proxy package generated projects depend on
    fn proxy(&self) -> ProxyConfig {
        ProxyConfig::default()
    }

    /// Package manager for template installs and dependency installs
    fn package_manager(&self) -> PackageManager {
        PackageManager::Npm
    }

    /// Message of the initial commit in a generated project
    fn commit_message(&self) -> String {
        format!("Initial commit from {}", self.name())
    }

    /// Template reference to use when none is given on the command line
    fn template_reference(&self) -> String {
        std::env::var(self.template_env())
            .ok()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.default_template().to_string())
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, project_name: &str) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();
        let pm = self.package_manager();
        let dev = self.proxy().dev_script;

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", project_name));
        }
        steps.push(format!(
            "{}  build the server and watch for changes",
            pm.run_script(dev.name())
        ));
        steps.push(format!("{}  build the server", pm.run_script("build")));
        steps.push(format!(
            "{}  register the server with Cursor, Windsurf and Claude Desktop",
            pm.run_script("setup")
        ));

        steps
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Product used across the crate's unit tests
    #[derive(Clone)]
    pub(crate) struct TestConfig;

    impl ProductConfig for TestConfig {
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
            "MCP_INIT_CORE_TEST_TEMPLATE"
        }

        fn issues_url(&self) -> &'static str {
            "https://example.invalid/issues"
        }
    }

    #[test]
    fn test_defaults() {
        let config = TestConfig;
        assert_eq!(config.commit_message(), "Initial commit from create-mcp-ts");
        assert_eq!(config.package_manager(), PackageManager::Npm);
        assert_eq!(config.template_reference(), "mcpi-template-default");
    }

    #[test]
    fn test_next_steps_mention_scripts() {
        let steps = TestConfig.next_steps(Path::new("/nowhere/my-server"), "my-server");
        assert_eq!(steps[0], "cd my-server");
        assert!(steps[1].starts_with("npm run dev"));
        assert!(steps[2].starts_with("npm run build"));
        assert!(steps[3].starts_with("npm run setup"));
    }
}
