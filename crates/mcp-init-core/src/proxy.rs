//! Description of the shared build-tooling proxy package
//!
//! Generated projects call the proxy (`mcp-scripts dev`, ...) until they are
//! ejected. Both the dispatcher table and the eject engine are derived from
//! one [`ProxyConfig`] value so the two can never disagree about a command.

use std::fmt;

/// Name of the script that runs the watch build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevScript {
    #[default]
    Dev,
    Start,
}

impl DevScript {
    pub fn name(&self) -> &'static str {
        match self {
            DevScript::Dev => "dev",
            DevScript::Start => "start",
        }
    }
}

impl fmt::Display for DevScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable description of the proxy package, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Registry name of the proxy package
    pub package_name: String,
    /// Binary the managed scripts invoke
    pub binary: String,
    /// Build tool the proxy wraps
    pub build_tool: String,
    /// Entry module of a generated server
    pub entry: String,
    /// Output module format passed to the build tool
    pub format: String,
    /// Runtime that executes the ejected setup script
    pub runtime: String,
    /// Project directory receiving ejected scripts
    pub scripts_dir: String,
    /// File name of the setup script shipped inside the proxy package
    pub setup_asset: String,
    /// Whether projects use `dev` or `start` for the watch build
    pub dev_script: DevScript,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            package_name: "mcp-scripts".to_string(),
            binary: "mcp-scripts".to_string(),
            build_tool: "tsup".to_string(),
            entry: "src/index.ts".to_string(),
            format: "esm".to_string(),
            runtime: "node".to_string(),
            scripts_dir: "mcp-scripts".to_string(),
            setup_asset: "setup.js".to_string(),
            dev_script: DevScript::Dev,
        }
    }
}

impl ProxyConfig {
    /// `<binary> <command>`, the literal a managed script holds
    pub fn invocation(&self, command: &str) -> String {
        format!("{} {}", self.binary, command)
    }

    /// Direct build tool invocation, watching when `watch` is set
    pub fn build_command(&self, watch: bool) -> String {
        format!(
            "{} {} --format {} --dts {}",
            self.build_tool,
            self.entry,
            self.format,
            if watch { "--watch" } else { "--clean" }
        )
    }

    /// Project-relative path of the ejected setup script, `/`-separated
    pub fn ejected_setup_path(&self) -> String {
        format!("{}/{}", self.scripts_dir, self.setup_asset)
    }

    /// Script that replaces `setup` after ejection
    pub fn ejected_setup_command(&self) -> String {
        format!("{} {}", self.runtime, self.ejected_setup_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commands() {
        let proxy = ProxyConfig::default();
        assert_eq!(proxy.invocation("build"), "mcp-scripts build");
        assert_eq!(
            proxy.build_command(true),
            "tsup src/index.ts --format esm --dts --watch"
        );
        assert_eq!(
            proxy.build_command(false),
            "tsup src/index.ts --format esm --dts --clean"
        );
        assert_eq!(proxy.ejected_setup_command(), "node mcp-scripts/setup.js");
    }

    #[test]
    fn test_start_variant_name() {
        assert_eq!(DevScript::Start.name(), "start");
        assert_eq!(DevScript::default().to_string(), "dev");
    }
}
