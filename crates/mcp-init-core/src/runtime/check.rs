//! Package manager selection and tool detection

use clap::ValueEnum;
use std::fmt;
use std::path::Path;
use std::process::Command;

use super::command::ExternalCommand;

/// Package manager used for registry templates and dependency installs
///
/// One value drives both, so a project is never half-installed by two tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Install everything declared in the manifest
    pub fn install(&self, cwd: &Path) -> ExternalCommand {
        ExternalCommand::new(self.program(), cwd).arg("install")
    }

    /// Remove one package from the manifest and `node_modules`
    pub fn uninstall(&self, cwd: &Path, package: &str) -> ExternalCommand {
        let verb = match self {
            PackageManager::Npm => "uninstall",
            PackageManager::Pnpm | PackageManager::Yarn | PackageManager::Bun => "remove",
        };
        ExternalCommand::new(self.program(), cwd)
            .arg(verb)
            .arg(package)
    }

    /// How the user runs a project script, for next-steps hints
    pub fn run_script(&self, script: &str) -> String {
        match (self, script) {
            (PackageManager::Npm, "start") => "npm start".to_string(),
            (PackageManager::Npm, _) => format!("npm run {}", script),
            (pm, _) => format!("{} {}", pm.program(), script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// Tool detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether `program --version` runs successfully
pub fn check_tool(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Detect Node.js, the package manager and git
///
/// Nothing here is fatal; missing tools surface again as stage failures.
pub fn check_runtimes(package_manager: PackageManager) -> Vec<RuntimeInfo> {
    vec![
        check_tool("Node.js", "node"),
        check_tool(package_manager.program(), package_manager.program()),
        check_tool("git", "git"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npm_commands() {
        let dir = Path::new("/work/my-server");
        let pm = PackageManager::Npm;
        assert_eq!(pm.install(dir).to_string(), "npm install");
        assert_eq!(
            pm.uninstall(dir, "mcpi-template-default").to_string(),
            "npm uninstall mcpi-template-default"
        );
        assert_eq!(pm.install(dir).cwd, dir);
    }

    #[test]
    fn test_other_managers_use_remove() {
        let dir = Path::new(".");
        assert_eq!(
            PackageManager::Pnpm.uninstall(dir, "x").to_string(),
            "pnpm remove x"
        );
        assert_eq!(
            PackageManager::Bun.uninstall(dir, "x").to_string(),
            "bun remove x"
        );
    }

    #[test]
    fn test_run_script_hint() {
        assert_eq!(PackageManager::Npm.run_script("start"), "npm start");
        assert_eq!(PackageManager::Npm.run_script("build"), "npm run build");
        assert_eq!(PackageManager::Pnpm.run_script("build"), "pnpm build");
    }

    #[test]
    fn test_missing_tool_is_unavailable() {
        let info = check_tool("nothing", "definitely-not-a-real-binary-mcp");
        assert!(!info.available);
        assert!(info.version.is_none());
    }
}
