//! Toolchain proxy dispatcher
//!
//! Maps the symbolic commands generated projects call (`mcp-scripts build`)
//! to concrete tool invocations. The table is built once at startup and
//! passed in; nothing here reads global state.

use crate::proxy::ProxyConfig;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Binary the `setup` command runs
pub const SETUP_BINARY: &str = "mcp-setup";

/// Binary the `eject` command runs
pub const EJECT_BINARY: &str = "mcp-eject";

/// One symbolic command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    pub command: String,
    pub description: String,
}

/// Immutable name -> command mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        Self { entries }
    }

    /// The commands every generated project relies on
    pub fn standard(proxy: &ProxyConfig) -> Self {
        let entry = |name: &str, command: String, description: &str| CommandEntry {
            name: name.to_string(),
            command,
            description: description.to_string(),
        };

        Self::new(vec![
            entry(
                proxy.dev_script.name(),
                proxy.build_command(true),
                "build MCP server and watch for changes",
            ),
            entry("build", proxy.build_command(false), "build MCP server"),
            entry(
                "setup",
                SETUP_BINARY.to_string(),
                "set up MCP clients: Cursor, Windsurf, and Claude Desktop",
            ),
            entry("eject", EJECT_BINARY.to_string(), "eject from mcp-scripts"),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Usage text listing every command
    pub fn usage(&self, binary: &str) -> String {
        let width = self
            .entries
            .iter()
            .map(|e| e.name.len())
            .chain(std::iter::once("help".len()))
            .max()
            .unwrap_or(0);

        let mut lines = vec![
            format!("Usage: {} <command>", binary),
            "Available commands:".to_string(),
        ];
        for entry in &self.entries {
            lines.push(format!(
                "  {:width$}  {}",
                entry.name,
                entry.description,
                width = width
            ));
        }
        lines.push(format!(
            "  {:width$}  output usage information",
            "help",
            width = width
        ));
        lines.join("\n")
    }
}

/// A command split into program and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Split on whitespace; `None` for an empty command
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Look up a command; `None` means "print usage"
pub fn lookup(table: &CommandTable, name: Option<&str>) -> Option<Invocation> {
    let name = name?;
    if name == "help" {
        return None;
    }
    table
        .get(name)
        .and_then(|entry| Invocation::parse(&entry.command))
}

/// Prefer a sibling of the running binary for bare program names
fn resolve_program(program: &str, bin_dir: Option<&Path>) -> PathBuf {
    if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
        return PathBuf::from(program);
    }
    if let Some(dir) = bin_dir {
        let sibling = dir.join(format!("{}{}", program, std::env::consts::EXE_SUFFIX));
        if sibling.is_file() {
            return sibling;
        }
    }
    PathBuf::from(program)
}

/// Run a symbolic command and exit with its status
///
/// Unknown commands and `help` print usage and exit with status 1.
pub fn dispatch(table: &CommandTable, binary: &str, name: Option<&str>) -> ! {
    let Some(invocation) = lookup(table, name) else {
        eprintln!("{}", table.usage(binary));
        std::process::exit(1);
    };

    let bin_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let program = resolve_program(&invocation.program, bin_dir.as_deref());

    let status = Command::new(&program).args(&invocation.args).status();
    match status {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => {
            eprintln!(
                "{} {}: {}",
                "Error executing command:".red(),
                program.display(),
                e
            );
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::DevScript;

    #[test]
    fn test_standard_table() {
        let table = CommandTable::standard(&ProxyConfig::default());
        let names: Vec<_> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["dev", "build", "setup", "eject"]);
        assert_eq!(
            table.get("build").unwrap().command,
            "tsup src/index.ts --format esm --dts --clean"
        );
    }

    #[test]
    fn test_start_variant_table() {
        let proxy = ProxyConfig {
            dev_script: DevScript::Start,
            ..ProxyConfig::default()
        };
        let table = CommandTable::standard(&proxy);
        assert!(table.get("start").is_some());
        assert!(table.get("dev").is_none());
    }

    #[test]
    fn test_lookup_splits_program_and_args() {
        let table = CommandTable::standard(&ProxyConfig::default());
        let invocation = lookup(&table, Some("dev")).unwrap();
        assert_eq!(invocation.program, "tsup");
        assert_eq!(
            invocation.args,
            vec!["src/index.ts", "--format", "esm", "--dts", "--watch"]
        );
        assert_eq!(lookup(&table, Some("eject")).unwrap().program, "mcp-eject");
    }

    #[test]
    fn test_lookup_help_and_unknown_print_usage() {
        let table = CommandTable::standard(&ProxyConfig::default());
        assert!(lookup(&table, None).is_none());
        assert!(lookup(&table, Some("help")).is_none());
        assert!(lookup(&table, Some("deploy")).is_none());
    }

    #[test]
    fn test_empty_command_is_not_runnable() {
        let table = CommandTable::new(vec![CommandEntry {
            name: "noop".into(),
            command: "   ".into(),
            description: String::new(),
        }]);
        assert!(lookup(&table, Some("noop")).is_none());
    }

    #[test]
    fn test_usage_lists_commands() {
        let usage = CommandTable::standard(&ProxyConfig::default()).usage("mcp-scripts");
        assert!(usage.starts_with("Usage: mcp-scripts <command>"));
        assert!(usage.contains("  build  build MCP server"));
        assert!(usage.contains("  help   output usage information"));
    }

    #[test]
    fn test_resolve_program_prefers_sibling() {
        let dir = tempfile::TempDir::new().unwrap();
        let sibling = dir
            .path()
            .join(format!("mcp-eject{}", std::env::consts::EXE_SUFFIX));
        std::fs::write(&sibling, "").unwrap();

        assert_eq!(resolve_program("mcp-eject", Some(dir.path())), sibling);
        assert_eq!(
            resolve_program("tsup", Some(dir.path())),
            PathBuf::from("tsup")
        );
    }
}
