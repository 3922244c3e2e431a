#![allow(dead_code)]

use mcp_init_core::runtime::{CommandRunner, CommandStatus, ExternalCommand};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Records every command and simulates the registry and package managers
///
/// Commands starting with an entry of `failing` exit with status 1. A
/// successful `npm install` next to an installer stub copies the stub's
/// template packages from `registry` into `node_modules`.
#[derive(Default)]
pub struct RecordingRunner {
    pub failing: Vec<&'static str>,
    pub registry: Option<PathBuf>,
    pub log: RefCell<Vec<String>>,
}

impl RecordingRunner {
    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn install_from_registry(&self, cwd: &Path) -> std::io::Result<()> {
        let Some(registry) = &self.registry else {
            return Ok(());
        };
        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(cwd.join("package.json"))?)?;
        let Some(deps) = manifest.get("dependencies").and_then(|d| d.as_object()) else {
            return Ok(());
        };
        for name in deps.keys() {
            let source = registry.join(name);
            if source.is_dir() {
                copy_dir(&source, &cwd.join("node_modules").join(name))?;
            }
        }
        Ok(())
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &ExternalCommand) -> std::io::Result<CommandStatus> {
        let line = command.to_string();
        self.log.borrow_mut().push(line.clone());

        if self.failing.iter().any(|prefix| line.starts_with(prefix)) {
            return Ok(CommandStatus { code: Some(1) });
        }
        if line == "npm install" {
            self.install_from_registry(&command.cwd)?;
        }
        Ok(CommandStatus { code: Some(0) })
    }
}

pub fn copy_dir(src: &Path, dest: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

/// The default template shipped in this repository
pub fn default_template() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../templates/default")
}

/// The npm layout of the mcp-scripts package
pub fn proxy_package() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../mcp-scripts/npm")
}

pub fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
