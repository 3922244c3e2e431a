//! Registering a built server with desktop MCP clients

use crate::error::SetupError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level key holding the server table in every client config
pub const SERVERS_KEY: &str = "mcpServers";

/// How a client launches one server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub command: String,
    pub args: Vec<String>,
}

impl ServerEntry {
    /// Run the built entry point of `project_dir` with the local Node.js
    pub fn for_project(project_dir: &Path) -> Self {
        Self {
            command: node_command(),
            args: vec![project_dir
                .join("dist")
                .join("index.js")
                .display()
                .to_string()],
        }
    }
}

/// Absolute path of `node`, or the bare name when it is not on `PATH`
pub fn node_command() -> String {
    which::which("node")
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "node".to_string())
}

/// A desktop client and the config file it reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpClient {
    pub name: &'static str,
    pub config_path: PathBuf,
}

impl McpClient {
    /// A client counts as installed once its config directory exists
    pub fn is_installed(&self) -> bool {
        self.config_path.parent().is_some_and(Path::is_dir)
    }
}

/// Clients rooted at the given home and platform config directories
pub fn clients_in(home: Option<&Path>, config_dir: Option<&Path>) -> Vec<McpClient> {
    let mut clients = Vec::new();
    if let Some(home) = home {
        clients.push(McpClient {
            name: "Cursor",
            config_path: home.join(".cursor").join("mcp.json"),
        });
        clients.push(McpClient {
            name: "Windsurf",
            config_path: home.join(".codeium").join("windsurf").join("mcp_config.json"),
        });
    }
    if let Some(config_dir) = config_dir {
        clients.push(McpClient {
            name: "Claude Desktop",
            config_path: config_dir.join("Claude").join("claude_desktop_config.json"),
        });
    }
    clients
}

/// Clients for the current user
pub fn known_clients() -> Vec<McpClient> {
    clients_in(dirs::home_dir().as_deref(), dirs::config_dir().as_deref())
}

/// Server name for a project: its directory name
pub fn server_name(project_dir: &Path) -> Result<String, SetupError> {
    project_dir
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| SetupError::ServerName(project_dir.to_path_buf()))
}

/// A client config file, keeping every field it already has
#[derive(Debug, Clone)]
pub struct ClientConfig {
    path: PathBuf,
    root: Map<String, Value>,
}

impl ClientConfig {
    /// Load a config; a missing file is an empty one
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        let root = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| SetupError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let value: Value =
                serde_json::from_str(&content).map_err(|source| SetupError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            match value {
                Value::Object(map) => map,
                _ => {
                    return Err(SetupError::NotAnObject {
                        path: path.to_path_buf(),
                        field: "(root)".to_string(),
                    })
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_server(&self, name: &str) -> bool {
        self.root
            .get(SERVERS_KEY)
            .and_then(Value::as_object)
            .is_some_and(|servers| servers.contains_key(name))
    }

    /// Add a server unless one with that name exists; returns whether it was added
    pub fn add_server(&mut self, name: &str, entry: &ServerEntry) -> Result<bool, SetupError> {
        let servers = self
            .root
            .entry(SERVERS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(servers) = servers else {
            return Err(SetupError::NotAnObject {
                path: self.path.clone(),
                field: SERVERS_KEY.to_string(),
            });
        };
        if servers.contains_key(name) {
            return Ok(false);
        }

        let value = serde_json::to_value(entry).map_err(|source| SetupError::Parse {
            path: self.path.clone(),
            source,
        })?;
        servers.insert(name.to_string(), value);
        Ok(true)
    }

    /// Pretty-printed JSON with a trailing newline
    pub fn to_pretty_string(&self) -> String {
        let mut out = serde_json::to_string_pretty(&self.root).unwrap_or_else(|_| "{}".into());
        out.push('\n');
        out
    }

    pub fn save(&self) -> Result<(), SetupError> {
        fs::write(&self.path, self.to_pretty_string()).map_err(|source| SetupError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// What happened for one client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    Added,
    AlreadyConfigured,
    ClientNotInstalled,
}

impl fmt::Display for SetupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self {
            SetupOutcome::Added => "added",
            SetupOutcome::AlreadyConfigured => "already configured",
            SetupOutcome::ClientNotInstalled => "not installed",
        };
        f.write_str(outcome)
    }
}

/// Register one server with one client
pub fn register(
    client: &McpClient,
    server: &str,
    entry: &ServerEntry,
) -> Result<SetupOutcome, SetupError> {
    if !client.is_installed() {
        return Ok(SetupOutcome::ClientNotInstalled);
    }

    let mut config = ClientConfig::load(&client.config_path)?;
    if !config.add_server(server, entry)? {
        return Ok(SetupOutcome::AlreadyConfigured);
    }
    config.save()?;
    Ok(SetupOutcome::Added)
}
