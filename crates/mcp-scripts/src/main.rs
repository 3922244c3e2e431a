//! mcp-scripts - build tooling proxy for TypeScript MCP servers
//!
//! `mcp-scripts <command>` runs the tool invocation mapped to `<command>`
//! in the current directory and exits with its status.

use mcp_init_core::{dispatch, CommandTable, ProxyConfig};

fn main() {
    let proxy = ProxyConfig::default();
    let table = CommandTable::standard(&proxy);
    let command = std::env::args().nth(1);

    dispatch(&table, &proxy.binary, command.as_deref())
}
