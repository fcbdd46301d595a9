// MCP (Model Context Protocol) server exposing MSK best-practice resources
// to agent clients over JSON-RPC 2.0 on stdio.

pub mod protocol;
pub mod resources;
pub mod server;

pub use server::McpServer;
