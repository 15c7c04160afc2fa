// MCP (Model Context Protocol) server for the Synthcore registries
// Serves resources and tools to agent clients over stdio

pub mod codec;
pub mod config;
pub mod error;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::{ConfigOverrides, ServerConfig};
pub use error::ServerError;
pub use server::{McpServer, ServerPhase};
