// Core registries and data model for the Synthcore MCP server

pub mod agent;
pub mod kernel;
pub mod module;
pub mod scoring;
pub mod system;
pub mod types;

pub use agent::{Agent, AgentRegistry, ValidationReport, ValidationThresholds};
pub use kernel::{Kernel, KernelRegistry};
pub use module::{Module, ModuleRegistry};
pub use scoring::{FixedScorer, RandomScorer, Scorer};
pub use system::SystemRegistries;
pub use types::*;
