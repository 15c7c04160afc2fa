pub mod agent_status;
pub mod ethics;
pub mod resonance;
mod registry;

pub use agent_status::AgentStatusTool;
pub use ethics::AnalyzeEthicsTool;
pub use resonance::CalculateResonanceTool;
pub use registry::{json_schema_object, json_schema_string, Tool, ToolCallError, ToolRegistry};

use crate::protocol::McpError;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use synthcore_core::Scorer;

/// Registry with the bundled resonance, ethics and agent status tools
pub fn default_registry(scorer: Arc<dyn Scorer>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CalculateResonanceTool::new(scorer.clone())));
    registry.register(Arc::new(AnalyzeEthicsTool::new(scorer.clone())));
    registry.register(Arc::new(AgentStatusTool::new(scorer)));
    registry
}

/// Deserialize call arguments, reporting failures as invalid params
pub(crate) fn parse_arguments<T: DeserializeOwned>(
    tool: &str,
    arguments: serde_json::Value,
) -> Result<T, McpError> {
    serde_json::from_value(arguments)
        .map_err(|e| McpError::invalid_params(format!("Invalid arguments for {}: {}", tool, e)))
}

/// Length of `text` in UTF-16 code units, the unit JSON clients count in
pub(crate) fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}
