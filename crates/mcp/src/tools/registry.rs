// MCP tool trait and dispatch table

use crate::protocol::{CallToolResult, McpError, ToolSchema};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the raw call arguments. Return an `McpError`
    /// (through `anyhow`) to report a protocol condition such as invalid
    /// params; any other error is treated as an execution failure.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Failure of a tool call
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    /// Unknown tool, or a protocol error raised by the handler itself
    #[error(transparent)]
    Protocol(#[from] McpError),

    /// The handler failed for any other reason
    #[error("Error executing tool {name}: {message}")]
    Execution { name: String, message: String },
}

impl ToolCallError {
    /// The protocol condition this failure maps to
    pub fn into_mcp_error(self) -> McpError {
        match self {
            Self::Protocol(error) => error,
            other @ Self::Execution { .. } => McpError::internal_error(other.to_string()),
        }
    }
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        tracing::debug!("Registered tool: {}", schema.name);

        if self.tools.insert(schema.name.clone(), tool).is_none() {
            self.order.push(schema.name);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas in registration order
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| t.schema())
            .collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a call by exact name. Arguments are handed to the handler
    /// unchecked.
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolCallError> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::method_not_found(format!("Unknown tool: {}", name)))?;

        tool.execute(arguments).await.map_err(|error| {
            match error.downcast::<McpError>() {
                Ok(protocol) => ToolCallError::Protocol(protocol),
                Err(error) => {
                    tracing::error!("Error executing tool {}: {:#}", name, error);
                    ToolCallError::Execution {
                        name: name.to_string(),
                        message: format!("{:#}", error),
                    }
                }
            }
        })
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ErrorCode, ToolContent};

    struct EchoTool;

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".to_string(),
                description: "Echo the arguments back".to_string(),
                input_schema: json_schema_object(
                    serde_json::json!({ "value": json_schema_string("Anything") }),
                    vec![],
                ),
            }
        }

        async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
            Ok(CallToolResult {
                content: vec![ToolContent::text(arguments.to_string())],
                is_error: None,
            })
        }
    }

    struct FailingTool {
        protocol: bool,
    }

    #[async_trait::async_trait]
    impl Tool for FailingTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "fail".to_string(),
                description: "Always fails".to_string(),
                input_schema: json_schema_object(serde_json::json!({}), vec![]),
            }
        }

        async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
            if self.protocol {
                Err(McpError::invalid_params("bad input").into())
            } else {
                Err(anyhow::anyhow!("disk on fire"))
            }
        }
    }

    #[test]
    fn test_list_schemas_round_trip() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let schemas = registry.list_schemas();
        assert_eq!(schemas, vec![EchoTool.schema()]);
        assert!(registry.contains("echo"));
    }

    #[test]
    fn test_register_same_name_replaces() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool { protocol: true }));
        registry.register(Arc::new(EchoTool));
        registry.register(Arc::new(FailingTool { protocol: false }));

        assert_eq!(registry.len(), 2);
        let names: Vec<_> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["fail", "echo"]);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_method_not_found() {
        let registry = ToolRegistry::new();
        let err = registry
            .handle_tool_call("missing", serde_json::json!({}))
            .await
            .unwrap_err()
            .into_mcp_error();

        assert_eq!(err.code, ErrorCode::MethodNotFound);
        assert_eq!(err.message, "Unknown tool: missing");
    }

    #[tokio::test]
    async fn test_raw_arguments_reach_handler() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry
            .handle_tool_call("echo", serde_json::json!({"unexpected": 1}))
            .await
            .unwrap();
        assert_eq!(result.content[0].as_text(), r#"{"unexpected":1}"#);
    }

    #[tokio::test]
    async fn test_handler_failure_is_wrapped() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool { protocol: false }));

        let err = registry
            .handle_tool_call("fail", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolCallError::Execution { .. }));

        let err = err.into_mcp_error();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Error executing tool fail: disk on fire");
    }

    #[tokio::test]
    async fn test_handler_protocol_error_passes_through() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool { protocol: true }));

        let err = registry
            .handle_tool_call("fail", serde_json::json!({}))
            .await
            .unwrap_err()
            .into_mcp_error();
        assert_eq!(err, McpError::invalid_params("bad input"));
    }
}
