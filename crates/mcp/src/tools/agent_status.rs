// Agent status lookup tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, parse_arguments, Tool};
use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;
use std::sync::Arc;
use synthcore_core::{ComponentStatus, Scorer, ALL_KERNELS};

const NAME: &str = "get_agent_status";

/// Fixed name-to-kernel table, keyed by agent names and bare kernel ids;
/// anything not listed is assumed to span all kernels
const KERNEL_BINDINGS: &[(&str, &str)] = &[
    ("K1", "K1"),
    ("K3", "K1"),
    ("K2", "K2"),
    ("Alex", "K2"),
    ("Harmonizer", "K3"),
    ("Peer Review", "K3"),
    ("ARIA", "K4"),
];

/// Kernel an agent is expected to be bound to, by name alone
pub fn kernel_binding_guess(agent_name: &str) -> &'static str {
    KERNEL_BINDINGS
        .iter()
        .find(|(name, _)| *name == agent_name)
        .map(|(_, kernel)| *kernel)
        .unwrap_or(ALL_KERNELS)
}

/// Reports placeholder health metrics for an agent. Does not consult the
/// live agent registry.
pub struct AgentStatusTool {
    scorer: Arc<dyn Scorer>,
}

impl AgentStatusTool {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentStatusArgs {
    agent_name: String,
}

#[async_trait::async_trait]
impl Tool for AgentStatusTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Get the current status of a Synthcore agent".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "agentName": json_schema_string("Name of the agent to check")
                }),
                vec!["agentName"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: AgentStatusArgs = parse_arguments(NAME, arguments)?;
        let metrics = self.scorer.agent_baseline(&args.agent_name);
        let uptime: u32 = rand::thread_rng().gen_range(0..10_000);

        Ok(CallToolResult::json(&serde_json::json!({
            "name": args.agent_name,
            "status": ComponentStatus::Active.as_str(),
            "resonance": metrics.resonance,
            "ethicalDrift": metrics.ethical_drift,
            "reflexiveInstability": metrics.reflexive_instability,
            "kernelBinding": kernel_binding_guess(&args.agent_name),
            "lastAction": chrono::Utc::now().to_rfc3339(),
            "uptime": uptime,
        }))
        .context("Failed to serialize agent status")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ErrorCode, McpError};
    use synthcore_core::{FixedScorer, HealthMetrics};

    fn tool() -> AgentStatusTool {
        AgentStatusTool::new(Arc::new(FixedScorer::new(HealthMetrics::new(0.8, 0.02, 0.03))))
    }

    #[test]
    fn test_kernel_binding_guess() {
        assert_eq!(kernel_binding_guess("K1"), "K1");
        assert_eq!(kernel_binding_guess("K3"), "K1");
        assert_eq!(kernel_binding_guess("K2"), "K2");
        assert_eq!(kernel_binding_guess("Alex"), "K2");
        assert_eq!(kernel_binding_guess("Navigator"), "ALL");
        assert_eq!(kernel_binding_guess("HMT Sentinel"), "ALL");
        assert_eq!(kernel_binding_guess("Peer Review"), "K3");
        assert_eq!(kernel_binding_guess("ARIA"), "K4");
        assert_eq!(kernel_binding_guess("PALMA"), "ALL");
        assert_eq!(kernel_binding_guess("nobody"), "ALL");
    }

    #[tokio::test]
    async fn test_agent_status() {
        let result = tool()
            .execute(serde_json::json!({"agentName": "Harmonizer"}))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(result.content[0].as_text()).unwrap();

        assert_eq!(json["name"], "Harmonizer");
        assert_eq!(json["status"], "active");
        assert_eq!(json["kernelBinding"], "K3");
        assert_eq!(json["resonance"], 0.8);
        assert!(json["uptime"].as_u64().unwrap() < 10_000);
    }

    #[tokio::test]
    async fn test_missing_agent_name_is_invalid_params() {
        let err = tool()
            .execute(serde_json::json!({"name": "Harmonizer"}))
            .await
            .unwrap_err();
        let err = err.downcast::<McpError>().unwrap();

        assert_eq!(err.code, ErrorCode::InvalidParams);
        assert!(err.message.contains("agentName"), "{}", err.message);
    }
}
