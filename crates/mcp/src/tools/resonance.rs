// Resonance calculator tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, parse_arguments, text_length, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use synthcore_core::Scorer;

const NAME: &str = "calculate_resonance";

/// Scores free text with the configured scorer
pub struct CalculateResonanceTool {
    scorer: Arc<dyn Scorer>,
}

impl CalculateResonanceTool {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }
}

#[derive(Debug, Deserialize)]
struct CalculateResonanceArgs {
    text: String,
}

#[async_trait::async_trait]
impl Tool for CalculateResonanceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Calculate resonance metrics for a given input".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "text": json_schema_string("Text to analyze for resonance")
                }),
                vec!["text"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CalculateResonanceArgs = parse_arguments(NAME, arguments)?;
        let metrics = self.scorer.score_text(&args.text);

        Ok(CallToolResult::json(&serde_json::json!({
            "resonance": metrics.resonance,
            "ethicalDrift": metrics.ethical_drift,
            "reflexiveInstability": metrics.reflexive_instability,
            "textLength": text_length(&args.text),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
        .context("Failed to serialize resonance result")?)
    }
}
