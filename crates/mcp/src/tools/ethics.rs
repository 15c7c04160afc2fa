// Ethical analysis tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, parse_arguments, text_length, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use synthcore_core::Scorer;

const NAME: &str = "analyze_ethics";

pub struct AnalyzeEthicsTool {
    scorer: Arc<dyn Scorer>,
}

impl AnalyzeEthicsTool {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeEthicsArgs {
    text: String,
}

#[async_trait::async_trait]
impl Tool for AnalyzeEthicsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Analyze the ethical implications of a given input".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "text": json_schema_string("Text to analyze for ethical implications")
                }),
                vec!["text"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: AnalyzeEthicsArgs = parse_arguments(NAME, arguments)?;
        let assessment = self.scorer.assess_ethics(&args.text);

        Ok(CallToolResult::json(&serde_json::json!({
            "ethicalScore": assessment.ethical_score,
            "concerns": assessment.concerns,
            "textLength": text_length(&args.text),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
        .context("Failed to serialize ethics assessment")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ErrorCode, McpError};
    use synthcore_core::scoring::PRIVACY_CONCERN;
    use synthcore_core::{EthicsAssessment, FixedScorer, HealthMetrics};

    #[tokio::test]
    async fn test_analyze_ethics_reports_concerns() {
        let scorer = FixedScorer::new(HealthMetrics::new(0.8, 0.02, 0.03)).with_ethics(EthicsAssessment {
            ethical_score: 0.72,
            concerns: vec![PRIVACY_CONCERN.to_string()],
        });
        let tool = AnalyzeEthicsTool::new(Arc::new(scorer));

        let result = tool
            .execute(serde_json::json!({"text": "share the address 📍"}))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(result.content[0].as_text()).unwrap();

        assert_eq!(json["ethicalScore"], 0.72);
        assert_eq!(json["concerns"], serde_json::json!([PRIVACY_CONCERN]));
        assert_eq!(json["textLength"], 20);
    }

    #[tokio::test]
    async fn test_null_arguments_are_invalid_params() {
        let tool = AnalyzeEthicsTool::new(Arc::new(FixedScorer::new(HealthMetrics::new(0.8, 0.02, 0.03))));
        let err = tool.execute(serde_json::Value::Null).await.unwrap_err();

        assert_eq!(err.downcast::<McpError>().unwrap().code, ErrorCode::InvalidParams);
    }
}
