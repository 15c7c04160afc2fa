// MCP server: request routing and the stdio transport loop

use crate::codec::{Inbound, MessageCodec};
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListResourceTemplatesResult, ListResourcesResult, ListToolsResult, McpError,
    ReadResourceParams, ReadResourceResult, ResourcesCapability, ServerCapabilities, ServerInfo,
    ToolsCapability, PROTOCOL_VERSION,
};
use crate::resources::{ContentContext, ResourceRouter};
use crate::tools::{self, ToolCallError, ToolRegistry};
use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use synthcore_core::{RandomScorer, Scorer, SystemRegistries, ValidationThresholds};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};

/// Startup lifecycle of the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPhase {
    Uninitialized,
    ComponentsInitialized,
    HandlersRegistered,
    Validated,
    Serving,
}

pub struct McpServer {
    info: ServerInfo,
    thresholds: ValidationThresholds,
    scorer: Arc<dyn Scorer>,
    system: SystemRegistries,
    resources: ResourceRouter,
    tools: ToolRegistry,
    started_at: DateTime<Utc>,
    phase: ServerPhase,
}

impl McpServer {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_scorer(config, Arc::new(RandomScorer::new()))
    }

    /// Build the registries and routers using the given scorer for all
    /// placeholder metrics
    pub fn with_scorer(config: &ServerConfig, scorer: Arc<dyn Scorer>) -> Self {
        let mut phase = ServerPhase::Uninitialized;
        tracing::info!("Initializing {} v{}", config.server.name, config.server.version);

        let system = SystemRegistries::bootstrap(scorer.as_ref());
        advance(&mut phase, ServerPhase::ComponentsInitialized);

        let resources = ResourceRouter::with_defaults();
        let tools = tools::default_registry(scorer.clone());
        tracing::info!(
            "Registered {} resources, {} resource templates, {} tools",
            resources.resources_list().len(),
            resources.resource_templates_list().len(),
            tools.len()
        );
        advance(&mut phase, ServerPhase::HandlersRegistered);

        Self {
            info: config.server_info(),
            thresholds: config.validation,
            scorer,
            system,
            resources,
            tools,
            started_at: Utc::now(),
            phase,
        }
    }

    pub fn phase(&self) -> ServerPhase {
        self.phase
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn system(&self) -> &SystemRegistries {
        &self.system
    }

    pub fn tools_mut(&mut self) -> &mut ToolRegistry {
        &mut self.tools
    }

    /// Check every agent against the configured thresholds. Each violation
    /// is logged and returned.
    pub fn validate(&mut self) -> Result<(), ServerError> {
        let report = self.system.validate(&self.thresholds);

        if !report.success {
            for violation in &report.errors {
                tracing::error!("{}", violation);
            }
            return Err(ServerError::Validation {
                violations: report.errors,
            });
        }

        tracing::info!("All agents validated successfully");
        advance(&mut self.phase, ServerPhase::Validated);
        Ok(())
    }

    /// Validate, then serve stdin/stdout until input closes or Ctrl-C
    pub async fn run(mut self) -> Result<(), ServerError> {
        self.validate()?;

        let shutdown = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Interrupt received, shutting down"),
                Err(e) => {
                    tracing::error!("Failed to listen for interrupt: {}", e);
                    std::future::pending::<()>().await
                }
            }
        };

        tracing::info!("MCP server running on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout(), shutdown)
            .await
    }

    /// Serve newline-delimited JSON-RPC one request at a time. Returns once
    /// the reader is exhausted or `shutdown` resolves; the writer is flushed
    /// and closed either way.
    pub async fn serve<R, W, S>(&mut self, reader: R, writer: W, shutdown: S) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        if self.phase != ServerPhase::Validated {
            return Err(ServerError::NotValidated);
        }
        advance(&mut self.phase, ServerPhase::Serving);

        let mut lines = FramedRead::new(reader, MessageCodec::new());
        let mut sink = FramedWrite::new(writer, MessageCodec::new());
        tokio::pin!(shutdown);

        loop {
            let inbound = tokio::select! {
                _ = &mut shutdown => break,
                next = lines.next() => match next {
                    Some(inbound) => inbound?,
                    None => {
                        tracing::info!("Input closed");
                        break;
                    }
                },
            };

            let response = match inbound {
                Inbound::Message(line) if line.trim().is_empty() => continue,
                Inbound::Message(line) => self.handle_line(&line).await,
                Inbound::Malformed(reason) => {
                    tracing::warn!("Unreadable message: {}", reason);
                    parse_error_response()
                }
            };

            if let Some(response) = response {
                sink.send(response).await?;
            }
        }

        SinkExt::<String>::close(&mut sink).await?;
        tracing::info!("Transport closed");
        Ok(())
    }

    /// Handle one raw message, returning the serialized response if any.
    /// An explicit `"id": null` is a request and gets a response; only a
    /// missing id marks a notification.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let value = match serde_json::from_str::<serde_json::Value>(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unparseable message: {}", e);
                return parse_error_response();
            }
        };

        let id = value.get("id").cloned();
        let response = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(mut request) if request.jsonrpc == "2.0" => {
                request.id = id;
                self.handle_request(request).await
            }
            _ => Some(JsonRpcResponse::error(
                id.unwrap_or(serde_json::Value::Null),
                JsonRpcError::invalid_request(),
            )),
        };

        response.and_then(|r| encode_response(&r))
    }

    /// Route a request by method. Notifications get no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            tracing::debug!("Notification: {}", request.method);
            return None;
        };

        tracing::debug!("Request {}: {}", id, request.method);

        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(error) => {
                tracing::warn!("Request {} failed: {}", request.method, error);
                Some(JsonRpcResponse::error(id, error.into()))
            }
        }
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpError> {
        match method {
            "initialize" => to_value(self.initialize_result()),
            "ping" => Ok(serde_json::json!({})),
            "resources/list" => to_value(ListResourcesResult {
                resources: self.resources.resources_list(),
            }),
            "resources/templates/list" => to_value(ListResourceTemplatesResult {
                resource_templates: self.resources.resource_templates_list(),
            }),
            "resources/read" => {
                let params: ReadResourceParams = parse_params(params)?;
                to_value(self.read_resource(&params.uri)?)
            }
            "tools/list" => to_value(ListToolsResult {
                tools: self.tools.list_schemas(),
            }),
            "tools/call" => {
                let params: CallToolParams = parse_params(params)?;
                to_value(self.call_tool(&params.name, params.arguments).await?)
            }
            other => Err(McpError::method_not_found(format!("Method not found: {}", other))),
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: self.info.clone(),
        }
    }

    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let ctx = ContentContext {
            system: &self.system,
            scorer: self.scorer.as_ref(),
            server: &self.info,
            started_at: self.started_at,
        };

        self.resources.handle_resource_request(uri, &ctx)
    }

    /// Call a tool. Execution failures become an error result; protocol
    /// errors propagate.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.handle_tool_call(name, arguments).await {
            Ok(result) => Ok(result),
            Err(ToolCallError::Protocol(error)) => Err(error),
            Err(failure) => Ok(CallToolResult::error(format!("Tool error: {}", failure))),
        }
    }
}

fn advance(phase: &mut ServerPhase, next: ServerPhase) {
    tracing::debug!("Server phase {:?} -> {:?}", phase, next);
    *phase = next;
}

fn encode_response(response: &JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            None
        }
    }
}

fn parse_error_response() -> Option<String> {
    encode_response(&JsonRpcResponse::error(
        serde_json::Value::Null,
        JsonRpcError::parse_error(),
    ))
}

fn parse_params<T: DeserializeOwned>(params: Option<serde_json::Value>) -> Result<T, McpError> {
    serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| McpError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::internal_error(e.to_string()))
}
