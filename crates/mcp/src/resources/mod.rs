// Resource router: literal resources plus URI templates

pub mod content;
pub mod template;

pub use content::{ContentContext, LiteralContent, TemplateContent};
pub use template::{UriParams, UriTemplate};

use crate::protocol::{McpError, ReadResourceResult, Resource, ResourceContents, ResourceTemplate};

const DEFAULT_MIME_TYPE: &str = "application/json";

struct ResourceEntry {
    resource: Resource,
    content: Option<LiteralContent>,
}

struct TemplateEntry {
    template: ResourceTemplate,
    matcher: UriTemplate,
    content: Option<TemplateContent>,
}

/// Registry of readable resources and resource templates
pub struct ResourceRouter {
    resources: Vec<ResourceEntry>,
    templates: Vec<TemplateEntry>,
}

impl ResourceRouter {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Router with the bundled system, agent, kernel and module resources
    pub fn with_defaults() -> Self {
        let mut router = Self::new();

        router.register_resource(
            json_resource(
                "synthcore://system/status",
                "System Status",
                "Current status of the Synthcore system",
            ),
            Some(LiteralContent::SystemStatus),
        );
        router.register_resource(
            json_resource(
                "synthcore://agents/manifest",
                "Agent Manifest",
                "List of all agents in the Synthcore system",
            ),
            Some(LiteralContent::AgentManifest),
        );
        router.register_resource(
            json_resource(
                "synthcore://kernels/status",
                "Kernel Status",
                "Current status of all kernels in the system",
            ),
            Some(LiteralContent::KernelStatus),
        );

        router.register_template(
            json_template(
                "synthcore://agents/{agentName}/status",
                "Agent Status",
                "Status of a specific agent",
            ),
            Some(TemplateContent::AgentStatus),
        );
        router.register_template(
            json_template(
                "synthcore://kernels/{kernelId}/info",
                "Kernel Info",
                "Information about a specific kernel",
            ),
            Some(TemplateContent::KernelInfo),
        );
        router.register_template(
            json_template(
                "synthcore://modules/{moduleId}/info",
                "Module Info",
                "Information about a specific module",
            ),
            Some(TemplateContent::ModuleInfo),
        );

        router
    }

    /// Register a literal resource. A resource with the same URI is replaced
    /// in place. Reading a resource without a generator fails.
    pub fn register_resource(&mut self, resource: Resource, content: Option<LiteralContent>) {
        tracing::debug!("Registered resource: {} ({})", resource.name, resource.uri);
        let entry = ResourceEntry { resource, content };

        match self
            .resources
            .iter_mut()
            .find(|e| e.resource.uri == entry.resource.uri)
        {
            Some(existing) => *existing = entry,
            None => self.resources.push(entry),
        }
    }

    /// Register a resource template. A template with the same pattern is
    /// replaced in place, keeping its matching priority.
    pub fn register_template(&mut self, template: ResourceTemplate, content: Option<TemplateContent>) {
        tracing::debug!(
            "Registered resource template: {} ({})",
            template.name,
            template.uri_template
        );
        let entry = TemplateEntry {
            matcher: UriTemplate::parse(&template.uri_template),
            template,
            content,
        };

        match self
            .templates
            .iter_mut()
            .find(|e| e.template.uri_template == entry.template.uri_template)
        {
            Some(existing) => *existing = entry,
            None => self.templates.push(entry),
        }
    }

    pub fn resources_list(&self) -> Vec<Resource> {
        self.resources.iter().map(|e| e.resource.clone()).collect()
    }

    pub fn resource_templates_list(&self) -> Vec<ResourceTemplate> {
        self.templates.iter().map(|e| e.template.clone()).collect()
    }

    /// Resolve a URI against literal resources first, then templates in
    /// registration order
    pub fn handle_resource_request(
        &self,
        uri: &str,
        ctx: &ContentContext<'_>,
    ) -> Result<ReadResourceResult, McpError> {
        if let Some(entry) = self.resources.iter().find(|e| e.resource.uri == uri) {
            let content = entry.content.ok_or_else(|| {
                McpError::invalid_request(format!("Unknown resource URI: {}", uri))
            })?;

            return render(
                entry.resource.uri.clone(),
                entry.resource.mime_type.as_deref(),
                &content.generate(ctx),
            );
        }

        for entry in &self.templates {
            let Some(params) = entry.matcher.match_uri(uri) else {
                continue;
            };

            let content = entry.content.ok_or_else(|| {
                McpError::invalid_request(format!(
                    "Unknown resource template: {}",
                    entry.template.uri_template
                ))
            })?;

            return render(
                entry.matcher.expand(&params),
                entry.template.mime_type.as_deref(),
                &content.generate(&params, ctx),
            );
        }

        Err(McpError::invalid_request(format!("Invalid URI format: {}", uri)))
    }
}

impl Default for ResourceRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn render(
    uri: String,
    mime_type: Option<&str>,
    payload: &serde_json::Value,
) -> Result<ReadResourceResult, McpError> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| McpError::internal_error(format!("Resource error: {}", e)))?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri,
            mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
            text,
        }],
    })
}

fn json_resource(uri: &str, name: &str, description: &str) -> Resource {
    Resource {
        uri: uri.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        mime_type: Some(DEFAULT_MIME_TYPE.to_string()),
    }
}

fn json_template(pattern: &str, name: &str, description: &str) -> ResourceTemplate {
    ResourceTemplate {
        uri_template: pattern.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        mime_type: Some(DEFAULT_MIME_TYPE.to_string()),
    }
}
