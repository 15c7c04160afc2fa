// Content generators for the bundled resources and resource templates

use super::template::UriParams;
use crate::protocol::ServerInfo;
use crate::tools::agent_status::kernel_binding_guess;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::{json, Value};
use synthcore_core::{ComponentStatus, Scorer, SystemRegistries};

/// Everything a generator may read while producing content
pub struct ContentContext<'a> {
    pub system: &'a SystemRegistries,
    pub scorer: &'a dyn Scorer,
    pub server: &'a ServerInfo,
    pub started_at: DateTime<Utc>,
}

impl ContentContext<'_> {
    fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// Generator for a literal resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralContent {
    SystemStatus,
    AgentManifest,
    KernelStatus,
}

impl LiteralContent {
    pub fn generate(self, ctx: &ContentContext<'_>) -> Value {
        let system = ctx.system;

        match self {
            Self::SystemStatus => json!({
                "status": ComponentStatus::Active.as_str(),
                "version": ctx.server.version,
                "uptime": ctx.uptime_secs(),
                "agentCount": system.agents.len(),
                "kernelCount": system.kernels.len(),
                "moduleCount": system.modules.len(),
                "timestamp": Utc::now().to_rfc3339(),
            }),
            Self::AgentManifest => {
                let agents: Vec<Value> = system
                    .agents
                    .all_agents()
                    .into_iter()
                    .map(|a| {
                        json!({
                            "name": a.name,
                            "kernelId": a.kernel_id,
                            "modules": a.modules,
                        })
                    })
                    .collect();
                json!({ "agents": agents })
            }
            Self::KernelStatus => {
                let kernels: Vec<Value> = system
                    .kernels
                    .all_kernels()
                    .into_iter()
                    .map(|k| {
                        json!({
                            "id": k.id,
                            "name": k.name,
                            "status": ComponentStatus::Active.as_str(),
                            "agentCount": k.bound_agents.len(),
                        })
                    })
                    .collect();
                json!({ "kernels": kernels })
            }
        }
    }
}

/// Generator for a resource template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateContent {
    AgentStatus,
    KernelInfo,
    ModuleInfo,
}

impl TemplateContent {
    pub fn generate(self, params: &UriParams, ctx: &ContentContext<'_>) -> Value {
        let system = ctx.system;
        let mut rng = rand::thread_rng();

        match self {
            Self::AgentStatus => {
                let name = param(params, "agentName");
                // Unregistered names get placeholder metrics and a guessed binding
                let (metrics, kernel_binding) = match system.agents.get_agent(name) {
                    Some(agent) => (agent.metrics, agent.kernel_id.to_string()),
                    None => (
                        ctx.scorer.agent_baseline(name),
                        kernel_binding_guess(name).to_string(),
                    ),
                };

                json!({
                    "name": name,
                    "status": ComponentStatus::Active.as_str(),
                    "resonance": metrics.resonance,
                    "ethicalDrift": metrics.ethical_drift,
                    "reflexiveInstability": metrics.reflexive_instability,
                    "kernelBinding": kernel_binding,
                    "lastAction": Utc::now().to_rfc3339(),
                    "uptime": ctx.uptime_secs(),
                })
            }
            Self::KernelInfo => {
                let id = param(params, "kernelId");
                let (name, description) = match system.kernels.get_kernel(id) {
                    Some(kernel) => (kernel.name.clone(), kernel.description.clone()),
                    None => (id.to_string(), "No description available".to_string()),
                };

                json!({
                    "id": id,
                    "name": name,
                    "description": description,
                    "status": ComponentStatus::Active.as_str(),
                    "boundAgents": system.kernels.agents_bound_to_kernel(id),
                    "metrics": {
                        "stability": rng.gen_range(0.8..1.0),
                        "coherence": rng.gen_range(0.7..0.9),
                        "efficiency": rng.gen_range(0.75..0.95),
                    },
                })
            }
            Self::ModuleInfo => {
                let id = param(params, "moduleId");
                let (name, description) = match system.modules.get_module(id) {
                    Some(module) => (module.name.clone(), module.description.clone()),
                    None => (id.to_string(), "No description available".to_string()),
                };

                json!({
                    "id": id,
                    "name": name,
                    "description": description,
                    "status": ComponentStatus::Active.as_str(),
                    "usedByAgents": system.agents.agents_using_module(id),
                    "metrics": {
                        "performance": rng.gen_range(0.7..1.0),
                        "reliability": rng.gen_range(0.8..1.0),
                        "lastUpdated": Utc::now().to_rfc3339(),
                    },
                })
            }
        }
    }
}

fn param<'a>(params: &'a UriParams, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or_default()
}
