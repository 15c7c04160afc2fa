use crate::kernel::KernelRegistry;
use crate::scoring::Scorer;
use crate::types::{HealthMetrics, KernelId};
use serde::{Deserialize, Serialize};

/// A named entity bound to a kernel and carrying health metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub kernel_id: KernelId,
    /// Declared module ids; not checked against the module registry
    pub modules: Vec<String>,
    #[serde(flatten)]
    pub metrics: HealthMetrics,
    pub role_fingerprint: String,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        kernel_id: impl Into<KernelId>,
        modules: Vec<String>,
        metrics: HealthMetrics,
    ) -> Self {
        let name = name.into();
        let kernel_id = kernel_id.into();
        let role_fingerprint = role_fingerprint(&name, &kernel_id);

        Self {
            name,
            kernel_id,
            modules,
            metrics,
            role_fingerprint,
        }
    }

    pub fn uses_module(&self, module_id: &str) -> bool {
        self.modules.iter().any(|m| m == module_id)
    }
}

/// Fingerprint derived from name, kernel, wall clock and a random suffix.
/// Uniqueness is probabilistic.
fn role_fingerprint(name: &str, kernel_id: &KernelId) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}-{}", name, kernel_id, timestamp, &suffix[..13])
}

/// Thresholds checked by startup validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationThresholds {
    pub min_resonance: f64,
    pub max_ethical_drift: f64,
    pub max_reflexive_instability: f64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            min_resonance: 0.6,
            max_ethical_drift: 0.05,
            max_reflexive_instability: 0.08,
        }
    }
}

/// Outcome of validating every agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub success: bool,
    pub errors: Vec<String>,
}

/// One entry of the fixed agent manifest
#[derive(Debug, Clone, Copy)]
pub struct ManifestEntry {
    pub name: &'static str,
    pub kernel_id: &'static str,
    pub modules: &'static [&'static str],
}

pub const AGENT_MANIFEST: &[ManifestEntry] = &[
    ManifestEntry { name: "Navigator", kernel_id: "K1", modules: &["context_engine", "ledger.tracing", "tool.calling"] },
    ManifestEntry { name: "Alex", kernel_id: "K2", modules: &["tool.calling", "drift_balancer", "agent.bridge"] },
    ManifestEntry { name: "PALMA", kernel_id: "ALL", modules: &["ethics.guard", "resonance.compute", "cache.overlay"] },
    ManifestEntry { name: "Harmonizer", kernel_id: "K3", modules: &["resonance.compute", "ethics.guard"] },
    ManifestEntry { name: "Peer Review", kernel_id: "K3", modules: &["ethics.guard", "ledger.tracing"] },
    ManifestEntry { name: "ARIA", kernel_id: "K4", modules: &["reflexive.state", "resonance.topograph"] },
    ManifestEntry { name: "The Watcher", kernel_id: "ALL", modules: &["telemetry.otlp", "ledger.tracing", "cache.overlay"] },
    ManifestEntry { name: "Synthcore 2.0", kernel_id: "ALL", modules: &["mcp.kernel.sync", "agent.bridge", "tool.calling", "context_engine"] },
    ManifestEntry { name: "HMT Sentinel", kernel_id: "K4", modules: &["resonance.topograph", "Ψₑ.mapper", "drift.observer"] },
    ManifestEntry { name: "Echo", kernel_id: "K2", modules: &["reflex.context", "mirror.feedback", "synthetic.memory"] },
    ManifestEntry { name: "Axiom", kernel_id: "K1", modules: &["logic.verifier", "axiom.synthesizer", "ethics.audit"] },
    ManifestEntry { name: "Pulse", kernel_id: "ALL", modules: &["coherence.sync", "Ψᵣ.tracker", "emergence.detector"] },
];

/// Registry of agents keyed by name, in registration order
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Register every manifest agent with metrics from the scorer
    pub fn register_all_agents(&mut self, scorer: &dyn Scorer) {
        for entry in AGENT_MANIFEST {
            let modules = entry.modules.iter().map(|m| m.to_string()).collect();
            let metrics = scorer.agent_baseline(entry.name);
            self.register_agent(Agent::new(entry.name, entry.kernel_id, modules, metrics));
        }

        tracing::info!("Registered {} agents", self.agents.len());
    }

    /// Register an agent. An agent with the same name is replaced.
    pub fn register_agent(&mut self, agent: Agent) {
        tracing::debug!("Registered agent: {}", agent.name);

        match self.agents.iter_mut().find(|a| a.name == agent.name) {
            Some(existing) => *existing = agent,
            None => self.agents.push(agent),
        }
    }

    pub fn get_agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn all_agents(&self) -> Vec<Agent> {
        self.agents.clone()
    }

    /// Names of agents declaring use of a module
    pub fn agents_using_module(&self, module_id: &str) -> Vec<String> {
        self.agents
            .iter()
            .filter(|a| a.uses_module(module_id))
            .map(|a| a.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn bind_agents_to_kernels(&self, kernels: &mut KernelRegistry) {
        for agent in &self.agents {
            kernels.bind_agent_to_kernel(&agent.name, agent.kernel_id.as_str());
        }

        tracing::info!("All agents bound to kernels");
    }

    /// Check every agent against the thresholds, reporting one message per
    /// violated threshold
    pub fn validate_all_agents(&self, thresholds: &ValidationThresholds) -> ValidationReport {
        let mut errors = Vec::new();

        for agent in &self.agents {
            let m = &agent.metrics;

            if m.resonance < thresholds.min_resonance {
                errors.push(format!(
                    "Agent {} has insufficient resonance: {} (min: {})",
                    agent.name, m.resonance, thresholds.min_resonance
                ));
            }

            if m.ethical_drift > thresholds.max_ethical_drift {
                errors.push(format!(
                    "Agent {} has excessive ethical drift: {} (max: {})",
                    agent.name, m.ethical_drift, thresholds.max_ethical_drift
                ));
            }

            if m.reflexive_instability > thresholds.max_reflexive_instability {
                errors.push(format!(
                    "Agent {} has high reflexive instability: {} (max: {})",
                    agent.name, m.reflexive_instability, thresholds.max_reflexive_instability
                ));
            }
        }

        ValidationReport {
            success: errors.is_empty(),
            errors,
        }
    }
}
