use crate::types::{KernelId, ALL_KERNELS};
use serde::{Deserialize, Serialize};

/// A named partition agents can be bound to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kernel {
    pub id: KernelId,
    pub name: String,
    pub description: String,
    /// Bound agent names in bind order
    pub bound_agents: Vec<String>,
}

impl Kernel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: KernelId::new(id),
            name: name.into(),
            description: description.into(),
            bound_agents: Vec::new(),
        }
    }
}

/// Registry of kernels, populated once at startup
#[derive(Debug, Default)]
pub struct KernelRegistry {
    kernels: Vec<Kernel>,
}

impl KernelRegistry {
    pub fn new() -> Self {
        Self { kernels: Vec::new() }
    }

    /// Create the four core kernels plus the meta kernel. Only the first call
    /// has any effect.
    pub fn initialize(&mut self) {
        if !self.kernels.is_empty() {
            tracing::warn!("Kernel registry already initialized, skipping");
            return;
        }

        for kernel in default_kernels() {
            self.create_kernel(kernel);
        }

        tracing::info!("Initialized {} kernels", self.kernels.len());
    }

    /// Insert a kernel, replacing any kernel with the same id in place
    pub fn create_kernel(&mut self, kernel: Kernel) {
        tracing::debug!("Created kernel: {} ({})", kernel.name, kernel.id);

        match self.kernels.iter_mut().find(|k| k.id == kernel.id) {
            Some(existing) => *existing = kernel,
            None => self.kernels.push(kernel),
        }
    }

    pub fn get_kernel(&self, id: &str) -> Option<&Kernel> {
        self.kernels.iter().find(|k| k.id.as_str() == id)
    }

    pub fn all_kernels(&self) -> Vec<Kernel> {
        self.kernels.clone()
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Bind an agent to a kernel. Binding to the meta kernel also binds the
    /// agent to every concrete kernel. Unknown kernels are logged and ignored.
    ///
    /// Binding is append-only: binding the same agent twice records it twice.
    pub fn bind_agent_to_kernel(&mut self, agent_name: &str, kernel_id: &str) {
        let Some(kernel) = self.kernels.iter_mut().find(|k| k.id.as_str() == kernel_id) else {
            tracing::error!(
                "Cannot bind agent {} to non-existent kernel {}",
                agent_name,
                kernel_id
            );
            return;
        };

        push_binding(kernel, agent_name);

        if kernel_id == ALL_KERNELS {
            for kernel in self.kernels.iter_mut().filter(|k| !k.id.is_all()) {
                push_binding(kernel, agent_name);
            }
        }
    }

    /// Snapshot of the agents bound to a kernel, empty for unknown ids
    pub fn agents_bound_to_kernel(&self, kernel_id: &str) -> Vec<String> {
        self.get_kernel(kernel_id)
            .map(|k| k.bound_agents.clone())
            .unwrap_or_default()
    }
}

fn push_binding(kernel: &mut Kernel, agent_name: &str) {
    if kernel.bound_agents.iter().any(|a| a == agent_name) {
        tracing::warn!("Agent {} is already bound to kernel {}", agent_name, kernel.id);
    }

    kernel.bound_agents.push(agent_name.to_string());
    tracing::debug!("Bound agent {} to kernel {} ({})", agent_name, kernel.name, kernel.id);
}

/// The fixed kernel catalog
pub fn default_kernels() -> Vec<Kernel> {
    vec![
        Kernel::new(
            "K1",
            "Reflexive Kernel",
            "Handles reflexive intelligence and self-awareness",
        ),
        Kernel::new(
            "K2",
            "Agentic Kernel",
            "Manages agent actions and tool orchestration",
        ),
        Kernel::new(
            "K3",
            "Ethical Kernel",
            "Enforces ethical constraints and drift control",
        ),
        Kernel::new(
            "K4",
            "Stewardship Kernel",
            "Handles long-term planning and resource management",
        ),
        Kernel::new(
            ALL_KERNELS,
            "Meta Kernel",
            "Meta-kernel that spans all four core kernels",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized() -> KernelRegistry {
        let mut registry = KernelRegistry::new();
        registry.initialize();
        registry
    }

    #[test]
    fn test_initialize_creates_five_kernels() {
        let registry = initialized();

        assert_eq!(registry.len(), 5);
        let ids: Vec<_> = registry
            .all_kernels()
            .into_iter()
            .map(|k| k.id.0)
            .collect();
        assert_eq!(ids, vec!["K1", "K2", "K3", "K4", "ALL"]);
    }

    #[test]
    fn test_initialize_is_one_shot() {
        let mut registry = initialized();
        registry.bind_agent_to_kernel("Navigator", "K1");
        registry.initialize();

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.agents_bound_to_kernel("K1"), vec!["Navigator"]);
    }

    #[test]
    fn test_bind_to_concrete_kernel() {
        let mut registry = initialized();
        registry.bind_agent_to_kernel("Navigator", "K1");

        assert_eq!(registry.agents_bound_to_kernel("K1"), vec!["Navigator"]);
        assert!(registry.agents_bound_to_kernel("K2").is_empty());
        assert!(registry.agents_bound_to_kernel("ALL").is_empty());
    }

    #[test]
    fn test_bind_to_all_kernels() {
        let mut registry = initialized();
        registry.bind_agent_to_kernel("PALMA", "ALL");

        for kernel in registry.all_kernels() {
            assert_eq!(kernel.bound_agents, vec!["PALMA"], "kernel {}", kernel.id);
        }
    }

    #[test]
    fn test_bind_to_unknown_kernel_is_noop() {
        let mut registry = initialized();
        registry.bind_agent_to_kernel("Ghost", "K9");

        for kernel in registry.all_kernels() {
            assert!(kernel.bound_agents.is_empty());
        }
        assert!(registry.agents_bound_to_kernel("K9").is_empty());
    }

    #[test]
    fn test_double_bind_keeps_multiplicity() {
        let mut registry = initialized();
        registry.bind_agent_to_kernel("Alex", "K2");
        registry.bind_agent_to_kernel("Alex", "K2");

        assert_eq!(registry.agents_bound_to_kernel("K2"), vec!["Alex", "Alex"]);
    }

    #[test]
    fn test_bound_agents_snapshot_is_a_copy() {
        let mut registry = initialized();
        registry.bind_agent_to_kernel("ARIA", "K4");

        let mut snapshot = registry.agents_bound_to_kernel("K4");
        snapshot.push("Intruder".to_string());

        assert_eq!(registry.agents_bound_to_kernel("K4"), vec!["ARIA"]);
    }
}
