use crate::agent::{AgentRegistry, ValidationReport, ValidationThresholds};
use crate::kernel::KernelRegistry;
use crate::module::ModuleRegistry;
use crate::scoring::Scorer;

/// The kernel, module and agent registries, owned together
#[derive(Debug, Default)]
pub struct SystemRegistries {
    pub kernels: KernelRegistry,
    pub modules: ModuleRegistry,
    pub agents: AgentRegistry,
}

impl SystemRegistries {
    /// Initialize kernels, load modules, register agents and bind them,
    /// in that order
    pub fn bootstrap(scorer: &dyn Scorer) -> Self {
        let mut kernels = KernelRegistry::new();
        kernels.initialize();

        let mut modules = ModuleRegistry::new();
        modules.load_all_modules();

        let mut agents = AgentRegistry::new();
        agents.register_all_agents(scorer);
        agents.bind_agents_to_kernels(&mut kernels);

        tracing::info!("Server components initialized");

        Self {
            kernels,
            modules,
            agents,
        }
    }

    pub fn validate(&self, thresholds: &ValidationThresholds) -> ValidationReport {
        self.agents.validate_all_agents(thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::FixedScorer;
    use crate::types::HealthMetrics;

    #[test]
    fn test_bootstrap_populates_all_registries() {
        let system = SystemRegistries::bootstrap(&FixedScorer::new(HealthMetrics::new(0.8, 0.02, 0.03)));

        assert_eq!(system.kernels.len(), 5);
        assert_eq!(system.modules.len(), 12);
        assert_eq!(system.agents.len(), 12);

        // Every agent bound to the meta kernel shows up everywhere
        for kernel in system.kernels.all_kernels() {
            assert!(kernel.bound_agents.contains(&"Pulse".to_string()));
        }
        assert!(system.validate(&ValidationThresholds::default()).success);
    }
}
