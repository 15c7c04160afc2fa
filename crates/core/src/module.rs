use serde::Serialize;

/// Initialization hook run when a module is loaded
pub type ModuleInit = fn(&Module);

/// A named capability unit
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip)]
    init: ModuleInit,
}

impl Module {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            init: log_initialized,
        }
    }

    pub fn with_init(mut self, init: ModuleInit) -> Self {
        self.init = init;
        self
    }

    pub fn initialize(&self) {
        (self.init)(self)
    }
}

fn log_initialized(module: &Module) {
    tracing::debug!("Module {} initialized", module.name);
}

/// Registry of loaded modules, in load order
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self { modules: Vec::new() }
    }

    /// Load and initialize the fixed module catalog
    pub fn load_all_modules(&mut self) {
        for module in default_modules() {
            self.load_module(module);
        }

        tracing::info!("Loaded {} modules", self.modules.len());
    }

    /// Register a module and run its initialization. A module with the same
    /// id is replaced and the new one initialized again.
    pub fn load_module(&mut self, module: Module) {
        module.initialize();
        tracing::debug!("Loaded module: {} ({})", module.name, module.id);

        match self.modules.iter_mut().find(|m| m.id == module.id) {
            Some(existing) => *existing = module,
            None => self.modules.push(module),
        }
    }

    pub fn get_module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn all_modules(&self) -> Vec<Module> {
        self.modules.clone()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// The fixed module catalog
pub fn default_modules() -> Vec<Module> {
    [
        ("context_engine", "Context Engine", "Manages context propagation and state transitions"),
        ("ledger.tracing", "Ledger Tracing", "Provides tracing and logging capabilities"),
        ("tool.calling", "Tool Calling", "Manages tool invocation and result handling"),
        ("drift_balancer", "Drift Balancer", "Manages ethical drift and resonance stability"),
        ("agent.bridge", "Agent Bridge", "Facilitates agent-to-agent communication"),
        ("ethics.guard", "Ethics Guard", "Enforces ethical constraints and monitors drift"),
        ("resonance.compute", "Resonance Compute", "Calculates resonance metrics and stability"),
        ("cache.overlay", "Cache Overlay", "Provides shared memory and caching capabilities"),
        ("reflexive.state", "Reflexive State", "Manages agent self-awareness and reflection"),
        ("resonance.topograph", "Resonance Topograph", "Maps resonance fields and attractors"),
        ("telemetry.otlp", "Telemetry OTLP", "Provides OpenTelemetry integration"),
        ("mcp.kernel.sync", "Kernel Sync", "Synchronizes kernel states and transitions"),
    ]
    .into_iter()
    .map(|(id, name, description)| Module::new(id, name, description))
    .collect()
}
