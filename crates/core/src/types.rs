use serde::{Deserialize, Serialize};

/// Identifier of the meta kernel that spans every concrete kernel
pub const ALL_KERNELS: &str = "ALL";

/// Identifier for a kernel partition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KernelId(pub String);

impl KernelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The sentinel kernel that denotes membership in all others
    pub fn all() -> Self {
        Self(ALL_KERNELS.to_string())
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL_KERNELS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KernelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for KernelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for KernelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Health metrics carried by every agent, each bounded to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    /// Higher is better
    pub resonance: f64,
    /// Lower is better
    pub ethical_drift: f64,
    /// Lower is better
    pub reflexive_instability: f64,
}

impl HealthMetrics {
    pub fn new(resonance: f64, ethical_drift: f64, reflexive_instability: f64) -> Self {
        Self {
            resonance,
            ethical_drift,
            reflexive_instability,
        }
    }
}

/// Result of an ethics assessment over a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthicsAssessment {
    pub ethical_score: f64,
    pub concerns: Vec<String>,
}

/// Lifecycle status reported for kernels, modules and agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Active,
    Inactive,
}

impl ComponentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_id_sentinel() {
        assert!(KernelId::all().is_all());
        assert!(!KernelId::new("K1").is_all());
        assert_eq!(KernelId::from("K3").to_string(), "K3");
    }

    #[test]
    fn test_health_metrics_wire_names() {
        let metrics = HealthMetrics::new(0.8, 0.02, 0.03);
        let json = serde_json::to_value(metrics).unwrap();

        assert_eq!(json["resonance"], 0.8);
        assert_eq!(json["ethicalDrift"], 0.02);
        assert_eq!(json["reflexiveInstability"], 0.03);
    }
}
