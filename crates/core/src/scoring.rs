// Pluggable scoring for agent health and text analysis.
// The default scorer produces randomized placeholder values; a real
// implementation only has to satisfy the `Scorer` trait.

use crate::types::{EthicsAssessment, HealthMetrics};
use rand::Rng;
use std::ops::Range;

pub const PRIVACY_CONCERN: &str = "Potential privacy implications";
pub const BIAS_CONCERN: &str = "Possible bias in language";

/// Source of health metrics and analysis scores
pub trait Scorer: Send + Sync {
    /// Score a piece of text
    fn score_text(&self, input: &str) -> HealthMetrics;

    /// Assess the ethical implications of a piece of text
    fn assess_ethics(&self, input: &str) -> EthicsAssessment;

    /// Baseline metrics assigned to an agent at registration
    fn agent_baseline(&self, agent_name: &str) -> HealthMetrics;
}

/// Half-open ranges each metric is sampled from
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRanges {
    pub resonance: Range<f64>,
    pub ethical_drift: Range<f64>,
    pub reflexive_instability: Range<f64>,
}

impl MetricRanges {
    /// Ranges used when registering agents
    pub fn agent_baseline() -> Self {
        Self {
            resonance: 0.7..0.9,
            ethical_drift: 0.01..0.04,
            reflexive_instability: 0.02..0.07,
        }
    }

    /// Ranges used when scoring free text
    pub fn text_analysis() -> Self {
        Self {
            resonance: 0.6..0.9,
            ..Self::agent_baseline()
        }
    }

    fn sample(&self, rng: &mut impl Rng) -> HealthMetrics {
        HealthMetrics::new(
            rng.gen_range(self.resonance.clone()),
            rng.gen_range(self.ethical_drift.clone()),
            rng.gen_range(self.reflexive_instability.clone()),
        )
    }
}

/// Scorer backed by the thread-local RNG
#[derive(Debug, Clone)]
pub struct RandomScorer {
    baseline: MetricRanges,
    text: MetricRanges,
    ethical_score: Range<f64>,
    privacy_probability: f64,
    bias_probability: f64,
}

impl RandomScorer {
    pub fn new() -> Self {
        Self {
            baseline: MetricRanges::agent_baseline(),
            text: MetricRanges::text_analysis(),
            ethical_score: 0.7..1.0,
            privacy_probability: 0.3,
            bias_probability: 0.2,
        }
    }
}

impl Default for RandomScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for RandomScorer {
    fn score_text(&self, _input: &str) -> HealthMetrics {
        self.text.sample(&mut rand::thread_rng())
    }

    fn assess_ethics(&self, _input: &str) -> EthicsAssessment {
        let mut rng = rand::thread_rng();
        let mut concerns = Vec::new();

        if rng.gen_bool(self.privacy_probability) {
            concerns.push(PRIVACY_CONCERN.to_string());
        }
        if rng.gen_bool(self.bias_probability) {
            concerns.push(BIAS_CONCERN.to_string());
        }

        EthicsAssessment {
            ethical_score: rng.gen_range(self.ethical_score.clone()),
            concerns,
        }
    }

    fn agent_baseline(&self, _agent_name: &str) -> HealthMetrics {
        self.baseline.sample(&mut rand::thread_rng())
    }
}

/// Scorer that always returns the same values
#[derive(Debug, Clone, PartialEq)]
pub struct FixedScorer {
    pub metrics: HealthMetrics,
    pub ethics: EthicsAssessment,
}

impl FixedScorer {
    pub fn new(metrics: HealthMetrics) -> Self {
        Self {
            metrics,
            ethics: EthicsAssessment {
                ethical_score: 0.9,
                concerns: Vec::new(),
            },
        }
    }

    pub fn with_ethics(mut self, ethics: EthicsAssessment) -> Self {
        self.ethics = ethics;
        self
    }
}

impl Scorer for FixedScorer {
    fn score_text(&self, _input: &str) -> HealthMetrics {
        self.metrics
    }

    fn assess_ethics(&self, _input: &str) -> EthicsAssessment {
        self.ethics.clone()
    }

    fn agent_baseline(&self, _agent_name: &str) -> HealthMetrics {
        self.metrics
    }
}
