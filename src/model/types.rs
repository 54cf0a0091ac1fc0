//! Result and status types returned across the request boundary.
//!
//! These serialize verbatim as response bodies; the routing layer adds
//! nothing but transport framing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::SchemaInfo;

use super::risk::RiskLevel;

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// Single-reading classification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Decoded class label, e.g. "ACTIVE"
    pub activity_class: String,
    /// Max class probability; always equals
    /// `confidence_scores[activity_class]`
    pub confidence: f64,
    /// Full distribution: label -> probability, sums to 1
    pub confidence_scores: HashMap<String, f64>,
}

impl PredictionResult {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_activity_class(&self.activity_class)
    }
}

/// One entry of a batch response. Carries no full distribution; the
/// caller correlates by `index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPrediction {
    /// 0-based position in the input batch
    pub index: usize,
    pub activity_class: String,
    pub confidence: f64,
}

// ============================================================================
// STATUS / INFO
// ============================================================================

/// Liveness snapshot. Cheap to produce and never triggers a load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub load_count: u64,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Descriptive model information for the info query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_loaded: bool,
    /// Training metadata, passed through unmodified
    pub metadata: serde_json::Value,
    pub classes: Vec<String>,
    pub schema: SchemaInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_result_serializes_flat() {
        let mut scores = HashMap::new();
        scores.insert("ACTIVE".to_string(), 0.75);
        scores.insert("RESTING".to_string(), 0.25);

        let result = PredictionResult {
            activity_class: "ACTIVE".to_string(),
            confidence: 0.75,
            confidence_scores: scores,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["activity_class"], "ACTIVE");
        assert_eq!(json["confidence"], 0.75);
        assert_eq!(json["confidence_scores"]["RESTING"], 0.25);
    }

    #[test]
    fn test_risk_level_from_result() {
        let result = PredictionResult {
            activity_class: "FALL_DETECTED".to_string(),
            confidence: 0.9,
            confidence_scores: HashMap::new(),
        };
        assert_eq!(result.risk_level(), RiskLevel::Critical);
    }
}
