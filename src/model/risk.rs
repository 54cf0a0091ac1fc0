//! Risk interpretation of activity classes.
//!
//! Purely descriptive for dashboards and alerting; the engine never
//! branches on it. Unknown labels map to `Unknown` rather than failing
//! so a retrained model with new classes keeps serving.

use serde::{Deserialize, Serialize};

/// Care-attention level derived from the predicted activity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Normal,
    Medium,
    High,
    Critical,
    Unknown,
}

impl RiskLevel {
    pub fn from_activity_class(class: &str) -> Self {
        match class {
            "SLEEPING" | "RESTING" => RiskLevel::Low,
            "ACTIVE" => RiskLevel::Normal,
            "RESTLESS" => RiskLevel::Medium,
            "FALL_RISK" => RiskLevel::High,
            "FALL_DETECTED" => RiskLevel::Critical,
            _ => RiskLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Normal => "NORMAL",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Normal => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::Critical => 4,
            RiskLevel::Unknown => 1,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#22c55e",      // Green
            RiskLevel::Normal => "#3b82f6",   // Blue
            RiskLevel::Medium => "#f59e0b",   // Orange
            RiskLevel::High => "#ef4444",     // Red
            RiskLevel::Critical => "#dc2626", // Dark Red
            RiskLevel::Unknown => "#6b7280",  // Gray
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// "FALL_DETECTED" -> "Fall Detected", for display surfaces.
pub fn display_activity_class(class: &str) -> String {
    class
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
