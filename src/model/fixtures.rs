//! Test fixtures: a tiny but fully valid model directory.
//!
//! Two depth-1 trees over motion and sound, three classes. With the
//! identity scaler an active reading (motion 45, sound 120) averages to
//! [0.75, 0.25, 0.0] -> ACTIVE, and the all-zero reading lands on
//! SLEEPING.

use std::fs;
use std::path::Path;

use crate::constants::{CLASSIFIER_FILE, ENCODER_FILE, METADATA_FILE, SCALER_FILE};
use crate::features::{FeatureReading, FEATURE_SCHEMA};

use super::artifacts::{ActivityClassifier, DecisionTree, LabelEncoder, StandardScaler, TreeNode};

pub(crate) const FIXTURE_CLASSES: [&str; 3] = ["ACTIVE", "RESTING", "SLEEPING"];

fn leaf(value: Vec<f64>) -> TreeNode {
    TreeNode {
        feature: None,
        threshold: 0.0,
        left: 0,
        right: 0,
        value,
    }
}

fn split(feature: usize, threshold: f64) -> TreeNode {
    TreeNode {
        feature: Some(feature),
        threshold,
        left: 1,
        right: 2,
        value: vec![0.0, 0.0, 0.0],
    }
}

pub(crate) fn classifier_fixture() -> ActivityClassifier {
    ActivityClassifier {
        model_type: "random_forest".to_string(),
        n_classes: 3,
        trees: vec![
            // motion_level <= 10 -> mostly SLEEPING, else mostly ACTIVE
            DecisionTree {
                nodes: vec![
                    split(1, 10.0),
                    leaf(vec![0.0, 2.0, 8.0]),
                    leaf(vec![8.0, 2.0, 0.0]),
                ],
            },
            // sound_level <= 50 -> mostly RESTING, else mostly ACTIVE
            DecisionTree {
                nodes: vec![
                    split(2, 50.0),
                    leaf(vec![1.0, 6.0, 3.0]),
                    leaf(vec![7.0, 3.0, 0.0]),
                ],
            },
        ],
    }
}

pub(crate) fn encoder_fixture() -> LabelEncoder {
    LabelEncoder {
        classes: FIXTURE_CLASSES.iter().map(|s| s.to_string()).collect(),
    }
}

pub(crate) fn scaler_fixture() -> StandardScaler {
    StandardScaler {
        mean: vec![0.0; 6],
        scale: vec![1.0; 6],
    }
}

pub(crate) fn metadata_fixture() -> serde_json::Value {
    serde_json::json!({
        "model_type": "random_forest",
        "features": FEATURE_SCHEMA,
        "classes": FIXTURE_CLASSES,
        "metrics": { "accuracy": 0.94, "f1_score": 0.93 },
        "feature_importance": { "motion_level": 0.41, "sound_level": 0.27 },
        "trained_at": "2025-05-20T10:15:00Z"
    })
}

/// Write all four artifacts into `dir`.
pub(crate) fn write_model_fixture(dir: &Path) {
    fs::write(
        dir.join(CLASSIFIER_FILE),
        serde_json::to_vec_pretty(&classifier_fixture()).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.join(ENCODER_FILE),
        serde_json::to_vec_pretty(&encoder_fixture()).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.join(SCALER_FILE),
        serde_json::to_vec_pretty(&scaler_fixture()).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.join(METADATA_FILE),
        serde_json::to_vec_pretty(&metadata_fixture()).unwrap(),
    )
    .unwrap();
}

/// Overwrite one artifact with unparseable bytes.
pub(crate) fn corrupt_artifact(dir: &Path, file: &str) {
    fs::write(dir.join(file), b"{ not json").unwrap();
}

/// The fully-specified daytime reading used across tests.
pub(crate) fn active_reading() -> FeatureReading {
    FeatureReading::new()
        .with("temperature", 23.5)
        .with("motion_level", 45.0)
        .with("sound_level", 120.0)
        .with("hour_of_day", 14.0)
        .with("is_night", 0.0)
        .with("motion_trend", 5.2)
}
