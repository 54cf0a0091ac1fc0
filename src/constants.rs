//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default model directory, only edit this file.

use std::path::PathBuf;

/// Classifier artifact file name
pub const CLASSIFIER_FILE: &str = "activity_classifier.json";

/// Label encoder artifact file name
pub const ENCODER_FILE: &str = "label_encoder.json";

/// Feature scaler artifact file name
pub const SCALER_FILE: &str = "scaler.json";

/// Model metadata artifact file name
pub const METADATA_FILE: &str = "model_metadata.json";

/// First hour (inclusive) counted as night
pub const NIGHT_START_HOUR: u32 = 22;

/// First hour (exclusive upper bound) counted as night in the morning
pub const NIGHT_END_HOUR: u32 = 6;

/// Floor applied to scaler denominators
pub const MIN_SCALE: f64 = 1e-8;

/// App name
pub const APP_NAME: &str = "room-monitor";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the model directory from environment or use the platform default
pub fn get_model_dir() -> PathBuf {
    std::env::var("MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_model_dir())
}

/// Platform-local default model directory
pub fn default_model_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("models")
}
