//! Feature Schema - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment SCHEMA_VERSION
//! 2. Change order → increment SCHEMA_VERSION
//! 3. Remove feature → increment SCHEMA_VERSION
//!
//! The scaler and classifier are trained against this exact order;
//! artifacts from a different layout must fail loudly, not mis-predict.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEMA VERSION
// ============================================================================

/// Current feature schema version
/// MUST be incremented when the layout changes
pub const SCHEMA_VERSION: u8 = 1;

// ============================================================================
// FEATURE SCHEMA (Authoritative source)
// ============================================================================

/// Feature names in the exact order they appear in the vector
/// This is the SINGLE SOURCE OF TRUTH for feature layout
pub const FEATURE_SCHEMA: &[&str] = &[
    "temperature",  // 0: room temperature in degrees C
    "motion_level", // 1: motion sensor intensity
    "sound_level",  // 2: ambient sound level
    "hour_of_day",  // 3: local hour, 0-23
    "is_night",     // 4: 1 between 22:00 and 05:59, else 0
    "motion_trend", // 5: caller-computed motion delta over recent history
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_SCHEMA.len()!
pub const FEATURE_COUNT: usize = 6;

// ============================================================================
// SCHEMA HASH
// ============================================================================

/// CRC32 hash over the schema version and ordered feature names.
/// Used to detect layout drift between artifacts and this binary.
pub fn schema_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[SCHEMA_VERSION]);
    for name in FEATURE_SCHEMA {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}

// ============================================================================
// SCHEMA INFO
// ============================================================================

/// Complete schema information for the info query and logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl SchemaInfo {
    pub fn current() -> Self {
        Self {
            version: SCHEMA_VERSION,
            hash: schema_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for SchemaInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_SCHEMA.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_SCHEMA.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
