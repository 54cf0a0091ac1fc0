//! Features Module - Schema, Readings and Vectorization
//!
//! Turns unordered sensor readings into fixed-order numeric vectors
//! the classifier was trained against.

pub mod reading;
pub mod schema;
pub mod vector;


// Re-export common types
pub use reading::{is_night_hour, FeatureReading};
pub use schema::{
    feature_index, feature_name, schema_hash, SchemaInfo, FEATURE_COUNT, FEATURE_SCHEMA,
    SCHEMA_VERSION,
};
pub use vector::{vectorize, vectorize_batch, VectorizedReading};
