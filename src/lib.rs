//! Activity prediction core for the Smart Patient Room Monitor.
//!
//! Classifies patient activity (sleeping, resting, active, restless,
//! fall risk, fall detected) from room sensor readings using a trained
//! tree-ensemble model. This crate is the prediction core only: model
//! lifecycle, feature vectorization, inference and result decoding.
//! HTTP routing, training and FHIR extraction live in their own
//! services and call in through [`PredictionEngine`].
//!
//! ```no_run
//! use activity_monitor_core::{FeatureReading, PredictionEngine};
//!
//! let engine = PredictionEngine::from_env();
//! if engine.ensure_ready() {
//!     let reading = FeatureReading::new()
//!         .with("temperature", 23.5)
//!         .with("motion_level", 45.0)
//!         .with("sound_level", 120.0);
//!     let result = engine.predict(&reading)?;
//!     println!("{} ({:.0}%)", result.activity_class, result.confidence * 100.0);
//! }
//! # Ok::<(), activity_monitor_core::EngineError>(())
//! ```

pub mod constants;
pub mod engine;
pub mod error;
pub mod features;
pub mod model;

pub use engine::PredictionEngine;
pub use error::{EngineError, LoadError};
pub use features::{
    vectorize, vectorize_batch, FeatureReading, SchemaInfo, VectorizedReading, FEATURE_COUNT,
    FEATURE_SCHEMA,
};
pub use model::{
    ArtifactStore, BatchPrediction, EngineStatus, ModelInfo, PredictionResult, RiskLevel,
};
