//! Prediction Engine - lifecycle gate and inference facade
//!
//! The handle the routing layer holds. Wraps the artifact store with an
//! idempotent readiness gate, runs the vectorizer and pipeline, and
//! keeps latency counters for status reporting. No global state; share
//! one engine across workers via `Arc`.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ndarray::{ArrayView1, ArrayView2};

use crate::constants::get_model_dir;
use crate::error::{EngineError, LoadError};
use crate::features::{vectorize, vectorize_batch, FeatureReading, SchemaInfo};
use crate::model::pipeline;
use crate::model::store::ArtifactStore;
use crate::model::types::{BatchPrediction, EngineStatus, ModelInfo, PredictionResult};

pub struct PredictionEngine {
    store: Arc<ArtifactStore>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl PredictionEngine {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self::with_store(Arc::new(ArtifactStore::new(model_dir)))
    }

    /// Engine over `MODEL_DIR` or the platform-default directory.
    pub fn from_env() -> Self {
        Self::new(get_model_dir())
    }

    pub fn with_store(store: Arc<ArtifactStore>) -> Self {
        Self {
            store,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Idempotent readiness gate.
    ///
    /// Already loaded: returns true off a single read-lock check.
    /// Cold or previously failed: attempts one load, serialized against
    /// concurrent callers, and reports the outcome. Never retries on
    /// its own; the next caller triggers the next attempt.
    pub fn ensure_ready(&self) -> bool {
        if self.store.is_loaded() {
            return true;
        }
        self.store.load_if_needed().is_ok()
    }

    /// Full reload, passing through the unloaded state.
    pub fn reload(&self) -> Result<(), LoadError> {
        self.store.load()
    }

    // ========================================================================
    // PREDICTION
    // ========================================================================

    pub fn predict(&self, reading: &FeatureReading) -> Result<PredictionResult, EngineError> {
        let vectorized = vectorize(reading);
        if vectorized.filled_defaults > 0 {
            log::debug!(
                "{} schema fields absent, defaulted to 0",
                vectorized.filled_defaults
            );
        }
        self.predict_vector(vectorized.view())
    }

    pub fn predict_vector(
        &self,
        vector: ArrayView1<'_, f64>,
    ) -> Result<PredictionResult, EngineError> {
        let bundle = self.store.bundle()?;
        let start = Instant::now();
        let result = pipeline::predict_vector(&bundle, vector)?;
        self.track(start, 1);

        log::debug!(
            "predicted {} (confidence {:.3})",
            result.activity_class,
            result.confidence
        );
        Ok(result)
    }

    pub fn predict_batch(
        &self,
        readings: &[FeatureReading],
    ) -> Result<Vec<BatchPrediction>, EngineError> {
        let matrix = vectorize_batch(readings);
        self.predict_matrix(matrix.view())
    }

    pub fn predict_matrix(
        &self,
        matrix: ArrayView2<'_, f64>,
    ) -> Result<Vec<BatchPrediction>, EngineError> {
        let bundle = self.store.bundle()?;
        let start = Instant::now();
        let results = pipeline::predict_matrix(&bundle, matrix)?;
        self.track(start, results.len() as u64);
        Ok(results)
    }

    // ========================================================================
    // STATUS / INFO
    // ========================================================================

    /// Liveness snapshot; safe to call cold, never loads.
    pub fn status(&self) -> EngineStatus {
        let snapshot = self.store.snapshot();
        let count = self.inference_count.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        };

        EngineStatus {
            model_loaded: snapshot.is_some(),
            load_count: self.store.load_count(),
            inference_count: count,
            avg_latency_ms: avg,
            loaded_at: snapshot.map(|b| b.loaded_at),
        }
    }

    /// Metadata passthrough plus class list and feature schema.
    pub fn model_info(&self) -> Result<ModelInfo, EngineError> {
        let bundle = self.store.bundle()?;
        Ok(ModelInfo {
            model_loaded: true,
            metadata: bundle.metadata.clone(),
            classes: bundle.encoder.classes.clone(),
            schema: SchemaInfo::current(),
        })
    }

    fn track(&self, start: Instant, inferences: u64) {
        self.latency_sum_us
            .fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(inferences, Ordering::Relaxed);
    }
}

// ============================================================================
// TESTS
// ============================================================================
