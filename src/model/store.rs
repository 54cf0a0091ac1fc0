//! Artifact Store - owns the published model bundle
//!
//! A load builds the whole bundle off to the side and publishes it with
//! a single pointer swap, so readers always see all four artifacts
//! together or none at all. The read path clones an `Arc` out of a
//! short read-lock and never blocks on a load in progress.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;

use crate::constants::{CLASSIFIER_FILE, ENCODER_FILE, METADATA_FILE, SCALER_FILE};
use crate::error::{EngineError, LoadError};

use super::artifacts::{
    validate_artifacts, ActivityClassifier, LabelEncoder, StandardScaler,
};

// ============================================================================
// ARTIFACT BUNDLE
// ============================================================================

/// The four artifacts, immutable once published.
#[derive(Debug)]
pub struct ArtifactBundle {
    pub classifier: ActivityClassifier,
    pub encoder: LabelEncoder,
    pub scaler: StandardScaler,
    /// Opaque training metadata, passed through to callers verbatim
    pub metadata: serde_json::Value,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// ARTIFACT STORE
// ============================================================================

pub struct ArtifactStore {
    model_dir: PathBuf,
    bundle: RwLock<Option<Arc<ArtifactBundle>>>,
    load_lock: Mutex<()>,
    load_count: AtomicU64,
}

impl ArtifactStore {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            bundle: RwLock::new(None),
            load_lock: Mutex::new(()),
            load_count: AtomicU64::new(0),
        }
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.read().is_some()
    }

    /// Number of successful loads since construction
    pub fn load_count(&self) -> u64 {
        self.load_count.load(Ordering::Relaxed)
    }

    /// Current bundle, or `NotReady` when nothing is published.
    pub fn bundle(&self) -> Result<Arc<ArtifactBundle>, EngineError> {
        self.snapshot().ok_or(EngineError::NotReady)
    }

    pub fn snapshot(&self) -> Option<Arc<ArtifactBundle>> {
        self.bundle.read().clone()
    }

    /// Load the artifacts, replacing any published bundle.
    ///
    /// Passes through the unloaded state first: on failure the store is
    /// left empty even if an older bundle existed.
    pub fn load(&self) -> Result<(), LoadError> {
        let _guard = self.load_lock.lock();
        *self.bundle.write() = None;
        self.load_locked()
    }

    /// Load only if nothing is published yet.
    ///
    /// Concurrent callers serialize on the load lock; whoever arrives
    /// second finds the bundle already published and returns without
    /// touching the filesystem.
    pub fn load_if_needed(&self) -> Result<(), LoadError> {
        let _guard = self.load_lock.lock();
        if self.bundle.read().is_some() {
            return Ok(());
        }
        self.load_locked()
    }

    /// Drop the published bundle, returning the store to the unloaded
    /// state. In-flight readers keep their `Arc` until they finish.
    pub fn unload(&self) {
        let _guard = self.load_lock.lock();
        *self.bundle.write() = None;
        log::info!("model artifacts unloaded");
    }

    fn load_locked(&self) -> Result<(), LoadError> {
        log::info!("loading model artifacts from {}", self.model_dir.display());

        match self.read_bundle() {
            Ok(bundle) => {
                *self.bundle.write() = Some(Arc::new(bundle));
                self.load_count.fetch_add(1, Ordering::Relaxed);
                log::info!("model artifacts ready");
                Ok(())
            }
            Err(err) => {
                *self.bundle.write() = None;
                log::error!("model load failed: {}", err);
                Err(err)
            }
        }
    }

    fn read_bundle(&self) -> Result<ArtifactBundle, LoadError> {
        let classifier: ActivityClassifier =
            read_artifact(&self.model_dir.join(CLASSIFIER_FILE), "classifier")?;
        log::info!(
            "classifier loaded ({}, {} trees, {} classes)",
            classifier.model_type,
            classifier.trees.len(),
            classifier.n_classes
        );

        let encoder: LabelEncoder =
            read_artifact(&self.model_dir.join(ENCODER_FILE), "label encoder")?;
        log::info!("label encoder loaded ({} classes)", encoder.len());

        let scaler: StandardScaler =
            read_artifact(&self.model_dir.join(SCALER_FILE), "scaler")?;
        log::info!("scaler loaded");

        let metadata: serde_json::Value =
            read_artifact(&self.model_dir.join(METADATA_FILE), "metadata")?;
        log::info!("metadata loaded");

        validate_artifacts(&classifier, &encoder, &scaler)?;

        Ok(ArtifactBundle {
            classifier,
            encoder,
            scaler,
            metadata,
            loaded_at: Utc::now(),
        })
    }
}

fn read_artifact<T: DeserializeOwned>(
    path: &Path,
    artifact: &'static str,
) -> Result<T, LoadError> {
    let data = fs::read(path).map_err(|source| {
        log::warn!("{} unreadable at {}", artifact, path.display());
        LoadError::Io { artifact, source }
    })?;

    serde_json::from_slice(&data).map_err(|source| {
        log::warn!("{} malformed at {}", artifact, path.display());
        LoadError::Parse { artifact, source }
    })
}
