//! Store and pipeline tests against on-disk fixture artifacts.

use ndarray::array;
use tempfile::tempdir;

use crate::constants::{CLASSIFIER_FILE, ENCODER_FILE, SCALER_FILE};
use crate::error::{EngineError, LoadError};
use crate::features::{vectorize, vectorize_batch, FeatureReading};

use super::fixtures;
use super::pipeline;
use super::store::ArtifactStore;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// STORE LIFECYCLE
// ============================================================================

#[test]
fn test_load_success_publishes_bundle() {
    init_logs();
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());

    let store = ArtifactStore::new(dir.path());
    assert!(!store.is_loaded());

    store.load().unwrap();
    assert!(store.is_loaded());
    assert_eq!(store.load_count(), 1);

    let bundle = store.bundle().unwrap();
    assert_eq!(bundle.encoder.len(), 3);
    assert_eq!(bundle.classifier.trees.len(), 2);
    assert_eq!(bundle.metadata["model_type"], "random_forest");
}

#[test]
fn test_load_from_empty_dir_fails() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());

    let err = store.load().unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(!store.is_loaded());
    assert_eq!(store.load_count(), 0);
}

#[test]
fn test_partial_failure_discards_all_artifacts() {
    // Classifier and encoder parse fine; the scaler is garbage. The
    // store must not report loaded just because three of four worked.
    init_logs();
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());
    fixtures::corrupt_artifact(dir.path(), SCALER_FILE);

    let store = ArtifactStore::new(dir.path());
    let err = store.load().unwrap_err();
    assert!(matches!(err, LoadError::Parse { artifact: "scaler", .. }));
    assert!(!store.is_loaded());
    assert!(store.bundle().is_err());
}

#[test]
fn test_failed_reload_clears_previous_bundle() {
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());

    let store = ArtifactStore::new(dir.path());
    store.load().unwrap();
    assert!(store.is_loaded());

    fixtures::corrupt_artifact(dir.path(), CLASSIFIER_FILE);
    assert!(store.load().is_err());
    assert!(!store.is_loaded());
}

#[test]
fn test_recovery_after_failed_load() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    assert!(store.load().is_err());

    fixtures::write_model_fixture(dir.path());
    store.load().unwrap();
    assert!(store.is_loaded());
}

#[test]
fn test_cross_validation_rejects_encoder_mismatch() {
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());
    std::fs::write(
        dir.path().join(ENCODER_FILE),
        serde_json::to_vec(&serde_json::json!({ "classes": ["ACTIVE", "RESTING"] })).unwrap(),
    )
    .unwrap();

    let store = ArtifactStore::new(dir.path());
    let err = store.load().unwrap_err();
    assert!(matches!(err, LoadError::Invalid { .. }));
    assert!(!store.is_loaded());
}

#[test]
fn test_unload_returns_to_cold_state() {
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());

    let store = ArtifactStore::new(dir.path());
    store.load().unwrap();
    store.unload();
    assert!(!store.is_loaded());
    assert!(matches!(store.bundle(), Err(EngineError::NotReady)));
}

#[test]
fn test_load_if_needed_skips_published_bundle() {
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());

    let store = ArtifactStore::new(dir.path());
    store.load_if_needed().unwrap();
    store.load_if_needed().unwrap();
    assert_eq!(store.load_count(), 1);
}

#[test]
fn test_explicit_load_always_reloads() {
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());

    let store = ArtifactStore::new(dir.path());
    store.load().unwrap();
    store.load().unwrap();
    assert_eq!(store.load_count(), 2);
}

#[test]
fn test_no_torn_bundle_during_reloads() {
    // Readers racing a reload may see the old bundle, no bundle, or the
    // new bundle, but never a mix of artifacts from different loads.
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());

    let store = Arc::new(ArtifactStore::new(dir.path()));
    store.load().unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    if let Some(bundle) = store.snapshot() {
                        assert_eq!(bundle.encoder.len(), bundle.classifier.n_classes);
                        assert_eq!(bundle.scaler.mean.len(), bundle.scaler.scale.len());
                    }
                }
            })
        })
        .collect();

    for _ in 0..20 {
        store.load().unwrap();
    }
    stop.store(true, Ordering::Relaxed);

    for reader in readers {
        reader.join().unwrap();
    }
    assert!(store.is_loaded());
}

#[test]
fn test_snapshot_survives_unload() {
    // An in-flight reader keeps its bundle even if the store is
    // unloaded underneath it.
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());

    let store = ArtifactStore::new(dir.path());
    store.load().unwrap();

    let bundle = store.bundle().unwrap();
    store.unload();
    assert!(!store.is_loaded());

    let v = vectorize(&fixtures::active_reading());
    let result = pipeline::predict_vector(&bundle, v.view()).unwrap();
    assert_eq!(result.activity_class, "ACTIVE");
}

// ============================================================================
// PIPELINE
// ============================================================================

fn loaded_store() -> (tempfile::TempDir, ArtifactStore) {
    let dir = tempdir().unwrap();
    fixtures::write_model_fixture(dir.path());
    let store = ArtifactStore::new(dir.path());
    store.load().unwrap();
    (dir, store)
}

#[test]
fn test_predict_vector_scenario() {
    let (_dir, store) = loaded_store();
    let bundle = store.bundle().unwrap();

    let v = vectorize(&fixtures::active_reading());
    let result = pipeline::predict_vector(&bundle, v.view()).unwrap();

    assert_eq!(result.activity_class, "ACTIVE");
    assert!((result.confidence - 0.75).abs() < 1e-12);
}

#[test]
fn test_confidence_matches_distribution_entry() {
    let (_dir, store) = loaded_store();
    let bundle = store.bundle().unwrap();

    let v = vectorize(&fixtures::active_reading());
    let result = pipeline::predict_vector(&bundle, v.view()).unwrap();

    let from_scores = result.confidence_scores[&result.activity_class];
    assert_eq!(result.confidence, from_scores);
}

#[test]
fn test_distribution_sums_to_one() {
    let (_dir, store) = loaded_store();
    let bundle = store.bundle().unwrap();

    let v = vectorize(&FeatureReading::new().with("motion_level", 5.0));
    let result = pipeline::predict_vector(&bundle, v.view()).unwrap();

    let sum: f64 = result.confidence_scores.values().sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert!(result.confidence_scores.values().all(|&p| p >= 0.0));
    assert_eq!(result.confidence_scores.len(), 3);
}

#[test]
fn test_predict_matrix_preserves_order() {
    let (_dir, store) = loaded_store();
    let bundle = store.bundle().unwrap();

    let readings = vec![
        fixtures::active_reading(),
        FeatureReading::new(), // all defaults -> SLEEPING
        fixtures::active_reading(),
    ];
    let matrix = vectorize_batch(&readings);
    let results = pipeline::predict_matrix(&bundle, matrix.view()).unwrap();

    assert_eq!(results.len(), readings.len());
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.index, i);
    }
    assert_eq!(results[0].activity_class, "ACTIVE");
    assert_eq!(results[1].activity_class, "SLEEPING");
    assert_eq!(results[2].activity_class, "ACTIVE");
}

#[test]
fn test_predict_matrix_empty_batch() {
    let (_dir, store) = loaded_store();
    let bundle = store.bundle().unwrap();

    let matrix = vectorize_batch(&[]);
    let results = pipeline::predict_matrix(&bundle, matrix.view()).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_wrong_arity_is_computation_error() {
    let (_dir, store) = loaded_store();
    let bundle = store.bundle().unwrap();

    let short = array![1.0, 2.0, 3.0];
    let err = pipeline::predict_vector(&bundle, short.view()).unwrap_err();
    assert!(matches!(err, EngineError::Computation(_)));
}
