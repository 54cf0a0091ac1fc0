//! Inference Pipeline - scale, classify, decode
//!
//! Operates on an already-published bundle; readiness is the caller's
//! concern. Scale parameters are fixed at training time and are never
//! refit here.

use std::collections::HashMap;

use ndarray::{ArrayView1, ArrayView2};

use crate::error::EngineError;
use crate::features::FEATURE_COUNT;

use super::artifacts::argmax;
use super::store::ArtifactBundle;
use super::types::{BatchPrediction, PredictionResult};

/// Classify a single schema-ordered vector.
pub fn predict_vector(
    bundle: &ArtifactBundle,
    vector: ArrayView1<'_, f64>,
) -> Result<PredictionResult, EngineError> {
    check_arity(vector.len())?;

    let scaled = bundle.scaler.transform(vector);
    let probs = bundle.classifier.predict_proba(scaled.view())?;
    let predicted = argmax(&probs);

    let activity_class = decode_label(bundle, predicted)?.to_string();

    let mut confidence_scores = HashMap::with_capacity(probs.len());
    for (index, &prob) in probs.iter().enumerate() {
        confidence_scores.insert(decode_label(bundle, index)?.to_string(), prob);
    }

    // Taken from the same slot the label was decoded from, so label and
    // confidence cannot disagree under ties.
    let confidence = probs[predicted];

    Ok(PredictionResult {
        activity_class,
        confidence,
        confidence_scores,
    })
}

/// Classify a batch matrix, one row per reading.
///
/// Output order mirrors input order exactly; `result[i].index == i`.
pub fn predict_matrix(
    bundle: &ArtifactBundle,
    matrix: ArrayView2<'_, f64>,
) -> Result<Vec<BatchPrediction>, EngineError> {
    if matrix.nrows() > 0 {
        check_arity(matrix.ncols())?;
    }

    let mut results = Vec::with_capacity(matrix.nrows());
    for (index, row) in matrix.outer_iter().enumerate() {
        let scaled = bundle.scaler.transform(row);
        let probs = bundle.classifier.predict_proba(scaled.view())?;
        let predicted = argmax(&probs);

        results.push(BatchPrediction {
            index,
            activity_class: decode_label(bundle, predicted)?.to_string(),
            confidence: probs[predicted],
        });
    }

    Ok(results)
}

fn check_arity(len: usize) -> Result<(), EngineError> {
    if len != FEATURE_COUNT {
        return Err(EngineError::Computation(format!(
            "expected {} features, got {}",
            FEATURE_COUNT, len
        )));
    }
    Ok(())
}

fn decode_label(bundle: &ArtifactBundle, index: usize) -> Result<&str, EngineError> {
    bundle.encoder.inverse(index).ok_or_else(|| {
        EngineError::Computation(format!("class index {} missing from label encoder", index))
    })
}
