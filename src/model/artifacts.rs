//! Trained artifacts: classifier, label encoder, feature scaler.
//!
//! The classifier is a tree ensemble exported to JSON at training time
//! (flat node arrays, per-class counts at every node). Evaluation here
//! never refits anything; all parameters are fixed at training time.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_SCALE;
use crate::error::{EngineError, LoadError};
use crate::features::FEATURE_COUNT;

// ============================================================================
// DECISION TREES
// ============================================================================

/// One node of a decision tree.
///
/// `feature: None` marks a leaf; `left`/`right` are indices into the
/// owning tree's node array and are only followed on split nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: Option<usize>,
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
    /// Training-sample count per class at this node
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root to the leaf selected by `x`.
    ///
    /// NaN comparisons are false, so a NaN feature always takes the
    /// right branch rather than panicking.
    fn leaf_for(&self, x: ArrayView1<'_, f64>) -> Result<&TreeNode, EngineError> {
        let mut index = 0usize;
        let mut steps = 0usize;

        loop {
            let node = self.nodes.get(index).ok_or_else(|| {
                EngineError::Computation(format!("tree node index {} out of range", index))
            })?;

            let feature = match node.feature {
                None => return Ok(node),
                Some(feature) => feature,
            };

            let value = x.get(feature).copied().ok_or_else(|| {
                EngineError::Computation(format!("feature index {} out of range", feature))
            })?;

            index = if value <= node.threshold {
                node.left
            } else {
                node.right
            };

            steps += 1;
            if steps > self.nodes.len() {
                return Err(EngineError::Computation(
                    "cycle detected in decision tree".to_string(),
                ));
            }
        }
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Tree-ensemble activity classifier.
///
/// A single-tree export behaves as a plain decision tree; class
/// probabilities are the mean of each tree's normalized leaf counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityClassifier {
    pub model_type: String,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl ActivityClassifier {
    /// Per-class probability vector for one scaled input.
    pub fn predict_proba(&self, x: ArrayView1<'_, f64>) -> Result<Array1<f64>, EngineError> {
        let mut probs = Array1::<f64>::zeros(self.n_classes);

        for tree in &self.trees {
            let leaf = tree.leaf_for(x)?;
            let total: f64 = leaf.value.iter().sum();
            if total > 0.0 {
                for (class, &count) in leaf.value.iter().enumerate() {
                    probs[class] += count / total;
                }
            }
        }

        if !self.trees.is_empty() {
            probs /= self.trees.len() as f64;
        }

        Ok(probs)
    }

    /// Predicted class index for one scaled input.
    pub fn predict(&self, x: ArrayView1<'_, f64>) -> Result<usize, EngineError> {
        Ok(argmax(&self.predict_proba(x)?))
    }
}

/// Index of the maximum probability. Ties resolve to the lowest class
/// index, which keeps predictions deterministic across runs.
pub fn argmax(probs: &Array1<f64>) -> usize {
    let mut best = 0;
    for (i, &p) in probs.iter().enumerate() {
        if p > probs[best] {
            best = i;
        }
    }
    best
}

// ============================================================================
// LABEL ENCODER
// ============================================================================

/// Bidirectional class index <-> label mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn inverse(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(|s| s.as_str())
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// ============================================================================
// SCALER
// ============================================================================

/// Fitted per-feature affine normalization: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn transform(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        Array1::from_shape_fn(x.len(), |i| {
            let mean = self.mean.get(i).copied().unwrap_or(0.0);
            let scale = self.scale.get(i).copied().unwrap_or(1.0).max(MIN_SCALE);
            (x[i] - mean) / scale
        })
    }
}

// ============================================================================
// CROSS-VALIDATION
// ============================================================================

/// Consistency checks across the freshly parsed artifacts.
///
/// Runs before the bundle is published so a structurally broken export
/// is a load failure, not a runtime computation error.
pub fn validate_artifacts(
    classifier: &ActivityClassifier,
    encoder: &LabelEncoder,
    scaler: &StandardScaler,
) -> Result<(), LoadError> {
    if classifier.n_classes == 0 {
        return Err(invalid("classifier", "n_classes is zero"));
    }
    if classifier.trees.is_empty() {
        return Err(invalid("classifier", "no trees"));
    }

    for (t, tree) in classifier.trees.iter().enumerate() {
        if tree.nodes.is_empty() {
            return Err(invalid("classifier", format!("tree {} has no nodes", t)));
        }
        for (n, node) in tree.nodes.iter().enumerate() {
            if node.value.len() != classifier.n_classes {
                return Err(invalid(
                    "classifier",
                    format!(
                        "tree {} node {} has {} class counts, expected {}",
                        t,
                        n,
                        node.value.len(),
                        classifier.n_classes
                    ),
                ));
            }
            if let Some(feature) = node.feature {
                if feature >= FEATURE_COUNT {
                    return Err(invalid(
                        "classifier",
                        format!("tree {} node {} references feature {}", t, n, feature),
                    ));
                }
                if node.left >= tree.nodes.len() || node.right >= tree.nodes.len() {
                    return Err(invalid(
                        "classifier",
                        format!("tree {} node {} has child index out of range", t, n),
                    ));
                }
            }
        }
    }

    if encoder.len() != classifier.n_classes {
        return Err(invalid(
            "label encoder",
            format!(
                "{} classes, classifier expects {}",
                encoder.len(),
                classifier.n_classes
            ),
        ));
    }

    if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
        return Err(invalid(
            "scaler",
            format!(
                "arity {}x{}, schema expects {}",
                scaler.mean.len(),
                scaler.scale.len(),
                FEATURE_COUNT
            ),
        ));
    }

    Ok(())
}

fn invalid(artifact: &'static str, reason: impl Into<String>) -> LoadError {
    LoadError::Invalid {
        artifact,
        reason: reason.into(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
