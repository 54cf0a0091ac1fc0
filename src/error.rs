//! Error taxonomy for the prediction core.
//!
//! `LoadError` covers everything that can go wrong while deserializing
//! model artifacts; `EngineError` is what prediction callers see.

use thiserror::Error;

/// Failure while loading one of the four model artifacts.
///
/// Any variant leaves the artifact store unloaded; a later successful
/// load recovers.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {artifact}: {source}")]
    Io {
        artifact: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {artifact}: {source}")]
    Parse {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Artifacts parsed but are inconsistent with each other or with the
    /// feature schema (class counts, arities, node indices).
    #[error("invalid {artifact}: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
}

/// Errors surfaced to prediction callers.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Prediction attempted while no artifact bundle is published.
    /// Never triggers an implicit load; the caller decides when to load.
    #[error("model artifacts not loaded")]
    NotReady,

    #[error(transparent)]
    Load(#[from] LoadError),

    /// Numeric or shape failure inside the inference pipeline.
    #[error("inference failed: {0}")]
    Computation(String),
}
