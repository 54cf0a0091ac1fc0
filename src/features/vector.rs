//! Feature Vectorizer - readings to model-ready vectors
//!
//! Pure and total: every reading, including `{}`, produces a vector of
//! exactly `FEATURE_COUNT` entries in schema order. Missing fields
//! become 0. This permissiveness is deliberate; a degraded reading
//! yields a degraded prediction instead of a rejected request. The
//! `filled_defaults` count makes degraded inputs observable.

use ndarray::{Array1, Array2, ArrayView1};

use super::reading::FeatureReading;
use super::schema::{FEATURE_COUNT, FEATURE_SCHEMA};

// ============================================================================
// VECTORIZED READING
// ============================================================================

/// A reading mapped onto the canonical schema order.
#[derive(Debug, Clone)]
pub struct VectorizedReading {
    /// Values in schema order, length `FEATURE_COUNT`
    pub values: Array1<f64>,
    /// How many schema fields were absent and defaulted to 0
    pub filled_defaults: usize,
}

impl VectorizedReading {
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// True when every schema field was present in the source reading
    pub fn is_complete(&self) -> bool {
        self.filled_defaults == 0
    }
}

// ============================================================================
// VECTORIZATION
// ============================================================================

/// Map a reading to a fixed-order vector. Never fails.
pub fn vectorize(reading: &FeatureReading) -> VectorizedReading {
    let mut values = Array1::zeros(FEATURE_COUNT);
    let mut filled_defaults = 0;

    for (i, &name) in FEATURE_SCHEMA.iter().enumerate() {
        match reading.get(name) {
            Some(value) => values[i] = value,
            None => filled_defaults += 1,
        }
    }

    VectorizedReading {
        values,
        filled_defaults,
    }
}

/// Vectorize a batch into a row-per-reading matrix.
///
/// Rows are independent; there is no cross-row feature engineering
/// here. Derived features such as `motion_trend` must arrive
/// pre-computed on each reading.
pub fn vectorize_batch(readings: &[FeatureReading]) -> Array2<f64> {
    let mut matrix = Array2::zeros((readings.len(), FEATURE_COUNT));

    for (row, reading) in readings.iter().enumerate() {
        for (col, &name) in FEATURE_SCHEMA.iter().enumerate() {
            if let Some(value) = reading.get(name) {
                matrix[[row, col]] = value;
            }
        }
    }

    matrix
}
