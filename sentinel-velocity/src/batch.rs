//! Batch classification for list views.
//!
//! Every product is independent, so the batch fans out with Rayon and
//! collects in input order. A bad product becomes a `ProductFailure`; it
//! never aborts the rest of the batch.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::classifier::classify_position;
use crate::error::{VelocityError, VelocityResult};
use crate::types::{ClassificationResult, StockPosition, VelocityProfile};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductFailure {
    pub product_id: String,
    #[serde(serialize_with = "error_as_string")]
    pub error: VelocityError,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<ClassificationResult>,
    pub failures: Vec<ProductFailure>,
}

impl BatchOutcome {
    /// Split per-product outcomes, preserving order within each half.
    pub fn from_outcomes(outcomes: Vec<(String, VelocityResult<ClassificationResult>)>) -> Self {
        let mut batch = BatchOutcome::default();
        for (product_id, outcome) in outcomes {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(error) => batch.failures.push(ProductFailure { product_id, error }),
            }
        }
        batch
    }

    pub fn result_for(&self, product_id: &str) -> Option<&ClassificationResult> {
        self.results.iter().find(|r| r.product_id == product_id)
    }
}

/// Classify one product per velocity profile against the matching stock
/// position.
pub fn classify_batch(positions: &[StockPosition], profiles: &[VelocityProfile]) -> BatchOutcome {
    let by_id: HashMap<&str, &StockPosition> = positions
        .iter()
        .map(|p| (p.product_id.as_str(), p))
        .collect();

    let outcomes: Vec<(String, VelocityResult<ClassificationResult>)> = profiles
        .par_iter()
        .map(|profile| {
            let outcome = match by_id.get(profile.product_id.as_str()) {
                Some(position) => classify_position(position, profile),
                None => Err(VelocityError::MissingProduct(profile.product_id.clone())),
            };
            (profile.product_id.clone(), outcome)
        })
        .collect();

    let batch = BatchOutcome::from_outcomes(outcomes);
    if !batch.failures.is_empty() {
        log::warn!(
            "classified {} products, {} failed",
            batch.results.len(),
            batch.failures.len()
        );
    }
    batch
}

fn error_as_string<S>(error: &VelocityError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&error.to_string())
}
