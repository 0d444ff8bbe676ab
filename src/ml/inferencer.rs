// ============================================================
// Layer 5 - Inferencer
// ============================================================
use anyhow::{bail, Result};

use crate::domain::feature_table::FeatureTable;
use crate::domain::traits::BinaryClassifier;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::gbm::GbmClassifier;

/// Hard labels and positive-class probabilities, one per row
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub labels: Vec<u8>,
    pub scores: Vec<f64>,
}

pub struct Inferencer {
    model: GbmClassifier,
}

impl Inferencer {
    pub fn new(model: GbmClassifier) -> Self {
        Self { model }
    }

    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let model = ckpt_manager.load_model()?;
        if !model.is_trained() {
            bail!(
                "model '{}' has no trees. Re-run 'train'.",
                ckpt_manager.path().display()
            );
        }
        tracing::info!("Model loaded from checkpoint ({} trees)", model.n_trees());
        Ok(Self::new(model))
    }

    /// Score every row of `table`.
    ///
    /// Refuses a table whose columns are not exactly the model's
    /// feature names in the same order.
    pub fn predict(&self, table: &FeatureTable) -> Result<Predictions> {
        let expected = self.model.feature_names();
        let found    = table.terms();
        if expected != found {
            let first_diff = expected
                .iter()
                .zip(found)
                .position(|(a, b)| a != b)
                .unwrap_or(expected.len().min(found.len()));
            bail!(
                "feature columns do not match the model: model has {} features, table has {} \
                 (first difference at column {})",
                expected.len(),
                found.len(),
                first_diff
            );
        }

        let scores: Vec<f64> = table.rows().iter().map(|r| self.model.predict_proba(r)).collect();
        let labels: Vec<u8>  = table.rows().iter().map(|r| self.model.predict(r)).collect();
        tracing::debug!("Scored {} rows", labels.len());

        Ok(Predictions { labels, scores })
    }
}
