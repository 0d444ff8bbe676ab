// ============================================================
// Layer 2 - EvaluateUseCase
// ============================================================
// Stage 5: score the saved model on the untouched test table.
//
//   Step 1: Load the model                        (Layer 6)
//   Step 2: Load the vectorized test table        (Layer 4)
//   Step 3: Check column alignment and predict    (Layer 5)
//   Step 4: Accuracy / precision / recall / AUC   (Layer 5)
//   Step 5: Write results/evaluation_metrics.json (Layer 6)

use anyhow::Result;

use crate::data::loader::CsvStore;
use crate::infra::{
    checkpoint::CheckpointManager,
    layout::PipelineLayout,
    metrics::{EvaluationMetrics, MetricsWriter},
};
use crate::ml::{
    inferencer::Inferencer,
    scoring::{self, ClassificationReport},
};

/// AUC reported when the test set holds a single class
const UNDEFINED_AUC: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    pub layout: PipelineLayout,
}

#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub metrics: EvaluationMetrics,
    pub report:  ClassificationReport,
}

pub struct EvaluateUseCase {
    config: EvaluateConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvaluateConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<EvaluationOutcome> {
        let layout = &self.config.layout;

        // ── Steps 1-2: Model and test table ───────────────────────────────────
        let inferencer = Inferencer::from_checkpoint(&CheckpointManager::new(layout.model()))?;
        let table      = CsvStore::read_features(&layout.vectorized_test())?;
        tracing::info!("Evaluating on {} test rows", table.len());

        // ── Step 3: Predict ───────────────────────────────────────────────────
        let predictions = inferencer.predict(&table)?;
        let y_true      = table.labels();

        // ── Step 4: Metrics ───────────────────────────────────────────────────
        let roc_auc = scoring::roc_auc(y_true, &predictions.scores).unwrap_or_else(|| {
            tracing::warn!("Test set holds a single class; ROC AUC reported as {}", UNDEFINED_AUC);
            UNDEFINED_AUC
        });
        let metrics = EvaluationMetrics {
            accuracy:  scoring::accuracy(y_true, &predictions.labels),
            precision: scoring::precision(y_true, &predictions.labels),
            recall:    scoring::recall(y_true, &predictions.labels),
            roc_auc,
        };
        let report = ClassificationReport::new(y_true, &predictions.labels);

        tracing::info!(
            "accuracy={:.4} precision={:.4} recall={:.4} roc_auc={:.4}",
            metrics.accuracy,
            metrics.precision,
            metrics.recall,
            metrics.roc_auc
        );

        // ── Step 5: Persist ───────────────────────────────────────────────────
        MetricsWriter::new(layout.metrics()).save(&metrics)?;

        Ok(EvaluationOutcome { metrics, report })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature_table::FeatureTable;
    use crate::ml::gbm::{GbmClassifier, GbmParams};

    fn setup(test_terms: Vec<String>) -> (tempfile::TempDir, PipelineLayout) {
        let dir    = tempfile::tempdir().unwrap();
        let layout = PipelineLayout::new(dir.path());
        let terms  = vec!["cry".to_string(), "smile".to_string()];

        let mut train = FeatureTable::new(terms);
        for _ in 0..15 {
            train.push(vec![0.0, 1.0], 1).unwrap();
            train.push(vec![1.0, 0.0], 0).unwrap();
        }
        let mut model = GbmClassifier::new(GbmParams { n_estimators: 5, ..GbmParams::default() });
        model.fit(&train).unwrap();
        CheckpointManager::new(layout.model()).save_model(&model).unwrap();

        let width    = test_terms.len();
        let mut test = FeatureTable::new(test_terms);
        let mut pos  = vec![0.0; width];
        pos[width - 1] = 1.0;
        let mut neg  = vec![0.0; width];
        neg[0] = 1.0;
        test.push(pos.clone(), 1).unwrap();
        test.push(neg, 0).unwrap();
        test.push(pos, 0).unwrap();
        CsvStore::write_features(&test, &layout.vectorized_test()).unwrap();

        (dir, layout)
    }

    #[test]
    fn test_metrics_written() {
        let (_dir, layout) = setup(vec!["cry".to_string(), "smile".to_string()]);
        let outcome = EvaluateUseCase::new(EvaluateConfig { layout: layout.clone() })
            .execute()
            .unwrap();

        let m = outcome.metrics;
        assert!((m.accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.precision, 0.5);
        assert_eq!(m.recall, 1.0);
        assert!(m.in_unit_range());
        let saved: EvaluationMetrics =
            serde_json::from_str(&std::fs::read_to_string(layout.metrics()).unwrap()).unwrap();
        assert!((saved.accuracy - m.accuracy).abs() < 1e-12);
        assert_eq!(saved.roc_auc, 0.75);
    }

    #[test]
    fn test_column_mismatch_aborts() {
        let (_dir, layout) = setup(vec!["cry".to_string(), "happy".to_string(), "smile".to_string()]);
        let result = EvaluateUseCase::new(EvaluateConfig { layout: layout.clone() }).execute();
        assert!(result.is_err());
        assert!(!layout.metrics().exists());
    }
}
