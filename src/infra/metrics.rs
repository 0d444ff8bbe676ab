// ============================================================
// Layer 6 - Metrics Writer
// ============================================================
// Persists the evaluation metrics as a flat JSON object:
//
//   {
//       "Test Accuracy": 0.71,
//       "Test Precision": 0.69,
//       "Test Recall": 0.77,
//       "Test ROC AUC": 0.78
//   }
//
// Keys are fixed, values are floats in [0, 1], indentation is
// four spaces. The file is rewritten on every evaluation run.
//
// Output file: results/evaluation_metrics.json

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::loader::ensure_parent;

/// Test-set scores reported by the evaluation stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    #[serde(rename = "Test Accuracy")]
    pub accuracy: f64,

    #[serde(rename = "Test Precision")]
    pub precision: f64,

    #[serde(rename = "Test Recall")]
    pub recall: f64,

    #[serde(rename = "Test ROC AUC")]
    pub roc_auc: f64,
}

impl EvaluationMetrics {
    /// True if every value lies in [0, 1]
    pub fn in_unit_range(&self) -> bool {
        [self.accuracy, self.precision, self.recall, self.roc_auc]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

/// Writes the metrics JSON to a fixed path
pub struct MetricsWriter {
    json_path: PathBuf,
}

impl MetricsWriter {
    pub fn new(json_path: impl Into<PathBuf>) -> Self {
        Self { json_path: json_path.into() }
    }

    /// Write `m`, refusing values outside [0, 1]
    pub fn save(&self, m: &EvaluationMetrics) -> Result<()> {
        if !m.in_unit_range() {
            bail!("metrics out of range, not writing them: {:?}", m);
        }
        ensure_parent(&self.json_path)?;

        let mut buf = Vec::new();
        let fmt     = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        m.serialize(&mut ser).context("Failed to serialise metrics")?;

        fs::write(&self.json_path, &buf).with_context(|| {
            format!("Cannot write metrics to '{}'", self.json_path.display())
        })?;

        tracing::debug!("Wrote metrics to '{}'", self.json_path.display());
        Ok(())
    }
}
