// ============================================================
// Layer 6 - Checkpoint Manager
// ============================================================
// Saves and restores the trained classifier.
//
// The model is written as a single serde_json document: the
// boosting parameters, the base margin, every tree node and
// the feature names the model was trained on. Loading gives
// back an identical GbmClassifier, so evaluation can both
// score rows and check column alignment from one file.
//
// File location (relative to the pipeline root):
//   models/xgb_model.pkl
//
// The .pkl name is kept so downstream tooling finds the model
// where it always has; the content is JSON.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::loader::ensure_parent;
use crate::ml::gbm::GbmClassifier;

/// Saves and loads the model file at a fixed path
pub struct CheckpointManager {
    path: PathBuf,
}

impl CheckpointManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Serialise the model, creating parent directories as needed.
    /// Overwrites any previous model.
    pub fn save_model(&self, model: &GbmClassifier) -> Result<()> {
        ensure_parent(&self.path)?;

        let json = serde_json::to_string(model).context("Failed to serialise model")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to save model to '{}'", self.path.display()))?;

        tracing::debug!("Saved model ({} trees) to '{}'", model.n_trees(), self.path.display());
        Ok(())
    }

    /// Load the model saved by `save_model`
    pub fn load_model(&self) -> Result<GbmClassifier> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "Cannot read model '{}'. Have you run 'train' first?",
                self.path.display()
            )
        })?;

        let model: GbmClassifier = serde_json::from_str(&json)
            .with_context(|| format!("Model file '{}' is corrupt", self.path.display()))?;
        Ok(model)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature_table::FeatureTable;
    use crate::ml::gbm::GbmParams;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = CheckpointManager::new(dir.path().join("models").join("xgb_model.pkl"));

        let mut t = FeatureTable::new(vec!["a".to_string(), "b".to_string()]);
        for _ in 0..10 {
            t.push(vec![1.0, 0.0], 0).unwrap();
            t.push(vec![0.0, 1.0], 1).unwrap();
        }
        let mut model = GbmClassifier::new(GbmParams { n_estimators: 3, ..GbmParams::default() });
        model.fit(&t).unwrap();

        mgr.save_model(&model).unwrap();
        assert!(mgr.path().exists());

        let loaded = mgr.load_model().unwrap();
        assert_eq!(loaded.n_trees(), 3);
        assert!((loaded.margin(&[0.0, 1.0]) - model.margin(&[0.0, 1.0])).abs() < 1e-9);
    }

    #[test]
    fn test_missing_model_mentions_train() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = CheckpointManager::new(dir.path().join("nope.pkl"));
        let err = format!("{:#}", mgr.load_model().unwrap_err());
        assert!(err.contains("run 'train' first"));
    }
}
