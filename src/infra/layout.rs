// ============================================================
// Layer 6 - Artifact Layout
// ============================================================
// Every stage reads and writes fixed paths below one pipeline
// root directory:
//
//   data/raw/{train,test}_data.csv
//   data/processed/{train,test}_data_processed.csv
//   data/vectorized/{train,test}_data_vectorized.csv
//   models/xgb_model.pkl
//   results/evaluation_metrics.json
//
// "Stage has run" is expressed only by these files existing.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineLayout {
    root: PathBuf,
}

impl PipelineLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative paths hang off the root, absolute ones are kept
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn raw_train(&self) -> PathBuf {
        self.root.join("data/raw/train_data.csv")
    }

    pub fn raw_test(&self) -> PathBuf {
        self.root.join("data/raw/test_data.csv")
    }

    pub fn processed_train(&self) -> PathBuf {
        self.root.join("data/processed/train_data_processed.csv")
    }

    pub fn processed_test(&self) -> PathBuf {
        self.root.join("data/processed/test_data_processed.csv")
    }

    pub fn vectorized_train(&self) -> PathBuf {
        self.root.join("data/vectorized/train_data_vectorized.csv")
    }

    pub fn vectorized_test(&self) -> PathBuf {
        self.root.join("data/vectorized/test_data_vectorized.csv")
    }

    pub fn model(&self) -> PathBuf {
        self.root.join("models/xgb_model.pkl")
    }

    pub fn metrics(&self) -> PathBuf {
        self.root.join("results/evaluation_metrics.json")
    }
}
