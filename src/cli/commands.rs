// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// One subcommand per pipeline stage plus `run` for all five.
// Stage parameters come from params.yaml; only ingestion takes
// command line overrides.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::infra::params::Params;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the raw dataset, keep two classes, split train/test
    Ingest(IngestArgs),

    /// Normalise the content column of both raw splits
    Preprocess,

    /// Fit the bag-of-words vocabulary on train, vectorize both splits
    Featurize,

    /// Train the gradient-boosted tree classifier
    Train,

    /// Score the saved model on the test split
    Evaluate,

    /// Run every stage in order
    Run(IngestArgs),
}

/// Overrides for the ingestion section of params.yaml
#[derive(Args, Debug, Default)]
pub struct IngestArgs {
    /// URL of the raw CSV, used when the cache file is missing
    #[arg(long)]
    pub source_url: Option<String>,

    /// Local copy of the raw CSV (relative paths are under --root)
    #[arg(long)]
    pub cache: Option<PathBuf>,
}

impl IngestArgs {
    /// Apply the overrides on top of the loaded parameters
    pub fn apply(self, params: &mut Params) {
        if let Some(url) = self.source_url {
            params.data_ingestion.source_url = url;
        }
        if let Some(cache) = self.cache {
            params.data_ingestion.cache_path = cache;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_params() {
        let mut params = Params::from_yaml_str("feature_engineering:\n  max_features: 5\n").unwrap();
        IngestArgs {
            source_url: Some("http://example.org/x.csv".to_string()),
            cache:      None,
        }
        .apply(&mut params);

        assert_eq!(params.data_ingestion.source_url, "http://example.org/x.csv");
        assert_eq!(params.data_ingestion.cache_path, PathBuf::from("data/source/tweet_emotions.csv"));
    }
}
