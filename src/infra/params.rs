// ============================================================
// Layer 6 - Pipeline Parameters (params.yaml)
// ============================================================
// One YAML file configures every stage:
//
//   data_ingestion:
//     source_url / cache_path / test_size / random_state
//     positive_class / negative_class
//   preprocessing:
//     lemma_lexicon            (optional)
//   feature_engineering:
//     max_features             (required)
//   model_building:
//     eval_size / random_state + boosting hyperparameters
//
// Only feature_engineering.max_features is mandatory; every
// other key falls back to its default when absent.
// Values are validated once at load time so stages can trust
// them.
//
// Reference: serde_yaml documentation

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::record::LabelMapping;
use crate::ml::gbm::GbmParams;

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/campusx-official/jupyter-masterclass/main/tweet_emotions.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(default)]
    pub data_ingestion:      IngestionParams,
    #[serde(default)]
    pub preprocessing:       PreprocessingParams,
    pub feature_engineering: FeatureParams,
    #[serde(default)]
    pub model_building:      ModelBuildingParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionParams {
    pub source_url:     String,
    pub cache_path:     PathBuf,
    pub test_size:      f64,
    pub random_state:   u64,
    pub positive_class: String,
    pub negative_class: String,
}

impl Default for IngestionParams {
    fn default() -> Self {
        let labels = LabelMapping::default();
        Self {
            source_url:     DEFAULT_SOURCE_URL.to_string(),
            cache_path:     PathBuf::from("data/source/tweet_emotions.csv"),
            test_size:      0.2,
            random_state:   42,
            positive_class: labels.positive,
            negative_class: labels.negative,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingParams {
    /// One base form per line; enables lexicon-checked lemmatization
    pub lemma_lexicon: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    /// Vocabulary cap for the bag-of-words vectorizer
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelBuildingParams {
    pub eval_size:    f64,
    pub random_state: u64,
    #[serde(flatten)]
    pub booster:      GbmParams,
}

impl Default for ModelBuildingParams {
    fn default() -> Self {
        Self {
            eval_size:    0.2,
            random_state: 42,
            booster:      GbmParams::default(),
        }
    }
}

impl Params {
    /// Read and validate a params.yaml file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read parameters from '{}'", path.display()))?;
        let params = Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid parameters in '{}'", path.display()))?;
        tracing::debug!("Loaded parameters from '{}'", path.display());
        Ok(params)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let params: Params = serde_yaml::from_str(text).context("Cannot parse YAML")?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        let ing = &self.data_ingestion;
        if !(ing.test_size > 0.0 && ing.test_size < 1.0) {
            bail!("data_ingestion.test_size must be in (0, 1), got {}", ing.test_size);
        }
        self.label_mapping()?;

        if self.feature_engineering.max_features == 0 {
            bail!("feature_engineering.max_features must be at least 1");
        }

        let mb = &self.model_building;
        if !(mb.eval_size > 0.0 && mb.eval_size < 1.0) {
            bail!("model_building.eval_size must be in (0, 1), got {}", mb.eval_size);
        }
        mb.booster.validate().context("model_building")?;
        Ok(())
    }

    pub fn label_mapping(&self) -> Result<LabelMapping> {
        LabelMapping::new(
            self.data_ingestion.positive_class.clone(),
            self.data_ingestion.negative_class.clone(),
        )
    }
}
