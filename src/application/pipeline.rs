// ============================================================
// Layer 2 - Pipeline
// ============================================================
// Builds each stage's config from params.yaml + the pipeline
// root and runs the stages, singly or all five in order:
//
//   ingest → preprocess → featurize → train → evaluate
//
// Stages talk only through the files in PipelineLayout, so
// any of them can be rerun on its own once its inputs exist.

use anyhow::Result;

use crate::application::{
    evaluate_use_case::{EvaluateConfig, EvaluateUseCase, EvaluationOutcome},
    feature_use_case::{FeatureConfig, FeatureUseCase},
    ingest_use_case::{IngestConfig, IngestSummary, IngestUseCase},
    preprocess_use_case::{PreprocessConfig, PreprocessUseCase},
    train_use_case::{TrainConfig, TrainReport, TrainUseCase},
};
use crate::infra::{layout::PipelineLayout, params::Params};

/// Results of a full run, one entry per stage that reports one
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub ingest:     IngestSummary,
    pub n_features: usize,
    pub train:      TrainReport,
    pub evaluation: EvaluationOutcome,
}

pub struct Pipeline {
    params: Params,
    layout: PipelineLayout,
}

impl Pipeline {
    pub fn new(params: Params, layout: PipelineLayout) -> Self {
        Self { params, layout }
    }

    pub fn ingest(&self) -> Result<IngestSummary> {
        let p = &self.params.data_ingestion;
        IngestUseCase::new(IngestConfig {
            layout:       self.layout.clone(),
            source_url:   p.source_url.clone(),
            cache_path:   p.cache_path.clone(),
            test_size:    p.test_size,
            random_state: p.random_state,
            labels:       self.params.label_mapping()?,
        })
        .execute()
    }

    pub fn preprocess(&self) -> Result<(usize, usize)> {
        PreprocessUseCase::new(PreprocessConfig {
            layout:        self.layout.clone(),
            lemma_lexicon: self.params.preprocessing.lemma_lexicon.clone(),
        })
        .execute()
    }

    pub fn featurize(&self) -> Result<usize> {
        FeatureUseCase::new(FeatureConfig {
            layout:       self.layout.clone(),
            max_features: self.params.feature_engineering.max_features,
        })
        .execute()
    }

    pub fn train(&self) -> Result<TrainReport> {
        let p = &self.params.model_building;
        TrainUseCase::new(TrainConfig {
            layout:       self.layout.clone(),
            eval_size:    p.eval_size,
            random_state: p.random_state,
            booster:      p.booster.clone(),
        })
        .execute()
    }

    pub fn evaluate(&self) -> Result<EvaluationOutcome> {
        EvaluateUseCase::new(EvaluateConfig { layout: self.layout.clone() }).execute()
    }

    /// All five stages in dependency order; stops at the first failure
    pub fn run_all(&self) -> Result<PipelineReport> {
        tracing::info!("Running full pipeline under '{}'", self.layout.root().display());

        let ingest = self.ingest()?;
        self.preprocess()?;
        let n_features = self.featurize()?;
        let train      = self.train()?;
        let evaluation = self.evaluate()?;

        tracing::info!("Pipeline finished");
        Ok(PipelineReport { ingest, n_features, train, evaluation })
    }
}
