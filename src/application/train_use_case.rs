// ============================================================
// Layer 2 - TrainUseCase
// ============================================================
// Stage 4: model building.
//
//   Step 1: Load the vectorized training table    (Layer 4)
//   Step 2: Hold out an evaluation slice, fit the
//           boosted trees on the rest              (Layer 5)
//   Step 3: Save the model                         (Layer 6)
//
// The real test table is never read here.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::loader::CsvStore;
use crate::infra::{checkpoint::CheckpointManager, layout::PipelineLayout};
use crate::ml::{gbm::GbmParams, trainer::run_training};

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub layout:       PipelineLayout,
    pub eval_size:    f64,
    pub random_state: u64,
    pub booster:      GbmParams,
}

/// What the CLI reports after training
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub holdout_accuracy: f64,
    pub n_fit:            usize,
    pub n_holdout:        usize,
    pub n_trees:          usize,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1: Training features ─────────────────────────────────────────
        let table = CsvStore::read_features(&cfg.layout.vectorized_train())?;
        tracing::info!(
            "Loaded {} training rows with {} features",
            table.len(),
            table.n_features()
        );

        // ── Step 2: Fit with holdout ──────────────────────────────────────────
        let outcome = run_training(table, &cfg.booster, cfg.eval_size, cfg.random_state)?;

        // ── Step 3: Persist ───────────────────────────────────────────────────
        let ckpt_manager = CheckpointManager::new(cfg.layout.model());
        ckpt_manager.save_model(&outcome.model)?;
        tracing::info!("Model saved to '{}'", ckpt_manager.path().display());

        Ok(TrainReport {
            holdout_accuracy: outcome.holdout_accuracy,
            n_fit:            outcome.n_fit,
            n_holdout:        outcome.n_holdout,
            n_trees:          outcome.model.n_trees(),
        })
    }
}
