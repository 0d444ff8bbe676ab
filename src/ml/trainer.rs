// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Holds out an evaluation slice of the vectorized training
// table, fits the boosted ensemble on the rest and scores
// the slice as a sanity check.
//
// The evaluation slice is carved from the training table only,
// so the real test set stays untouched until evaluation.

use anyhow::{bail, Result};

use crate::data::splitter::split_train_test;
use crate::domain::feature_table::FeatureTable;
use crate::ml::gbm::{GbmClassifier, GbmParams};

/// What a training run produced
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model:            GbmClassifier,
    pub holdout_accuracy: f64,
    pub n_fit:            usize,
    pub n_holdout:        usize,
}

pub fn run_training(
    table:         FeatureTable,
    params:        &GbmParams,
    eval_fraction: f64,
    seed:          u64,
) -> Result<TrainingOutcome> {
    let (terms, samples)    = table.into_samples();
    let (fit_rows, holdout) = split_train_test(samples, eval_fraction, seed)?;

    if fit_rows.is_empty() {
        bail!("no rows left to fit after holding out {:.0}% for evaluation", eval_fraction * 100.0);
    }

    let fit_table     = FeatureTable::from_samples(terms.clone(), fit_rows)?;
    let holdout_table = FeatureTable::from_samples(terms, holdout)?;
    tracing::info!(
        "Fit/holdout split: {} / {} rows",
        fit_table.len(),
        holdout_table.len()
    );

    let mut model = GbmClassifier::new(params.clone());
    model.fit(&fit_table)?;

    let holdout_accuracy = model.score(&holdout_table);
    tracing::info!("Holdout accuracy: {:.4}", holdout_accuracy);

    for (term, uses) in model.top_features(5) {
        tracing::debug!("split feature '{}' used {} times", term, uses);
    }

    Ok(TrainingOutcome {
        n_fit:     fit_table.len(),
        n_holdout: holdout_table.len(),
        model,
        holdout_accuracy,
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: usize) -> FeatureTable {
        let mut t = FeatureTable::new(vec!["bad".to_string(), "good".to_string()]);
        for i in 0..n {
            let label = (i % 2) as u8;
            let row = if label == 1 { vec![0.0, 1.0 + (i % 3) as f64] } else { vec![1.0 + (i % 3) as f64, 0.0] };
            t.push(row, label).unwrap();
        }
        t
    }

    #[test]
    fn test_split_sizes() {
        let params  = GbmParams { n_estimators: 5, ..GbmParams::default() };
        let outcome = run_training(table(50), &params, 0.2, 42).unwrap();
        assert_eq!(outcome.n_holdout, 10);
        assert_eq!(outcome.n_fit, 40);
        assert_eq!(outcome.model.n_trees(), 5);
    }

    #[test]
    fn test_separable_holdout_is_perfect() {
        let params  = GbmParams { n_estimators: 20, ..GbmParams::default() };
        let outcome = run_training(table(60), &params, 0.2, 7).unwrap();
        assert_eq!(outcome.holdout_accuracy, 1.0);
    }

    #[test]
    fn test_deterministic() {
        let params = GbmParams { n_estimators: 10, ..GbmParams::default() };
        let a = run_training(table(40), &params, 0.25, 42).unwrap();
        let b = run_training(table(40), &params, 0.25, 42).unwrap();
        assert_eq!(a.model, b.model);
    }

    #[test]
    fn test_single_row_fails() {
        // ceil(1 * 0.2) = 1 → nothing left to fit
        let params = GbmParams::default();
        assert!(run_training(table(1), &params, 0.2, 42).is_err());
    }
}
