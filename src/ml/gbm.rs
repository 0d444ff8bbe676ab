// ============================================================
// Layer 5 - Gradient-Boosted Tree Classifier
// ============================================================
// Binary classifier built from an additive ensemble of
// regression trees fitted to the log loss:
//
//   margin(x) = base + Σ_t tree_t(x)
//   P(y = 1)  = sigmoid(margin(x))
//
// Each round computes, for every training row,
//   gradient g = p − y
//   hessian  h = p (1 − p)
// and grows one tree on them (see tree.rs).
//
// The base margin is the log-odds of the training positive
// rate, so the first tree starts from the class prior.
//
// Serialised with serde to a single JSON document, which also
// carries the feature names so evaluation can check that its
// columns line up with the ones used for training.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::feature_table::FeatureTable;
use crate::domain::traits::BinaryClassifier;
use crate::ml::tree::{BinnedMatrix, RegressionTree, TreeParams};

/// Boosting hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GbmParams {
    /// Number of boosting rounds (trees)
    pub n_estimators:     usize,
    /// Maximum depth of each tree
    pub max_depth:        usize,
    /// Shrinkage applied to every leaf value
    pub learning_rate:    f64,
    /// L2 penalty on leaf values
    pub reg_lambda:       f64,
    /// Minimum loss reduction to make a split
    pub gamma:            f64,
    /// Minimum hessian sum per child
    pub min_child_weight: f64,
    /// Maximum histogram bins per feature
    pub max_bins:         usize,
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            n_estimators:     100,
            max_depth:        6,
            learning_rate:    0.3,
            reg_lambda:       1.0,
            gamma:            0.0,
            min_child_weight: 1.0,
            max_bins:         256,
        }
    }
}

impl GbmParams {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            bail!("n_estimators must be at least 1");
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            bail!("learning_rate must be in (0, 1], got {}", self.learning_rate);
        }
        if self.reg_lambda < 0.0 || self.gamma < 0.0 || self.min_child_weight < 0.0 {
            bail!("reg_lambda, gamma and min_child_weight must be non-negative");
        }
        if self.max_bins < 2 {
            bail!("max_bins must be at least 2, got {}", self.max_bins);
        }
        Ok(())
    }

    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth:        self.max_depth,
            learning_rate:    self.learning_rate,
            reg_lambda:       self.reg_lambda,
            gamma:            self.gamma,
            min_child_weight: self.min_child_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbmClassifier {
    params:        GbmParams,
    feature_names: Vec<String>,
    base_margin:   f64,
    trees:         Vec<RegressionTree>,
}

impl GbmClassifier {
    /// An untrained classifier
    pub fn new(params: GbmParams) -> Self {
        Self {
            params,
            feature_names: Vec::new(),
            base_margin:   0.0,
            trees:         Vec::new(),
        }
    }

    /// Fit the ensemble on every row of `table`
    pub fn fit(&mut self, table: &FeatureTable) -> Result<()> {
        self.params.validate()?;
        if table.is_empty() {
            bail!("cannot train on an empty feature table");
        }

        let n     = table.len();
        let y: Vec<f64> = table.labels().iter().map(|&l| f64::from(l)).collect();
        let prior = (y.iter().sum::<f64>() / n as f64).clamp(1e-6, 1.0 - 1e-6);

        self.feature_names = table.terms().to_vec();
        self.base_margin   = (prior / (1.0 - prior)).ln();
        self.trees.clear();

        tracing::info!(
            "Training gradient-boosted trees: {} rows x {} features, {} rounds, depth {}",
            n,
            table.n_features(),
            self.params.n_estimators,
            self.params.max_depth
        );

        let binned      = BinnedMatrix::new(table.rows(), table.n_features(), self.params.max_bins);
        let tree_params = self.params.tree_params();
        let mut margins = vec![self.base_margin; n];
        let mut grad    = vec![0.0; n];
        let mut hess    = vec![0.0; n];

        for round in 1..=self.params.n_estimators {
            for i in 0..n {
                let p   = sigmoid(margins[i]);
                grad[i] = p - y[i];
                hess[i] = (p * (1.0 - p)).max(1e-16);
            }

            let tree = RegressionTree::fit(&binned, &grad, &hess, &tree_params);
            for (m, row) in margins.iter_mut().zip(table.rows()) {
                *m += tree.predict(row);
            }

            if round % 10 == 0 || round == self.params.n_estimators {
                tracing::debug!(
                    "round {:>4}: {} leaves, train logloss {:.5}",
                    round,
                    tree.n_leaves(),
                    log_loss(&y, &margins)
                );
            }
            self.trees.push(tree);
        }

        tracing::info!("Classifier training completed ({} trees)", self.trees.len());
        Ok(())
    }

    /// Raw additive score before the sigmoid
    pub fn margin(&self, row: &[f64]) -> f64 {
        self.base_margin + self.trees.iter().map(|t| t.predict(row)).sum::<f64>()
    }

    /// Fraction of rows whose hard prediction equals the label
    pub fn score(&self, table: &FeatureTable) -> f64 {
        if table.is_empty() {
            return 0.0;
        }
        let correct = table
            .rows()
            .iter()
            .zip(table.labels())
            .filter(|(row, &label)| self.predict(row) == label)
            .count();
        correct as f64 / table.len() as f64
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn is_trained(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Features ranked by how many splits use them
    pub fn top_features(&self, n: usize) -> Vec<(&str, usize)> {
        let mut counts = vec![0usize; self.feature_names.len()];
        for f in self.trees.iter().flat_map(|t| t.split_features()) {
            if let Some(c) = counts.get_mut(f) {
                *c += 1;
            }
        }
        let mut ranked: Vec<(&str, usize)> = self
            .feature_names
            .iter()
            .map(String::as_str)
            .zip(counts)
            .filter(|(_, c)| *c > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

impl BinaryClassifier for GbmClassifier {
    fn predict_proba(&self, row: &[f64]) -> f64 {
        sigmoid(self.margin(row))
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn log_loss(y: &[f64], margins: &[f64]) -> f64 {
    let total: f64 = y
        .iter()
        .zip(margins)
        .map(|(&t, &m)| {
            let p = sigmoid(m).clamp(1e-15, 1.0 - 1e-15);
            -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
        })
        .sum();
    total / y.len().max(1) as f64
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// "love" present → 1, "cry" present → 0
    fn separable_table() -> FeatureTable {
        let mut t = FeatureTable::new(vec!["cry".into(), "love".into()]);
        for i in 0..20 {
            t.push(vec![0.0, f64::from(1 + i % 3)], 1).unwrap();
            t.push(vec![f64::from(1 + i % 2), 0.0], 0).unwrap();
        }
        t
    }

    fn small_params() -> GbmParams {
        GbmParams { n_estimators: 20, max_depth: 3, ..GbmParams::default() }
    }

    #[test]
    fn test_learns_separable_data() {
        let table     = separable_table();
        let mut model = GbmClassifier::new(small_params());
        model.fit(&table).unwrap();

        assert!(model.is_trained());
        assert_eq!(model.n_trees(), 20);
        assert_eq!(model.score(&table), 1.0);
        assert!(model.predict_proba(&[0.0, 2.0]) > 0.9);
        assert!(model.predict_proba(&[2.0, 0.0]) < 0.1);
        assert_eq!(model.feature_names(), &["cry", "love"]);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let table     = separable_table();
        let mut model = GbmClassifier::new(small_params());
        model.fit(&table).unwrap();
        for row in table.rows() {
            let p = model.predict_proba(row);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let table = separable_table();
        let mut a = GbmClassifier::new(small_params());
        let mut b = GbmClassifier::new(small_params());
        a.fit(&table).unwrap();
        b.fit(&table).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_round_trip_predicts_the_same() {
        let table     = separable_table();
        let mut model = GbmClassifier::new(small_params());
        model.fit(&table).unwrap();

        let json   = serde_json::to_string(&model).unwrap();
        let loaded: GbmClassifier = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.n_trees(), model.n_trees());
        for row in table.rows() {
            assert!((loaded.predict_proba(row) - model.predict_proba(row)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_class_predicts_that_class() {
        let mut t = FeatureTable::new(vec!["sad".into()]);
        for _ in 0..10 {
            t.push(vec![1.0], 0).unwrap();
        }
        let mut model = GbmClassifier::new(small_params());
        model.fit(&t).unwrap();
        assert_eq!(model.predict(&[1.0]), 0);
    }

    #[test]
    fn test_top_features() {
        let table     = separable_table();
        let mut model = GbmClassifier::new(small_params());
        model.fit(&table).unwrap();
        let top = model.top_features(5);
        assert!(!top.is_empty());
        assert!(top.iter().all(|(name, _)| *name == "cry" || *name == "love"));
    }

    #[test]
    fn test_empty_table_rejected() {
        let mut model = GbmClassifier::new(GbmParams::default());
        assert!(model.fit(&FeatureTable::new(vec!["a".into()])).is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let bad = GbmParams { learning_rate: 0.0, ..GbmParams::default() };
        assert!(bad.validate().is_err());
        let bad = GbmParams { n_estimators: 0, ..GbmParams::default() };
        assert!(bad.validate().is_err());
    }
}
