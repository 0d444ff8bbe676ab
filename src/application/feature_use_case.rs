// ============================================================
// Layer 2 - FeatureUseCase
// ============================================================
// Stage 3: bag-of-words features.
//
//   Step 1: Read both processed splits            (Layer 4)
//   Step 2: Fit the vectorizer on TRAIN text only (Layer 4)
//   Step 3: Transform train and test              (Layer 4)
//   Step 4: Append the label, write both tables   (Layer 4)
//
// Both tables share the training vocabulary, so their columns
// are identical by construction.

use anyhow::{bail, Result};

use crate::data::{loader::CsvStore, vectorizer::CountVectorizer};
use crate::domain::{feature_table::FeatureTable, record::Record};
use crate::infra::layout::PipelineLayout;

#[derive(Debug, Clone)]
pub struct FeatureConfig {
    pub layout:       PipelineLayout,
    pub max_features: usize,
}

pub struct FeatureUseCase {
    config: FeatureConfig,
}

impl FeatureUseCase {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Returns the vocabulary size actually used
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;

        // ── Step 1: Processed records ─────────────────────────────────────────
        let train = Record::collect(&CsvStore::read_frame(&cfg.layout.processed_train())?)?;
        let test  = Record::collect(&CsvStore::read_frame(&cfg.layout.processed_test())?)?;

        // ── Steps 2-3: Vectorize ──────────────────────────────────────────────
        let (train_table, test_table) = vectorize_splits(&train, &test, cfg.max_features)?;

        // ── Step 4: Persist ───────────────────────────────────────────────────
        CsvStore::write_features(&train_table, &cfg.layout.vectorized_train())?;
        CsvStore::write_features(&test_table, &cfg.layout.vectorized_test())?;

        tracing::info!(
            "Vectorized {} train / {} test rows over {} terms",
            train_table.len(),
            test_table.len(),
            train_table.n_features()
        );
        Ok(train_table.n_features())
    }
}

/// Fit on `train` content, transform both splits
pub fn vectorize_splits(
    train:        &[Record],
    test:         &[Record],
    max_features: usize,
) -> Result<(FeatureTable, FeatureTable)> {
    let train_text: Vec<&str> = train.iter().map(|r| r.content.as_str()).collect();

    let mut vectorizer = CountVectorizer::new(Some(max_features));
    let train_rows     = vectorizer.fit_transform(&train_text)?;
    let terms          = vectorizer.terms().to_vec();

    let mut train_table = FeatureTable::new(terms.clone());
    for (row, record) in train_rows.into_iter().zip(train) {
        train_table.push(row, record.label)?;
    }

    let mut test_table = FeatureTable::new(terms);
    for record in test {
        test_table.push(vectorizer.transform(&record.content), record.label)?;
    }

    if !train_table.same_columns(&test_table) {
        bail!("train and test feature columns diverged");
    }
    Ok((train_table, test_table))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn records(texts: &[(&str, u8)]) -> Vec<Record> {
        texts.iter().map(|(t, l)| Record::new(*t, *l)).collect()
    }

    #[test]
    fn test_vocabulary_comes_from_train_only() {
        let train = records(&[("good day", 1), ("bad bad day", 0)]);
        let test  = records(&[("unseen words good", 1)]);

        let (tr, te) = vectorize_splits(&train, &test, 100).unwrap();
        assert_eq!(tr.terms(), &["bad", "day", "good"]);
        assert_eq!(te.terms(), tr.terms());
        assert_eq!(tr.rows()[1], vec![2.0, 1.0, 0.0]);
        assert_eq!(te.rows()[0], vec![0.0, 0.0, 1.0]);
        assert_eq!(te.labels(), &[1u8]);
    }

    #[test]
    fn test_max_features_caps_columns() {
        let train = records(&[("aa aa aa bb bb cc", 1), ("dd", 0)]);
        let (tr, _) = vectorize_splits(&train, &[], 2).unwrap();
        assert_eq!(tr.terms(), &["aa", "bb"]);
    }

    #[test]
    fn test_empty_content_gives_zero_row() {
        let train = records(&[("love it", 1), ("", 0)]);
        let (tr, _) = vectorize_splits(&train, &[], 10).unwrap();
        assert_eq!(tr.rows()[1], vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_vocabulary_fails() {
        let train = records(&[("", 1), ("a", 0)]);
        assert!(vectorize_splits(&train, &[], 10).is_err());
    }
}
