// ============================================================
// Layer 3 - Feature Table
// ============================================================
// The output of feature engineering: one row of term counts
// per record over a fixed, ordered vocabulary, plus the
// record's label.
//
// On disk the label is the trailing column named "label".
// In memory it is kept apart from the counts so the model
// never sees it as a feature.

use anyhow::{bail, Result};

/// Name of the trailing label column in vectorized CSVs
pub const LABEL_COLUMN: &str = "label";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    terms:  Vec<String>,
    rows:   Vec<Vec<f64>>,
    labels: Vec<u8>,
}

impl FeatureTable {
    /// Create an empty table over the given vocabulary terms
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms, rows: Vec::new(), labels: Vec::new() }
    }

    /// Append one row. Its width must equal the vocabulary size.
    pub fn push(&mut self, row: Vec<f64>, label: u8) -> Result<()> {
        if row.len() != self.terms.len() {
            bail!(
                "feature row has {} values but the vocabulary has {} terms",
                row.len(),
                self.terms.len()
            );
        }
        self.rows.push(row);
        self.labels.push(label);
        Ok(())
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.terms.len()
    }

    /// True when both tables share the same columns in the same order
    pub fn same_columns(&self, other: &FeatureTable) -> bool {
        self.terms == other.terms
    }

    /// Consume the table, yielding (row, label) pairs in order
    pub fn into_samples(self) -> (Vec<String>, Vec<(Vec<f64>, u8)>) {
        let samples = self.rows.into_iter().zip(self.labels).collect();
        (self.terms, samples)
    }

    /// Rebuild a table from (row, label) pairs
    pub fn from_samples(terms: Vec<String>, samples: Vec<(Vec<f64>, u8)>) -> Result<Self> {
        let mut table = Self::new(terms);
        for (row, label) in samples {
            table.push(row, label)?;
        }
        Ok(table)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_rejects_wrong_width() {
        let mut t = FeatureTable::new(vec!["good".into(), "sad".into()]);
        assert!(t.push(vec![1.0], 1).is_err());
        assert!(t.push(vec![1.0, 0.0], 1).is_ok());
        assert_eq!(t.len(), 1);
        assert_eq!(t.labels(), &[1]);
    }

    #[test]
    fn test_samples_round_trip_keeps_order() {
        let mut t = FeatureTable::new(vec!["a".into()]);
        t.push(vec![3.0], 0).unwrap();
        t.push(vec![1.0], 1).unwrap();
        let (terms, samples) = t.clone().into_samples();
        let back = FeatureTable::from_samples(terms, samples).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_same_columns_is_order_sensitive() {
        let a = FeatureTable::new(vec!["x".into(), "y".into()]);
        let b = FeatureTable::new(vec!["y".into(), "x".into()]);
        assert!(!a.same_columns(&b));
        assert!(a.same_columns(&a.clone()));
    }
}
