// ============================================================
// Layer 4 - Bag-of-Words Count Vectorizer
// ============================================================
// Turns cleaned text into fixed-width rows of term counts.
//
//   fit(train)      → learn the vocabulary from TRAINING text
//   transform(text) → count vocabulary terms in any text
//
// The vocabulary is learnt once from the training split and
// reused unchanged for the test split. Tokens never seen in
// training are ignored by transform, so both splits always
// have identical columns.
//
// Vocabulary selection:
//   1. tokens = runs of 2+ word characters, lowercased
//   2. count every token across the whole training corpus
//   3. keep the `max_features` most frequent
//      (ties → lexicographically smaller term first)
//   4. columns ordered lexicographically
//
// Reference: Manning et al. (2008) Introduction to IR, §6.2

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

#[derive(Debug, Clone)]
pub struct CountVectorizer {
    /// Upper bound on vocabulary size; None keeps every term
    max_features: Option<usize>,

    /// Fitted vocabulary, in column order
    terms: Vec<String>,

    /// term → column index
    index: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn new(max_features: Option<usize>) -> Self {
        Self {
            max_features,
            terms: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Split text into lowercase word tokens of length ≥ 2
    pub fn tokenize(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        TOKEN_RE
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Learn the vocabulary from the training documents only
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            for token in Self::tokenize(doc.as_ref()) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        if counts.is_empty() {
            bail!(
                "empty vocabulary: none of the {} training documents has a token",
                documents.len()
            );
        }

        // Most frequent first; equal counts fall back to term order
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(limit) = self.max_features {
            ranked.truncate(limit);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        self.index = terms.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();
        self.terms = terms;

        tracing::info!(
            "Fitted vocabulary: {} terms from {} documents",
            self.terms.len(),
            documents.len()
        );
        Ok(())
    }

    /// Count vocabulary terms in one document
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.terms.len()];
        for token in Self::tokenize(document) {
            if let Some(&i) = self.index.get(&token) {
                row[i] += 1.0;
            }
        }
        row
    }

    /// Fit on `documents` and return their count rows
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<Vec<f64>>> {
        self.fit(documents)?;
        Ok(documents.iter().map(|d| self.transform(d.as_ref())).collect())
    }

    /// Fitted vocabulary in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}
