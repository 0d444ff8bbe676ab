// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between the raw CSV and the numeric feature
// tables:
//
//   raw CSV (URL or cache)
//       │
//       ▼
//   loader        → reads/writes CSV artifacts, fetches source
//       │
//       ▼
//   splitter      → seeded 80/20 train/test split
//       │
//       ▼
//   preprocessor  → lowercase, strip URLs/punctuation/digits,
//       │           drop stopwords, lemmatize
//       ▼
//   vectorizer    → bag-of-words counts over a vocabulary
//                   fitted on the training split only
//
// Reference: Rust Book §13 (Iterators and Closures)

/// CSV artifacts and raw dataset sources
pub mod loader;

/// Deterministic train/test splitting
pub mod splitter;

/// Fixed-order text normalisation
pub mod preprocessor;

/// English stopword list
pub mod stopwords;

/// Dictionary/rule based noun lemmatizer
pub mod lemmatizer;

/// Bag-of-words count vectorizer
pub mod vectorizer;
