// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The seams between layers:
//
//   RecordSource     - anything that yields the raw CSV table
//                      (remote URL with a local cache, or a
//                      plain local file)
//   BinaryClassifier - anything that scores a feature row;
//                      evaluation only relies on this contract
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::frame::Frame;
use crate::domain::record::{NEGATIVE, POSITIVE};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the raw, unfiltered table.
///
/// Implementations:
///   - CachedSource → local cache file, else HTTP download
pub trait RecordSource {
    /// Load the full raw table, header included
    fn load(&self) -> Result<Frame>;
}

// ─── BinaryClassifier ─────────────────────────────────────────────────────────
/// A trained model with a predict/score contract over {0, 1}.
pub trait BinaryClassifier {
    /// Probability that `row` belongs to the positive class
    fn predict_proba(&self, row: &[f64]) -> f64;

    /// Names of the columns the model was trained on, in order
    fn feature_names(&self) -> &[String];

    /// Hard prediction at the 0.5 threshold
    fn predict(&self, row: &[f64]) -> u8 {
        if self.predict_proba(row) > 0.5 {
            POSITIVE
        } else {
            NEGATIVE
        }
    }
}
