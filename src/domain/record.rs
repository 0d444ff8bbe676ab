// ============================================================
// Layer 3 - Record and Label Encoding
// ============================================================
// A Record is one text sample with its binary label.
//
// LabelMapping decides which raw sentiment classes survive
// ingestion. Exactly two classes are kept: the positive one
// is encoded as 1, the negative one as 0, and every other
// class is dropped. The pair is configurable rather than
// fixed to "happiness" / "sadness".

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::frame::Frame;

/// Column holding the tweet text
pub const CONTENT_COLUMN: &str = "content";

/// Column holding the raw class name, later the encoded label
pub const SENTIMENT_COLUMN: &str = "sentiment";

/// Identifier column dropped at ingestion
pub const ID_COLUMN: &str = "tweet_id";

/// Encoded label of the positive class
pub const POSITIVE: u8 = 1;

/// Encoded label of the negative class
pub const NEGATIVE: u8 = 0;

/// One labelled text sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The (possibly cleaned) tweet text
    pub content: String,

    /// Binary label, always POSITIVE or NEGATIVE
    pub label: u8,
}

impl Record {
    pub fn new(content: impl Into<String>, label: u8) -> Self {
        Self { content: content.into(), label }
    }

    /// Read (content, encoded sentiment) pairs out of an
    /// ingested or processed frame, in row order
    pub fn collect(frame: &Frame) -> Result<Vec<Record>> {
        let contents   = frame.column(CONTENT_COLUMN)?;
        let sentiments = frame.column(SENTIMENT_COLUMN)?;
        contents
            .into_iter()
            .zip(sentiments)
            .enumerate()
            .map(|(i, (content, sentiment))| {
                let label = parse_label(sentiment)
                    .with_context(|| format!("bad label on row {}", i))?;
                Ok(Record::new(content, label))
            })
            .collect()
    }
}

/// Maps two raw sentiment class names onto {1, 0}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping {
    pub positive: String,
    pub negative: String,
}

impl LabelMapping {
    /// Build a mapping, refusing two identical class names
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Result<Self> {
        let positive = positive.into();
        let negative = negative.into();
        if positive == negative {
            bail!("positive and negative classes must differ (both are '{}')", positive);
        }
        Ok(Self { positive, negative })
    }

    /// Encode a raw sentiment string. `None` means "drop this row".
    pub fn encode(&self, sentiment: &str) -> Option<u8> {
        let s = sentiment.trim();
        if s == self.positive {
            Some(POSITIVE)
        } else if s == self.negative {
            Some(NEGATIVE)
        } else {
            None
        }
    }
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self {
            positive: "happiness".to_string(),
            negative: "sadness".to_string(),
        }
    }
}

/// Parse an already-encoded label cell ("0" / "1").
/// Float spellings such as "1.0" are accepted as well.
pub fn parse_label(cell: &str) -> Result<u8> {
    let value: f64 = match cell.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("label '{}' is not numeric", cell),
    };
    if value == f64::from(NEGATIVE) {
        Ok(NEGATIVE)
    } else if value == f64::from(POSITIVE) {
        Ok(POSITIVE)
    } else {
        bail!("label '{}' is outside {{0, 1}}", cell)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping_encodes_two_classes() {
        let m = LabelMapping::default();
        assert_eq!(m.encode("happiness"), Some(1));
        assert_eq!(m.encode("sadness"), Some(0));
        assert_eq!(m.encode("neutral"), None);
        assert_eq!(m.encode("worry"), None);
    }

    #[test]
    fn test_identical_classes_rejected() {
        assert!(LabelMapping::new("love", "love").is_err());
    }

    #[test]
    fn test_custom_mapping() {
        let m = LabelMapping::new("love", "hate").unwrap();
        assert_eq!(m.encode("love"), Some(POSITIVE));
        assert_eq!(m.encode("hate"), Some(NEGATIVE));
        assert_eq!(m.encode("happiness"), None);
    }

    #[test]
    fn test_collect_records_from_frame() {
        let mut f = Frame::new(["sentiment", "content"]);
        f.push_row(vec!["1".into(), "happy".into()]).unwrap();
        f.push_row(vec!["0".into(), "".into()]).unwrap();
        let records = Record::collect(&f).unwrap();
        assert_eq!(records, vec![Record::new("happy", 1), Record::new("", 0)]);
    }

    #[test]
    fn test_collect_rejects_unencoded_sentiment() {
        let mut f = Frame::new(["sentiment", "content"]);
        f.push_row(vec!["happiness".into(), "happy".into()]).unwrap();
        assert!(Record::collect(&f).is_err());
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("1").unwrap(), 1);
        assert_eq!(parse_label(" 0 ").unwrap(), 0);
        assert_eq!(parse_label("1.0").unwrap(), 1);
        assert!(parse_label("2").is_err());
        assert!(parse_label("happiness").is_err());
    }
}
