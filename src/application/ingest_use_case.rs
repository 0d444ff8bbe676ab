// ============================================================
// Layer 2 - IngestUseCase
// ============================================================
// Stage 1 of the pipeline:
//
//   Step 1: Load the raw table (cache or download)  (Layer 4)
//   Step 2: Drop tweet_id, keep the two classes,
//           encode them as 1 / 0                     (Layer 3)
//   Step 3: Seeded train/test split                  (Layer 4)
//   Step 4: Write data/raw/{train,test}_data.csv     (Layer 4)
//
// Class balance of the kept rows is logged; a heavily skewed
// pair of classes gets a warning.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::data::{
    loader::{CachedSource, CsvStore},
    splitter::split_train_test,
};
use crate::domain::{
    frame::Frame,
    record::{LabelMapping, CONTENT_COLUMN, ID_COLUMN, POSITIVE, SENTIMENT_COLUMN},
    traits::RecordSource,
};
use crate::infra::layout::PipelineLayout;

/// Minority share below which the class balance is reported as skewed
const MIN_CLASS_SHARE: f64 = 0.10;

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub layout:       PipelineLayout,
    pub source_url:   String,
    pub cache_path:   PathBuf,
    pub test_size:    f64,
    pub random_state: u64,
    pub labels:       LabelMapping,
}

/// Row counts of the kept records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassBalance {
    pub positive: usize,
    pub negative: usize,
    pub dropped:  usize,
}

impl ClassBalance {
    pub fn kept(&self) -> usize {
        self.positive + self.negative
    }

    /// Share of the smaller class among kept rows
    pub fn minority_share(&self) -> f64 {
        if self.kept() == 0 {
            return 0.0;
        }
        self.positive.min(self.negative) as f64 / self.kept() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub n_train: usize,
    pub n_test:  usize,
    pub balance: ClassBalance,
}

pub struct IngestUseCase {
    config: IngestConfig,
}

impl IngestUseCase {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<IngestSummary> {
        let cfg    = &self.config;
        let source = CachedSource::new(cfg.source_url.clone(), cfg.layout.resolve(&cfg.cache_path));
        self.execute_with(&source)
    }

    /// Run the stage against any raw table source
    pub fn execute_with(&self, source: &dyn RecordSource) -> Result<IngestSummary> {
        let cfg = &self.config;

        // ── Step 1: Raw table ─────────────────────────────────────────────────
        let raw = source.load()?;
        tracing::info!("Loaded {} raw rows with columns {:?}", raw.len(), raw.headers());

        // ── Steps 2-3: Filter, encode, split ─────────────────────────────────
        let (train, test, balance) =
            encode_and_split(raw, &cfg.labels, cfg.test_size, cfg.random_state)?;

        tracing::info!(
            "Kept {} rows ({} '{}' → 1, {} '{}' → 0), dropped {}",
            balance.kept(),
            balance.positive,
            cfg.labels.positive,
            balance.negative,
            cfg.labels.negative,
            balance.dropped
        );
        if balance.minority_share() < MIN_CLASS_SHARE {
            tracing::warn!(
                "Classes are heavily imbalanced: minority share {:.1}%",
                balance.minority_share() * 100.0
            );
        }

        // ── Step 4: Persist ───────────────────────────────────────────────────
        CsvStore::write_frame(&train, &cfg.layout.raw_train())?;
        CsvStore::write_frame(&test, &cfg.layout.raw_test())?;
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        Ok(IngestSummary {
            n_train: train.len(),
            n_test:  test.len(),
            balance,
        })
    }
}

/// Drop the id column, keep the two configured classes encoded
/// as "1" / "0", then split into (train, test) frames.
pub fn encode_and_split(
    mut frame:    Frame,
    labels:       &LabelMapping,
    test_size:    f64,
    random_state: u64,
) -> Result<(Frame, Frame, ClassBalance)> {
    frame.drop_column(ID_COLUMN);
    frame.require_column(CONTENT_COLUMN)?;
    let sentiment = frame.require_column(SENTIMENT_COLUMN)?;

    let total = frame.len();
    frame.retain_rows(|row| labels.encode(&row[sentiment]).is_some());
    frame.map_column(SENTIMENT_COLUMN, |s| {
        labels.encode(s).map(|l| l.to_string()).unwrap_or_default()
    })?;

    let pos_cell = POSITIVE.to_string();
    let positive = frame.rows().iter().filter(|r| r[sentiment] == pos_cell).count();
    let balance = ClassBalance {
        positive,
        negative: frame.len() - positive,
        dropped:  total - frame.len(),
    };

    if frame.is_empty() {
        bail!(
            "no rows with sentiment '{}' or '{}' in the source",
            labels.positive,
            labels.negative
        );
    }

    let (headers, rows) = frame.into_parts();
    let (train, test)   = split_train_test(rows, test_size, random_state)?;
    Ok((
        Frame::from_parts(headers.clone(), train)?,
        Frame::from_parts(headers, test)?,
        balance,
    ))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Frame {
        let mut f = Frame::new(["tweet_id", "sentiment", "content"]);
        let classes = ["happiness", "sadness", "neutral", "worry"];
        for i in 0..40 {
            f.push_row(vec![
                i.to_string(),
                classes[i % 4].to_string(),
                format!("tweet number {}", i),
            ])
            .unwrap();
        }
        f
    }

    #[test]
    fn test_filters_and_encodes() {
        let (train, test, balance) =
            encode_and_split(raw(), &LabelMapping::default(), 0.2, 42).unwrap();

        assert_eq!(balance, ClassBalance { positive: 10, negative: 10, dropped: 20 });
        assert_eq!(train.headers(), &["sentiment".to_string(), "content".to_string()]);
        assert_eq!(test.len(), 4);
        assert_eq!(train.len(), 16);

        for f in [&train, &test] {
            for s in f.column("sentiment").unwrap() {
                assert!(s == "0" || s == "1");
            }
        }
    }

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let (train, test, _) = encode_and_split(raw(), &LabelMapping::default(), 0.2, 42).unwrap();
        let mut all: Vec<&str> = train.column("content").unwrap();
        all.extend(test.column("content").unwrap());
        all.sort();
        let before = all.len();
        all.dedup();
        assert_eq!(before, 20);
        assert_eq!(all.len(), 20);
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = encode_and_split(raw(), &LabelMapping::default(), 0.2, 7).unwrap();
        let b = encode_and_split(raw(), &LabelMapping::default(), 0.2, 7).unwrap();
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn test_missing_column_fails() {
        let f = Frame::new(["tweet_id", "sentiment"]);
        assert!(encode_and_split(f, &LabelMapping::default(), 0.2, 42).is_err());
    }

    #[test]
    fn test_no_matching_class_fails() {
        let labels = LabelMapping::new("love", "hate").unwrap();
        assert!(encode_and_split(raw(), &labels, 0.2, 42).is_err());
    }

    #[test]
    fn test_execute_writes_raw_splits() {
        let dir    = tempfile::tempdir().unwrap();
        let source = dir.path().join("tweets.csv");
        CsvStore::write_frame(&raw(), &source).unwrap();

        let layout = PipelineLayout::new(dir.path());
        let uc = IngestUseCase::new(IngestConfig {
            layout:       layout.clone(),
            source_url:   "http://127.0.0.1:9/unreachable.csv".to_string(),
            cache_path:   source.clone(),
            test_size:    0.2,
            random_state: 42,
            labels:       LabelMapping::default(),
        });
        let summary = uc.execute().unwrap();

        assert_eq!((summary.n_train, summary.n_test), (16, 4));
        let test = CsvStore::read_frame(&layout.raw_test()).unwrap();
        assert_eq!(test.len(), 4);
        assert!(test.column_index(ID_COLUMN).is_none());
    }

    #[test]
    fn test_minority_share() {
        let b = ClassBalance { positive: 95, negative: 5, dropped: 0 };
        assert!((b.minority_share() - 0.05).abs() < 1e-12);
        assert_eq!(ClassBalance::default().minority_share(), 0.0);
    }
}
