// ============================================================
// Layer 2 - PreprocessUseCase
// ============================================================
// Stage 2: normalise the `content` column of both raw splits.
//
//   data/raw/train_data.csv  ─┐                ┌─ data/processed/train_data_processed.csv
//                             ├─ Preprocessor ─┤
//   data/raw/test_data.csv   ─┘                └─ data/processed/test_data_processed.csv
//
// Row count and column set are unchanged; only content is
// rewritten.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::data::{lemmatizer::Lemmatizer, loader::CsvStore, preprocessor::Preprocessor};
use crate::domain::{frame::Frame, record::CONTENT_COLUMN};
use crate::infra::layout::PipelineLayout;

#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    pub layout:        PipelineLayout,
    pub lemma_lexicon: Option<PathBuf>,
}

pub struct PreprocessUseCase {
    config: PreprocessConfig,
}

impl PreprocessUseCase {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Returns the (train, test) row counts written
    pub fn execute(&self) -> Result<(usize, usize)> {
        let cfg = &self.config;

        let lemmatizer = match &cfg.lemma_lexicon {
            Some(path) => Lemmatizer::from_lexicon_file(&cfg.layout.resolve(path))?,
            None       => Lemmatizer::new(),
        };
        let preprocessor = Preprocessor::with_lemmatizer(lemmatizer);

        let n_train = process_file(&preprocessor, &cfg.layout.raw_train(), &cfg.layout.processed_train())?;
        let n_test  = process_file(&preprocessor, &cfg.layout.raw_test(), &cfg.layout.processed_test())?;

        tracing::info!("Preprocessed {} train and {} test rows", n_train, n_test);
        Ok((n_train, n_test))
    }
}

fn process_file(preprocessor: &Preprocessor, input: &Path, output: &Path) -> Result<usize> {
    let mut frame = CsvStore::read_frame(input)?;
    normalize_frame(preprocessor, &mut frame)?;
    CsvStore::write_frame(&frame, output)?;
    Ok(frame.len())
}

/// Clean the content column in place. An empty cell is the
/// missing value.
pub fn normalize_frame(preprocessor: &Preprocessor, frame: &mut Frame) -> Result<()> {
    let mut emptied = 0usize;
    frame.map_column(CONTENT_COLUMN, |cell| {
        let missing = cell.trim().is_empty();
        let cleaned = preprocessor.clean((!missing).then_some(cell));
        if cleaned.is_empty() && !missing {
            emptied += 1;
        }
        cleaned
    })?;

    if emptied > 0 {
        tracing::debug!("{} rows have no content left after cleaning", emptied);
    }
    Ok(())
}
