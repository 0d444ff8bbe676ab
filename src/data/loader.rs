// ============================================================
// Layer 4 - CSV Loading and Saving
// ============================================================
// Every stage boundary in the pipeline is a CSV file. This
// module owns reading and writing them:
//
//   CsvStore     - Frame and FeatureTable <-> CSV on disk
//   CachedSource - the raw dataset: read the local cache if
//                  present, otherwise download it once over
//                  HTTP and keep a copy in the cache once it
//                  parses as CSV
//
// Writers create parent directories as needed and always
// truncate, so each run recreates its artifacts from scratch.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use crate::domain::feature_table::{FeatureTable, LABEL_COLUMN};
use crate::domain::frame::Frame;
use crate::domain::record::parse_label;
use crate::domain::traits::RecordSource;

/// Stateless helpers for CSV artifacts
pub struct CsvStore;

impl CsvStore {
    /// Read a headed CSV file into a Frame
    pub fn read_frame(path: &Path) -> Result<Frame> {
        let file = fs::File::open(path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;
        let frame = Self::parse_frame(file)
            .with_context(|| format!("Cannot parse CSV '{}'", path.display()))?;

        tracing::debug!(
            "Read {} rows x {} columns from '{}'",
            frame.len(),
            frame.headers().len(),
            path.display()
        );
        Ok(frame)
    }

    /// Parse a headed CSV from any reader
    pub fn parse_frame<R: Read>(reader: R) -> Result<Frame> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut frame = Frame::new(rdr.headers()?.iter());
        for (i, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("Bad CSV row {}", i))?;
            frame.push_row(record.iter().map(str::to_string).collect())?;
        }
        Ok(frame)
    }

    /// Write a Frame as a headed CSV, replacing any existing file
    pub fn write_frame(frame: &Frame, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        wtr.write_record(frame.headers())?;
        for row in frame.rows() {
            wtr.write_record(row)?;
        }
        wtr.flush()
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Wrote {} rows to '{}'", frame.len(), path.display());
        Ok(())
    }

    /// Read a vectorized CSV: vocabulary columns then a trailing label
    pub fn read_features(path: &Path) -> Result<FeatureTable> {
        let file = fs::File::open(path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        match headers.pop() {
            Some(last) if last == LABEL_COLUMN => {}
            _ => bail!(
                "'{}' does not end with a '{}' column",
                path.display(),
                LABEL_COLUMN
            ),
        }

        let mut table = FeatureTable::new(headers);
        for (i, record) in rdr.records().enumerate() {
            let record = record
                .with_context(|| format!("Bad CSV row {} in '{}'", i, path.display()))?;

            let mut cells = record.iter();
            let label_cell = cells.next_back().unwrap_or_default();

            let row = cells
                .map(|c| {
                    c.trim()
                        .parse::<f64>()
                        .with_context(|| format!("non-numeric feature '{}' on row {}", c, i))
                })
                .collect::<Result<Vec<f64>>>()?;
            table.push(row, parse_label(label_cell)?)?;
        }

        tracing::debug!(
            "Read {} rows x {} features from '{}'",
            table.len(),
            table.n_features(),
            path.display()
        );
        Ok(table)
    }

    /// Write a FeatureTable with its label as the trailing column
    pub fn write_features(table: &FeatureTable, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        let mut header: Vec<&str> = table.terms().iter().map(String::as_str).collect();
        header.push(LABEL_COLUMN);
        wtr.write_record(&header)?;

        // Counts are whole numbers, and f64 Display prints 3.0 as "3"
        for (row, label) in table.rows().iter().zip(table.labels()) {
            let mut cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            cells.push(label.to_string());
            wtr.write_record(&cells)?;
        }
        wtr.flush()
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Wrote {} vectorized rows to '{}'", table.len(), path.display());
        Ok(())
    }
}

/// Create the parent directory of `path`, like `mkdir -p`
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }
    }
    Ok(())
}

// ─── Raw dataset sources ──────────────────────────────────────────────────────

/// Local cache first, HTTP download otherwise
pub struct CachedSource {
    url:        String,
    cache_path: PathBuf,
}

impl CachedSource {
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self { url: url.into(), cache_path: cache_path.into() }
    }

    /// Blocking GET of the whole body. No retry.
    fn download(&self) -> Result<Vec<u8>> {
        tracing::info!("Downloading dataset from {}", self.url);
        let response = ureq::get(&self.url)
            .call()
            .with_context(|| format!("Cannot fetch '{}'", self.url))?;

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .with_context(|| format!("Cannot read response body from '{}'", self.url))?;
        Ok(body)
    }

    /// Parse a downloaded body; only a body that parses becomes the cache
    fn store(&self, body: &[u8]) -> Result<Frame> {
        let frame = CsvStore::parse_frame(body)
            .with_context(|| format!("Malformed CSV from '{}'", self.url))?;

        ensure_parent(&self.cache_path)?;
        let mut f = fs::File::create(&self.cache_path)
            .with_context(|| format!("Cannot create cache '{}'", self.cache_path.display()))?;
        f.write_all(body)
            .with_context(|| format!("Cannot write cache '{}'", self.cache_path.display()))?;
        tracing::debug!("Cached {} bytes at '{}'", body.len(), self.cache_path.display());

        Ok(frame)
    }
}

impl RecordSource for CachedSource {
    fn load(&self) -> Result<Frame> {
        if self.cache_path.exists() {
            tracing::info!("Using cached dataset '{}'", self.cache_path.display());
            return CsvStore::read_frame(&self.cache_path);
        }
        let body = self.download()?;
        self.store(&body)
    }
}
