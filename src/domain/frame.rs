// ============================================================
// Layer 3 - Frame
// ============================================================
// A small, ordered table of string cells. Ingestion and
// preprocessing only ever touch one or two named columns and
// must carry every other column through untouched, so the
// table keeps its header row and raw cells instead of a fixed
// struct per row.
//
// Row order is significant: the train/test split is written
// out in permuted order and later stages preserve it.

use anyhow::{bail, Result};

/// An ordered table: one header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    headers: Vec<String>,
    rows:    Vec<Vec<String>>,
}

impl Frame {
    /// Create an empty frame with the given column names
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows:    Vec::new(),
        }
    }

    /// Build a frame from headers and already-parsed rows.
    /// Every row must have exactly one cell per header.
    pub fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != headers.len()) {
            bail!(
                "row {} has {} cells but the header has {} columns",
                i,
                row.len(),
                headers.len()
            );
        }
        Ok(Self { headers, rows })
    }

    /// Split the frame back into headers and rows
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one row; its width must match the header
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.headers.len() {
            bail!(
                "cannot push a row of {} cells into a frame of {} columns",
                row.len(),
                self.headers.len()
            );
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like `column_index`, but a missing column is an error
    pub fn require_column(&self, name: &str) -> Result<usize> {
        match self.column_index(name) {
            Some(i) => Ok(i),
            None => bail!(
                "missing required column '{}' (found: {})",
                name,
                self.headers.join(", ")
            ),
        }
    }

    /// Borrow every cell of a named column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Remove a column if present. Returns whether it existed.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.headers.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// Rewrite every cell of one column in place
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&str) -> String,
    {
        let idx = self.require_column(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }

    /// Keep only the rows for which `keep` returns true
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|r| keep(r));
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        let mut f = Frame::new(["tweet_id", "sentiment", "content"]);
        f.push_row(vec!["1".into(), "happiness".into(), "so good".into()]).unwrap();
        f.push_row(vec!["2".into(), "neutral".into(), "meh".into()]).unwrap();
        f
    }

    #[test]
    fn test_drop_column_removes_cells() {
        let mut f = sample();
        assert!(f.drop_column("tweet_id"));
        assert_eq!(f.headers(), &["sentiment".to_string(), "content".to_string()]);
        assert_eq!(f.rows()[0], vec!["happiness".to_string(), "so good".to_string()]);
        // Dropping twice is a no-op
        assert!(!f.drop_column("tweet_id"));
    }

    #[test]
    fn test_map_column_only_touches_target() {
        let mut f = sample();
        f.map_column("content", |c| c.to_uppercase()).unwrap();
        assert_eq!(f.column("content").unwrap(), vec!["SO GOOD", "MEH"]);
        assert_eq!(f.column("tweet_id").unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let f = sample();
        assert!(f.column("label").is_err());
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut f = sample();
        assert!(f.push_row(vec!["only one".into()]).is_err());
        assert!(Frame::from_parts(vec!["a".into()], vec![vec![]]).is_err());
    }

    #[test]
    fn test_retain_rows() {
        let mut f = sample();
        f.retain_rows(|r| r[1] != "neutral");
        assert_eq!(f.len(), 1);
    }
}
