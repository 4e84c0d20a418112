// ============================================================
// Summarization Datasets
// ============================================================
// Two datasets live here:
//
//   SummarizationDataset — the row-indexed sample source.
//                          Reads `<dir>/<prefix>.csv` once, keeps
//                          the raw records in memory, and builds a
//                          `Sample` on each indexed access.
//
//   PreparedDataset      — the encoded, block-size-normalised
//                          items ready for `SummarizationBatcher`.
//
// Both implement Burn's Dataset trait so they plug straight into
// a DataLoaderBuilder.
//
// Mode switch: the `title` column is only read when the prefix is
// "train". Any other prefix yields samples with `title: None`,
// whatever the file contains.
//
// Reference: Burn Book §4 (Datasets)
//            csv crate documentation (Reader, StringRecord)

use std::fs::File;
use std::path::Path;

use burn::data::dataset::Dataset;
use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::domain::sample::Sample;
use crate::error::{PrepError, Result};

/// Prefix that enables the title (reference summary) column
pub const TRAIN_PREFIX: &str = "train";

const ABSTRACT_COLUMN: &str = "abstract";
const TITLE_COLUMN:    &str = "title";

// ─── SummarizationDataset ─────────────────────────────────────────────────────
pub struct SummarizationDataset {
    rows:         Vec<StringRecord>,
    abstract_col: usize,
    /// Column index of `title`; `None` unless prefix == "train"
    title_col:    Option<usize>,
}

impl SummarizationDataset {
    /// Load `<path>/<prefix>.csv`.
    ///
    /// Fails if `path` is not a directory, if the file is missing or
    /// malformed, or if a required column is absent from the header.
    pub fn new(path: impl AsRef<Path>, prefix: impl Into<String>) -> Result<Self> {
        let dir    = path.as_ref();
        let prefix = prefix.into();

        if !dir.is_dir() {
            return Err(PrepError::NotADirectory(dir.to_path_buf()));
        }

        let csv_path = dir.join(format!("{prefix}.csv"));
        let file = File::open(&csv_path).map_err(|source| PrepError::Io {
            path: csv_path.clone(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        let abstract_col = column_index(&headers, ABSTRACT_COLUMN)
            .ok_or_else(|| PrepError::MissingColumn {
                column: ABSTRACT_COLUMN,
                path:   csv_path.clone(),
            })?;

        let title_col = if prefix == TRAIN_PREFIX {
            let idx = column_index(&headers, TITLE_COLUMN)
                .ok_or_else(|| PrepError::MissingColumn {
                    column: TITLE_COLUMN,
                    path:   csv_path.clone(),
                })?;
            Some(idx)
        } else {
            None
        };

        // Read every record up front so malformed rows fail here,
        // not on some later `get`
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::info!(
            "Loaded {} rows from '{}' (titles {})",
            rows.len(),
            csv_path.display(),
            if title_col.is_some() { "on" } else { "off" }
        );

        Ok(Self { rows, abstract_col, title_col })
    }

    /// Number of rows loaded
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Build the sample at `index`.
    pub fn get(&self, index: usize) -> Result<Sample> {
        let row = self.rows.get(index).ok_or(PrepError::IndexOutOfRange {
            index,
            len: self.rows.len(),
        })?;

        let abstract_text = row.get(self.abstract_col).unwrap_or_default();
        let title = self
            .title_col
            .map(|col| row.get(col).unwrap_or_default().to_string());

        Ok(Sample::new(index.to_string(), abstract_text, title))
    }

    /// Iterate over every sample in row order
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.count()).filter_map(move |i| self.get(i).ok())
    }
}

impl Dataset<Sample> for SummarizationDataset {
    fn get(&self, index: usize) -> Option<Sample> {
        SummarizationDataset::get(self, index).ok()
    }

    fn len(&self) -> usize {
        self.count()
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

// ─── SummarizationItem ────────────────────────────────────────────────────────
/// One encoded document. Both sequences are exactly `block_size` long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationItem {
    pub id:      String,
    pub src_ids: Vec<u32>,
    pub tgt_ids: Vec<u32>,
}

// ─── PreparedDataset ──────────────────────────────────────────────────────────
pub struct PreparedDataset {
    items: Vec<SummarizationItem>,
}

impl PreparedDataset {
    pub fn new(items: Vec<SummarizationItem>) -> Self { Self { items } }

    pub fn items(&self) -> &[SummarizationItem] { &self.items }
}

impl Dataset<SummarizationItem> for PreparedDataset {
    fn get(&self, index: usize) -> Option<SummarizationItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
