//! In-memory reference table, loaded once and read-only afterwards.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::models::{RawTableEntry, TableEntry};

/// Fatal table load failures.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("could not read decompression table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decompression table is not a JSON array of records: {0}")]
    Format(#[from] serde_json::Error),

    #[error("decompression table contains no valid entries")]
    Empty,
}

/// Compute the `sha256:`-prefixed hex digest of the raw dataset.
fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// The reference table. Entries are unique on `(depth, bottom_time)`.
#[derive(Debug, Clone)]
pub struct DecoTable {
    entries: Vec<TableEntry>,
    depth_range: (f64, f64),
    digest: String,
    loaded_at: DateTime<Utc>,
}

impl DecoTable {
    /// Read and parse the dataset at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    /// Parse a JSON array of labelled records.
    ///
    /// Records that fail validation, or repeat an existing `(depth, bottom_time)`
    /// key, are skipped with a warning. Only an unreadable container or a table
    /// with no surviving entries is an error.
    pub fn from_json(bytes: &[u8]) -> Result<Self, TableError> {
        let records: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
        let total = records.len();

        let mut entries: Vec<TableEntry> = Vec::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            let entry = match serde_json::from_value::<RawTableEntry>(record)
                .map_err(|e| e.to_string())
                .and_then(TableEntry::try_from)
            {
                Ok(entry) => entry,
                Err(reason) => {
                    tracing::warn!(index, %reason, "Skipped invalid table entry");
                    continue;
                }
            };

            if entries
                .iter()
                .any(|e| e.depth == entry.depth && e.bottom_time == entry.bottom_time)
            {
                tracing::warn!(
                    index,
                    depth = entry.depth,
                    bottom_time = entry.bottom_time,
                    "Skipped duplicate table entry"
                );
                continue;
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(TableError::Empty);
        }

        let depth_range = entries
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), e| {
                (min.min(e.depth), max.max(e.depth))
            });

        let table = DecoTable {
            entries,
            depth_range,
            digest: sha256_hex(bytes),
            loaded_at: Utc::now(),
        };

        tracing::info!(
            entries = table.len(),
            skipped = total - table.len(),
            depths = table.available_depths().len(),
            digest = %table.digest,
            "Loaded decompression table"
        );

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Shallowest and deepest tabulated depths. A loaded table is never empty.
    pub fn depth_range(&self) -> (f64, f64) {
        self.depth_range
    }

    /// Distinct depths, ascending.
    pub fn available_depths(&self) -> Vec<f64> {
        let mut depths: Vec<f64> = self.entries.iter().map(|e| e.depth).collect();
        depths.sort_by(f64::total_cmp);
        depths.dedup();
        depths
    }

    /// Distinct bottom times tabulated at exactly `depth`, ascending.
    pub fn available_times(&self, depth: f64) -> Vec<u32> {
        let mut times: Vec<u32> = self
            .entries
            .iter()
            .filter(|e| e.depth == depth)
            .map(|e| e.bottom_time)
            .collect();
        times.sort_unstable();
        times.dedup();
        times
    }

    /// Longest bottom time tabulated at `depth`.
    pub fn max_time(&self, depth: f64) -> Option<u32> {
        self.entries
            .iter()
            .filter(|e| e.depth == depth)
            .map(|e| e.bottom_time)
            .max()
    }

    pub fn find_entry(&self, depth: f64, bottom_time: u32) -> Option<&TableEntry> {
        self.entries
            .iter()
            .find(|e| e.depth == depth && e.bottom_time == bottom_time)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::deco::fixtures::{sample_table, SAMPLE_TABLE_JSON, SAMPLE_VALID_ENTRIES};

    #[test]
    fn test_invalid_records_skipped() {
        let table = sample_table();
        assert_eq!(table.len(), SAMPLE_VALID_ENTRIES);
    }

    #[test]
    fn test_available_depths_sorted_and_unique() {
        let table = sample_table();
        assert_eq!(
            table.available_depths(),
            vec![10.7, 12.2, 18.3, 27.4, 30.5, 42.7, 57.9]
        );
    }

    #[test]
    fn test_available_times_sorted_and_unique() {
        let table = sample_table();
        // 12.2 m rows are listed out of order in the dataset
        assert_eq!(table.available_times(12.2), vec![100, 170]);
        assert_eq!(table.available_times(10.7), vec![15, 30, 232]);
        assert!(table.available_times(11.0).is_empty());
    }

    #[test]
    fn test_depth_range_matches_depths() {
        let table = sample_table();
        let depths = table.available_depths();
        assert_eq!(table.depth_range(), (depths[0], depths[depths.len() - 1]));
        assert_eq!(table.depth_range(), (10.7, 57.9));
    }

    #[test]
    fn test_max_time() {
        let table = sample_table();
        assert_eq!(table.max_time(27.4), Some(50));
        assert_eq!(table.max_time(57.9), Some(20));
        assert_eq!(table.max_time(99.0), None);
    }

    #[test]
    fn test_find_entry_exact_match_only() {
        let table = sample_table();
        let entry = table.find_entry(18.3, 80).unwrap();
        assert_eq!(entry.repetitive_group, "O");
        assert!(table.find_entry(18.3, 79).is_none());
        assert!(table.find_entry(18.0, 80).is_none());
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let json = r#"[
            {"Profundidad (m)": 9.1, "Tiempo de Fondo (min)": 20, "Tiempo Total Ascenso (min)": "00:01:00", "Grupo Repetición": "B"},
            {"Profundidad (m)": 9.1, "Tiempo de Fondo (min)": 20, "Tiempo Total Ascenso (min)": "00:01:00", "Grupo Repetición": "C"}
        ]"#;
        let table = DecoTable::from_json(json.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.find_entry(9.1, 20).unwrap().repetitive_group, "B");
    }

    #[test]
    fn test_malformed_container_is_fatal() {
        let result = DecoTable::from_json(br#"{"Profundidad (m)": 9.1}"#);
        assert!(matches!(result, Err(TableError::Format(_))));

        let result = DecoTable::from_json(b"[1, 2");
        assert!(matches!(result, Err(TableError::Format(_))));
    }

    #[test]
    fn test_no_valid_entries_is_fatal() {
        let result = DecoTable::from_json(br#"[{"Profundidad (m)": "deep"}]"#);
        assert!(matches!(result, Err(TableError::Empty)));

        let result = DecoTable::from_json(b"[]");
        assert!(matches!(result, Err(TableError::Empty)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_TABLE_JSON.as_bytes()).unwrap();

        let table = DecoTable::load(file.path()).unwrap();
        assert_eq!(table.len(), SAMPLE_VALID_ENTRIES);
        assert_eq!(table.digest(), sample_table().digest());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = DecoTable::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(TableError::Io { .. })));
    }

    #[test]
    fn test_digest_format() {
        let table = sample_table();
        assert!(table.digest().starts_with("sha256:"));
        assert_eq!(table.digest().len(), 7 + 64);
    }
}
