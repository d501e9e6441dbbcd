//! JSON-based report storage.
//!
//! Each completed scan is persisted as one JSON file keyed by its
//! [`ReportId`]. The scan engine itself never touches the filesystem; the
//! orchestrators hand a flattened field map to this layer.

use crate::config::Paths;
use crate::error::{StorageError, StorageResult};
use crate::types::ReportId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// A persisted reconnaissance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconRecord {
    /// Unique identifier for this report.
    pub id: ReportId,
    /// Tool name, always "wraith".
    pub tool: String,
    /// Which scan produced this: "ports", "subdomains", or "usernames".
    pub module: String,
    /// The scanned target as the user entered it.
    pub target: String,
    /// When the scan completed.
    pub timestamp: DateTime<Utc>,
    /// Flattened display fields.
    pub results: BTreeMap<String, String>,
}

impl ReconRecord {
    pub fn new(
        module: impl Into<String>,
        target: impl Into<String>,
        results: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: ReportId::new(),
            tool: "wraith".to_string(),
            module: module.into(),
            target: target.into(),
            timestamp: Utc::now(),
            results,
        }
    }

    /// One-line summary for history listings.
    pub fn summary(&self) -> String {
        format!(
            "{}  {:<11} {}  ({} fields)",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.module,
            self.target,
            self.results.len()
        )
    }
}

/// JSON file-based report storage.
pub struct ReportStore {
    reports_dir: PathBuf,
}

impl ReportStore {
    /// Create a store rooted at the default XDG data directory.
    pub fn new() -> StorageResult<Self> {
        Self::at(Paths::get().reports_dir())
    }

    /// Create a store rooted at an explicit directory.
    pub fn at(reports_dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&reports_dir).map_err(|e| StorageError::Directory(e.to_string()))?;
        Ok(Self { reports_dir })
    }

    /// Save a report record.
    pub fn save(&self, record: &ReconRecord) -> StorageResult<()> {
        let file = self.report_file(&record.id);
        let content = serde_json::to_string_pretty(record)?;

        fs::write(&file, content).map_err(|e| StorageError::SaveFailed(e.to_string()))
    }

    /// Load a report by ID.
    pub fn load(&self, id: &ReportId) -> StorageResult<ReconRecord> {
        let file = self.report_file(id);

        if !file.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }

        let content =
            fs::read_to_string(&file).map_err(|e| StorageError::LoadFailed(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| StorageError::LoadFailed(e.to_string()))
    }

    /// List all records, most recent first.
    pub fn list(&self) -> StorageResult<Vec<ReconRecord>> {
        let mut records = Vec::new();

        for entry in
            fs::read_dir(&self.reports_dir).map_err(|e| StorageError::Directory(e.to_string()))?
        {
            let entry = entry.map_err(|e| StorageError::Directory(e.to_string()))?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem() {
                    if let Ok(id) = stem.to_string_lossy().parse::<ReportId>() {
                        if let Ok(record) = self.load(&id) {
                            records.push(record);
                        }
                    }
                }
            }
        }

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    /// List the most recent `count` records.
    pub fn list_recent(&self, count: usize) -> StorageResult<Vec<ReconRecord>> {
        let mut records = self.list()?;
        records.truncate(count);
        Ok(records)
    }

    /// Delete one record.
    pub fn delete(&self, id: &ReportId) -> StorageResult<()> {
        let file = self.report_file(id);

        if !file.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }

        fs::remove_file(&file).map_err(|e| StorageError::SaveFailed(e.to_string()))
    }

    /// Delete records older than the given age. Returns how many went.
    pub fn prune(&self, max_age: chrono::Duration) -> StorageResult<usize> {
        let cutoff = Utc::now() - max_age;
        let mut deleted = 0;

        for record in self.list()? {
            if record.timestamp < cutoff {
                self.delete(&record.id)?;
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// Delete every record. Returns how many went.
    pub fn clear(&self) -> StorageResult<usize> {
        let mut deleted = 0;
        for record in self.list()? {
            self.delete(&record.id)?;
            deleted += 1;
        }
        Ok(deleted)
    }

    fn report_file(&self, id: &ReportId) -> PathBuf {
        self.reports_dir.join(format!("{}.json", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn temp_store() -> (tempfile::TempDir, ReportStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::at(dir.path().join("reports")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_dir, store) = temp_store();
        let record = ReconRecord::new(
            "ports",
            "192.0.2.1",
            fields(&[("Open Ports", "2"), ("Port 22", "SSH - No banner")]),
        );

        store.save(&record).unwrap();
        let loaded = store.load(&record.id).unwrap();

        assert_eq!(loaded.module, "ports");
        assert_eq!(loaded.tool, "wraith");
        assert_eq!(loaded.results, record.results);
    }

    #[test]
    fn test_list_orders_most_recent_first() {
        let (_dir, store) = temp_store();

        let mut older = ReconRecord::new("ports", "a", fields(&[]));
        older.timestamp = Utc::now() - chrono::Duration::hours(2);
        let newer = ReconRecord::new("subdomains", "b", fields(&[]));

        store.save(&older).unwrap();
        store.save(&newer).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.load(&ReportId::new()),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_prune_and_clear() {
        let (_dir, store) = temp_store();

        let mut stale = ReconRecord::new("usernames", "ghost", fields(&[]));
        stale.timestamp = Utc::now() - chrono::Duration::days(90);
        let fresh = ReconRecord::new("usernames", "ghost", fields(&[]));

        store.save(&stale).unwrap();
        store.save(&fresh).unwrap();

        let pruned = store.prune(chrono::Duration::days(30)).unwrap();
        assert_eq!(pruned, 1);
        assert_eq!(store.list().unwrap().len(), 1);

        let cleared = store.clear().unwrap();
        assert_eq!(cleared, 1);
        assert!(store.list().unwrap().is_empty());
    }
}
