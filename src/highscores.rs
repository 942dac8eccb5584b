//! Score history
//!
//! Every finished run is recorded, newest first, with no size limit. Stored
//! as a plain JSON array of `{score, timestamp}` objects.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError};

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    /// Local time the run ended
    #[serde(alias = "date")]
    pub timestamp: String,
}

impl ScoreRecord {
    pub fn new(score: u32, timestamp: impl Into<String>) -> Self {
        Self {
            score,
            timestamp: timestamp.into(),
        }
    }
}

/// Append-only run history, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreHistory {
    pub entries: Vec<ScoreRecord>,
}

impl ScoreHistory {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "scores";

    /// Create empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Put a record at the front
    pub fn record(&mut self, record: ScoreRecord) {
        self.entries.insert(0, record);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Highest score ever recorded
    pub fn best(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.score).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.entries.iter()
    }

    /// Load history; absent or corrupt data gives an empty history
    pub fn load(storage: &dyn Storage) -> Self {
        Self::try_load(storage).unwrap_or_else(|e| {
            log::warn!("Score history unavailable: {}", e);
            Self::new()
        })
    }

    /// Like [`load`](Self::load), but a failed read is an error
    ///
    /// Corrupt JSON still degrades to an empty history.
    pub fn try_load(storage: &dyn Storage) -> Result<Self, StorageError> {
        match storage.get_item(Self::STORAGE_KEY)? {
            Some(json) => match serde_json::from_str::<ScoreHistory>(&json) {
                Ok(history) => {
                    log::info!("Loaded {} score records", history.len());
                    Ok(history)
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt score history: {}", e);
                    Ok(Self::new())
                }
            },
            None => {
                log::info!("No score history found, starting fresh");
                Ok(Self::new())
            }
        }
    }

    /// Save history
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Score history saved ({} entries)", self.len());
        Ok(())
    }

    /// Read, prepend `record`, write back
    ///
    /// Nothing is written if the existing history cannot be read.
    pub fn append(storage: &mut dyn Storage, record: ScoreRecord) -> Result<Self, StorageError> {
        let mut history = Self::try_load(storage)?;
        history.record(record);
        history.save(storage)?;
        Ok(history)
    }
}

/// One line of the records list
pub fn format_record(record: &ScoreRecord) -> String {
    format!("Score: {}, Date: {}", record.score, record.timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_newest_first() {
        let mut storage = MemoryStorage::new();
        ScoreHistory::append(&mut storage, ScoreRecord::new(5, "first")).unwrap();
        let history = ScoreHistory::append(&mut storage, ScoreRecord::new(3, "second")).unwrap();

        let scores: Vec<u32> = history.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![3, 5]);
        assert_eq!(ScoreHistory::load(&storage), history);
        assert_eq!(history.best(), Some(5));
    }

    #[test]
    fn test_unbounded() {
        let mut history = ScoreHistory::new();
        for i in 0..250 {
            history.record(ScoreRecord::new(i, "t"));
        }
        assert_eq!(history.len(), 250);
        assert_eq!(history.entries[0].score, 249);
        assert_eq!(history.best(), Some(249));
    }

    #[test]
    fn test_stored_as_plain_array() {
        let mut history = ScoreHistory::new();
        history.record(ScoreRecord::new(2, "now"));
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"[{"score":2,"timestamp":"now"}]"#);
    }

    #[test]
    fn test_reads_date_field() {
        let history: ScoreHistory =
            serde_json::from_str(r#"[{"score":4,"date":"1/2/2024, 10:00:00"}]"#).unwrap();
        assert_eq!(history.entries[0], ScoreRecord::new(4, "1/2/2024, 10:00:00"));
    }

    #[test]
    fn test_corrupt_history_degrades_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(ScoreHistory::STORAGE_KEY, "{\"oops\":").unwrap();
        assert!(ScoreHistory::load(&storage).is_empty());

        // Appending over corrupt data starts a fresh history
        let history = ScoreHistory::append(&mut storage, ScoreRecord::new(1, "t")).unwrap();
        assert_eq!(history.len(), 1);
    }

    /// Memory store whose next read fails once
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_next_read: std::cell::Cell<bool>,
    }

    impl Storage for FlakyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_next_read.replace(false) {
                return Err(StorageError::Backend("transient".into()));
            }
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_failed_read_keeps_existing_records() {
        let mut storage = FlakyStorage::default();
        for score in 1..=5 {
            ScoreHistory::append(&mut storage, ScoreRecord::new(score, "t")).unwrap();
        }

        storage.fail_next_read.set(true);
        let result = ScoreHistory::append(&mut storage, ScoreRecord::new(99, "t"));
        assert!(matches!(result, Err(StorageError::Backend(_))));

        let scores: Vec<u32> = ScoreHistory::load(&storage).iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1]);

        // Next append goes through once the store recovers
        let history = ScoreHistory::append(&mut storage, ScoreRecord::new(99, "t")).unwrap();
        assert_eq!(history.len(), 6);
        assert_eq!(history.entries[0].score, 99);
    }

    #[test]
    fn test_try_load_propagates_read_error() {
        let storage = FlakyStorage::default();
        storage.fail_next_read.set(true);
        assert!(ScoreHistory::try_load(&storage).is_err());
        assert!(ScoreHistory::try_load(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_format_record() {
        assert_eq!(format_record(&ScoreRecord::new(7, "today")), "Score: 7, Date: today");
    }
}
