use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::json_table::JsonTableFile;

/// Named monotonically-increasing counters persisted as a single JSON file.
///
/// Every call reloads the table from disk, increments one entry, and writes
/// the whole table back, all under one process-wide lock. The lock spans the
/// read and the write, so two concurrent callers can never interleave and be
/// handed the same value. There is no cache: the file is the only source of
/// truth between calls, which also lets a corrupt file heal to an empty
/// table on the next request.
pub struct SequenceStore {
    file: JsonTableFile,
    lock: Mutex<()>,
}

impl SequenceStore {
    /// Build a store over the given file path. Nothing is read or created
    /// until the first increment.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file: JsonTableFile::new(path), lock: Mutex::new(()) })
    }

    /// Increment the counter for `sequence_id` and persist before returning.
    ///
    /// A fresh identifier starts at 1. Missing or corrupt storage is treated
    /// as an empty table; only unwritable storage fails the call.
    pub async fn next(&self, sequence_id: &str) -> Result<u64, ServiceError> {
        let _guard = self.lock.lock().await;

        let mut table = self.file.load().await?;
        let next_value = table.get(sequence_id).copied().unwrap_or(0) + 1;
        table.insert(sequence_id.to_string(), next_value);
        self.file.save(&table).await?;

        debug!(%sequence_id, next_value, "sequence advanced");
        Ok(next_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::fs;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("seq_store_{}_{}.json", tag, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn fresh_sequence_starts_at_one() -> Result<(), anyhow::Error> {
        let path = temp_path("fresh");
        let store = SequenceStore::new(&path);
        assert_eq!(store.next("orders").await?, 1);
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn sequential_calls_count_up() -> Result<(), anyhow::Error> {
        let path = temp_path("sequential");
        let store = SequenceStore::new(&path);
        for expected in 1..=5u64 {
            assert_eq!(store.next("orders").await?, expected);
        }
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn identifiers_are_independent() -> Result<(), anyhow::Error> {
        let path = temp_path("independent");
        let store = SequenceStore::new(&path);
        assert_eq!(store.next("a").await?, 1);
        assert_eq!(store.next("a").await?, 2);
        assert_eq!(store.next("b").await?, 1);
        assert_eq!(store.next("a").await?, 3);
        assert_eq!(store.next("b").await?, 2);
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn values_survive_a_store_reload() -> Result<(), anyhow::Error> {
        let path = temp_path("reload");
        let store = SequenceStore::new(&path);
        assert_eq!(store.next("orders").await?, 1);
        assert_eq!(store.next("orders").await?, 2);

        // Simulates a process restart: fresh store over the same file.
        let reopened = SequenceStore::new(&path);
        assert_eq!(reopened.next("orders").await?, 3);

        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_recovers_as_empty() -> Result<(), anyhow::Error> {
        let path = temp_path("corrupt");
        fs::write(&path, b"{{{ definitely not json").await?;
        let store = SequenceStore::new(&path);
        assert_eq!(store.next("orders").await?, 1);
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn large_stored_value_increments_without_loss() -> Result<(), anyhow::Error> {
        let path = temp_path("large");
        fs::write(&path, br#"{"big": 9223372036854775807}"#).await?;
        let store = SequenceStore::new(&path);
        assert_eq!(store.next("big").await?, 9_223_372_036_854_775_808);
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_never_share_a_value() -> Result<(), anyhow::Error> {
        let path = temp_path("concurrent");
        let store = SequenceStore::new(&path);

        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.next("hot").await }));
        }

        let mut values = Vec::new();
        for handle in handles {
            values.push(handle.await??);
        }
        values.sort_unstable();
        assert_eq!(values, (1..=32).collect::<Vec<u64>>());

        let _ = fs::remove_file(&path).await;
        Ok(())
    }
}
