use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use tokio::fs;

use crate::errors::ServiceError;

/// The complete mapping of sequence identifiers to their current values.
pub type SequenceTable = HashMap<String, u64>;

/// JSON file holding the sequence table.
///
/// `load` never fails on content: a missing file, unparseable bytes, or a
/// document that is not an object of string-to-integer all yield the empty
/// table. Prior state is lost in the corrupt case; that tradeoff is accepted
/// so a damaged file never wedges the service. Do not "fix" this by
/// propagating parse errors.
#[derive(Debug, Clone)]
pub struct JsonTableFile {
    path: PathBuf,
}

impl JsonTableFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table from disk. Missing or corrupt content is treated as
    /// empty; only I/O failures other than not-found surface as errors.
    pub async fn load(&self) -> Result<SequenceTable, ServiceError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).unwrap_or_default()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SequenceTable::new()),
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    /// Overwrite the file with the full table, creating any missing parent
    /// directories first.
    pub async fn save(&self, table: &SequenceTable) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
            }
        }
        let data = serde_json::to_vec(table).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.path, data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }
}
