use std::{
    collections::VecDeque,
    io::{ErrorKind, Write},
    path::PathBuf,
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    ledger::{KeyValue, Ledger, RangeScan, StateIterator},
    utility::key_in_range,
    LedgerError,
};

const LEDGER_BASE_DIR: &str = "annulation_ledger";
const TMP_SUFFIX: &str = ".tmp";

/// Ledger persisted as one file per key under a root directory.  The file name is
/// the key and the file contents are the raw value.
#[derive(Debug, Clone)]
pub struct DiskLedger {
    root: PathBuf,
}

impl DiskLedger {
    /// Opens (creating if needed) a ledger rooted at `root`
    pub async fn open(root: PathBuf) -> Result<Self, LedgerError> {
        tokio::fs::create_dir_all(&root).await.map_err(|err| {
            LedgerError::Write {
                key: root.display().to_string(),
                message: format!("Failed to create ledger directory: {}", err),
            }
        })?;

        tracing::info!("Opened disk ledger at {}", root.display());

        Ok(Self { root })
    }

    /// Opens the ledger called `name` under the platform data directory
    pub async fn open_default(name: &str) -> Result<Self, LedgerError> {
        let mut root = dirs::data_dir().ok_or(LedgerError::Write {
            key: name.to_owned(),
            message: "Failed to get data directory path".to_owned(),
        })?;

        root.push(LEDGER_BASE_DIR);
        root.push(name);

        Self::open(root).await
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, LedgerError> {
        if !is_storable_key(key) {
            return Err(LedgerError::InvalidKey(key.to_owned()));
        }

        Ok(self.root.join(key))
    }
}

fn is_storable_key(key: &str) -> bool {
    !(key.is_empty()
        || key.starts_with('.')
        || key.contains("..")
        || key.contains(['/', '\\'])
        || key.ends_with(TMP_SUFFIX))
}

#[async_trait]
impl Ledger for DiskLedger {
    async fn get(&self, key: &str) -> Result<Bytes, LedgerError> {
        // A key that could never have been written reads as absent.
        if !is_storable_key(key) {
            return Ok(Bytes::new());
        }

        read_value(key, self.root.join(key)).await
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<(), LedgerError> {
        let path = self.key_path(key)?;
        let root = self.root.clone();
        let to_write_err = |message: String| LedgerError::Write {
            key: key.to_owned(),
            message,
        };

        tokio::task::spawn_blocking(move || write_value(root, path, &value))
            .await
            .map_err(|err| to_write_err(err.to_string()))?
            .map_err(|err| to_write_err(err.to_string()))
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<RangeScan, LedgerError> {
        let root = self.root.clone();
        let (start, end) = (start.to_owned(), end.to_owned());

        let keys = tokio::task::spawn_blocking(move || list_keys(root, &start, &end))
            .await
            .map_err(|err| LedgerError::Scan(err.to_string()))??;

        let cursor = DiskCursor {
            root: self.root.clone(),
            keys,
        };

        Ok(RangeScan::new(Box::new(cursor)))
    }
}

/// Writes into a uniquely named temp file, then renames it over `path`.  Readers
/// never observe a half written value and concurrent writers never share a temp file.
fn write_value(root: PathBuf, path: PathBuf, value: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".")
        .suffix(TMP_SUFFIX)
        .tempfile_in(root)?;

    tmp.write_all(value)?;
    tmp.persist(path).map_err(|err| err.error)?;

    Ok(())
}

fn list_keys(root: PathBuf, start: &str, end: &str) -> Result<VecDeque<String>, LedgerError> {
    let mut keys = VecDeque::new();

    for entry in walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| LedgerError::Scan(err.to_string()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let key = match entry.file_name().to_str() {
            Some(key) => key,
            None => {
                tracing::warn!("Skipping non utf8 ledger file: {:?}", entry.path());
                continue;
            }
        };

        if key.starts_with('.') {
            continue;
        }

        if key_in_range(key, start, end) {
            keys.push_back(key.to_owned());
        }
    }

    Ok(keys)
}

async fn read_value(key: &str, path: PathBuf) -> Result<Bytes, LedgerError> {
    match tokio::fs::read(&path).await {
        Ok(data) => Ok(Bytes::from(data)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Bytes::new()),
        Err(err) => Err(LedgerError::Read {
            key: key.to_owned(),
            message: err.to_string(),
        }),
    }
}

struct DiskCursor {
    root: PathBuf,
    keys: VecDeque<String>,
}

#[async_trait]
impl StateIterator for DiskCursor {
    async fn next(&mut self) -> Result<Option<KeyValue>, LedgerError> {
        while let Some(key) = self.keys.pop_front() {
            let value = read_value(&key, self.root.join(&key)).await?;

            // Listed at scan start but gone since.
            if value.is_empty() {
                continue;
            }

            return Ok(Some(KeyValue { key, value }));
        }

        Ok(None)
    }

    fn close(&mut self) {
        self.keys.clear();
    }
}
