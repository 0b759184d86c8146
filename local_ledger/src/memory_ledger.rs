use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::{
    ledger::{KeyValue, Ledger, RangeScan, StateIterator},
    utility::key_in_range,
    LedgerError,
};

/// In process ledger backed by an ordered map.  Scans iterate over a snapshot taken
/// when the scan starts.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<BTreeMap<String, Bytes>>,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scan cursors handed out and not yet closed
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get(&self, key: &str) -> Result<Bytes, LedgerError> {
        let state = self.state.read().await;

        Ok(state.get(key).cloned().unwrap_or_default())
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::InvalidKey(key.to_owned()));
        }

        self.state.write().await.insert(key.to_owned(), value);

        Ok(())
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<RangeScan, LedgerError> {
        let state = self.state.read().await;
        let snapshot: Vec<KeyValue> = state
            .iter()
            .filter(|(key, _)| key_in_range(key, start, end))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();

        self.open_cursors.fetch_add(1, Ordering::SeqCst);

        let cursor = MemoryCursor {
            entries: snapshot.into_iter(),
            open_cursors: self.open_cursors.clone(),
        };

        Ok(RangeScan::new(Box::new(cursor)))
    }
}

struct MemoryCursor {
    entries: std::vec::IntoIter<KeyValue>,
    open_cursors: Arc<AtomicUsize>,
}

#[async_trait]
impl StateIterator for MemoryCursor {
    async fn next(&mut self) -> Result<Option<KeyValue>, LedgerError> {
        Ok(self.entries.next())
    }

    fn close(&mut self) {
        self.entries = Vec::new().into_iter();
        self.open_cursors.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(keys: &[&str]) -> MemoryLedger {
        let ledger = MemoryLedger::new();

        for key in keys {
            ledger
                .put(key, Bytes::from(format!("value-{}", key)))
                .await
                .unwrap();
        }

        ledger
    }

    #[tokio::test]
    async fn should_return_empty_bytes_for_missing_key() {
        let ledger = MemoryLedger::new();

        let value = ledger.get("ANN42").await.unwrap();

        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn should_overwrite_on_put() {
        let ledger = MemoryLedger::new();

        ledger.put("ANN0", Bytes::from_static(b"one")).await.unwrap();
        ledger.put("ANN0", Bytes::from_static(b"two")).await.unwrap();

        assert_eq!(ledger.get("ANN0").await.unwrap(), Bytes::from_static(b"two"));
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn should_reject_empty_key() {
        let ledger = MemoryLedger::new();

        let err = ledger.put("", Bytes::from_static(b"x")).await.unwrap_err();

        assert!(matches!(err, LedgerError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn should_scan_in_key_order_not_insertion_order() {
        let ledger = seeded(&["ANN2", "ANN10", "ANN0", "ANN999", "BOOK1"]).await;

        let mut scan = ledger.scan_range("ANN0", "ANN999").await.unwrap();
        let mut keys = vec![];

        while let Some(kv) = scan.next().await.unwrap() {
            keys.push(kv.key);
        }

        scan.close();

        assert_eq!(keys, vec!["ANN0", "ANN10", "ANN2"]);
        assert_eq!(ledger.open_cursors(), 0);
    }

    #[tokio::test]
    async fn should_release_cursor_when_scan_is_dropped() {
        let ledger = seeded(&["ANN0", "ANN1"]).await;

        {
            let mut scan = ledger.scan_range("ANN0", "ANN999").await.unwrap();
            let _first = scan.next().await.unwrap();

            assert_eq!(ledger.open_cursors(), 1);
        }

        assert_eq!(ledger.open_cursors(), 0);
    }

    #[tokio::test]
    async fn should_yield_nothing_for_inverted_range() {
        let ledger = seeded(&["ANN0", "ANN1"]).await;

        let mut scan = ledger.scan_range("ANN9", "ANN0").await.unwrap();

        assert_eq!(scan.next().await.unwrap(), None);
    }
}
