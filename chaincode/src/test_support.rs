use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;
use local_ledger::{KeyValue, Ledger, LedgerError, MemoryLedger, RangeScan, StateIterator};
use notifier_sdk::{Notifier, NotifyErr};

use crate::HandlerContext;

pub(crate) fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub(crate) struct CountingNotifier {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify(&self) -> Result<String, NotifyErr> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(NotifyErr::Network("connection refused".to_string()));
        }

        Ok("ok".to_string())
    }
}

pub(crate) struct TestHarness {
    pub ledger: Arc<MemoryLedger>,
    pub notifier: Arc<dyn Notifier>,
    counter: Arc<CountingNotifier>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(false)
    }

    pub fn with_failing_notifier() -> Self {
        Self::build(true)
    }

    fn build(fail: bool) -> Self {
        let counter = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail,
        });

        Self {
            ledger: Arc::new(MemoryLedger::new()),
            notifier: counter.clone(),
            counter,
        }
    }

    pub fn ctx(&self) -> HandlerContext<'_> {
        self.ctx_with(self.ledger.as_ref())
    }

    pub fn ctx_with<'a>(&'a self, ledger: &'a dyn Ledger) -> HandlerContext<'a> {
        HandlerContext {
            ledger,
            notifier: &self.notifier,
        }
    }

    pub fn notifications(&self) -> usize {
        self.counter.calls.load(Ordering::SeqCst)
    }

    /// Waits for detached notification tasks to run
    pub async fn wait_for_notifications(&self, expected: usize) {
        let waited = tokio::time::timeout(Duration::from_secs(2), async {
            while self.notifications() < expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;

        assert!(waited.is_ok(), "notifier was not called {} times", expected);
    }
}

/// Ledger whose every operation fails.  Scans hand out a cursor that errors on
/// first read and counts how often it was closed.
#[derive(Default)]
pub(crate) struct BrokenScanLedger {
    closes: Arc<AtomicUsize>,
}

impl BrokenScanLedger {
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ledger for BrokenScanLedger {
    async fn get(&self, key: &str) -> Result<Bytes, LedgerError> {
        Err(LedgerError::Read {
            key: key.to_owned(),
            message: "peer unavailable".to_owned(),
        })
    }

    async fn put(&self, key: &str, _value: Bytes) -> Result<(), LedgerError> {
        Err(LedgerError::Write {
            key: key.to_owned(),
            message: "peer unavailable".to_owned(),
        })
    }

    async fn scan_range(&self, _start: &str, _end: &str) -> Result<RangeScan, LedgerError> {
        Ok(RangeScan::new(Box::new(BrokenCursor {
            closes: self.closes.clone(),
        })))
    }
}

struct BrokenCursor {
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl StateIterator for BrokenCursor {
    async fn next(&mut self) -> Result<Option<KeyValue>, LedgerError> {
        Err(LedgerError::Scan("cursor lost".to_owned()))
    }

    fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
