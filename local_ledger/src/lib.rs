mod disk_ledger;
mod ledger;
mod memory_ledger;
mod utility;

pub use disk_ledger::DiskLedger;
pub use ledger::{KeyValue, Ledger, RangeScan, StateIterator};
pub use memory_ledger::MemoryLedger;

pub use utility::LedgerError;
