mod annulation;
mod scan_entry;

pub use annulation::{Annulation, DocumentError, ANNULATION_DOC_TYPE};
pub use scan_entry::{ScanEntry, ScanRecord};
