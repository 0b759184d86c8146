use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Annulation;

/// The `Record` half of a scan entry.
///
/// Values that are exactly an annulation come back typed, other JSON is passed
/// through as is and anything that is not JSON at all is kept as its raw text, so
/// one odd record never hides the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanRecord {
    Parsed(Annulation),
    Raw(String),
    Json(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: ScanRecord,
}

impl ScanEntry {
    /// Builds an entry from a ledger key/value pair, falling back to the raw value
    /// only when it is not valid JSON.
    pub fn from_raw(key: &str, value: &[u8]) -> Self {
        let record = match serde_json::from_slice::<Value>(value) {
            Ok(json) => typed_record(json),
            Err(err) => {
                tracing::warn!("Keeping raw value for {}: {}", key, err);

                ScanRecord::Raw(String::from_utf8_lossy(value).into_owned())
            }
        };

        Self {
            key: key.to_owned(),
            record,
        }
    }
}

// Typed only when nothing in the stored document would be lost.
fn typed_record(json: Value) -> ScanRecord {
    let annulation = match serde_json::from_value::<Annulation>(json.clone()) {
        Ok(annulation) => annulation,
        Err(_) => return ScanRecord::Json(json),
    };

    match serde_json::to_value(&annulation) {
        Ok(typed) if typed == json => ScanRecord::Parsed(annulation),
        _ => ScanRecord::Json(json),
    }
}
