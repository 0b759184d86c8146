use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Value of `docType` for every record written by the annulation contract.
pub const ANNULATION_DOC_TYPE: &str = "annulation";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to parse annulation document: {0}")]
    Parse(String),
    #[error("Failed to serialize annulation document: {0}")]
    Serialize(String),
}

/// Annulation record as stored in the ledger.
///
/// The ledger key is not part of the document.  It is owned by whoever wrote the
/// record and never changes for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annulation {
    pub doc_type: String,
    pub fly_number: String,
    pub contracts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Annulation {
    /// Creates an annulation tagged with the `annulation` doc type and no owner
    pub fn new(fly_number: &str, contracts: Vec<String>) -> Self {
        Self {
            doc_type: ANNULATION_DOC_TYPE.to_owned(),
            fly_number: fly_number.to_owned(),
            contracts,
            owner: None,
        }
    }

    pub fn set_owner(&mut self, owner: &str) -> &mut Self {
        self.owner = Some(owner.to_owned());

        self
    }

    /// Parses ledger bytes into an annulation.  Callers must treat empty bytes as a
    /// missing record before calling this.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        serde_json::from_slice(bytes).map_err(|err| DocumentError::Parse(err.to_string()))
    }

    /// Serializes the annulation to the JSON bytes written to the ledger
    pub fn to_bytes(&self) -> Result<Bytes, DocumentError> {
        let data =
            serde_json::to_vec(self).map_err(|err| DocumentError::Serialize(err.to_string()))?;

        Ok(Bytes::from(data))
    }
}
