use async_trait::async_trait;
use bytes::Bytes;
use document::ScanEntry;

use super::{Handler, HandlerContext};
use crate::ChaincodeError;

pub const SCAN_START_KEY: &str = "ANN0";
pub const SCAN_END_KEY: &str = "ANN999";

/// `queryAllAnnulations()`: every annulation between `ANN0` and `ANN999` as a JSON
/// array of `{Key, Record}`.
///
/// A value that is not JSON is returned as its raw text instead of failing the whole
/// query.
pub struct QueryAllAnnulations;

#[async_trait]
impl Handler for QueryAllAnnulations {
    async fn call(
        &self,
        ctx: &HandlerContext<'_>,
        _args: &[String],
    ) -> Result<Bytes, ChaincodeError> {
        let mut scan = ctx.ledger.scan_range(SCAN_START_KEY, SCAN_END_KEY).await?;
        let mut all_results = vec![];

        while let Some(kv) = scan.next().await? {
            if kv.value.is_empty() {
                continue;
            }

            all_results.push(ScanEntry::from_raw(&kv.key, &kv.value));
        }

        scan.close();

        tracing::info!("end of data, {} annulations found", all_results.len());

        let payload = serde_json::to_vec(&all_results)
            .map_err(|e| ChaincodeError::Serialization(e.to_string()))?;

        Ok(Bytes::from(payload))
    }
}
