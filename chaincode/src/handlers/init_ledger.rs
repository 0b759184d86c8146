use async_trait::async_trait;
use bytes::Bytes;
use document::Annulation;

use super::{Handler, HandlerContext};
use crate::ChaincodeError;

const SEED_ANNULATIONS: [(&str, [&str; 2]); 2] =
    [("01", ["CON01", "CON02"]), ("04", ["CON01", "CON02"])];

/// `initLedger()`: writes the sample annulations under `ANN0`, `ANN1`, ...
///
/// Existing values under those keys are overwritten.
pub struct InitLedger;

#[async_trait]
impl Handler for InitLedger {
    async fn call(
        &self,
        ctx: &HandlerContext<'_>,
        _args: &[String],
    ) -> Result<Bytes, ChaincodeError> {
        tracing::info!("============= START : Initialize Ledger ===========");

        for (idx, (fly_number, contracts)) in SEED_ANNULATIONS.iter().enumerate() {
            let annulation = Annulation::new(
                fly_number,
                contracts.iter().map(|c| c.to_string()).collect(),
            );
            let key = format!("ANN{}", idx);
            let bytes = annulation
                .to_bytes()
                .map_err(|e| ChaincodeError::Serialization(e.to_string()))?;

            ctx.ledger.put(&key, bytes).await?;

            tracing::info!("Added {} <--> {:?}", key, annulation);
        }

        tracing::info!("============= END : Initialize Ledger ===========");

        Ok(Bytes::new())
    }
}
