use async_trait::async_trait;
use bytes::Bytes;
use document::Annulation;
use notifier_sdk::spawn_notify;

use super::{expect_args, Handler, HandlerContext};
use crate::ChaincodeError;

/// `createAnnulation(key, flyNumber, contracts)`: upserts a new annulation, then
/// fires the reimbursement notification without waiting on it.
pub struct CreateAnnulation;

#[async_trait]
impl Handler for CreateAnnulation {
    async fn call(
        &self,
        ctx: &HandlerContext<'_>,
        args: &[String],
    ) -> Result<Bytes, ChaincodeError> {
        tracing::info!("============= START : Create Annulation ===========");

        expect_args(args, 3)?;

        let key = &args[0];
        let annulation = Annulation::new(&args[1], parse_contracts(&args[2]));
        let bytes = annulation
            .to_bytes()
            .map_err(|e| ChaincodeError::Serialization(e.to_string()))?;

        ctx.ledger.put(key, bytes).await?;

        spawn_notify(ctx.notifier.clone());

        tracing::info!("============= END : Create Annulation ===========");

        Ok(Bytes::new())
    }
}

/// Reads the `contracts` argument.  A JSON array of strings is taken as is, anything
/// else is treated as a comma separated list.
pub fn parse_contracts(raw: &str) -> Vec<String> {
    if let Ok(contracts) = serde_json::from_str::<Vec<String>>(raw) {
        return contracts;
    }

    raw.split(',')
        .map(|contract| contract.trim())
        .filter(|contract| !contract.is_empty())
        .map(|contract| contract.to_owned())
        .collect()
}
