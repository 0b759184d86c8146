use async_trait::async_trait;
use bytes::Bytes;
use document::Annulation;

use super::{expect_args, Handler, HandlerContext};
use crate::ChaincodeError;

/// `changeAnnulationOwner(key, newOwner)`: rewrites the whole document under the same
/// key with `owner` set
pub struct ChangeAnnulationOwner;

#[async_trait]
impl Handler for ChangeAnnulationOwner {
    async fn call(
        &self,
        ctx: &HandlerContext<'_>,
        args: &[String],
    ) -> Result<Bytes, ChaincodeError> {
        tracing::info!("============= START : changeAnnulationOwner ===========");

        expect_args(args, 2)?;

        let key = &args[0];
        let annulation_bytes = ctx.ledger.get(key).await?;

        if annulation_bytes.is_empty() {
            return Err(ChaincodeError::NotFound(key.to_owned()));
        }

        let mut annulation =
            Annulation::from_slice(&annulation_bytes).map_err(|e| ChaincodeError::ParseFailure {
                key: key.to_owned(),
                message: e.to_string(),
            })?;

        annulation.set_owner(&args[1]);

        let bytes = annulation
            .to_bytes()
            .map_err(|e| ChaincodeError::Serialization(e.to_string()))?;

        ctx.ledger.put(key, bytes).await?;

        tracing::info!("============= END : changeAnnulationOwner ===========");

        Ok(Bytes::new())
    }
}
