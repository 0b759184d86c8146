use async_trait::async_trait;
use bytes::Bytes;

use super::{expect_args, Handler, HandlerContext};
use crate::ChaincodeError;

/// `queryAnnulation(key)`: returns the stored document bytes untouched
pub struct QueryAnnulation;

#[async_trait]
impl Handler for QueryAnnulation {
    async fn call(
        &self,
        ctx: &HandlerContext<'_>,
        args: &[String],
    ) -> Result<Bytes, ChaincodeError> {
        expect_args(args, 1)?;

        let annulation_number = &args[0];
        let annulation_bytes = ctx.ledger.get(annulation_number).await?;

        if annulation_bytes.is_empty() {
            return Err(ChaincodeError::NotFound(annulation_number.to_owned()));
        }

        tracing::info!(
            "{}: {}",
            annulation_number,
            String::from_utf8_lossy(&annulation_bytes)
        );

        Ok(annulation_bytes)
    }
}
