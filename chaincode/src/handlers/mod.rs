mod change_annulation_owner;
mod create_annulation;
mod init_ledger;
mod query_all_annulations;
mod query_annulation;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use local_ledger::Ledger;
use notifier_sdk::Notifier;

use crate::ChaincodeError;

pub use change_annulation_owner::ChangeAnnulationOwner;
pub use create_annulation::{parse_contracts, CreateAnnulation};
pub use init_ledger::InitLedger;
pub use query_all_annulations::{QueryAllAnnulations, SCAN_END_KEY, SCAN_START_KEY};
pub use query_annulation::QueryAnnulation;

/// Everything a handler may touch during one invocation
pub struct HandlerContext<'a> {
    pub ledger: &'a dyn Ledger,
    pub notifier: &'a Arc<dyn Notifier>,
}

#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(
        &self,
        ctx: &HandlerContext<'_>,
        args: &[String],
    ) -> Result<Bytes, ChaincodeError>;
}

fn expect_args(args: &[String], expected: usize) -> Result<(), ChaincodeError> {
    if args.len() != expected {
        return Err(ChaincodeError::BadArgumentCount {
            expected,
            received: args.len(),
        });
    }

    Ok(())
}
