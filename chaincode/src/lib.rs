mod chaincode_error;
mod dispatcher;
pub mod handlers;
mod invocation;

#[cfg(test)]
mod test_support;

pub use chaincode_error::ChaincodeError;
pub use dispatcher::{Dispatcher, Registry, SUPPORTED_FUNCTIONS};
pub use handlers::{Handler, HandlerContext};
pub use invocation::{Invocation, Response};
