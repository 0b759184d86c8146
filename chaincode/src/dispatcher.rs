use std::{collections::HashMap, sync::Arc};

use bytes::Bytes;
use local_ledger::Ledger;
use notifier_sdk::Notifier;

use crate::{
    handlers::{
        ChangeAnnulationOwner, CreateAnnulation, Handler, HandlerContext, InitLedger,
        QueryAllAnnulations, QueryAnnulation,
    },
    ChaincodeError, Invocation, Response,
};

/// Every function name the annulation contract answers to
pub const SUPPORTED_FUNCTIONS: [&str; 5] = [
    "initLedger",
    "createAnnulation",
    "queryAnnulation",
    "queryAllAnnulations",
    "changeAnnulationOwner",
];

/// Function name to handler mapping, checked as it is built
#[derive(Default)]
pub struct Registry {
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the handlers of every supported function
    pub fn annulation() -> Result<Self, ChaincodeError> {
        Self::new()
            .register("initLedger", InitLedger)?
            .register("createAnnulation", CreateAnnulation)?
            .register("queryAnnulation", QueryAnnulation)?
            .register("queryAllAnnulations", QueryAllAnnulations)?
            .register("changeAnnulationOwner", ChangeAnnulationOwner)
    }

    pub fn register<H>(mut self, name: &str, handler: H) -> Result<Self, ChaincodeError>
    where
        H: Handler + 'static,
    {
        if !SUPPORTED_FUNCTIONS.contains(&name) {
            return Err(ChaincodeError::Registry(format!(
                "{} is not a supported function",
                name
            )));
        }

        if self.handlers.contains_key(name) {
            return Err(ChaincodeError::Registry(format!(
                "{} is registered twice",
                name
            )));
        }

        self.handlers.insert(name.to_owned(), Box::new(handler));

        Ok(self)
    }
}

pub struct Dispatcher {
    handlers: HashMap<String, Box<dyn Handler>>,
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    /// Fails if any supported function is left without a handler
    pub fn new(registry: Registry, notifier: Arc<dyn Notifier>) -> Result<Self, ChaincodeError> {
        let missing: Vec<_> = SUPPORTED_FUNCTIONS
            .iter()
            .filter(|name| !registry.handlers.contains_key(**name))
            .collect();

        if !missing.is_empty() {
            return Err(ChaincodeError::Registry(format!(
                "missing handlers for {:?}",
                missing
            )));
        }

        Ok(Self {
            handlers: registry.handlers,
            notifier,
        })
    }

    pub fn annulation(notifier: Arc<dyn Notifier>) -> Result<Self, ChaincodeError> {
        Self::new(Registry::annulation()?, notifier)
    }

    /// Instantiate hook.  Nothing is written; seeding is left to `initLedger`.
    pub fn init(&self) -> Response {
        tracing::info!("=========== Instantiated annulation chaincode ===========");

        Response::success(Bytes::new())
    }

    pub fn resolve(&self, function: &str) -> Result<&dyn Handler, ChaincodeError> {
        self.handlers
            .get(function)
            .map(|handler| handler.as_ref())
            .ok_or_else(|| {
                tracing::error!("no function of name: {} found", function);

                ChaincodeError::UnknownFunction(function.to_owned())
            })
    }

    /// Runs one invocation against `ledger`, folding any failure into an error response
    pub async fn invoke(&self, ledger: &dyn Ledger, invocation: &Invocation) -> Response {
        tracing::info!(
            "Invoking {} with args {:?}",
            invocation.function,
            invocation.args
        );

        match self.execute(ledger, invocation).await {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                tracing::error!("{} failed: {}", invocation.function, err);

                Response::error(&err.to_string())
            }
        }
    }

    async fn execute(
        &self,
        ledger: &dyn Ledger,
        invocation: &Invocation,
    ) -> Result<Bytes, ChaincodeError> {
        let handler = self.resolve(&invocation.function)?;
        let ctx = HandlerContext {
            ledger,
            notifier: &self.notifier,
        };

        handler.call(&ctx, &invocation.args).await
    }
}
