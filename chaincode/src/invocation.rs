use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A request to run one contract function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(function: &str, args: &[&str]) -> Self {
        Self {
            function: function.to_owned(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

/// Outcome of an invocation.  Every failure is reported the same way, as a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success { payload: Bytes },
    Error { message: String },
}

impl Response {
    pub fn success(payload: Bytes) -> Self {
        Response::Success { payload }
    }

    pub fn error(message: &str) -> Self {
        Response::Error {
            message: message.to_owned(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            Response::Success { payload } => Some(payload),
            Response::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Success { .. } => None,
            Response::Error { message } => Some(message),
        }
    }
}
