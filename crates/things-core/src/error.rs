//! Gateway Errors

use thiserror::Error;

use crate::model::ThingId;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures observed while talking to the document store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The live feed broke; terminal for that subscription
    #[error("live feed failed ({code}): {message}")]
    Subscription { code: String, message: String },

    #[error("no thing with id `{0}`")]
    NotFound(ThingId),

    #[error("content must not be empty")]
    EmptyContent,

    /// Any other rejected read or write
    #[error("backend rejected the request ({code}): {message}")]
    Backend { code: String, message: String },
}

impl GatewayError {
    pub fn subscription(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Subscription {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn backend(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            code: code.into(),
            message: message.into(),
        }
    }
}
