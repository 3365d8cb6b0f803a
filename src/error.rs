use thiserror::Error;

use crate::dispatch::Surface;
use crate::schema::RecordKind;

/// Payload returned alongside a rejected marketer write.
pub const MARKETER_EXISTS: &[u8] = b"Marketer exists";

/// Opaque failure raised by a store backend. Passed through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("incorrect number of arguments: expecting {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("{kind} expects {expected} fields, got {got}")]
    Arity {
        kind: RecordKind,
        expected: usize,
        got: usize,
    },

    #[error("Marketer exists: {key}")]
    DuplicateKey { key: String },

    #[error("no state found for key {key}")]
    NotFound { key: String },

    #[error("failed to decode {kind}: {reason}")]
    Decode { kind: RecordKind, reason: String },

    #[error("failed to encode {kind}: {reason}")]
    Encode { kind: RecordKind, reason: String },

    #[error("received unknown function {surface}: {name}")]
    UnknownOperation { surface: Surface, name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Stable name of the failure kind, suitable for structured responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ArgumentCount { .. } => "ArgumentCountError",
            Error::Arity { .. } => "ArityError",
            Error::DuplicateKey { .. } => "DuplicateKeyError",
            Error::NotFound { .. } => "NotFoundError",
            Error::Decode { .. } => "DecodeError",
            Error::Encode { .. } => "EncodeError",
            Error::UnknownOperation { .. } => "UnknownOperationError",
            Error::Store(_) => "StoreError",
        }
    }

    /// Byte payload that accompanies the failure, if any.
    ///
    /// Only a duplicate marketer write carries one, so callers can branch on
    /// content without parsing the message.
    pub fn payload(&self) -> Option<&'static [u8]> {
        match self {
            Error::DuplicateKey { .. } => Some(MARKETER_EXISTS),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
