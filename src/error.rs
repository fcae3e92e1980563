use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Error reported by an external collaborator (ledger client, identity
/// provider or document fetcher). Carried through unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct LedgerError {
    pub operation: String,
    pub message: String,
}

impl LedgerError {
    pub fn new(operation: &str, message: impl Into<String>) -> Self {
        LedgerError {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintError {
    #[error(
        "TLV record at offset {offset} declares {declared_len} bytes but the buffer is only {buffer_len} bytes long"
    )]
    BufferCorruption {
        offset: usize,
        declared_len: usize,
        buffer_len: usize,
    },
    #[error("Malformed metadata in field `{field}`: {reason}")]
    MalformedMetadata { field: String, reason: String },
    #[error("Amount {amount} has more fractional digits than {decimals} decimals allow")]
    PrecisionLoss { amount: String, decimals: u8 },
    #[error("Decimals must be between 0 and 9, got {0}")]
    InvalidDecimals(u8),
    #[error("Invalid amount `{input}`: {reason}")]
    InvalidAmount { input: String, reason: String },
    #[error("Mint authority is {expected}, but the caller is {actual}")]
    AuthorityMismatch { expected: String, actual: String },
    #[error("Mint has no {authority} authority")]
    MissingAuthority { authority: String },
    #[error(transparent)]
    NetworkFailure(#[from] LedgerError),
    #[error("Signing refused: {0}")]
    SigningRefused(String),
    #[error("Invalid {field}: {value}")]
    InvalidPubkey { field: String, value: String },
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl MintError {
    pub(crate) fn malformed(field: &str, reason: impl Into<String>) -> Self {
        MintError::MalformedMetadata {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_pubkey(field: &str, value: &str) -> Self {
        MintError::InvalidPubkey {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

// Required for wasm_bindgen to convert errors to JavaScript exceptions
impl From<MintError> for JsValue {
    fn from(err: MintError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
