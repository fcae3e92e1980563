//! Solana public key (address) helpers.
//!
//! Wraps the SDK `Pubkey` so that parse failures name the field that held
//! the bad value.

use crate::error::MintError;
use std::str::FromStr;

/// Re-export the underlying Solana Pubkey type.
pub use solana_sdk::pubkey::Pubkey;

/// Extension trait for Pubkey to add field-aware error handling.
pub trait PubkeyExt {
    fn from_base58(field: &str, address: &str) -> Result<Pubkey, MintError>;
    fn from_bytes_checked(field: &str, bytes: &[u8]) -> Result<Pubkey, MintError>;
}

impl PubkeyExt for Pubkey {
    /// Create a Pubkey from a base58 string.
    fn from_base58(field: &str, address: &str) -> Result<Pubkey, MintError> {
        Pubkey::from_str(address).map_err(|_| MintError::invalid_pubkey(field, address))
    }

    /// Create a Pubkey from a byte slice with length validation.
    fn from_bytes_checked(field: &str, bytes: &[u8]) -> Result<Pubkey, MintError> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            MintError::invalid_pubkey(field, &format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Pubkey::new_from_array(array))
    }
}

/// Parse an optional base58 address, treating an empty string as absent.
pub(crate) fn parse_optional(field: &str, value: Option<&str>) -> Result<Option<Pubkey>, MintError> {
    match value {
        Some(s) if !s.is_empty() => Pubkey::from_base58(field, s).map(Some),
        _ => Ok(None),
    }
}
