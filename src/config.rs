//! Settings shared by the snapshot assembler and the transaction composer.

use crate::error::MintError;
use crate::extension::EXTENSION_TOKEN_METADATA;
use crate::pubkey::{Pubkey, PubkeyExt};
use serde::Deserialize;

/// Token-2022 program: https://www.solana-program.com/docs/token-2022
pub const TOKEN_2022_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

/// Decimals used when a new mint does not specify any.
pub const DEFAULT_DECIMALS: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MintConfig {
    /// Program that owns the mints (base58)
    pub token_program_id: String,
    /// TLV tag of the embedded metadata record
    pub metadata_extension_tag: u16,
    /// Follow `.json` metadata URIs to find a display image
    pub resolve_images: bool,
}

impl Default for MintConfig {
    fn default() -> Self {
        MintConfig {
            token_program_id: TOKEN_2022_PROGRAM_ID.to_string(),
            metadata_extension_tag: EXTENSION_TOKEN_METADATA,
            resolve_images: true,
        }
    }
}

impl MintConfig {
    pub fn token_program(&self) -> Result<Pubkey, MintError> {
        Pubkey::from_base58("tokenProgramId", &self.token_program_id)
    }
}
