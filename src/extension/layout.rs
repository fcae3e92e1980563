//! Token-2022 mint account layout.
//!
//! An extended mint is the 82-byte base mint, zero padded to the 165-byte
//! token account length, followed by one account-type byte and the TLV
//! extension records.

use super::metadata::{packed_len, MetadataRecord};
use super::tlv::TLV_HEADER_LEN;
use crate::error::MintError;

/// Length of a mint without extensions.
pub const BASE_MINT_LEN: usize = 82;
/// Length of a token account; extended mints are padded up to it.
pub const BASE_ACCOUNT_LEN: usize = 165;
/// Account-type discriminator written after the padding.
pub const ACCOUNT_TYPE_MINT: u8 = 1;

/// Extension type of the metadata pointer.
pub const EXTENSION_METADATA_POINTER: u16 = 18;
/// Extension type of the embedded token metadata.
pub const EXTENSION_TOKEN_METADATA: u16 = 19;

/// authority (32) + metadata address (32)
pub const METADATA_POINTER_LEN: usize = 64;

/// Return the TLV records of a mint account.
pub fn tlv_region(account: &[u8]) -> Result<&[u8], MintError> {
    if account.len() == BASE_MINT_LEN {
        return Ok(&[]);
    }
    if account.len() <= BASE_ACCOUNT_LEN {
        return Err(MintError::BufferCorruption {
            offset: 0,
            declared_len: BASE_ACCOUNT_LEN + 1,
            buffer_len: account.len(),
        });
    }
    let account_type = account[BASE_ACCOUNT_LEN];
    if account_type != ACCOUNT_TYPE_MINT {
        log::warn!("account type byte {} is not a mint", account_type);
        return Err(MintError::BufferCorruption {
            offset: BASE_ACCOUNT_LEN,
            declared_len: 1,
            buffer_len: account.len(),
        });
    }
    Ok(&account[BASE_ACCOUNT_LEN + 1..])
}

/// Assemble an extended mint account from base mint bytes and TLV records.
pub fn extended_mint_account(base_mint: &[u8; BASE_MINT_LEN], tlv: &[u8]) -> Vec<u8> {
    let mut account = vec![0u8; BASE_ACCOUNT_LEN + 1];
    account[..BASE_MINT_LEN].copy_from_slice(base_mint);
    account[BASE_ACCOUNT_LEN] = ACCOUNT_TYPE_MINT;
    account.extend_from_slice(tlv);
    account
}

/// Space for a mint whose only fixed-size extension is the metadata pointer.
pub const fn mint_len_with_metadata_pointer() -> usize {
    BASE_ACCOUNT_LEN + 1 + TLV_HEADER_LEN + METADATA_POINTER_LEN
}

/// Bytes the metadata extension adds once initialized, header included.
pub fn metadata_len(record: &MetadataRecord) -> Result<usize, MintError> {
    Ok(TLV_HEADER_LEN + packed_len(record)?)
}
