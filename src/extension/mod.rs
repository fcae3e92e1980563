//! Token-2022 extension decoding.
//!
//! Raw mint account bytes go through [`layout::tlv_region`], then
//! [`tlv::find_extension`] picks one record, and [`metadata::unpack`] turns
//! the metadata record into a [`MetadataRecord`].

pub mod layout;
pub mod metadata;
pub mod tlv;

pub use layout::{EXTENSION_METADATA_POINTER, EXTENSION_TOKEN_METADATA};
pub use metadata::{pack, packed_len, unpack, MetadataRecord};
pub use tlv::{find_extension, TlvRecord};

use crate::error::MintError;

/// Decode the metadata extension of a mint account.
///
/// `Ok(None)` when the account carries no record with `tag`.
pub fn decode_metadata(account: &[u8], tag: u16) -> Result<Option<MetadataRecord>, MintError> {
    let region = layout::tlv_region(account)?;
    find_extension(region, tag)?.map(unpack).transpose()
}
