//! Token metadata extension payload.
//!
//! Layout (all length prefixes are u32 LE):
//! `update authority (32) | mint (32) | name | symbol | uri | pair count | (key | value)*`
//!
//! An all-zero update authority means the metadata is immutable.

use crate::error::MintError;
use crate::pubkey::Pubkey;
use borsh::BorshSerialize;

/// Decoded token metadata. Owned by the snapshot that decoded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub update_authority: Option<Pubkey>,
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub extra_fields: Vec<(String, String)>,
}

impl MetadataRecord {
    /// Look up an extra field by key. The first matching pair wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra_fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(BorshSerialize)]
struct PackedMetadata<'a> {
    update_authority: [u8; 32],
    mint: [u8; 32],
    name: &'a str,
    symbol: &'a str,
    uri: &'a str,
    extra_fields: &'a [(String, String)],
}

/// Serialize a record into the extension payload layout.
pub fn pack(record: &MetadataRecord) -> Result<Vec<u8>, MintError> {
    let packed = PackedMetadata {
        update_authority: record
            .update_authority
            .map(|k| k.to_bytes())
            .unwrap_or([0u8; 32]),
        mint: record.mint.to_bytes(),
        name: &record.name,
        symbol: &record.symbol,
        uri: &record.uri,
        extra_fields: &record.extra_fields,
    };
    borsh::to_vec(&packed).map_err(|e| MintError::Serialization(e.to_string()))
}

/// Byte length of the packed payload, without the TLV header.
pub fn packed_len(record: &MetadataRecord) -> Result<usize, MintError> {
    pack(record).map(|bytes| bytes.len())
}

/// Decode an extension payload into a [`MetadataRecord`].
pub fn unpack(payload: &[u8]) -> Result<MetadataRecord, MintError> {
    let mut reader = Reader { buf: payload, pos: 0 };

    let update_authority = reader.key("updateAuthority")?;
    let update_authority = (update_authority != Pubkey::new_from_array([0u8; 32]))
        .then_some(update_authority);
    let mint = reader.key("mint")?;
    let name = reader.string("name")?;
    let symbol = reader.string("symbol")?;
    let uri = reader.string("uri")?;

    let count = reader.u32("extraFields")? as usize;
    // every pair carries at least two length prefixes
    let mut extra_fields = Vec::with_capacity(count.min(reader.remaining() / 8));
    for i in 0..count {
        let key = reader.string(&format!("extraFields[{}].key", i))?;
        let value = reader.string(&format!("extraFields[{}].value", i))?;
        extra_fields.push((key, value));
    }

    if reader.remaining() != 0 {
        return Err(MintError::malformed(
            "extraFields",
            format!("{} trailing bytes after the last field", reader.remaining()),
        ));
    }

    Ok(MetadataRecord {
        update_authority,
        mint,
        name,
        symbol,
        uri,
        extra_fields,
    })
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, field: &str, len: usize) -> Result<&'a [u8], MintError> {
        if len > self.remaining() {
            return Err(MintError::malformed(
                field,
                format!(
                    "needs {} bytes at offset {}, only {} remain",
                    len,
                    self.pos,
                    self.remaining()
                ),
            ));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn key(&mut self, field: &str) -> Result<Pubkey, MintError> {
        let bytes = self.take(field, 32)?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| MintError::malformed(field, "expected 32 bytes"))?;
        Ok(Pubkey::new_from_array(array))
    }

    fn u32(&mut self, field: &str) -> Result<u32, MintError> {
        let bytes = self.take(field, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn string(&mut self, field: &str) -> Result<String, MintError> {
        let len = self.u32(field)? as usize;
        let bytes = self.take(field, len)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| MintError::malformed(field, format!("invalid utf-8: {}", e)))
    }
}
