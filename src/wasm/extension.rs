//! WASM bindings for reading mint extensions.

use crate::client::MintState;
use crate::error::MintError;
use crate::extension::{self, EXTENSION_TOKEN_METADATA};
use crate::js_obj;
use crate::wasm::try_into_js_value::TryIntoJsValue;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ExtensionNamespace;

#[wasm_bindgen]
impl ExtensionNamespace {
    /// Decode the embedded metadata of a raw mint account.
    ///
    /// Returns `undefined` when the account has no metadata record, and throws
    /// on a corrupt record.
    ///
    /// ```javascript
    /// const meta = ExtensionNamespace.decode_metadata(accountInfo.data);
    /// // { mint, name, symbol, uri, additionalMetadata }
    /// ```
    #[wasm_bindgen]
    pub fn decode_metadata(account: &[u8], tag: Option<u16>) -> Result<JsValue, JsValue> {
        let record = extension::decode_metadata(account, tag.unwrap_or(EXTENSION_TOKEN_METADATA))?;
        Ok(record.try_to_js_value()?)
    }

    /// Decode the base state of a mint account.
    ///
    /// `supply` is a BigInt in base units.
    #[wasm_bindgen]
    pub fn decode_mint(account: &[u8]) -> Result<JsValue, JsValue> {
        let state = MintState::unpack(account)?;
        Ok(js_obj!(
            "decimals" => state.decimals,
            "mintAuthority" => state.mint_authority,
            "freezeAuthority" => state.freeze_authority,
            "supply" => state.raw_supply,
        )?)
    }

    /// Payload of the first TLV record with `tag`, or `undefined`.
    #[wasm_bindgen]
    pub fn find_extension(account: &[u8], tag: u16) -> Result<Option<Vec<u8>>, MintError> {
        let region = extension::layout::tlv_region(account)?;
        Ok(extension::find_extension(region, tag)?.map(<[u8]>::to_vec))
    }
}
