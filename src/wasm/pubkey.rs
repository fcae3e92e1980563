//! WASM bindings for addresses.

use crate::error::MintError;
use crate::pubkey::{Pubkey, PubkeyExt};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmPubkey {
    inner: Pubkey,
}

#[wasm_bindgen]
impl WasmPubkey {
    /// Parse a base58 address.
    #[wasm_bindgen]
    pub fn from_base58(address: &str) -> Result<WasmPubkey, MintError> {
        Pubkey::from_base58("address", address).map(|inner| WasmPubkey { inner })
    }

    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmPubkey, MintError> {
        Pubkey::from_bytes_checked("address", bytes).map(|inner| WasmPubkey { inner })
    }

    #[wasm_bindgen]
    pub fn to_base58(&self) -> String {
        self.inner.to_string()
    }

    #[wasm_bindgen]
    pub fn to_bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.inner.to_bytes()[..])
    }

    #[wasm_bindgen]
    pub fn equals(&self, other: &WasmPubkey) -> bool {
        self.inner == other.inner
    }

    /// Associated token account of this owner for `mint` under the token
    /// program (Token-2022 unless given).
    #[wasm_bindgen]
    pub fn associated_token_address(
        &self,
        mint: &WasmPubkey,
        token_program: Option<WasmPubkey>,
    ) -> Result<WasmPubkey, MintError> {
        let token_program = match token_program {
            Some(program) => program.inner,
            None => crate::config::MintConfig::default().token_program()?,
        };
        Ok(WasmPubkey::from_inner(
            crate::compose::instructions::associated_token_address(
                &self.inner,
                &mint.inner,
                &token_program,
            ),
        ))
    }
}

impl WasmPubkey {
    pub fn from_inner(inner: Pubkey) -> Self {
        WasmPubkey { inner }
    }

    pub fn inner(&self) -> &Pubkey {
        &self.inner
    }
}
