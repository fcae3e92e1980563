//! WASM bindings for composed, partially signed transactions.

use crate::error::MintError;
use crate::pubkey::{Pubkey, PubkeyExt};
use crate::transaction::{Transaction, TransactionExt};
use wasm_bindgen::prelude::*;

/// A composed transaction waiting for the wallet's signature.
#[wasm_bindgen]
pub struct WasmTransaction {
    inner: Transaction,
}

#[wasm_bindgen]
impl WasmTransaction {
    #[wasm_bindgen(getter)]
    pub fn fee_payer(&self) -> Option<String> {
        self.inner.message.account_keys.first().map(|k| k.to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn recent_blockhash(&self) -> String {
        self.inner.message.recent_blockhash.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn num_instructions(&self) -> usize {
        self.inner.message.instructions.len()
    }

    /// The serialized message that signers sign.
    #[wasm_bindgen]
    pub fn signable_payload(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.inner.signable_payload()[..])
    }

    #[wasm_bindgen]
    pub fn to_bytes(&self) -> Result<js_sys::Uint8Array, MintError> {
        let bytes = self.inner.to_bytes()?;
        Ok(js_sys::Uint8Array::from(&bytes[..]))
    }

    /// Wire format as base64, as wallets accept it.
    #[wasm_bindgen]
    pub fn to_base64(&self) -> Result<String, MintError> {
        self.inner.to_base64()
    }

    /// Program id of each instruction, in execution order.
    #[wasm_bindgen]
    pub fn program_ids(&self) -> js_sys::Array {
        let msg = &self.inner.message;
        let arr = js_sys::Array::new();
        for instruction in &msg.instructions {
            if let Some(key) = msg.account_keys.get(instruction.program_id_index as usize) {
                arr.push(&JsValue::from_str(&key.to_string()));
            }
        }
        arr
    }

    /// Signers whose slot is still empty, fee payer first.
    #[wasm_bindgen]
    pub fn pending_signers(&self) -> js_sys::Array {
        let arr = js_sys::Array::new();
        for key in self.inner.required_signers() {
            if !self.inner.is_signed_by(&key) {
                arr.push(&JsValue::from_str(&key.to_string()));
            }
        }
        arr
    }

    /// Place a 64-byte signature produced outside this module.
    #[wasm_bindgen]
    pub fn add_signature(&mut self, pubkey: &str, signature: &[u8]) -> Result<(), MintError> {
        let pubkey = Pubkey::from_base58("signer", pubkey)?;
        self.inner.add_signature(&pubkey, signature)
    }
}

impl WasmTransaction {
    pub fn from_inner(inner: Transaction) -> Self {
        WasmTransaction { inner }
    }

    pub fn inner(&self) -> &Transaction {
        &self.inner
    }
}
