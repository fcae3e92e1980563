//! Well-known addresses and defaults exported via WASM.

use wasm_bindgen::prelude::*;

use crate::compose::instructions::{ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use crate::config::{DEFAULT_DECIMALS, TOKEN_2022_PROGRAM_ID};
use crate::extension::{EXTENSION_METADATA_POINTER, EXTENSION_TOKEN_METADATA};

#[wasm_bindgen]
pub fn token_2022_program_id() -> String {
    TOKEN_2022_PROGRAM_ID.to_string()
}

#[wasm_bindgen]
pub fn associated_token_program_id() -> String {
    ASSOCIATED_TOKEN_PROGRAM_ID.to_string()
}

#[wasm_bindgen]
pub fn system_program_id() -> String {
    SYSTEM_PROGRAM_ID.to_string()
}

/// TLV tag of the embedded token metadata record.
#[wasm_bindgen]
pub fn token_metadata_extension_tag() -> u16 {
    EXTENSION_TOKEN_METADATA
}

#[wasm_bindgen]
pub fn metadata_pointer_extension_tag() -> u16 {
    EXTENSION_METADATA_POINTER
}

/// Decimals a new mint gets when none are given.
#[wasm_bindgen]
pub fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}
