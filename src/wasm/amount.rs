//! WASM bindings for decimal scaling.
//!
//! Base-unit amounts are passed as decimal strings so values above 2^53
//! survive the trip.

use crate::amount;
use crate::error::MintError;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct AmountNamespace;

#[wasm_bindgen]
impl AmountNamespace {
    /// `"1.5"` with 9 decimals becomes `"1500000000"`.
    #[wasm_bindgen]
    pub fn to_base_units(amount: &str, decimals: u8) -> Result<String, MintError> {
        amount::to_base_units(amount, decimals).map(|units| units.to_string())
    }

    #[wasm_bindgen]
    pub fn to_display(base_units: &str, decimals: u8) -> Result<String, MintError> {
        let units: u128 = base_units.parse().map_err(|_| MintError::InvalidAmount {
            input: base_units.to_string(),
            reason: "expected an unsigned integer".to_string(),
        })?;
        amount::to_display(units, decimals)
    }
}
