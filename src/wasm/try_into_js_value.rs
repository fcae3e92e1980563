//! Conversion of crate types into plain JavaScript values.
//!
//! Amounts that can exceed 2^53 cross the boundary as `BigInt`, addresses as
//! base58 strings.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::compose::MintAllocation;
use crate::extension::MetadataRecord;
use crate::pubkey::Pubkey;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct JsConversionError(String);

impl JsConversionError {
    pub fn new(msg: &str) -> Self {
        JsConversionError(msg.to_string())
    }
}

impl From<JsConversionError> for JsValue {
    fn from(err: JsConversionError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Build a JavaScript object from `key => value` pairs.
#[macro_export]
macro_rules! js_obj {
    ( $( $key:expr => $value:expr ),* $(,)? ) => {{
        let obj = js_sys::Object::new();
        $(
            js_sys::Reflect::set(
                &obj,
                &wasm_bindgen::JsValue::from_str($key),
                &$crate::wasm::try_into_js_value::TryIntoJsValue::try_to_js_value(&$value)?
            ).map_err(|_| $crate::wasm::try_into_js_value::JsConversionError::new(
                concat!("Failed to set object property: ", $key)
            ))?;
        )*
        Ok::<wasm_bindgen::JsValue, $crate::wasm::try_into_js_value::JsConversionError>(obj.into())
    }};
}

pub use js_obj;

pub trait TryIntoJsValue {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError>;
}

impl TryIntoJsValue for String {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(self))
    }
}

impl TryIntoJsValue for &str {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(self))
    }
}

impl TryIntoJsValue for u8 {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_f64(*self as f64))
    }
}

impl TryIntoJsValue for usize {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_f64(*self as f64))
    }
}

impl TryIntoJsValue for u64 {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(js_sys::BigInt::from(*self).into())
    }
}

impl TryIntoJsValue for Pubkey {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(&self.to_string()))
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for Option<T> {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        match self {
            Some(v) => v.try_to_js_value(),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for Vec<T> {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        let arr = js_sys::Array::new();
        for item in self.iter() {
            arr.push(&item.try_to_js_value()?);
        }
        Ok(arr.into())
    }
}

impl TryIntoJsValue for MetadataRecord {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        // additional fields become a plain { key: value } object
        let extra = js_sys::Object::new();
        for (key, value) in &self.extra_fields {
            js_sys::Reflect::set(&extra, &JsValue::from_str(key), &JsValue::from_str(value))
                .map_err(|_| JsConversionError::new("Failed to set additional field"))?;
        }

        js_obj!(
            "updateAuthority" => self.update_authority,
            "mint" => self.mint,
            "name" => self.name,
            "symbol" => self.symbol,
            "uri" => self.uri,
            "additionalMetadata" => JsValue::from(extra),
        )
    }
}

impl TryIntoJsValue for MintAllocation {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "mintLen" => self.mint_len,
            "metadataLen" => self.metadata_len,
            "totalLen" => self.total_len(),
            "lamports" => self.lamports,
        )
    }
}

impl TryIntoJsValue for JsValue {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(self.clone())
    }
}
