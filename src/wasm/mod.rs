mod amount;
mod constants;
mod extension;
mod intent;
mod pubkey;
mod transaction;
pub mod try_into_js_value;

pub use amount::AmountNamespace;
pub use extension::ExtensionNamespace;
pub use intent::IntentNamespace;
pub use pubkey::WasmPubkey;
pub use transaction::WasmTransaction;

pub use constants::*;
