//! wasm-token-mint: Token-2022 mints with embedded metadata.
//!
//! Reads the metadata extension out of raw mint accounts and composes the
//! transactions that create a mint, transfer tokens and issue more supply,
//! with exact decimal scaling throughout.
//!
//! # Architecture
//!
//! 1. **Core** (`extension`, `amount`, `snapshot`, `compose`) - pure decoding and
//!    composition; ledger access goes through the traits in `client`
//! 2. **WASM bindings** (`wasm/`) - thin wrappers that expose the core to JavaScript
//!
//! # Usage from Rust
//!
//! ```rust
//! use wasm_token_mint::{amount, extension};
//!
//! assert_eq!(amount::to_base_units("1.5", 9).unwrap(), 1_500_000_000);
//!
//! // a plain 82-byte mint has no extensions
//! assert!(extension::decode_metadata(&[0u8; 82], 19).unwrap().is_none());
//! ```

pub mod amount;
pub mod client;
pub mod compose;
pub mod config;
mod error;
pub mod extension;
pub mod keypair;
pub mod pubkey;
pub mod snapshot;
pub mod transaction;
pub mod wasm;

// Re-export core types at crate root
pub use client::{DocumentFetcher, IdentityProvider, LedgerClient, MintState};
pub use compose::{CreateMint, IntentKind, MintAllocation, TransactionIntent};
pub use config::MintConfig;
pub use error::{LedgerError, MintError};
pub use extension::MetadataRecord;
pub use keypair::{Keypair, KeypairExt};
pub use pubkey::{Pubkey, PubkeyExt};
pub use snapshot::{assemble_all, assemble_snapshot, AuthorityCheck, MintSnapshot, SnapshotStore};
pub use transaction::{Transaction, TransactionExt};

// Re-export WASM types
pub use wasm::{AmountNamespace, ExtensionNamespace, IntentNamespace, WasmPubkey, WasmTransaction};
