//! Transaction composition for the three intents: create a mint with
//! embedded metadata, transfer, and mint more supply.
//!
//! ```text
//! CreateMint / Transfer / MintTo
//!        │
//!        ▼  validate (decimals, precision, authority)
//!   LedgerClient (reserve, account lookup, blockhash)
//!        │
//!        ▼
//!   instructions ──► Message ──► Transaction (co-signed)
//! ```

mod build;
pub mod instructions;
mod types;

pub use build::{
    build_create_mint, build_create_mint_with_keypair, build_mint_to, build_transfer,
    compose_create_mint, compose_mint_to, compose_transfer, create_mint_space, submit,
};
pub use types::{CreateMint, IntentKind, MintAllocation, TransactionIntent};
