//! External collaborators.
//!
//! The crate never talks to the network itself. Account reads, blockhash and
//! reserve queries, signing and submission are delegated to these traits, and
//! their errors are passed through unchanged. Retries and timeouts are the
//! implementor's business.

use crate::error::{LedgerError, MintError};
use crate::pubkey::Pubkey;
use crate::transaction::Transaction;
use async_trait::async_trait;
use solana_sdk::hash::Hash;

/// Parsed base state of a mint account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintState {
    pub decimals: u8,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    pub raw_supply: u64,
}

impl MintState {
    /// Parse the 82-byte base mint at the start of a mint account.
    ///
    /// Layout: `mint_authority COption (36) | supply u64 (8) | decimals (1) |
    /// is_initialized (1) | freeze_authority COption (36)`
    pub fn unpack(account: &[u8]) -> Result<MintState, MintError> {
        if account.len() < 82 {
            return Err(MintError::BufferCorruption {
                offset: 0,
                declared_len: 82,
                buffer_len: account.len(),
            });
        }
        let mint_authority = unpack_coption_key(&account[0..36], 0)?;
        let mut supply = [0u8; 8];
        supply.copy_from_slice(&account[36..44]);
        let decimals = account[44];
        let freeze_authority = unpack_coption_key(&account[46..82], 46)?;

        Ok(MintState {
            decimals,
            mint_authority,
            freeze_authority,
            raw_supply: u64::from_le_bytes(supply),
        })
    }

    /// Inverse of [`MintState::unpack`], always marked initialized.
    pub fn pack(&self) -> [u8; 82] {
        let mut out = [0u8; 82];
        pack_coption_key(self.mint_authority.as_ref(), &mut out[0..36]);
        out[36..44].copy_from_slice(&self.raw_supply.to_le_bytes());
        out[44] = self.decimals;
        out[45] = 1;
        pack_coption_key(self.freeze_authority.as_ref(), &mut out[46..82]);
        out
    }
}

fn unpack_coption_key(bytes: &[u8], offset: usize) -> Result<Option<Pubkey>, MintError> {
    match &bytes[..4] {
        [0, 0, 0, 0] => Ok(None),
        [1, 0, 0, 0] => {
            let mut key = [0u8; 32];
            key.copy_from_slice(&bytes[4..36]);
            Ok(Some(Pubkey::new_from_array(key)))
        }
        _ => Err(MintError::BufferCorruption {
            offset,
            declared_len: 4,
            buffer_len: bytes.len(),
        }),
    }
}

fn pack_coption_key(key: Option<&Pubkey>, out: &mut [u8]) {
    if let Some(key) = key {
        out[..4].copy_from_slice(&[1, 0, 0, 0]);
        out[4..36].copy_from_slice(key.as_ref());
    }
}

/// Read and write access to the ledger.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Raw account data; `None` when the account does not exist.
    async fn get_account_bytes(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError>;

    async fn get_mint_state(&self, mint: &Pubkey) -> Result<MintState, LedgerError>;

    /// Blockhash that transactions reference to prove recency.
    async fn get_recent_blockhash(&self) -> Result<Hash, LedgerError>;

    /// Lamports an account of `size` bytes must hold to be rent exempt.
    async fn get_minimum_reserve(&self, size: usize) -> Result<u64, LedgerError>;

    /// Submit a fully signed transaction and return its id.
    async fn submit(&self, transaction: &Transaction) -> Result<String, LedgerError>;
}

/// The wallet: knows its public key and signs on request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn public_identity(&self) -> Pubkey;

    /// Sign as fee payer. Signatures already present must be preserved.
    async fn sign(&self, transaction: Transaction) -> Result<Transaction, LedgerError>;
}

/// Fetches JSON documents referenced by metadata URIs.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_json(&self, uri: &str) -> Result<serde_json::Value, LedgerError>;
}
