//! Types for intent composition.

use serde::{Deserialize, Serialize};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;

use crate::pubkey::Pubkey;
use crate::transaction::{Transaction, TransactionExt};

/// Intent type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentKind {
    CreateMint,
    Transfer,
    MintTo,
}

/// Operands of a new mint with embedded metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMint {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Decimal amount minted to the payer, e.g. `"1000"`.
    pub initial_supply: String,
    pub decimals: u8,
    /// Defaults to the payer.
    pub mint_authority: Option<Pubkey>,
    /// Defaults to the payer.
    pub freeze_authority: Option<Pubkey>,
}

/// Space and rent of the new mint account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAllocation {
    /// Bytes allocated by the create-account instruction.
    pub mint_len: usize,
    /// Bytes the metadata extension adds when initialized.
    pub metadata_len: usize,
    /// Rent-exempt reserve for `mint_len + metadata_len` bytes.
    pub lamports: u64,
}

impl MintAllocation {
    /// Size the reserve was requested for.
    pub fn total_len(&self) -> usize {
        self.mint_len + self.metadata_len
    }
}

/// A composed transaction, ready for the wallet's signature.
#[derive(Debug, Clone)]
pub struct TransactionIntent {
    pub kind: IntentKind,
    pub fee_payer: Pubkey,
    pub recent_blockhash: Hash,
    pub mint: Pubkey,
    /// Instructions in execution order.
    pub instructions: Vec<Instruction>,
    /// Partially signed: co-signer slots are filled, the fee payer's is not.
    pub transaction: Transaction,
    /// Keys that already signed.
    pub co_signers: Vec<Pubkey>,
    /// Set for `CreateMint` only.
    pub allocation: Option<MintAllocation>,
}

impl TransactionIntent {
    /// Signers still missing from the transaction.
    pub fn pending_signers(&self) -> Vec<Pubkey> {
        self.transaction
            .required_signers()
            .into_iter()
            .filter(|key| !self.transaction.is_signed_by(key))
            .collect()
    }
}
