//! Ed25519 keypairs used as transaction co-signers.
//!
//! Wraps `solana_keypair::Keypair`; signatures are placed into SDK
//! transactions by signer position.

use crate::error::MintError;
use crate::pubkey::Pubkey;
use crate::transaction::{Transaction, TransactionExt};
use solana_signer::Signer;

/// Re-export the underlying Solana Keypair type.
pub use solana_keypair::Keypair;

/// Extension trait for Keypair to work with SDK transaction types.
pub trait KeypairExt {
    fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair, MintError>;
    fn address_key(&self) -> Pubkey;
    fn co_sign(&self, transaction: &mut Transaction) -> Result<(), MintError>;
}

impl KeypairExt for Keypair {
    /// Create a keypair from a 32-byte secret key (Ed25519 seed).
    fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair, MintError> {
        let bytes: [u8; 32] = secret_key.try_into().map_err(|_| {
            MintError::Serialization(format!(
                "Secret key must be 32 bytes, got {}",
                secret_key.len()
            ))
        })?;
        Ok(Keypair::new_from_array(bytes))
    }

    /// The public key as an SDK `Pubkey`.
    fn address_key(&self) -> Pubkey {
        Pubkey::new_from_array(self.pubkey().to_bytes())
    }

    /// Sign the transaction message and store the signature in this key's slot.
    fn co_sign(&self, transaction: &mut Transaction) -> Result<(), MintError> {
        let message = transaction.signable_payload();
        let signature = self.sign_message(&message);
        transaction.add_signature(&self.address_key(), signature.as_ref())
    }
}
