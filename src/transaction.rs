//! Signature-slot helpers on SDK transactions.
//!
//! Composed transactions are partially signed: co-signers fill their slots
//! first, the wallet's identity provider fills the fee payer's slot last.

use crate::error::MintError;
use crate::pubkey::Pubkey;
use base64::Engine;
use solana_signature::Signature;

/// Re-export the underlying Solana Transaction type.
pub use solana_sdk::transaction::Transaction;

/// Extension trait for Transaction to add signer bookkeeping.
pub trait TransactionExt {
    /// Get the signable message bytes (what gets signed).
    fn signable_payload(&self) -> Vec<u8>;

    /// Serialize transaction to bytes (wire format).
    fn to_bytes(&self) -> Result<Vec<u8>, MintError>;

    /// Serialize transaction to base64, the format wallets accept.
    fn to_base64(&self) -> Result<String, MintError>;

    /// Keys whose signatures the message requires, fee payer first.
    fn required_signers(&self) -> Vec<Pubkey>;

    /// Get the index of a pubkey in the account keys, if it's a signer.
    fn signer_index(&self, pubkey: &Pubkey) -> Option<usize>;

    /// Whether the slot of `pubkey` holds a non-default signature.
    fn is_signed_by(&self, pubkey: &Pubkey) -> bool;

    /// Add a signature for a given public key.
    ///
    /// The pubkey must be one of the required signers in the transaction.
    /// The signature bytes must be exactly 64 bytes (Ed25519 signature).
    fn add_signature(&mut self, pubkey: &Pubkey, signature: &[u8]) -> Result<(), MintError>;
}

impl TransactionExt for Transaction {
    fn signable_payload(&self) -> Vec<u8> {
        self.message.serialize()
    }

    fn to_bytes(&self) -> Result<Vec<u8>, MintError> {
        bincode::serialize(self).map_err(|e| {
            MintError::Serialization(format!("Failed to serialize transaction: {}", e))
        })
    }

    fn to_base64(&self) -> Result<String, MintError> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_bytes()?))
    }

    fn required_signers(&self) -> Vec<Pubkey> {
        let num_signers = self.message.header.num_required_signatures as usize;
        self.message
            .account_keys
            .iter()
            .take(num_signers)
            .copied()
            .collect()
    }

    fn signer_index(&self, pubkey: &Pubkey) -> Option<usize> {
        let num_signers = self.message.header.num_required_signatures as usize;
        self.message
            .account_keys
            .iter()
            .take(num_signers)
            .position(|key| key == pubkey)
    }

    fn is_signed_by(&self, pubkey: &Pubkey) -> bool {
        self.signer_index(pubkey)
            .and_then(|idx| self.signatures.get(idx))
            .map(|sig| *sig != Signature::default())
            .unwrap_or(false)
    }

    fn add_signature(
        &mut self,
        pubkey: &Pubkey,
        signature_bytes: &[u8],
    ) -> Result<(), MintError> {
        let bytes: [u8; 64] = signature_bytes.try_into().map_err(|_| {
            MintError::Serialization(format!(
                "Invalid signature length: expected 64 bytes, got {}",
                signature_bytes.len()
            ))
        })?;

        let signer_idx = self
            .signer_index(pubkey)
            .ok_or_else(|| MintError::SigningRefused(format!("unknown signer: {}", pubkey)))?;

        // Ensure signatures array is properly sized (same as Solana's internal pattern)
        let num_signers = self.message.header.num_required_signatures as usize;
        if self.signatures.len() < num_signers {
            self.signatures.resize(num_signers, Signature::default());
        }

        self.signatures[signer_idx] = Signature::from(bytes);
        Ok(())
    }
}
