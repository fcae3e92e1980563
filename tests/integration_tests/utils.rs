use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use wasm_token_mint::extension::{layout, pack, tlv, MetadataRecord};
use wasm_token_mint::{
    DocumentFetcher, IdentityProvider, Keypair, KeypairExt, LedgerClient, LedgerError, MintState,
    Pubkey, Transaction,
};

pub const RESERVE_PER_BYTE: u64 = 6_960;

pub fn blockhash() -> Hash {
    Hash::new_from_array([7u8; 32])
}

pub fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

pub fn keypair(n: u8) -> Keypair {
    Keypair::from_secret_key_bytes(&[n; 32]).unwrap()
}

pub fn record(mint: Pubkey, uri: &str) -> MetadataRecord {
    MetadataRecord {
        update_authority: Some(key(1)),
        mint,
        name: "Dashboard Token".to_string(),
        symbol: "DASH".to_string(),
        uri: uri.to_string(),
        extra_fields: vec![("website".to_string(), "https://example.com".to_string())],
    }
}

pub fn plain_mint(state: &MintState) -> Vec<u8> {
    state.pack().to_vec()
}

/// Mint account carrying a metadata pointer and an embedded metadata record.
pub fn mint_with_metadata(state: &MintState, metadata: &MetadataRecord) -> Vec<u8> {
    let mut pointer = Vec::with_capacity(layout::METADATA_POINTER_LEN);
    pointer.extend_from_slice(&[0u8; 32]);
    pointer.extend_from_slice(metadata.mint.as_ref());

    let mut records = tlv::encode_record(layout::EXTENSION_METADATA_POINTER, &pointer).unwrap();
    records.extend(
        tlv::encode_record(layout::EXTENSION_TOKEN_METADATA, &pack(metadata).unwrap()).unwrap(),
    );
    layout::extended_mint_account(&state.pack(), &records)
}

/// Mint account whose metadata record claims more bytes than remain.
pub fn mint_with_corrupt_metadata(state: &MintState) -> Vec<u8> {
    let mut records = Vec::new();
    records.extend_from_slice(&layout::EXTENSION_TOKEN_METADATA.to_le_bytes());
    records.extend_from_slice(&500u16.to_le_bytes());
    records.extend_from_slice(&[1u8; 20]);
    layout::extended_mint_account(&state.pack(), &records)
}

#[derive(Default)]
pub struct MockLedger {
    pub accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    /// Fail `get_account_bytes` while `get_mint_state` keeps working.
    pub fail_account_reads: bool,
    pub calls: Mutex<Vec<&'static str>>,
    pub reserve_requests: Mutex<Vec<usize>>,
    pub submitted: Mutex<Vec<Transaction>>,
}

impl MockLedger {
    pub fn with_account(self, address: Pubkey, data: Vec<u8>) -> Self {
        self.accounts.lock().unwrap().insert(address, data);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn get_account_bytes(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError> {
        self.record_call("getAccountInfo");
        if self.fail_account_reads {
            return Err(LedgerError::new("getAccountInfo", "connection reset"));
        }
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn get_mint_state(&self, mint: &Pubkey) -> Result<MintState, LedgerError> {
        self.record_call("getMint");
        let accounts = self.accounts.lock().unwrap();
        let data = accounts
            .get(mint)
            .ok_or_else(|| LedgerError::new("getMint", format!("{} not found", mint)))?;
        MintState::unpack(data).map_err(|e| LedgerError::new("getMint", e.to_string()))
    }

    async fn get_recent_blockhash(&self) -> Result<Hash, LedgerError> {
        self.record_call("getLatestBlockhash");
        Ok(blockhash())
    }

    async fn get_minimum_reserve(&self, size: usize) -> Result<u64, LedgerError> {
        self.record_call("getMinimumBalanceForRentExemption");
        self.reserve_requests.lock().unwrap().push(size);
        Ok(size as u64 * RESERVE_PER_BYTE)
    }

    async fn submit(&self, transaction: &Transaction) -> Result<String, LedgerError> {
        self.record_call("sendTransaction");
        self.submitted.lock().unwrap().push(transaction.clone());
        Ok(format!("tx-{}", self.submitted.lock().unwrap().len()))
    }
}

pub enum WalletBehavior {
    Sign,
    Refuse,
    /// Hands the transaction back without signing it.
    Ignore,
}

pub struct MockWallet {
    pub keypair: Keypair,
    pub behavior: WalletBehavior,
}

impl MockWallet {
    pub fn new(n: u8) -> Self {
        MockWallet {
            keypair: keypair(n),
            behavior: WalletBehavior::Sign,
        }
    }
}

#[async_trait]
impl IdentityProvider for MockWallet {
    fn public_identity(&self) -> Pubkey {
        self.keypair.address_key()
    }

    async fn sign(&self, mut transaction: Transaction) -> Result<Transaction, LedgerError> {
        match self.behavior {
            WalletBehavior::Sign => {
                self.keypair
                    .co_sign(&mut transaction)
                    .map_err(|e| LedgerError::new("signTransaction", e.to_string()))?;
                Ok(transaction)
            }
            WalletBehavior::Refuse => Err(LedgerError::new("signTransaction", "user rejected")),
            WalletBehavior::Ignore => Ok(transaction),
        }
    }
}

#[derive(Default)]
pub struct MockDocuments {
    pub documents: HashMap<String, serde_json::Value>,
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl DocumentFetcher for MockDocuments {
    async fn fetch_json(&self, uri: &str) -> Result<serde_json::Value, LedgerError> {
        self.calls.lock().unwrap().push(uri.to_string());
        self.documents
            .get(uri)
            .cloned()
            .ok_or_else(|| LedgerError::new("fetch", format!("404 for {}", uri)))
    }
}
