//! Mint snapshots.
//!
//! A snapshot joins a mint's base state with its decoded metadata. Metadata is
//! best effort: a corrupt, missing or unreadable extension leaves `metadata`
//! empty and is logged, while the supply, decimals and authorities still make
//! a usable snapshot.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;

use crate::amount;
use crate::client::{DocumentFetcher, LedgerClient, MintState};
use crate::config::MintConfig;
use crate::error::MintError;
use crate::extension::{self, MetadataRecord};
use crate::pubkey::Pubkey;

/// Immutable view of one mint, produced once per query cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintSnapshot {
    pub mint_address: Pubkey,
    pub decimals: u8,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    pub raw_supply: u64,
    pub metadata: Option<MetadataRecord>,
    /// Display image resolved from a JSON metadata document, if any.
    pub image: Option<String>,
}

/// Result of comparing an identity against a recorded authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityCheck {
    Match,
    Mismatch,
    /// The authority has been revoked.
    Absent,
}

impl AuthorityCheck {
    fn compare(recorded: Option<&Pubkey>, caller: &Pubkey) -> Self {
        match recorded {
            None => AuthorityCheck::Absent,
            Some(key) if key == caller => AuthorityCheck::Match,
            Some(_) => AuthorityCheck::Mismatch,
        }
    }
}

impl MintSnapshot {
    pub fn from_state(mint_address: Pubkey, state: MintState) -> Self {
        MintSnapshot {
            mint_address,
            decimals: state.decimals,
            mint_authority: state.mint_authority,
            freeze_authority: state.freeze_authority,
            raw_supply: state.raw_supply,
            metadata: None,
            image: None,
        }
    }

    pub fn check_mint_authority(&self, caller: &Pubkey) -> AuthorityCheck {
        AuthorityCheck::compare(self.mint_authority.as_ref(), caller)
    }

    pub fn check_freeze_authority(&self, caller: &Pubkey) -> AuthorityCheck {
        AuthorityCheck::compare(self.freeze_authority.as_ref(), caller)
    }

    /// Fail unless `caller` is exactly the recorded mint authority.
    pub fn require_mint_authority(&self, caller: &Pubkey) -> Result<(), MintError> {
        match self.check_mint_authority(caller) {
            AuthorityCheck::Match => Ok(()),
            AuthorityCheck::Absent => Err(MintError::MissingAuthority {
                authority: "mint".to_string(),
            }),
            AuthorityCheck::Mismatch => Err(MintError::AuthorityMismatch {
                expected: self
                    .mint_authority
                    .map(|k| k.to_string())
                    .unwrap_or_default(),
                actual: caller.to_string(),
            }),
        }
    }

    /// Supply scaled for display using the mint's own decimals.
    pub fn display_supply(&self) -> Result<String, MintError> {
        amount::to_display(self.raw_supply as u128, self.decimals)
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.name.as_str())
    }
}

/// Fetch and decode the metadata extension of `mint`.
///
/// Every failure on this path is logged and reported as `None`, including a
/// record that belongs to a different mint.
async fn fetch_metadata<L>(ledger: &L, mint: &Pubkey, tag: u16) -> Option<MetadataRecord>
where
    L: LedgerClient + ?Sized,
{
    let account = match ledger.get_account_bytes(mint).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            log::warn!("mint account {} not found while reading metadata", mint);
            return None;
        }
        Err(e) => {
            log::warn!("failed to fetch mint account {}: {}", mint, e);
            return None;
        }
    };

    match extension::decode_metadata(&account, tag) {
        Ok(Some(record)) if record.mint != *mint => {
            log::warn!(
                "ignoring metadata of mint {}: record names mint {}",
                mint,
                record.mint
            );
            None
        }
        Ok(record) => record,
        Err(e) => {
            log::warn!("ignoring metadata of mint {}: {}", mint, e);
            None
        }
    }
}

/// Follow a `.json` metadata URI and return its `image` property.
async fn resolve_image<D>(documents: &D, uri: &str) -> Option<String>
where
    D: DocumentFetcher + ?Sized,
{
    if !uri.ends_with(".json") {
        return None;
    }
    match documents.fetch_json(uri).await {
        Ok(doc) => doc
            .get("image")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Err(e) => {
            log::warn!("could not resolve image from {}: {}", uri, e);
            None
        }
    }
}

/// Build the snapshot of one mint.
///
/// Only a failure to read the mint's base state is returned as an error.
/// Unsupported decimals are kept; scaling that snapshot fails later.
pub async fn assemble_snapshot<L, D>(
    ledger: &L,
    documents: &D,
    config: &MintConfig,
    mint: &Pubkey,
) -> Result<MintSnapshot, MintError>
where
    L: LedgerClient + ?Sized,
    D: DocumentFetcher + ?Sized,
{
    let state = ledger.get_mint_state(mint).await?;
    if state.decimals > amount::MAX_DECIMALS {
        // kept in the batch; scaling on this snapshot fails with InvalidDecimals
        log::warn!("mint {} has unsupported decimals {}", mint, state.decimals);
    }

    let mut snapshot = MintSnapshot::from_state(*mint, state);
    snapshot.metadata = fetch_metadata(ledger, mint, config.metadata_extension_tag).await;

    if config.resolve_images {
        if let Some(uri) = snapshot.metadata.as_ref().map(|m| m.uri.clone()) {
            snapshot.image = resolve_image(documents, &uri).await;
        }
    }

    log::debug!(
        "assembled snapshot for {} (metadata: {})",
        mint,
        snapshot.metadata.is_some()
    );
    Ok(snapshot)
}

/// Assemble snapshots for many mints concurrently.
///
/// The result is all or nothing: one failed base-state read fails the batch.
pub async fn assemble_all<L, D>(
    ledger: &L,
    documents: &D,
    config: &MintConfig,
    mints: &[Pubkey],
) -> Result<Vec<MintSnapshot>, MintError>
where
    L: LedgerClient + ?Sized,
    D: DocumentFetcher + ?Sized,
{
    join_all(
        mints
            .iter()
            .map(|mint| assemble_snapshot(ledger, documents, config, mint)),
    )
    .await
    .into_iter()
    .collect()
}

/// Latest known snapshot list, replaced wholesale after each refresh.
pub struct SnapshotStore {
    sender: watch::Sender<Arc<Vec<MintSnapshot>>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(Vec::new()));
        SnapshotStore { sender }
    }

    pub fn current(&self) -> Arc<Vec<MintSnapshot>> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<MintSnapshot>>> {
        self.sender.subscribe()
    }

    pub fn replace(&self, snapshots: Vec<MintSnapshot>) {
        self.sender.send_replace(Arc::new(snapshots));
    }

    /// Re-assemble every mint and publish the new list.
    ///
    /// On error the previous list stays in place.
    pub async fn refresh<L, D>(
        &self,
        ledger: &L,
        documents: &D,
        config: &MintConfig,
        mints: &[Pubkey],
    ) -> Result<(), MintError>
    where
        L: LedgerClient + ?Sized,
        D: DocumentFetcher + ?Sized,
    {
        let snapshots = assemble_all(ledger, documents, config, mints).await?;
        self.replace(snapshots);
        Ok(())
    }
}
