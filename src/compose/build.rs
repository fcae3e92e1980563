//! Intent composition.
//!
//! Each operation has a synchronous `compose_*` function that turns already
//! fetched ledger values into a transaction, and an async `build_*` wrapper
//! that fetches those values through the [`LedgerClient`] in order. All
//! validation (decimals, precision, authority) runs before the first network
//! call, and no transaction is produced unless every step succeeded.

use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;

use super::instructions::{
    associated_token_address, create_associated_token_account, create_mint_account,
    initialize_metadata_pointer, initialize_mint, initialize_token_metadata, mint_to,
    transfer_checked,
};
use super::types::{CreateMint, IntentKind, MintAllocation, TransactionIntent};
use crate::amount;
use crate::client::{IdentityProvider, LedgerClient};
use crate::config::MintConfig;
use crate::error::MintError;
use crate::extension::layout;
use crate::extension::MetadataRecord;
use crate::keypair::{Keypair, KeypairExt};
use crate::pubkey::Pubkey;
use crate::snapshot::MintSnapshot;
use crate::transaction::{Transaction, TransactionExt};

/// Mint and metadata sizes for a new mint.
///
/// The metadata length does not depend on the mint's address or the update
/// authority (both fixed 32-byte fields), so this can be computed before the
/// mint keypair exists.
pub fn create_mint_space(params: &CreateMint) -> Result<(usize, usize), MintError> {
    let placeholder = Pubkey::new_from_array([0u8; 32]);
    let record = metadata_record(placeholder, placeholder, params);
    Ok((
        layout::mint_len_with_metadata_pointer(),
        layout::metadata_len(&record)?,
    ))
}

fn metadata_record(mint: Pubkey, update_authority: Pubkey, params: &CreateMint) -> MetadataRecord {
    MetadataRecord {
        update_authority: Some(update_authority),
        mint,
        name: params.name.clone(),
        symbol: params.symbol.clone(),
        uri: params.uri.clone(),
        extra_fields: Vec::new(),
    }
}

/// Create the message, then apply co-signatures in the given order.
fn finalize(
    kind: IntentKind,
    mint: Pubkey,
    instructions: Vec<Instruction>,
    fee_payer: Pubkey,
    recent_blockhash: Hash,
    co_signers: &[&Keypair],
    allocation: Option<MintAllocation>,
) -> Result<TransactionIntent, MintError> {
    let message = Message::new_with_blockhash(&instructions, Some(&fee_payer), &recent_blockhash);
    let mut transaction = Transaction::new_unsigned(message);

    let mut signed = Vec::with_capacity(co_signers.len());
    for keypair in co_signers {
        keypair.co_sign(&mut transaction)?;
        signed.push(keypair.address_key());
    }

    log::debug!(
        "composed {:?} for mint {} with {} instructions",
        kind,
        mint,
        instructions.len()
    );

    Ok(TransactionIntent {
        kind,
        fee_payer,
        recent_blockhash,
        mint,
        instructions,
        transaction,
        co_signers: signed,
        allocation,
    })
}

// =============================================================================
// CreateMint
// =============================================================================

/// Compose a new mint with embedded metadata and an initial supply.
///
/// Instruction order:
/// 1. create the mint account (reserve covers the metadata added in step 4)
/// 2. initialize the metadata pointer at the mint itself
/// 3. initialize the mint
/// 4. initialize the metadata
/// 5. create the payer's associated token account
/// 6. mint the initial supply into it
pub fn compose_create_mint(
    config: &MintConfig,
    payer: &Pubkey,
    params: &CreateMint,
    mint_keypair: &Keypair,
    lamports: u64,
    recent_blockhash: Hash,
) -> Result<TransactionIntent, MintError> {
    let supply = amount::to_base_units_u64(&params.initial_supply, params.decimals)?;
    let token_program = config.token_program()?;
    let (mint_len, metadata_len) = create_mint_space(params)?;

    let mint = mint_keypair.address_key();
    let mint_authority = params.mint_authority.unwrap_or(*payer);
    let freeze_authority = params.freeze_authority.unwrap_or(*payer);
    let payer_ata = associated_token_address(payer, &mint, &token_program);

    let instructions = vec![
        create_mint_account(payer, &mint, lamports, mint_len as u64, &token_program),
        initialize_metadata_pointer(&token_program, &mint, Some(&mint_authority), Some(&mint))?,
        initialize_mint(
            &token_program,
            &mint,
            params.decimals,
            &mint_authority,
            Some(&freeze_authority),
        )?,
        initialize_token_metadata(
            &token_program,
            &mint,
            payer,
            &mint,
            &mint_authority,
            &params.name,
            &params.symbol,
            &params.uri,
        ),
        create_associated_token_account(payer, payer, &mint, &token_program),
        mint_to(&token_program, &mint, &payer_ata, &mint_authority, supply),
    ];

    finalize(
        IntentKind::CreateMint,
        mint,
        instructions,
        *payer,
        recent_blockhash,
        &[mint_keypair],
        Some(MintAllocation {
            mint_len,
            metadata_len,
            lamports,
        }),
    )
}

/// Build a new mint, generating its keypair.
pub async fn build_create_mint<L, I>(
    ledger: &L,
    identity: &I,
    config: &MintConfig,
    params: &CreateMint,
) -> Result<TransactionIntent, MintError>
where
    L: LedgerClient + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let mint_keypair = Keypair::new();
    build_create_mint_with_keypair(ledger, identity, config, params, &mint_keypair).await
}

/// Build a new mint at the address of `mint_keypair`.
pub async fn build_create_mint_with_keypair<L, I>(
    ledger: &L,
    identity: &I,
    config: &MintConfig,
    params: &CreateMint,
    mint_keypair: &Keypair,
) -> Result<TransactionIntent, MintError>
where
    L: LedgerClient + ?Sized,
    I: IdentityProvider + ?Sized,
{
    // reject bad input before touching the network
    amount::to_base_units_u64(&params.initial_supply, params.decimals)?;
    config.token_program()?;

    let payer = identity.public_identity();
    let (mint_len, metadata_len) = create_mint_space(params)?;
    let lamports = ledger.get_minimum_reserve(mint_len + metadata_len).await?;
    let recent_blockhash = ledger.get_recent_blockhash().await?;

    compose_create_mint(config, &payer, params, mint_keypair, lamports, recent_blockhash)
}

// =============================================================================
// Transfer
// =============================================================================

/// Compose a transfer of `amount` (decimal string) from `sender` to `receiver`.
///
/// The receiver's associated account is created first when it does not exist.
#[allow(clippy::too_many_arguments)]
pub fn compose_transfer(
    config: &MintConfig,
    sender: &Pubkey,
    snapshot: &MintSnapshot,
    receiver: &Pubkey,
    amount: &str,
    receiver_account_exists: bool,
    recent_blockhash: Hash,
) -> Result<TransactionIntent, MintError> {
    let units = amount::to_base_units_u64(amount, snapshot.decimals)?;
    let token_program = config.token_program()?;
    let mint = snapshot.mint_address;

    let source = associated_token_address(sender, &mint, &token_program);
    let destination = associated_token_address(receiver, &mint, &token_program);

    let mut instructions = Vec::with_capacity(2);
    if !receiver_account_exists {
        instructions.push(create_associated_token_account(
            sender,
            receiver,
            &mint,
            &token_program,
        ));
    }
    instructions.push(transfer_checked(
        &token_program,
        &source,
        &mint,
        &destination,
        sender,
        units,
        snapshot.decimals,
    ));

    finalize(
        IntentKind::Transfer,
        mint,
        instructions,
        *sender,
        recent_blockhash,
        &[],
        None,
    )
}

pub async fn build_transfer<L, I>(
    ledger: &L,
    identity: &I,
    config: &MintConfig,
    snapshot: &MintSnapshot,
    receiver: &Pubkey,
    amount: &str,
) -> Result<TransactionIntent, MintError>
where
    L: LedgerClient + ?Sized,
    I: IdentityProvider + ?Sized,
{
    amount::to_base_units_u64(amount, snapshot.decimals)?;
    let token_program = config.token_program()?;

    let sender = identity.public_identity();
    let destination = associated_token_address(receiver, &snapshot.mint_address, &token_program);
    let receiver_account_exists = ledger.get_account_bytes(&destination).await?.is_some();
    if !receiver_account_exists {
        log::debug!("associated account {} missing, creating it", destination);
    }
    let recent_blockhash = ledger.get_recent_blockhash().await?;

    compose_transfer(
        config,
        &sender,
        snapshot,
        receiver,
        amount,
        receiver_account_exists,
        recent_blockhash,
    )
}

// =============================================================================
// MintTo
// =============================================================================

/// Compose an issuance of `amount` into the caller's associated account.
///
/// The caller must be the snapshot's mint authority.
pub fn compose_mint_to(
    config: &MintConfig,
    caller: &Pubkey,
    snapshot: &MintSnapshot,
    amount: &str,
    recent_blockhash: Hash,
) -> Result<TransactionIntent, MintError> {
    snapshot.require_mint_authority(caller)?;
    let units = amount::to_base_units_u64(amount, snapshot.decimals)?;
    let token_program = config.token_program()?;
    let mint = snapshot.mint_address;
    let destination = associated_token_address(caller, &mint, &token_program);

    finalize(
        IntentKind::MintTo,
        mint,
        vec![mint_to(&token_program, &mint, &destination, caller, units)],
        *caller,
        recent_blockhash,
        &[],
        None,
    )
}

pub async fn build_mint_to<L, I>(
    ledger: &L,
    identity: &I,
    config: &MintConfig,
    snapshot: &MintSnapshot,
    amount: &str,
) -> Result<TransactionIntent, MintError>
where
    L: LedgerClient + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let caller = identity.public_identity();
    snapshot.require_mint_authority(&caller)?;
    amount::to_base_units_u64(amount, snapshot.decimals)?;

    let recent_blockhash = ledger.get_recent_blockhash().await?;
    compose_mint_to(config, &caller, snapshot, amount, recent_blockhash)
}

// =============================================================================
// Submission
// =============================================================================

/// Add the wallet's signature and submit. Returns the transaction id.
///
/// Nothing is submitted while any required signature is missing.
pub async fn submit<L, I>(
    ledger: &L,
    identity: &I,
    intent: TransactionIntent,
) -> Result<String, MintError>
where
    L: LedgerClient + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let kind = intent.kind;
    let signed = identity
        .sign(intent.transaction)
        .await
        .map_err(|e| MintError::SigningRefused(e.to_string()))?;

    if let Some(missing) = signed
        .required_signers()
        .into_iter()
        .find(|key| !signed.is_signed_by(key))
    {
        return Err(MintError::SigningRefused(format!(
            "missing signature from {}",
            missing
        )));
    }

    let id = ledger.submit(&signed).await?;
    log::debug!("submitted {:?} as {}", kind, id);
    Ok(id)
}
