//! Token-2022, associated-token-account and system instructions.
//!
//! Instruction data comes from the SPL crates; accounts are assembled here
//! with SDK types and joined through `Instruction::new_with_bytes`.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_system_interface::instruction as system_ix;
use spl_token_2022::extension::metadata_pointer::instruction as metadata_pointer;
use spl_token_2022::instruction::TokenInstruction;
use spl_token_metadata_interface::instruction::{Initialize, TokenMetadataInstruction};

use crate::error::MintError;
use crate::pubkey::Pubkey;

/// The SPL crates are built on the 2.x key type.
type SplPubkey = solana_pubkey::Pubkey;

// Associated Token Account Program: https://www.solana-program.com/docs/associated-token-account
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("11111111111111111111111111111111");
pub const RENT_SYSVAR_ID: Pubkey =
    solana_sdk::pubkey!("SysvarRent111111111111111111111111111111111");

fn spl_key(key: &Pubkey) -> SplPubkey {
    SplPubkey::new_from_array(key.to_bytes())
}

fn spl_error(instruction: &str, err: impl std::fmt::Display) -> MintError {
    MintError::Serialization(format!("Failed to encode {}: {}", instruction, err))
}

/// Derive the associated token account of `owner` for `mint`.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    let seeds = &[owner.as_ref(), token_program.as_ref(), mint.as_ref()];
    let (ata, _bump) = Pubkey::find_program_address(seeds, &ASSOCIATED_TOKEN_PROGRAM_ID);
    ata
}

/// Allocate the mint account, owned by the token program.
pub fn create_mint_account(
    payer: &Pubkey,
    mint: &Pubkey,
    lamports: u64,
    space: u64,
    token_program: &Pubkey,
) -> Instruction {
    system_ix::create_account(payer, mint, lamports, space, token_program)
}

/// Point the mint's metadata at `metadata_address`.
pub fn initialize_metadata_pointer(
    token_program: &Pubkey,
    mint: &Pubkey,
    authority: Option<&Pubkey>,
    metadata_address: Option<&Pubkey>,
) -> Result<Instruction, MintError> {
    let data = metadata_pointer::initialize(
        &spl_key(token_program),
        &spl_key(mint),
        authority.map(spl_key),
        metadata_address.map(spl_key),
    )
    .map_err(|e| spl_error("InitializeMetadataPointer", e))?
    .data;

    Ok(Instruction::new_with_bytes(
        *token_program,
        &data,
        vec![AccountMeta::new(*mint, false)],
    ))
}

pub fn initialize_mint(
    token_program: &Pubkey,
    mint: &Pubkey,
    decimals: u8,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
) -> Result<Instruction, MintError> {
    let freeze_authority = freeze_authority.map(spl_key);
    let data = spl_token_2022::instruction::initialize_mint(
        &spl_key(token_program),
        &spl_key(mint),
        &spl_key(mint_authority),
        freeze_authority.as_ref(),
        decimals,
    )
    .map_err(|e| spl_error("InitializeMint", e))?
    .data;

    Ok(Instruction::new_with_bytes(
        *token_program,
        &data,
        vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        ],
    ))
}

/// Write name, symbol and uri into the metadata extension of `metadata`.
#[allow(clippy::too_many_arguments)]
pub fn initialize_token_metadata(
    token_program: &Pubkey,
    metadata: &Pubkey,
    update_authority: &Pubkey,
    mint: &Pubkey,
    mint_authority: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
) -> Instruction {
    let data = TokenMetadataInstruction::Initialize(Initialize {
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri: uri.to_string(),
    })
    .pack();

    Instruction::new_with_bytes(
        *token_program,
        &data,
        vec![
            AccountMeta::new(*metadata, false),
            AccountMeta::new_readonly(*update_authority, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(*mint_authority, true),
        ],
    )
}

pub fn create_associated_token_account(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Instruction {
    let ata = associated_token_address(owner, mint, token_program);
    Instruction::new_with_bytes(
        ASSOCIATED_TOKEN_PROGRAM_ID,
        &[],
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(ata, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(*token_program, false),
        ],
    )
}

pub fn mint_to(
    token_program: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Instruction {
    let data = TokenInstruction::MintTo { amount }.pack();

    Instruction::new_with_bytes(
        *token_program,
        &data,
        vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*authority, true),
        ],
    )
}

/// Transfer that the token program re-checks against the mint's decimals.
pub fn transfer_checked(
    token_program: &Pubkey,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Instruction {
    let data = TokenInstruction::TransferChecked { amount, decimals }.pack();

    Instruction::new_with_bytes(
        *token_program,
        &data,
        vec![
            AccountMeta::new(*source, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*owner, true),
        ],
    )
}
