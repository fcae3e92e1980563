//! WASM bindings for composing mint, transfer and issuance transactions.
//!
//! The JavaScript caller performs the ledger reads (reserve, blockhash,
//! receiver account lookup) and passes the results in; composition itself is
//! synchronous.

use std::str::FromStr;

use serde::Deserialize;
use solana_sdk::hash::Hash;
use wasm_bindgen::prelude::*;

use crate::client::MintState;
use crate::compose::{self, CreateMint, TransactionIntent};
use crate::config::{MintConfig, DEFAULT_DECIMALS};
use crate::error::MintError;
use crate::js_obj;
use crate::keypair::{Keypair, KeypairExt};
use crate::pubkey::{parse_optional, Pubkey, PubkeyExt};
use crate::snapshot::MintSnapshot;
use crate::wasm::transaction::WasmTransaction;

/// What the new mint looks like; enough to size it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintFields {
    name: String,
    symbol: String,
    uri: String,
    initial_supply: String,
    #[serde(default)]
    decimals: Option<u8>,
    #[serde(default)]
    mint_authority: Option<String>,
    #[serde(default)]
    freeze_authority: Option<String>,
}

impl MintFields {
    fn to_create_mint(&self) -> Result<CreateMint, MintError> {
        Ok(CreateMint {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri: self.uri.clone(),
            initial_supply: self.initial_supply.clone(),
            decimals: self.decimals.unwrap_or(DEFAULT_DECIMALS),
            mint_authority: parse_optional("mintAuthority", self.mint_authority.as_deref())?,
            freeze_authority: parse_optional(
                "freezeAuthority",
                self.freeze_authority.as_deref(),
            )?,
        })
    }
}

/// Transaction inputs of a create-mint call, read from the same object as
/// [`MintFields`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMintParams {
    fee_payer: String,
    /// Reserve for `totalLen` bytes, as returned by `create_mint_space`.
    lamports: u64,
    recent_blockhash: String,
    /// 32-byte seed of the mint keypair; generated when absent.
    #[serde(default)]
    mint_secret_key: Option<Vec<u8>>,
}

/// The mint an intent operates on, as the caller last read it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintParams {
    address: String,
    decimals: u8,
    #[serde(default)]
    mint_authority: Option<String>,
}

impl MintParams {
    fn to_snapshot(&self) -> Result<MintSnapshot, MintError> {
        Ok(MintSnapshot::from_state(
            Pubkey::from_base58("mint.address", &self.address)?,
            MintState {
                decimals: self.decimals,
                mint_authority: parse_optional(
                    "mint.mintAuthority",
                    self.mint_authority.as_deref(),
                )?,
                freeze_authority: None,
                raw_supply: 0,
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferParams {
    sender: String,
    mint: MintParams,
    receiver: String,
    amount: String,
    #[serde(default)]
    receiver_account_exists: bool,
    recent_blockhash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintToParams {
    caller: String,
    mint: MintParams,
    amount: String,
    recent_blockhash: String,
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

fn config_from_js(config: JsValue) -> Result<MintConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        Ok(MintConfig::default())
    } else {
        from_js(config, "config")
    }
}

fn parse_blockhash(value: &str) -> Result<Hash, MintError> {
    Hash::from_str(value).map_err(|_| MintError::invalid_pubkey("recentBlockhash", value))
}

fn intent_to_js(intent: TransactionIntent) -> Result<JsValue, JsValue> {
    let mint = intent.mint;
    let allocation = intent.allocation;
    let co_signers = intent.co_signers;
    let transaction: JsValue = WasmTransaction::from_inner(intent.transaction).into();

    Ok(js_obj!(
        "transaction" => transaction,
        "mint" => mint,
        "coSigners" => co_signers,
        "allocation" => allocation,
    )?)
}

#[wasm_bindgen]
pub struct IntentNamespace;

#[wasm_bindgen]
impl IntentNamespace {
    /// Sizes of a new mint: `{ mintLen, metadataLen, totalLen }`.
    ///
    /// Query the rent-exempt reserve for `totalLen` and pass it as
    /// `lamports` to `build_create_mint`.
    #[wasm_bindgen]
    pub fn create_mint_space(params: JsValue) -> Result<JsValue, JsValue> {
        let fields: MintFields = from_js(params, "create mint params")?;
        let (mint_len, metadata_len) = compose::create_mint_space(&fields.to_create_mint()?)?;
        Ok(js_obj!(
            "mintLen" => mint_len,
            "metadataLen" => metadata_len,
            "totalLen" => mint_len + metadata_len,
        )?)
    }

    /// Compose a new mint with embedded metadata and initial supply.
    ///
    /// ```javascript
    /// const { transaction, mint } = IntentNamespace.build_create_mint({
    ///   feePayer: 'DgT9...',
    ///   name: 'Dashboard Token', symbol: 'DASH', uri: 'https://...',
    ///   initialSupply: '1000',
    ///   lamports: 3_000_000n,
    ///   recentBlockhash: 'GWaQ...',
    /// });
    /// // transaction is signed by the mint; the fee payer signs next
    /// ```
    #[wasm_bindgen]
    pub fn build_create_mint(params: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
        let fields: MintFields = from_js(params.clone(), "create mint params")?;
        let params: CreateMintParams = from_js(params, "create mint params")?;
        let config = config_from_js(config)?;

        let payer = Pubkey::from_base58("feePayer", &params.fee_payer)?;
        let mint_keypair = match &params.mint_secret_key {
            Some(secret) => Keypair::from_secret_key_bytes(secret)?,
            None => Keypair::new(),
        };
        let intent = compose::compose_create_mint(
            &config,
            &payer,
            &fields.to_create_mint()?,
            &mint_keypair,
            params.lamports,
            parse_blockhash(&params.recent_blockhash)?,
        )?;
        intent_to_js(intent)
    }

    /// Compose a transfer; set `receiverAccountExists` to skip creating the
    /// receiver's associated account.
    #[wasm_bindgen]
    pub fn build_transfer(params: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
        let params: TransferParams = from_js(params, "transfer params")?;
        let config = config_from_js(config)?;

        let intent = compose::compose_transfer(
            &config,
            &Pubkey::from_base58("sender", &params.sender)?,
            &params.mint.to_snapshot()?,
            &Pubkey::from_base58("receiver", &params.receiver)?,
            &params.amount,
            params.receiver_account_exists,
            parse_blockhash(&params.recent_blockhash)?,
        )?;
        intent_to_js(intent)
    }

    /// Compose an issuance into the caller's own associated account.
    ///
    /// Throws unless `caller` equals `mint.mintAuthority`.
    #[wasm_bindgen]
    pub fn build_mint_to(params: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
        let params: MintToParams = from_js(params, "mint-to params")?;
        let config = config_from_js(config)?;

        let intent = compose::compose_mint_to(
            &config,
            &Pubkey::from_base58("caller", &params.caller)?,
            &params.mint.to_snapshot()?,
            &params.amount,
            parse_blockhash(&params.recent_blockhash)?,
        )?;
        intent_to_js(intent)
    }
}
