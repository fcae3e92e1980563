use crate::utils::*;
use rstest::rstest;
use wasm_token_mint::compose::{
    self, build_create_mint_with_keypair, build_mint_to, build_transfer, instructions, submit,
    CreateMint,
};
use wasm_token_mint::{
    IdentityProvider, IntentKind, KeypairExt, MintConfig, MintError, MintSnapshot, MintState, TransactionExt,
};

fn params(initial_supply: &str, decimals: u8) -> CreateMint {
    CreateMint {
        name: "Dashboard Token".to_string(),
        symbol: "DASH".to_string(),
        uri: "https://example.com/dash.json".to_string(),
        initial_supply: initial_supply.to_string(),
        decimals,
        mint_authority: None,
        freeze_authority: None,
    }
}

fn snapshot(mint_authority: Option<u8>) -> MintSnapshot {
    MintSnapshot::from_state(
        key(50),
        MintState {
            decimals: 9,
            mint_authority: mint_authority.map(key),
            freeze_authority: None,
            raw_supply: 0,
        },
    )
}

#[tokio::test]
async fn test_create_mint_requests_reserve_for_full_size() {
    let ledger = MockLedger::default();
    let wallet = MockWallet::new(1);
    let mint_keypair = keypair(2);
    let params = params("1000", 9);

    let intent =
        build_create_mint_with_keypair(&ledger, &wallet, &MintConfig::default(), &params, &mint_keypair)
            .await
            .unwrap();

    let (mint_len, metadata_len) = compose::create_mint_space(&params).unwrap();
    assert_eq!(mint_len, 234);
    assert_eq!(
        *ledger.reserve_requests.lock().unwrap(),
        vec![mint_len + metadata_len]
    );
    assert_eq!(
        ledger.calls(),
        vec!["getMinimumBalanceForRentExemption", "getLatestBlockhash"]
    );

    let allocation = intent.allocation.unwrap();
    assert_eq!(allocation.lamports, (mint_len + metadata_len) as u64 * RESERVE_PER_BYTE);
    assert_eq!(intent.kind, IntentKind::CreateMint);
    assert_eq!(intent.mint, mint_keypair.address_key());
    assert_eq!(intent.fee_payer, wallet.public_identity());
    assert_eq!(intent.instructions.len(), 6);
    assert_eq!(intent.pending_signers(), vec![wallet.public_identity()]);
}

#[rstest]
#[case("1.0000000001", 9)]
#[case("0.5", 0)]
#[tokio::test]
async fn test_precision_loss_before_network(#[case] supply: &str, #[case] decimals: u8) {
    let ledger = MockLedger::default();

    let result = build_create_mint_with_keypair(
        &ledger,
        &MockWallet::new(1),
        &MintConfig::default(),
        &params(supply, decimals),
        &keypair(2),
    )
    .await;

    assert!(matches!(result, Err(MintError::PrecisionLoss { .. })));
    assert!(ledger.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_decimals_before_network() {
    let ledger = MockLedger::default();

    let result = build_create_mint_with_keypair(
        &ledger,
        &MockWallet::new(1),
        &MintConfig::default(),
        &params("1", 10),
        &keypair(2),
    )
    .await;

    assert_eq!(result.unwrap_err(), MintError::InvalidDecimals(10));
    assert!(ledger.calls().is_empty());
}

#[tokio::test]
async fn test_transfer_creates_missing_receiver_account() {
    let ledger = MockLedger::default();
    let wallet = MockWallet::new(1);

    let intent = build_transfer(
        &ledger,
        &wallet,
        &MintConfig::default(),
        &snapshot(None),
        &key(60),
        "0.25",
    )
    .await
    .unwrap();

    assert_eq!(intent.kind, IntentKind::Transfer);
    assert_eq!(intent.instructions.len(), 2);
    assert_eq!(
        intent.instructions[0].program_id,
        instructions::ASSOCIATED_TOKEN_PROGRAM_ID
    );
    assert_eq!(&intent.instructions[1].data[1..9], &250_000_000u64.to_le_bytes());
    assert_eq!(ledger.calls(), vec!["getAccountInfo", "getLatestBlockhash"]);
}

#[tokio::test]
async fn test_transfer_to_existing_account() {
    let token_program = MintConfig::default().token_program().unwrap();
    let receiver_ata = instructions::associated_token_address(&key(60), &key(50), &token_program);
    let ledger = MockLedger::default().with_account(receiver_ata, vec![0u8; 165]);

    let intent = build_transfer(
        &ledger,
        &MockWallet::new(1),
        &MintConfig::default(),
        &snapshot(None),
        &key(60),
        "3",
    )
    .await
    .unwrap();

    assert_eq!(intent.instructions.len(), 1);
    assert_eq!(intent.instructions[0].accounts[2].pubkey, receiver_ata);
}

#[tokio::test]
async fn test_mint_to_by_non_authority_makes_no_calls() {
    let ledger = MockLedger::default();

    let result = build_mint_to(
        &ledger,
        &MockWallet::new(1),
        &MintConfig::default(),
        &snapshot(Some(99)),
        "5",
    )
    .await;

    assert!(matches!(result, Err(MintError::AuthorityMismatch { .. })));
    assert!(ledger.calls().is_empty());

    let result = build_mint_to(
        &ledger,
        &MockWallet::new(1),
        &MintConfig::default(),
        &snapshot(None),
        "5",
    )
    .await;
    assert!(matches!(result, Err(MintError::MissingAuthority { .. })));
    assert!(ledger.calls().is_empty());
}

#[tokio::test]
async fn test_mint_to_by_authority() {
    let ledger = MockLedger::default();
    let wallet = MockWallet::new(1);
    let mut snap = snapshot(None);
    snap.mint_authority = Some(wallet.public_identity());

    let intent = build_mint_to(&ledger, &wallet, &MintConfig::default(), &snap, "5")
        .await
        .unwrap();

    assert_eq!(intent.kind, IntentKind::MintTo);
    assert_eq!(&intent.instructions[0].data[1..], &5_000_000_000u64.to_le_bytes());
}

#[tokio::test]
async fn test_submit_signed_create_mint() {
    let ledger = MockLedger::default();
    let wallet = MockWallet::new(1);
    let mint_keypair = keypair(2);
    let intent = build_create_mint_with_keypair(
        &ledger,
        &wallet,
        &MintConfig::default(),
        &params("1000", 9),
        &mint_keypair,
    )
    .await
    .unwrap();

    let id = submit(&ledger, &wallet, intent).await.unwrap();

    assert_eq!(id, "tx-1");
    let submitted = ledger.submitted.lock().unwrap();
    assert!(submitted[0].is_signed_by(&wallet.public_identity()));
    assert!(submitted[0].is_signed_by(&mint_keypair.address_key()));
}

#[rstest]
#[case(WalletBehavior::Refuse)]
#[case(WalletBehavior::Ignore)]
#[tokio::test]
async fn test_nothing_submitted_without_wallet_signature(#[case] behavior: WalletBehavior) {
    let ledger = MockLedger::default();
    let mut wallet = MockWallet::new(1);
    let intent = build_transfer(
        &ledger,
        &wallet,
        &MintConfig::default(),
        &snapshot(None),
        &key(60),
        "1",
    )
    .await
    .unwrap();

    wallet.behavior = behavior;
    let result = submit(&ledger, &wallet, intent).await;

    assert!(matches!(result, Err(MintError::SigningRefused(_))));
    assert!(ledger.submitted.lock().unwrap().is_empty());
}
