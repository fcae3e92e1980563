use crate::utils::*;
use serde_json::json;
use wasm_token_mint::{
    assemble_all, assemble_snapshot, MintConfig, MintError, MintState, SnapshotStore,
};

fn state(authority: u8) -> MintState {
    MintState {
        decimals: 6,
        mint_authority: Some(key(authority)),
        freeze_authority: None,
        raw_supply: 1_500_000,
    }
}

#[tokio::test]
async fn test_snapshot_with_metadata() {
    let mint = key(1);
    let meta = record(mint, "https://example.com/dash.png");
    let ledger = MockLedger::default().with_account(mint, mint_with_metadata(&state(2), &meta));
    let documents = MockDocuments::default();

    let snapshot = assemble_snapshot(&ledger, &documents, &MintConfig::default(), &mint)
        .await
        .unwrap();

    assert_eq!(snapshot.metadata, Some(meta));
    assert_eq!(snapshot.name(), Some("Dashboard Token"));
    assert_eq!(snapshot.display_supply().unwrap(), "1.5");
    assert_eq!(snapshot.mint_authority, Some(key(2)));
    // not a .json uri, nothing to resolve
    assert!(snapshot.image.is_none());
    assert!(documents.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_metadata_degrades_to_none() {
    let mint = key(1);
    let ledger = MockLedger::default().with_account(mint, mint_with_corrupt_metadata(&state(2)));

    let snapshot = assemble_snapshot(
        &ledger,
        &MockDocuments::default(),
        &MintConfig::default(),
        &mint,
    )
    .await
    .unwrap();

    assert!(snapshot.metadata.is_none());
    assert_eq!(snapshot.raw_supply, 1_500_000);
}

#[tokio::test]
async fn test_mint_without_extensions() {
    let mint = key(1);
    let ledger = MockLedger::default().with_account(mint, plain_mint(&state(2)));

    let snapshot = assemble_snapshot(
        &ledger,
        &MockDocuments::default(),
        &MintConfig::default(),
        &mint,
    )
    .await
    .unwrap();

    assert!(snapshot.metadata.is_none());
    assert_eq!(snapshot.decimals, 6);
}

#[tokio::test]
async fn test_metadata_fetch_failure_keeps_base_state() {
    let mint = key(1);
    let meta = record(mint, "https://example.com/dash.json");
    let ledger = MockLedger {
        fail_account_reads: true,
        ..Default::default()
    }
    .with_account(mint, mint_with_metadata(&state(2), &meta));

    let snapshot = assemble_snapshot(
        &ledger,
        &MockDocuments::default(),
        &MintConfig::default(),
        &mint,
    )
    .await
    .unwrap();

    assert!(snapshot.metadata.is_none());
    assert_eq!(snapshot.mint_authority, Some(key(2)));
}

#[tokio::test]
async fn test_json_uri_resolves_image() {
    let mint = key(1);
    let uri = "https://example.com/dash.json";
    let ledger =
        MockLedger::default().with_account(mint, mint_with_metadata(&state(2), &record(mint, uri)));
    let mut documents = MockDocuments::default();
    documents.documents.insert(
        uri.to_string(),
        json!({ "name": "Dashboard Token", "image": "https://example.com/dash.png" }),
    );

    let snapshot = assemble_snapshot(&ledger, &documents, &MintConfig::default(), &mint)
        .await
        .unwrap();

    assert_eq!(snapshot.image.as_deref(), Some("https://example.com/dash.png"));
    assert_eq!(snapshot.metadata.unwrap().uri, uri);
}

#[tokio::test]
async fn test_unreachable_document_leaves_uri() {
    let mint = key(1);
    let uri = "https://example.com/missing.json";
    let ledger =
        MockLedger::default().with_account(mint, mint_with_metadata(&state(2), &record(mint, uri)));
    let documents = MockDocuments::default();

    let snapshot = assemble_snapshot(&ledger, &documents, &MintConfig::default(), &mint)
        .await
        .unwrap();

    assert!(snapshot.image.is_none());
    assert_eq!(snapshot.metadata.unwrap().uri, uri);
    assert_eq!(documents.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_image_resolution_can_be_disabled() {
    let mint = key(1);
    let uri = "https://example.com/dash.json";
    let ledger =
        MockLedger::default().with_account(mint, mint_with_metadata(&state(2), &record(mint, uri)));
    let documents = MockDocuments::default();
    let config = MintConfig {
        resolve_images: false,
        ..Default::default()
    };

    let snapshot = assemble_snapshot(&ledger, &documents, &config, &mint)
        .await
        .unwrap();

    assert!(snapshot.image.is_none());
    assert!(documents.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_metadata_for_another_mint_is_dropped() {
    let mint = key(1);
    // pointer and record both name key(5), not the account's own address
    let meta = record(key(5), "https://example.com/dash.json");
    let ledger = MockLedger::default().with_account(mint, mint_with_metadata(&state(2), &meta));
    let documents = MockDocuments::default();

    let snapshot = assemble_snapshot(&ledger, &documents, &MintConfig::default(), &mint)
        .await
        .unwrap();

    assert!(snapshot.metadata.is_none());
    assert!(snapshot.image.is_none());
    assert!(documents.calls.lock().unwrap().is_empty());
    assert_eq!(snapshot.display_supply().unwrap(), "1.5");
}

#[tokio::test]
async fn test_missing_mint_is_an_error() {
    let result = assemble_snapshot(
        &MockLedger::default(),
        &MockDocuments::default(),
        &MintConfig::default(),
        &key(1),
    )
    .await;

    assert!(matches!(result, Err(MintError::NetworkFailure(_))));
}

#[tokio::test]
async fn test_assemble_all_keeps_order() {
    let ledger = MockLedger::default()
        .with_account(key(1), mint_with_metadata(&state(9), &record(key(1), "a")))
        .with_account(key(2), plain_mint(&state(9)));

    let snapshots = assemble_all(
        &ledger,
        &MockDocuments::default(),
        &MintConfig::default(),
        &[key(2), key(1)],
    )
    .await
    .unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].mint_address, key(2));
    assert!(snapshots[0].metadata.is_none());
    assert_eq!(snapshots[1].mint_address, key(1));
    assert!(snapshots[1].metadata.is_some());
}

#[tokio::test]
async fn test_assemble_all_fails_as_a_batch() {
    let ledger = MockLedger::default().with_account(key(1), plain_mint(&state(9)));

    let result = assemble_all(
        &ledger,
        &MockDocuments::default(),
        &MintConfig::default(),
        &[key(1), key(3)],
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unsupported_decimals_fail_only_that_mint() {
    let odd = MintState {
        decimals: 12,
        ..state(9)
    };
    let ledger = MockLedger::default()
        .with_account(key(1), plain_mint(&odd))
        .with_account(key(2), plain_mint(&state(9)));

    let snapshots = assemble_all(
        &ledger,
        &MockDocuments::default(),
        &MintConfig::default(),
        &[key(1), key(2)],
    )
    .await
    .unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].decimals, 12);
    assert_eq!(
        snapshots[0].display_supply(),
        Err(MintError::InvalidDecimals(12))
    );
    assert_eq!(snapshots[1].display_supply().unwrap(), "1.5");
}

#[tokio::test]
async fn test_store_refresh() {
    let store = SnapshotStore::new();
    let mut receiver = store.subscribe();
    let ledger = MockLedger::default().with_account(key(1), plain_mint(&state(9)));
    let documents = MockDocuments::default();
    let config = MintConfig::default();

    store
        .refresh(&ledger, &documents, &config, &[key(1)])
        .await
        .unwrap();
    assert!(receiver.has_changed().unwrap());
    assert_eq!(receiver.borrow_and_update().len(), 1);

    // a failed refresh keeps the previous list
    assert!(store
        .refresh(&ledger, &documents, &config, &[key(1), key(4)])
        .await
        .is_err());
    assert_eq!(store.current().len(), 1);
    assert!(!receiver.has_changed().unwrap());
}
