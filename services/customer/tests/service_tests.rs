//! Orchestration tests for the adding and getting services.
//!
//! Each test wires real or double collaborators and checks which of them
//! were reached, and in what state the store was left.

use customer_service::{CustomerError, CustomerId, NewCustomer, Services, SqliteCustomerRepository};
use proptest::prelude::*;
use std::sync::Arc;
use test_utils::fixtures::{PETER_PARKER, PETER_PARKER_ACCOUNT, peter_parker};
use test_utils::mocks::{FailingCipher, FailingRepository, FakeCipher, InMemoryRepository};
use test_utils::{account_number_strategy, new_customer_strategy};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// --- Adding ---

#[tokio::test]
async fn add_stores_ciphertext_not_plaintext() {
    let store = Arc::new(InMemoryRepository::new());
    let services = Services::new(Arc::clone(&store), Arc::new(FakeCipher::new()));

    let id = services.adding.add_customer(peter_parker()).await.unwrap();

    assert_eq!(id, CustomerId::new(1));
    let rows = store.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, PETER_PARKER);
    assert_ne!(rows[0].account_number.as_str(), PETER_PARKER_ACCOUNT);
    assert!(!rows[0].account_number.as_str().contains(PETER_PARKER_ACCOUNT));
    assert!(rows[0].account_number.has_vault_marker());
}

#[tokio::test]
async fn add_does_not_touch_store_when_encryption_fails() {
    let store = Arc::new(InMemoryRepository::new());
    let cipher = Arc::new(FailingCipher::default());
    let services = Services::new(Arc::clone(&store), Arc::clone(&cipher));

    let err = services.adding.add_customer(peter_parker()).await.unwrap_err();

    assert_eq!(err.to_string(), "encryption failed: something went wrong");
    assert!(err.is_crypto_failure());
    assert_eq!(cipher.encrypt_calls(), 1);
    assert_eq!(store.insert_calls(), 0);
    assert!(store.rows().await.is_empty());
}

#[tokio::test]
async fn add_reports_storage_failure_after_encrypting() {
    let store = Arc::new(FailingRepository::new());
    let cipher = Arc::new(FakeCipher::new());
    let services = Services::new(Arc::clone(&store), Arc::clone(&cipher));

    let err = services.adding.add_customer(peter_parker()).await.unwrap_err();

    assert_eq!(err.to_string(), "saving customer failed");
    assert!(matches!(err, CustomerError::StorageFailed(_)));
    assert_eq!(cipher.encrypt_calls(), 1);
    assert_eq!(store.insert_calls(), 1);
}

#[tokio::test]
async fn identical_inputs_get_distinct_ids_and_ciphertexts() {
    let store = Arc::new(InMemoryRepository::new());
    let services = Services::new(Arc::clone(&store), Arc::new(FakeCipher::new()));

    let first = services.adding.add_customer(peter_parker()).await.unwrap();
    let second = services.adding.add_customer(peter_parker()).await.unwrap();

    assert_ne!(first, second);
    let rows = store.rows().await;
    assert_ne!(rows[0].account_number, rows[1].account_number);
}

// --- Getting ---

#[tokio::test]
async fn get_returns_original_account_number() {
    let store = Arc::new(InMemoryRepository::new());
    let services = Services::new(store, Arc::new(FakeCipher::new()));

    let id = services.adding.add_customer(peter_parker()).await.unwrap();
    let customer = services.getting.get_customer(id).await.unwrap();

    assert_eq!(customer.id, id);
    assert_eq!(customer.name, PETER_PARKER);
    assert_eq!(customer.account_number.expose(), PETER_PARKER_ACCOUNT);
}

#[tokio::test]
async fn get_does_not_decrypt_when_fetch_fails() {
    let cipher = Arc::new(FakeCipher::new());
    let services = Services::new(Arc::new(FailingRepository::new()), Arc::clone(&cipher));

    let err = services.getting.get_customer(CustomerId::new(1)).await.unwrap_err();

    assert_eq!(err.to_string(), "fetching customer 1 failed: getting customer failed");
    assert!(err.is_store_failure());
    assert_eq!(cipher.decrypt_calls(), 0);
}

#[tokio::test]
async fn get_reports_decryption_failure() {
    let store = Arc::new(InMemoryRepository::new());
    let writer = Services::new(Arc::clone(&store), Arc::new(FakeCipher::new()));
    let id = writer.adding.add_customer(peter_parker()).await.unwrap();

    let reader = Services::new(store, Arc::new(FailingCipher::default()));
    let err = reader.getting.get_customer(id).await.unwrap_err();

    assert_eq!(err.to_string(), "decryption failed: something went wrong");
    assert!(matches!(err, CustomerError::DecryptionFailed(_)));
}

#[tokio::test]
async fn get_unknown_id_from_sqlite_is_a_fetch_failure() {
    let store = Arc::new(SqliteCustomerRepository::open_in_memory().unwrap());
    let cipher = Arc::new(FakeCipher::new());
    let services = Services::new(store, Arc::clone(&cipher));

    let err = services.getting.get_customer(CustomerId::new(42)).await.unwrap_err();

    assert_eq!(err.to_string(), "fetching customer 42 failed: customer 42 not found");
    assert_eq!(cipher.decrypt_calls(), 0);
}

// --- Properties ---

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sqlite_round_trip_preserves_customer(input in new_customer_strategy()) {
        let expected = input.clone();
        let customer = runtime().block_on(async move {
            let store = Arc::new(SqliteCustomerRepository::open_in_memory().unwrap());
            let services = Services::new(store, Arc::new(FakeCipher::new()));
            let id = services.adding.add_customer(input).await.unwrap();
            services.getting.get_customer(id).await.unwrap()
        });

        prop_assert_eq!(customer.name, expected.name);
        prop_assert_eq!(customer.account_number, expected.account_number);
    }

    #[test]
    fn stored_value_never_equals_plaintext(account in account_number_strategy()) {
        let store = Arc::new(InMemoryRepository::new());
        let services = Services::new(Arc::clone(&store), Arc::new(FakeCipher::new()));
        let input = NewCustomer::new("Test", account.as_str());

        let rows = runtime().block_on(async {
            services.adding.add_customer(input).await.unwrap();
            store.rows().await
        });

        prop_assert_ne!(rows[0].account_number.as_str(), account.as_str());
        prop_assert!(!rows[0].account_number.as_str().contains(account.as_str()));
    }
}
