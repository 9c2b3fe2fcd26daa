//! Round-trip properties of the Vault client against the mocked transit
//! engine, over arbitrary non-empty text.

use proptest::prelude::*;
use test_utils::fixtures::{TEST_KEY, TEST_TOKEN, vault_config};
use test_utils::mocks::start_transit_server;
use test_utils::secret_text_strategy;
use vault_transit_client::{Decrypter, Encrypter, VaultClient, is_vault_ciphertext};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn decrypt_inverts_encrypt(plaintext in secret_text_strategy()) {
        let (ciphertext, decrypted) = runtime().block_on(async {
            let server = start_transit_server(TEST_TOKEN, TEST_KEY).await;
            let client = VaultClient::new(vault_config(&server.uri())).unwrap();
            let ciphertext = client.encrypt(&plaintext).await.unwrap();
            let decrypted = client.decrypt(&ciphertext).await.unwrap();
            (ciphertext, decrypted)
        });

        prop_assert!(is_vault_ciphertext(&ciphertext));
        prop_assert_ne!(&ciphertext, &plaintext);
        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn equal_plaintexts_encrypt_differently(plaintext in secret_text_strategy()) {
        let (first, second) = runtime().block_on(async {
            let server = start_transit_server(TEST_TOKEN, TEST_KEY).await;
            let client = VaultClient::new(vault_config(&server.uri())).unwrap();
            let first = client.encrypt(&plaintext).await.unwrap();
            let second = client.encrypt(&plaintext).await.unwrap();
            (first, second)
        });

        prop_assert_ne!(first, second);
    }
}
