//! Directory client against the in-process relay: registration
//! conflicts, lookup misses, and server-ranked search.

mod common;

use std::sync::Arc;

use bc_client::{ClientError, DirectoryClient, RelayConfig};
use bc_crypto::{Alias, FakeProvider, Identity};

async fn new_identity(name: &str) -> Identity {
    Identity::generate(Arc::new(FakeProvider::new()), Alias::parse(name).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn register_then_conflict_keeps_first_key() {
    let base = common::spawn_relay().await;
    let directory = DirectoryClient::new(&RelayConfig::new(&base));

    let alice = new_identity("alice").await;
    let first = alice.public_record().await.unwrap();
    directory.register(alice.alias(), &first).await.unwrap();

    // A fresh key pair for the same alias must be refused...
    let impostor = new_identity("alice").await;
    let second = impostor.public_record().await.unwrap();
    let err = directory
        .register(impostor.alias(), &second)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AliasConflict(a) if a == "alice"));

    // ...and so must re-registering the identical record.
    let err = directory.register(alice.alias(), &first).await.unwrap_err();
    assert!(matches!(err, ClientError::AliasConflict(_)));

    // The first registered record stays authoritative.
    let resolved = directory.lookup(alice.alias()).await.unwrap();
    assert_eq!(resolved, Some(first));
}

#[tokio::test]
async fn lookup_miss_is_none_not_error() {
    let base = common::spawn_relay().await;
    let directory = DirectoryClient::new(&RelayConfig::new(&base));

    let ghost = Alias::parse("ghost").unwrap();
    assert_eq!(directory.lookup(&ghost).await.unwrap(), None);
}

#[tokio::test]
async fn search_returns_server_ranked_matches() {
    let base = common::spawn_relay().await;
    let directory = DirectoryClient::new(&RelayConfig::new(&base));

    for name in ["alice", "alina", "bob"] {
        let identity = new_identity(name).await;
        let record = identity.public_record().await.unwrap();
        directory.register(identity.alias(), &record).await.unwrap();
    }

    let results = directory.search("ali").await.unwrap();
    assert_eq!(results, vec!["alice".to_string(), "alina".to_string()]);

    // No matches is a valid, empty answer.
    assert!(directory.search("zzz").await.unwrap().is_empty());
}
