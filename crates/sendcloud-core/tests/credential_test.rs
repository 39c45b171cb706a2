//! Tests for the per-domain credential store.

use std::thread;

use sendcloud_core::{CoreError, CredentialStore};

#[test]
fn resolves_registered_domain() {
    let store = CredentialStore::new();
    store.register("corp.example", "postmaster@corp.example", "key-1");

    let credential = store.resolve("corp.example").expect("domain should resolve");
    assert_eq!(credential.api_user, "postmaster@corp.example");
    assert_eq!(credential.api_key, "key-1");
}

#[test]
fn unknown_domain_fails_deterministically() {
    let store = CredentialStore::new();

    let err = store.resolve("missing.example").expect_err("lookup should fail");
    assert_eq!(err, CoreError::UnknownDomain { domain: "missing.example".to_string() });
}

#[test]
fn registration_is_an_upsert() {
    let store = CredentialStore::new();
    store.register("corp.example", "old-user", "old-key");
    store.register("corp.example", "new-user", "new-key");

    let credential = store.resolve("corp.example").expect("domain should resolve");
    assert_eq!(credential.api_user, "new-user");
    assert_eq!(credential.api_key, "new-key");
}

#[test]
fn domain_matching_is_case_sensitive() {
    let store = CredentialStore::new();
    store.register("corp.example", "user", "key");

    assert!(store.resolve("Corp.Example").is_err());
}

#[test]
fn concurrent_reads_and_writes() {
    let store = CredentialStore::new();
    store.register("corp.example", "user", "key");

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..1000 {
                    let credential = store.resolve("corp.example").expect("registered domain");
                    assert_eq!(credential.api_user, "user");
                }
            })
        })
        .collect();

    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..100 {
                store.register(format!("other-{i}.example"), "user", "key");
            }
        })
    };

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
    writer.join().expect("writer thread panicked");

    assert!(store.resolve("other-99.example").is_ok());
}
