//! Concurrent registry lookups
//!
//! Many readers resolve and check values while a writer rebinds keys. Readers
//! must always see a complete binding, never a missing key.

use auth_core::validation::{
    InMemoryValueStore, UniquenessValidator, ValidationRegistry, ValidatorKey, EMAIL_UNIQUENESS,
};
use auth_test_utils::*;
use std::sync::Arc;

const READERS: usize = 8;
const CHECKS_PER_READER: usize = 2_000;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checks_with_rebinding() -> Result<(), anyhow::Error> {
    let registry = Arc::new(ValidationRegistry::new());
    registry.register(EMAIL_UNIQUENESS, Arc::new(StaticValidator(true)));

    let mut readers = Vec::with_capacity(READERS);
    for _ in 0..READERS {
        let registry = Arc::clone(&registry);
        readers.push(tokio::task::spawn_blocking(move || {
            for _ in 0..CHECKS_PER_READER {
                // Either binding is acceptable; an error is not
                registry.check_value(&EMAIL_UNIQUENESS, TEST_EMAIL_FREE)?;
            }
            Ok::<_, auth_core::errors::ValidationError>(())
        }));
    }

    let writer = {
        let registry = Arc::clone(&registry);
        tokio::task::spawn_blocking(move || {
            for i in 0..200 {
                registry.register(EMAIL_UNIQUENESS, Arc::new(StaticValidator(i % 2 == 0)));
                registry.register(
                    ValidatorKey::from(format!("extra-{i}")),
                    Arc::new(StaticValidator(true)),
                );
            }
        })
    };

    for reader in readers {
        reader.await??;
    }
    writer.await?;

    assert_eq!(registry.len(), 201);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_uniqueness_checks_see_inserts() -> Result<(), anyhow::Error> {
    let store = Arc::new(InMemoryValueStore::case_insensitive());
    let registry = Arc::new(ValidationRegistry::new());
    registry.register(
        EMAIL_UNIQUENESS,
        Arc::new(UniquenessValidator::new(Arc::clone(&store))),
    );

    let mut handles = Vec::with_capacity(READERS);
    for reader in 0..READERS {
        let registry = Arc::clone(&registry);
        let store = Arc::clone(&store);
        handles.push(tokio::task::spawn_blocking(move || -> Result<(), anyhow::Error> {
            for n in 0..100 {
                let email = format!("user-{reader}-{n}@example.com");
                anyhow::ensure!(registry.check_value(&EMAIL_UNIQUENESS, email.as_str())?);
                store.insert(&email);
                anyhow::ensure!(!registry.check_value(&EMAIL_UNIQUENESS, email.as_str())?);
            }
            Ok(())
        }));
    }

    for handle in handles {
        handle.await??;
    }

    assert_eq!(store.len(), READERS * 100);
    Ok(())
}
