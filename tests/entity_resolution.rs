//! Resolution properties over the in-memory storage double: idempotence,
//! per-owner isolation, ordering independence, and first-contact user
//! registration.

mod common;

use std::sync::Arc;

use family_money_bot::models::account::Account;
use family_money_bot::models::category::Category;
use family_money_bot::resolver::{CreationPolicy, resolve};
use family_money_bot::services::user_service::UserService;
use family_money_bot::storage::{Storage, UnitOfWork};

use common::MemoryStorage;

#[tokio::test]
async fn resolving_same_owner_and_name_twice_yields_one_row() {
    let storage = MemoryStorage::default();
    let user = storage.insert_user(42, 100).await.unwrap();

    let mut tx = storage.begin().await.unwrap();
    let first = resolve::<Account, _>(&mut tx, user.id, "Cash", CreationPolicy::CreateIfMissing)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut tx = storage.begin().await.unwrap();
    let second = resolve::<Account, _>(&mut tx, user.id, "Cash", CreationPolicy::CreateIfMissing)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert!(first.was_created());
    assert!(!second.was_created());
    assert_eq!(first.into_inner().id, second.into_inner().id);
    assert_eq!(storage.list_accounts(user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn same_name_under_different_owners_stays_isolated() {
    let storage = MemoryStorage::default();
    let alice = storage.insert_user(42, 100).await.unwrap();
    let bob = storage.insert_user(43, 101).await.unwrap();

    let mut tx = storage.begin().await.unwrap();
    let alices = resolve::<Account, _>(&mut tx, alice.id, "Cash", CreationPolicy::CreateIfMissing)
        .await
        .unwrap()
        .into_inner();
    let bobs = resolve::<Account, _>(&mut tx, bob.id, "Cash", CreationPolicy::CreateIfMissing)
        .await
        .unwrap()
        .into_inner();
    tx.commit().await.unwrap();

    assert_ne!(alices.id, bobs.id);

    let alice_accounts = storage.list_accounts(alice.id).await.unwrap();
    assert_eq!(alice_accounts.len(), 1);
    assert_eq!(alice_accounts[0].id, alices.id);
    let bob_accounts = storage.list_accounts(bob.id).await.unwrap();
    assert_eq!(bob_accounts.len(), 1);
    assert_eq!(bob_accounts[0].id, bobs.id);
}

#[tokio::test]
async fn account_and_category_resolution_order_does_not_matter() {
    async fn seeded() -> (MemoryStorage, uuid::Uuid) {
        let storage = MemoryStorage::default();
        let user = storage.insert_user(42, 100).await.unwrap();
        (storage, user.id)
    }

    // Account before category.
    let (storage_a, owner_a) = seeded().await;
    let mut tx = storage_a.begin().await.unwrap();
    let account_first =
        resolve::<Account, _>(&mut tx, owner_a, "Cash", CreationPolicy::CreateIfMissing)
            .await
            .unwrap()
            .into_inner();
    let category_second =
        resolve::<Category, _>(&mut tx, owner_a, "Groceries", CreationPolicy::CreateIfMissing)
            .await
            .unwrap()
            .into_inner();
    tx.commit().await.unwrap();

    // Category before account.
    let (storage_b, owner_b) = seeded().await;
    let mut tx = storage_b.begin().await.unwrap();
    let category_first =
        resolve::<Category, _>(&mut tx, owner_b, "Groceries", CreationPolicy::CreateIfMissing)
            .await
            .unwrap()
            .into_inner();
    let account_second =
        resolve::<Account, _>(&mut tx, owner_b, "Cash", CreationPolicy::CreateIfMissing)
            .await
            .unwrap()
            .into_inner();
    tx.commit().await.unwrap();

    // Same field values either way; only ids are fresh per store.
    assert_eq!(account_first.name, account_second.name);
    assert_eq!(category_second.name, category_first.name);
    assert_eq!(storage_a.list_accounts(owner_a).await.unwrap().len(), 1);
    assert_eq!(storage_b.list_accounts(owner_b).await.unwrap().len(), 1);
    assert_eq!(storage_a.list_categories(owner_a).await.unwrap().len(), 1);
    assert_eq!(storage_b.list_categories(owner_b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn first_contact_registers_then_finds() {
    let storage = Arc::new(MemoryStorage::default());
    let users = UserService::new(Arc::clone(&storage));

    let first = users.resolve_contact(42, 100).await.unwrap();
    let second = users.resolve_contact(42, 100).await.unwrap();

    assert!(first.was_created());
    assert!(!second.was_created());
    let registered = first.into_inner();
    assert_eq!(registered.id, second.into_inner().id);
    assert_eq!(registered.telegram_id, 42);
    assert_eq!(registered.chat_id, 100);
}
