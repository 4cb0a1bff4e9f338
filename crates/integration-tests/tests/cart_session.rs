//! Cart survival across sessions through file-backed storage.

use std::sync::Arc;

use covercraft_checkout::cart::{CartAction, CartStore, FileStorage};
use covercraft_core::ProductId;
use covercraft_integration_tests::{add_case, dec};

fn temp_storage(tag: &str) -> (Arc<FileStorage>, std::path::PathBuf) {
    let dir = std::env::temp_dir().join(format!("covercraft-cart-{tag}-{}", std::process::id()));
    std::fs::remove_dir_all(&dir).ok();
    (Arc::new(FileStorage::new(&dir)), dir)
}

#[test]
fn test_cart_survives_restart() {
    let (storage, dir) = temp_storage("restart");

    let cart = CartStore::open(storage.clone());
    add_case(&cart, 1, Some(10), "499.50");
    add_case(&cart, 1, Some(10), "499.50");
    add_case(&cart, 2, None, "999");

    // A new store over the same directory is a new session.
    let next_session = CartStore::open(storage);
    assert_eq!(next_session.item_count(), 3);
    assert_eq!(next_session.subtotal(), dec("1998"));
    assert_eq!(next_session.items(), cart.items());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_decrement_to_zero_removes_item_from_disk() {
    let (storage, dir) = temp_storage("decrement");

    let cart = CartStore::open(storage.clone());
    add_case(&cart, 5, None, "750");
    cart.dispatch(CartAction::Decrement {
        product_id: ProductId::new(5),
        variation_id: None,
    });
    assert!(cart.is_empty());

    let next_session = CartStore::open(storage);
    assert!(next_session.is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_clear_after_checkout_empties_next_session() {
    let (storage, dir) = temp_storage("clear");

    let cart = CartStore::open(storage.clone());
    add_case(&cart, 1, None, "500");
    add_case(&cart, 2, None, "750");
    cart.dispatch(CartAction::Clear);

    let next_session = CartStore::open(storage);
    assert!(next_session.is_empty());

    std::fs::remove_dir_all(&dir).ok();
}
