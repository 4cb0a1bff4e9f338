//! Cart state container.
//!
//! The cart is a reducer-driven state machine: every mutation is one of the
//! closed [`CartAction`] variants applied by [`reducer::reduce`], and the
//! resulting item collection is snapshotted to a [`KeyValueStorage`] after
//! each mutating action. [`CartStore`] wraps the state behind a cheaply
//! cloneable service object so the UI layer and the checkout pipeline share
//! one cart without ambient globals.

pub mod reducer;
pub mod storage;
pub mod store;

pub use reducer::{CartAction, CartState, LineItem, NewItem, ProductImage, SelectedAttribute};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
