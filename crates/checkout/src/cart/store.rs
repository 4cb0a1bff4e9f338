//! The cart service object.
//!
//! Wraps [`CartState`] behind a cheaply cloneable handle with explicit
//! `dispatch`/`state` access, so collaborators receive the cart by injection
//! instead of reaching for a global. Hydration and persistence are
//! best-effort: a corrupt snapshot or a failing write degrades to an
//! in-memory cart, never an error.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use tracing::warn;

use super::reducer::{self, CartAction, CartState, LineItem};
use super::storage::KeyValueStorage;

/// Fixed storage key holding the serialized item collection.
pub const CART_STORAGE_KEY: &str = "cart-items";

/// Shared, mutation-guarded cart handle.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: Mutex<CartState>,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.item_count())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart, hydrating once from storage.
    ///
    /// Missing or corrupt stored data yields an empty cart; this never
    /// fails. A corrupt snapshot is discarded from storage so the next
    /// session starts clean.
    #[must_use]
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let items = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "discarding corrupt cart snapshot");
                    if let Err(e) = storage.remove(CART_STORAGE_KEY) {
                        warn!(error = %e, "failed to remove corrupt cart snapshot");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "cart storage unreadable, starting empty");
                Vec::new()
            }
        };

        let mut state = CartState::default();
        reducer::reduce(&mut state, CartAction::Load(items));

        Self {
            inner: Arc::new(CartStoreInner {
                state: Mutex::new(state),
                storage,
            }),
        }
    }

    /// Apply one action and snapshot the item collection to storage.
    ///
    /// Persistence is fire-and-effect: write failures are logged and
    /// swallowed, and UI-visibility changes skip the write entirely.
    pub fn dispatch(&self, action: CartAction) {
        let persist = action.persists();
        let snapshot = {
            let mut state = self
                .inner
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            reducer::reduce(&mut state, action);
            persist.then(|| state.items.clone())
        };

        if let Some(items) = snapshot {
            self.persist(&items);
        }
    }

    fn persist(&self, items: &[LineItem]) {
        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize cart snapshot");
                return;
            }
        };
        if let Err(e) = self.inner.storage.set(CART_STORAGE_KEY, &raw) {
            warn!(error = %e, "failed to persist cart snapshot");
        }
    }

    /// A snapshot of the full cart state.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A snapshot of the current line items.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .clone()
    }

    /// Total item count (sum of quantities), computed on read.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .item_count()
    }

    /// Total price (sum of `unit_price × quantity`), computed on read.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subtotal()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Whether the cart panel should currently be shown.
    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .panel_open
    }
}
