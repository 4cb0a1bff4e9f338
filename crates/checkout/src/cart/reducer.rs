//! Pure cart reductions over a closed action set.

use covercraft_core::{ProductId, VariationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product image attached to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// One selected variation attribute (e.g. Colour: Midnight Black).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedAttribute {
    pub name: String,
    pub option: String,
}

/// One catalog product (optionally a specific variation) plus a quantity.
///
/// Prices are decimal strings on the wire; they stay [`Decimal`] in memory so
/// they can be echoed back to the order API without floating-point artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<VariationId>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub regular_price: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<SelectedAttribute>,
    pub quantity: u32,
}

impl LineItem {
    /// The composite identity of this line: two lines are the same cart
    /// entry iff product and variation both match (including both absent).
    #[must_use]
    pub const fn identity(&self) -> (ProductId, Option<VariationId>) {
        (self.product_id, self.variation_id)
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn matches(&self, product_id: ProductId, variation_id: Option<VariationId>) -> bool {
        self.product_id == product_id && self.variation_id == variation_id
    }
}

/// Payload for [`CartAction::Add`]: a catalog selection without a quantity.
///
/// The reducer owns quantity semantics - adding an existing identity bumps
/// its quantity, adding a new one inserts it at quantity 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<VariationId>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub regular_price: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<SelectedAttribute>,
}

impl NewItem {
    fn into_line_item(self) -> LineItem {
        LineItem {
            product_id: self.product_id,
            variation_id: self.variation_id,
            name: self.name,
            unit_price: self.unit_price,
            regular_price: self.regular_price,
            images: self.images,
            attributes: self.attributes,
            quantity: 1,
        }
    }
}

/// The cart's full state.
///
/// `panel_open` is a UI-visibility flag only; it is never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    /// Insertion-ordered line items, keyed logically by identity.
    pub items: Vec<LineItem>,
    /// Whether the cart panel should be shown.
    pub panel_open: bool,
}

impl CartState {
    /// Total item count (sum of quantities).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Total price (sum of `unit_price × quantity`).
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The closed set of cart state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Merge-by-identity or append at quantity 1; opens the cart panel.
    Add(NewItem),
    /// Bump the matching item's quantity by 1; no-op when absent.
    Increment {
        product_id: ProductId,
        variation_id: Option<VariationId>,
    },
    /// Drop the matching item's quantity by 1. An item reaching quantity 0
    /// is removed from the collection entirely.
    Decrement {
        product_id: ProductId,
        variation_id: Option<VariationId>,
    },
    /// Remove the matching item; no-op when absent.
    Remove {
        product_id: ProductId,
        variation_id: Option<VariationId>,
    },
    /// Empty the collection.
    Clear,
    /// Wholesale replacement from a persisted snapshot (hydration).
    /// Quantity-0 entries in the snapshot are dropped.
    Load(Vec<LineItem>),
    /// Toggle the cart panel; the only action that is never persisted.
    SetPanelOpen(bool),
}

impl CartAction {
    /// Whether applying this action should write the item collection back
    /// to persistent storage.
    #[must_use]
    pub const fn persists(&self) -> bool {
        !matches!(self, Self::SetPanelOpen(_))
    }
}

/// Apply one action to the cart state.
pub fn reduce(state: &mut CartState, action: CartAction) {
    match action {
        CartAction::Add(new_item) => {
            let existing = state
                .items
                .iter_mut()
                .find(|item| item.matches(new_item.product_id, new_item.variation_id));
            match existing {
                Some(item) => item.quantity += 1,
                None => state.items.push(new_item.into_line_item()),
            }
            state.panel_open = true;
        }
        CartAction::Increment {
            product_id,
            variation_id,
        } => {
            if let Some(item) = state
                .items
                .iter_mut()
                .find(|item| item.matches(product_id, variation_id))
            {
                item.quantity += 1;
            }
        }
        CartAction::Decrement {
            product_id,
            variation_id,
        } => {
            if let Some(item) = state
                .items
                .iter_mut()
                .find(|item| item.matches(product_id, variation_id))
            {
                item.quantity = item.quantity.saturating_sub(1);
            }
            // Quantity-0 items must not exist in the collection.
            state.items.retain(|item| item.quantity > 0);
        }
        CartAction::Remove {
            product_id,
            variation_id,
        } => {
            state
                .items
                .retain(|item| !item.matches(product_id, variation_id));
        }
        CartAction::Clear => state.items.clear(),
        CartAction::Load(mut items) => {
            // A stored snapshot is external input; hold the quantity-0
            // invariant here too.
            items.retain(|item| item.quantity > 0);
            state.items = items;
        }
        CartAction::SetPanelOpen(open) => state.panel_open = open,
    }
}
