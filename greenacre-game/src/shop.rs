//! Shop inventory and affordability.
//!
//! The shop's stock is a fixed ordered list of catalog ids (seeds and field
//! tools). Purchasing and selling themselves happen in the host's handler
//! layer; the engine answers what is sold, what a resale is worth, and
//! whether the player can afford a price.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Item};
use crate::error::EngineError;
use crate::money::{to_cents, to_dollars};

/// Ordered list of item ids available for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopInventory {
    pub item_ids: Vec<String>,
}

impl ShopInventory {
    /// Build from an ordered id list.
    #[must_use]
    pub const fn new(item_ids: Vec<String>) -> Self {
        Self { item_ids }
    }

    /// Load a shop inventory from a JSON id array.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an array of item id strings.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let item_ids: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(item_ids))
    }

    /// The built-in standard stock: seeds and field tools.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            [
                "carrot-seed",
                "pumpkin-seed",
                "spinach-seed",
                "fertilizer",
                "sprinkler",
                "scarecrow",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        )
    }

    /// Whether `item` is sold in this shop.
    #[must_use]
    pub fn sells(&self, item: &Item) -> bool {
        self.item_ids.iter().any(|id| *id == item.id)
    }
}

/// Whether a catalog item is available for purchase in the shop.
#[must_use]
pub fn is_item_sold_in_shop(shop: &ShopInventory, item: &Item) -> bool {
    shop.sells(item)
}

/// Resale value of an item: half the base value, rounded through cents.
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] for an unknown item id.
pub fn get_resale_value(catalog: &Catalog, item_id: &str) -> Result<i64, EngineError> {
    let item = catalog.item(item_id)?;
    Ok(to_cents(to_dollars(item.value_cents) / 2.0))
}

/// Whether the player's balance covers a price.
#[must_use]
pub const fn can_afford(money_cents: i64, cost_cents: i64) -> bool {
    money_cents >= cost_cents
}
