//! Game-state container consumed by the engine's queries.
//!
//! The engine never mutates this state; the host's handler layer owns all
//! transitions (planting, watering, purchases, the daily tick) and hands
//! the engine fresh snapshots. Day-tick fields only ever advance between
//! calls; no particular tick cadence is assumed.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Item};
use crate::constants::{
    INITIAL_COW_PEN_CAPACITY, INITIAL_FIELD_HEIGHT, INITIAL_FIELD_WIDTH, STARTING_MONEY_CENTS,
};
use crate::cow::Cow;
use crate::error::EngineError;
use crate::field::Field;
use crate::market::{PriceEvents, ValueAdjustments};

/// One stack of items held by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item_id: String,
    pub quantity: u32,
}

/// An inventory entry joined onto its catalog item for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerItem {
    pub item: Item,
    pub quantity: u32,
}

/// Complete player-visible simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current in-game day, starting at 1.
    #[serde(default = "default_day")]
    pub day: u32,
    pub field: Field,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
    /// Player balance in cents
    pub money_cents: i64,
    #[serde(default)]
    pub cows: Vec<Cow>,
    #[serde(default = "default_pen_capacity")]
    pub cow_pen_capacity: u32,
    /// The day's per-item price multipliers.
    #[serde(default)]
    pub value_adjustments: ValueAdjustments,
    /// Active price crashes keyed by item id.
    #[serde(default)]
    pub price_crashes: PriceEvents,
    /// Active price surges keyed by item id.
    #[serde(default)]
    pub price_surges: PriceEvents,
}

const fn default_day() -> u32 {
    1
}

const fn default_pen_capacity() -> u32 {
    INITIAL_COW_PEN_CAPACITY
}

impl GameState {
    /// Fresh game: empty field at the standard dimensions, starting money,
    /// nothing owned, no active price events.
    #[must_use]
    pub fn new_game() -> Self {
        Self {
            day: 1,
            field: Field::new(INITIAL_FIELD_HEIGHT, INITIAL_FIELD_WIDTH),
            inventory: Vec::new(),
            money_cents: STARTING_MONEY_CENTS,
            cows: Vec::new(),
            cow_pen_capacity: INITIAL_COW_PEN_CAPACITY,
            value_adjustments: ValueAdjustments::new(),
            price_crashes: PriceEvents::new(),
            price_surges: PriceEvents::new(),
        }
    }

    /// Quantity of an item currently held, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.inventory
            .iter()
            .find(|entry| entry.item_id == item_id)
            .map_or(0, |entry| entry.quantity)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

/// Join inventory quantities onto catalog items for display.
///
/// Entries keep their inventory order; sorting is a separate concern
/// ([`crate::recipe::sort_items`]).
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] when any entry references an
/// unknown item id.
pub fn player_inventory(
    catalog: &Catalog,
    state: &GameState,
) -> Result<Vec<PlayerItem>, EngineError> {
    state
        .inventory
        .iter()
        .map(|entry| {
            Ok(PlayerItem {
                item: catalog.item(&entry.item_id)?.clone(),
                quantity: entry.quantity,
            })
        })
        .collect()
}
