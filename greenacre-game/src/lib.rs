//! Greenacre Game Engine
//!
//! Platform-agnostic core game logic for the Greenacre farming simulation.
//! This crate provides all simulation and economy mechanics without UI or
//! platform-specific dependencies: crop lifecycle, field queries, cow
//! generation and valuation, market price events, recipes, and money
//! formatting. The presentation layer consumes the pure query functions;
//! all state mutation lives in the host's handler layer.

pub mod cache;
pub mod catalog;
pub mod constants;
pub mod cow;
pub mod crop;
pub mod error;
pub mod field;
pub mod market;
pub mod money;
pub mod numbers;
pub mod recipe;
pub mod rng;
pub mod shop;
pub mod state;

// Re-export commonly used types
pub use cache::SimCache;
pub use catalog::{Catalog, CropTimetable, CropType, Item, ItemType, Recipe};
pub use cow::{
    Cow, CowColor, CowOptions, Gender, can_purchase_cow, generate_cow, get_cow_milk_item,
    get_cow_milk_rate, get_cow_value, get_cow_weight,
};
pub use crop::{
    CropLifeStage, get_crop_life_stage, get_crop_lifecycle_duration,
    get_final_crop_item_from_seed_item, get_plot_image, is_item_a_farm_product,
    is_item_a_grown_crop,
};
pub use error::EngineError;
pub use field::{
    Coord, CropState, Field, PLOT_CONTAINS_CROP, PLOT_IS_FERTILIZED, PlotContent, PlotPredicate,
    does_plot_contain_crop, find_in_field, get_crops, get_plot_content_type, get_range_coords,
};
pub use market::{
    PriceEvent, PriceEvents, ValueAdjustments, generate_value_adjustments,
    get_adjusted_item_value, get_item_value, get_price_event_for_crop, get_random_crop_item,
};
pub use money::{cast_to_money, dollar_string, integer_string, money_string, money_total};
pub use recipe::{can_make_recipe, sort_items};
pub use rng::RngBundle;
pub use shop::{ShopInventory, can_afford, get_resale_value, is_item_sold_in_shop};
pub use state::{GameState, InventoryEntry, PlayerItem, player_inventory};

/// Trait for abstracting catalog loading operations.
/// Platform-specific implementations should provide this.
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the item/recipe catalog from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog data cannot be loaded.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load the shop inventory from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the shop inventory cannot be loaded.
    fn load_shop_inventory(&self) -> Result<ShopInventory, Self::Error>;
}

/// Engine façade owning the immutable catalog, the shop stock, and the
/// query caches. Built once at startup and shared by reference.
#[derive(Debug)]
pub struct SimEngine {
    catalog: Catalog,
    shop: ShopInventory,
    cache: SimCache,
}

impl SimEngine {
    /// Engine over the built-in standard catalog and shop stock.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            catalog: Catalog::standard(),
            shop: ShopInventory::standard(),
            cache: SimCache::new(),
        }
    }

    /// Engine over platform-loaded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the loader cannot supply catalog or shop data.
    pub fn from_loader<L>(loader: &L) -> Result<Self, anyhow::Error>
    where
        L: CatalogLoader,
        L::Error: Into<anyhow::Error>,
    {
        let catalog = loader.load_catalog().map_err(Into::into)?;
        let shop = loader.load_shop_inventory().map_err(Into::into)?;
        Ok(Self {
            catalog,
            shop,
            cache: SimCache::new(),
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn shop(&self) -> &ShopInventory {
        &self.shop
    }

    #[must_use]
    pub const fn cache(&self) -> &SimCache {
        &self.cache
    }

    /// Start a new game against this engine's catalog.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::new_game()
    }

    /// Display-image key for a plot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CatalogLookup`] for an unknown plot item id.
    pub fn plot_image(&self, plot: Option<&PlotContent>) -> Result<Option<String>, EngineError> {
        get_plot_image(&self.catalog, &self.cache, plot)
    }

    /// Life stage of a planted crop.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CatalogLookup`] for an unknown plot item id.
    pub fn crop_life_stage(&self, plot: &PlotContent) -> Result<CropLifeStage, EngineError> {
        get_crop_life_stage(&self.catalog, &self.cache, plot)
    }

    /// Adjusted value of an item under the state's current multipliers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CatalogLookup`] for an unknown item id.
    pub fn item_value(&self, state: &GameState, item_id: &str) -> Result<i64, EngineError> {
        get_item_value(&self.catalog, item_id, &state.value_adjustments)
    }

    /// Whether a recipe is satisfiable from the state's inventory.
    #[must_use]
    pub fn can_make_recipe(&self, recipe: &Recipe, state: &GameState) -> bool {
        can_make_recipe(&self.cache, recipe, &state.inventory)
    }

    /// Player inventory joined onto catalog items, in display-sort order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CatalogLookup`] when any inventory entry
    /// references an unknown item id.
    pub fn sorted_player_inventory(
        &self,
        state: &GameState,
    ) -> Result<Vec<PlayerItem>, EngineError> {
        let joined = player_inventory(&self.catalog, state)?;
        let items: Vec<Item> = joined.iter().map(|entry| entry.item.clone()).collect();
        let sorted = sort_items(&self.catalog, &self.cache, &items);
        Ok(sorted
            .into_iter()
            .filter_map(|item| {
                joined
                    .iter()
                    .find(|entry| entry.item.id == item.id)
                    .map(|entry| PlayerItem {
                        item,
                        quantity: entry.quantity,
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl CatalogLoader for FixtureLoader {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Ok(Catalog::standard())
        }

        fn load_shop_inventory(&self) -> Result<ShopInventory, Self::Error> {
            Ok(ShopInventory::new(vec!["carrot-seed".to_string()]))
        }
    }

    #[test]
    fn engine_builds_from_loader() {
        let engine = SimEngine::from_loader(&FixtureLoader).unwrap();
        assert!(engine.catalog().item("carrot").is_ok());
        assert_eq!(engine.shop().item_ids, ["carrot-seed"]);
    }

    #[test]
    fn engine_new_game_and_queries_cohere() {
        let engine = SimEngine::standard();
        let mut state = engine.new_game();

        let plot = PlotContent::new_crop("carrot");
        state.field.plots[0][0] = Some(plot.clone());

        assert_eq!(engine.crop_life_stage(&plot).unwrap(), CropLifeStage::Seed);
        assert_eq!(
            engine.plot_image(Some(&plot)).unwrap(),
            Some("carrot-seed".to_string())
        );
        assert_eq!(engine.item_value(&state, "milk-1").unwrap(), 4_000);
    }

    #[test]
    fn sorted_player_inventory_applies_display_order() {
        let engine = SimEngine::standard();
        let mut state = engine.new_game();
        state.inventory = vec![
            InventoryEntry {
                item_id: "milk-1".to_string(),
                quantity: 1,
            },
            InventoryEntry {
                item_id: "pumpkin".to_string(),
                quantity: 2,
            },
            InventoryEntry {
                item_id: "carrot".to_string(),
                quantity: 3,
            },
        ];

        let sorted = engine.sorted_player_inventory(&state).unwrap();
        let ids: Vec<&str> = sorted.iter().map(|entry| entry.item.id.as_str()).collect();
        assert_eq!(ids, ["carrot", "pumpkin", "milk-1"]);
        assert_eq!(sorted[0].quantity, 3);
    }
}
