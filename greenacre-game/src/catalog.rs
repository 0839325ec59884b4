//! Static item and recipe registries.
//!
//! The catalog is built once at startup (from the built-in standard data or
//! a platform-supplied JSON payload), then passed by shared reference to
//! every consumer. Nothing in the engine mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::EngineError;

/// Item id of the lowest milk tier.
pub const MILK_PLAIN: &str = "milk-1";
/// Item id of the middle milk tier.
pub const MILK_GOLD_STAR: &str = "milk-2";
/// Item id of the top milk tier.
pub const MILK_PREMIUM: &str = "milk-3";

/// Category of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    Crop,
    Milk,
    FieldTool,
    Dish,
}

impl ItemType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::Milk => "milk",
            Self::FieldTool => "field-tool",
            Self::Dish => "dish",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crop species grown in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Carrot,
    Pumpkin,
    Spinach,
}

impl CropType {
    /// Display key used to resolve crop artwork, e.g. `"carrot"`.
    #[must_use]
    pub const fn display_key(self) -> &'static str {
        match self {
            Self::Carrot => "carrot",
            Self::Pumpkin => "pumpkin",
            Self::Spinach => "spinach",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_key())
    }
}

/// Days a crop spends in each pre-grown life stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropTimetable {
    pub seed_days: u32,
    pub growing_days: u32,
}

/// A single immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Base value in cents to avoid floating-point issues
    pub value_cents: i64,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub does_price_fluctuate: bool,
    /// Crop species; present on seed and grown-crop items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<CropType>,
    /// Stage timetable; present only on grown-crop (plantable) items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_timetable: Option<CropTimetable>,
    /// Final-stage item a seed matures into; present only on seed items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grows_into: Option<String>,
}

/// A cooking recipe; also registered in the catalog as a `Dish` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub value_cents: i64,
    /// Required ingredient quantities keyed by item id.
    pub ingredients: BTreeMap<String, u32>,
}

/// Raw catalog payload shape for JSON loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogData {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    recipes: Vec<Recipe>,
}

/// Immutable registry of all items and recipes.
///
/// Recipes are mirrored into the item table as `Dish` entries so value and
/// sorting queries treat them uniformly, the way the original game merged
/// its recipe map into the item map. Iteration order is the `BTreeMap` key
/// order, which keeps every RNG draw sequence over the catalog stable for
/// a given seed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    items: BTreeMap<String, Item>,
    recipes: BTreeMap<String, Recipe>,
}

impl Catalog {
    /// Build a catalog from parsed items and recipes.
    #[must_use]
    pub fn from_parts(items: Vec<Item>, recipes: Vec<Recipe>) -> Self {
        let mut item_map = BTreeMap::new();
        for item in items {
            item_map.insert(item.id.clone(), item);
        }
        let mut recipe_map = BTreeMap::new();
        for recipe in recipes {
            item_map.insert(
                recipe.id.clone(),
                Item {
                    id: recipe.id.clone(),
                    name: recipe.name.clone(),
                    value_cents: recipe.value_cents,
                    item_type: ItemType::Dish,
                    does_price_fluctuate: false,
                    crop_type: None,
                    crop_timetable: None,
                    grows_into: None,
                },
            );
            recipe_map.insert(recipe.id.clone(), recipe);
        }
        Self {
            items: item_map,
            recipes: recipe_map,
        }
    }

    /// Load a catalog from a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid catalog data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: CatalogData = serde_json::from_str(json)?;
        Ok(Self::from_parts(data.items, data.recipes))
    }

    /// The built-in standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_parts(standard_items(), standard_recipes())
    }

    /// Look up an item, failing fast on an unknown id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CatalogLookup`] when the id is unknown.
    pub fn item(&self, item_id: &str) -> Result<&Item, EngineError> {
        self.items
            .get(item_id)
            .ok_or_else(|| EngineError::catalog_lookup(item_id))
    }

    /// Look up an item, returning `None` for an unknown id.
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&Item> {
        self.items.get(item_id)
    }

    /// Look up a recipe by id.
    #[must_use]
    pub fn recipe(&self, recipe_id: &str) -> Option<&Recipe> {
        self.recipes.get(recipe_id)
    }

    /// All items in stable id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// All recipes in stable id order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Number of registered items (including dish entries).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn crop(id: &str, name: &str, value_cents: i64, species: CropType, seed_days: u32, growing_days: u32) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        value_cents,
        item_type: ItemType::Crop,
        does_price_fluctuate: true,
        crop_type: Some(species),
        crop_timetable: Some(CropTimetable {
            seed_days,
            growing_days,
        }),
        grows_into: None,
    }
}

fn seed(id: &str, name: &str, value_cents: i64, species: CropType, grows_into: &str) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        value_cents,
        item_type: ItemType::Crop,
        does_price_fluctuate: true,
        crop_type: Some(species),
        crop_timetable: None,
        grows_into: Some(grows_into.to_string()),
    }
}

fn milk(id: &str, name: &str, value_cents: i64) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        value_cents,
        item_type: ItemType::Milk,
        does_price_fluctuate: false,
        crop_type: None,
        crop_timetable: None,
        grows_into: None,
    }
}

fn field_tool(id: &str, name: &str, value_cents: i64) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        value_cents,
        item_type: ItemType::FieldTool,
        does_price_fluctuate: false,
        crop_type: None,
        crop_timetable: None,
        grows_into: None,
    }
}

fn standard_items() -> Vec<Item> {
    vec![
        crop("carrot", "Carrot", 750, CropType::Carrot, 2, 3),
        seed("carrot-seed", "Carrot Seed", 300, CropType::Carrot, "carrot"),
        crop("pumpkin", "Pumpkin", 1_250, CropType::Pumpkin, 3, 5),
        seed("pumpkin-seed", "Pumpkin Seed", 500, CropType::Pumpkin, "pumpkin"),
        crop("spinach", "Spinach", 400, CropType::Spinach, 1, 2),
        seed("spinach-seed", "Spinach Seed", 150, CropType::Spinach, "spinach"),
        milk(MILK_PLAIN, "Milk", 4_000),
        milk(MILK_GOLD_STAR, "Gold Star Milk", 7_500),
        milk(MILK_PREMIUM, "Premium Milk", 12_000),
        field_tool("fertilizer", "Fertilizer", 2_500),
        field_tool("sprinkler", "Sprinkler", 12_000),
        field_tool("scarecrow", "Scarecrow", 16_000),
    ]
}

fn standard_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "carrot-soup".to_string(),
            name: "Carrot Soup".to_string(),
            value_cents: 2_500,
            ingredients: BTreeMap::from([("carrot".to_string(), 4)]),
        },
        Recipe {
            id: "pumpkin-pie".to_string(),
            name: "Pumpkin Pie".to_string(),
            value_cents: 5_000,
            ingredients: BTreeMap::from([
                ("pumpkin".to_string(), 2),
                (MILK_PLAIN.to_string(), 1),
            ]),
        },
    ]
}
