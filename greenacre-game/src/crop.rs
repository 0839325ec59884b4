//! Crop lifecycle model.
//!
//! A crop's life stage is a pure function of its item's timetable and the
//! watered-days it has accumulated. Stage sequences are memoized per
//! timetable shape through [`SimCache`].

use serde::{Deserialize, Serialize};

use crate::cache::{self, SimCache};
use crate::catalog::{Catalog, CropTimetable, Item, ItemType};
use crate::error::EngineError;
use crate::field::PlotContent;

/// Life stage of a planted crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CropLifeStage {
    #[default]
    Seed,
    Growing,
    Grown,
}

impl CropLifeStage {
    /// Image-key suffix for pre-grown stages; grown crops use the base key.
    #[must_use]
    pub const fn image_suffix(self) -> Option<&'static str> {
        match self {
            Self::Seed => Some("seed"),
            Self::Growing => Some("growing"),
            Self::Grown => None,
        }
    }
}

/// Total days a crop spends from planting to grown.
#[must_use]
pub const fn timetable_duration(timetable: &CropTimetable) -> u32 {
    timetable.seed_days + timetable.growing_days
}

/// Total lifecycle duration of a grown-crop item, memoized per item.
///
/// Items without a timetable (seeds, tools) have a zero-length lifecycle.
#[must_use]
pub fn get_crop_lifecycle_duration(cache: &SimCache, item: &Item) -> u32 {
    item.crop_timetable.as_ref().map_or(0, |timetable| {
        cache.lifecycle_duration(cache::content_key(timetable), || {
            timetable_duration(timetable)
        })
    })
}

fn life_stage_range(cache: &SimCache, timetable: &CropTimetable) -> Vec<CropLifeStage> {
    cache.stage_range(cache::content_key(timetable), || {
        let mut range =
            Vec::with_capacity((timetable.seed_days + timetable.growing_days) as usize);
        range.extend(std::iter::repeat_n(
            CropLifeStage::Seed,
            timetable.seed_days as usize,
        ));
        range.extend(std::iter::repeat_n(
            CropLifeStage::Growing,
            timetable.growing_days as usize,
        ));
        range
    })
}

/// Life stage of a planted crop, from `floor(days_watered)` against the
/// item's timetable.
///
/// A watered-day count exactly on a boundary index belongs to the stage at
/// that index; any index past the end of the timetable is `Grown`.
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] when the plot references an
/// unknown item id.
pub fn get_crop_life_stage(
    catalog: &Catalog,
    cache: &SimCache,
    plot: &PlotContent,
) -> Result<CropLifeStage, EngineError> {
    let item = catalog.item(&plot.item_id)?;
    let Some(timetable) = &item.crop_timetable else {
        return Ok(CropLifeStage::Grown);
    };
    let days_watered = plot
        .crop
        .as_ref()
        .map_or(0.0, |crop| crop.days_watered)
        .max(0.0);
    let index = days_watered.floor() as usize;
    let range = life_stage_range(cache, timetable);
    Ok(range.get(index).copied().unwrap_or(CropLifeStage::Grown))
}

/// Whether a catalog item is a plantable, harvestable grown crop.
#[must_use]
pub fn is_item_a_grown_crop(item: &Item) -> bool {
    item.item_type == ItemType::Crop && item.crop_timetable.is_some()
}

/// Whether a catalog item is produced on the farm (crop or milk).
#[must_use]
pub fn is_item_a_farm_product(item: &Item) -> bool {
    is_item_a_grown_crop(item) || item.item_type == ItemType::Milk
}

/// Display key of a planted crop's species, e.g. `"pumpkin"`.
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] when the plot references an
/// unknown item id or the item carries no crop species.
pub fn get_crop_id(catalog: &Catalog, plot: &PlotContent) -> Result<&'static str, EngineError> {
    let item = catalog.item(&plot.item_id)?;
    item.crop_type
        .map(|species| species.display_key())
        .ok_or_else(|| EngineError::catalog_lookup(&plot.item_id))
}

/// Final-stage item a seed matures into.
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] when `seed_item` has no
/// `grows_into` reference or the reference is unknown.
pub fn get_final_crop_item_from_seed_item<'a>(
    catalog: &'a Catalog,
    seed_item: &Item,
) -> Result<&'a Item, EngineError> {
    let grows_into = seed_item
        .grows_into
        .as_deref()
        .ok_or_else(|| EngineError::catalog_lookup(&seed_item.id))?;
    catalog.item(grows_into)
}

/// Display-image key for a plot.
///
/// Empty plot resolves to `None`; non-crop content uses the item's own id;
/// a planted crop uses its species key, suffixed with the stage for
/// pre-grown stages (`"carrot-seed"`, `"carrot-growing"`).
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] when the plot references an
/// unknown item id.
pub fn get_plot_image(
    catalog: &Catalog,
    cache: &SimCache,
    plot: Option<&PlotContent>,
) -> Result<Option<String>, EngineError> {
    let Some(content) = plot else {
        return Ok(None);
    };
    let item = catalog.item(&content.item_id)?;
    if item.item_type != ItemType::Crop {
        return Ok(Some(item.id.clone()));
    }
    let crop_id = get_crop_id(catalog, content)?;
    let stage = get_crop_life_stage(catalog, cache, content)?;
    Ok(Some(match stage.image_suffix() {
        None => crop_id.to_string(),
        Some(suffix) => format!("{crop_id}-{suffix}"),
    }))
}
