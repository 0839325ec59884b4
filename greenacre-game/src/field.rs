//! Plot and field model.
//!
//! The field is a fixed-size 2D grid of independently-owned plot cells.
//! Scans over the grid are memoized through [`SimCache`] keyed on a content
//! hash of the field snapshot plus the predicate's identity token; day-tick
//! mutation happens in the host's handler layer, which hands the engine a
//! fresh snapshot each call.

use serde::{Deserialize, Serialize};

use crate::cache::{self, SimCache};
use crate::catalog::{Catalog, ItemType};
use crate::error::EngineError;

/// A grid coordinate; may be out of field bounds for neighborhood queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// Mutable crop progress carried by a planted plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropState {
    #[serde(default)]
    pub days_old: u32,
    /// Fractional watered-days accumulate when a plot is partially watered.
    #[serde(default)]
    pub days_watered: f64,
    #[serde(default)]
    pub is_fertilized: bool,
    #[serde(default)]
    pub was_watered_today: bool,
}

/// Content of one field cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotContent {
    pub item_id: String,
    /// Present when the content is a planted crop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropState>,
}

impl PlotContent {
    /// Plot content for a non-crop placement (sprinkler, scarecrow, ...).
    #[must_use]
    pub fn from_item_id(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            crop: None,
        }
    }

    /// Freshly planted crop content: zero days old, never watered.
    #[must_use]
    pub fn new_crop(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            crop: Some(CropState::default()),
        }
    }
}

/// The planted field: `rows × columns` independently-owned cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub plots: Vec<Vec<Option<PlotContent>>>,
}

impl Field {
    /// Fresh field of the given dimensions with every plot empty.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            plots: vec![vec![None; columns]; rows],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.plots.len()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.plots.first().map_or(0, Vec::len)
    }

    /// Borrow the plot at `coord`, or `None` when out of bounds or empty.
    #[must_use]
    pub fn plot(&self, coord: Coord) -> Option<&PlotContent> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        self.plots
            .get(coord.y.unsigned_abs() as usize)?
            .get(coord.x.unsigned_abs() as usize)?
            .as_ref()
    }

    /// Whether `coord` addresses a cell inside the grid.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.y.unsigned_abs() as usize) < self.rows()
            && (coord.x.unsigned_abs() as usize) < self.columns()
    }
}

/// Square neighborhood of coordinates centered at `(center_x, center_y)`.
///
/// Returns a `(2r+1) × (2r+1)` ordered grid. Coordinates may fall outside
/// the field; bounds-checking is the caller's responsibility.
#[must_use]
pub fn get_range_coords(range_size: u32, center_x: i32, center_y: i32) -> Vec<Vec<Coord>> {
    let square = 2 * range_size as i32 + 1;
    let start_x = center_x - range_size as i32;
    let start_y = center_y - range_size as i32;
    (0..square)
        .map(|dy| {
            (0..square)
                .map(|dx| Coord {
                    x: start_x + dx,
                    y: start_y + dy,
                })
                .collect()
        })
        .collect()
}

/// Null-safe check that a plot holds a planted crop.
///
/// Unknown item ids resolve to `false`; type resolution goes through the
/// catalog, so a sprinkler plot is not a crop even though it occupies a cell.
#[must_use]
pub fn does_plot_contain_crop(catalog: &Catalog, plot: Option<&PlotContent>) -> bool {
    plot.is_some_and(|content| {
        catalog
            .get(&content.item_id)
            .is_some_and(|item| item.item_type == ItemType::Crop)
    })
}

/// Resolve a plot content's catalog type.
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] when the plot references an id
/// the catalog has never heard of.
pub fn get_plot_content_type(
    catalog: &Catalog,
    plot: &PlotContent,
) -> Result<ItemType, EngineError> {
    Ok(catalog.item(&plot.item_id)?.item_type)
}

/// A field-scan predicate with a stable identity token.
///
/// Predicates participate in cache keys by token, never by structural
/// serialization; two predicates with distinct tokens never share a cache
/// line even when they behave identically.
#[derive(Clone, Copy)]
pub struct PlotPredicate {
    token: &'static str,
    test: fn(&Catalog, Option<&PlotContent>) -> bool,
}

impl PlotPredicate {
    #[must_use]
    pub const fn new(
        token: &'static str,
        test: fn(&Catalog, Option<&PlotContent>) -> bool,
    ) -> Self {
        Self { token, test }
    }

    #[must_use]
    pub const fn token(&self) -> &'static str {
        self.token
    }

    #[must_use]
    pub fn evaluate(&self, catalog: &Catalog, plot: Option<&PlotContent>) -> bool {
        (self.test)(catalog, plot)
    }
}

impl std::fmt::Debug for PlotPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotPredicate")
            .field("token", &self.token)
            .finish()
    }
}

/// Matches plots holding a planted crop.
pub const PLOT_CONTAINS_CROP: PlotPredicate =
    PlotPredicate::new("contains-crop", does_plot_contain_crop);

fn plot_is_fertilized(_catalog: &Catalog, plot: Option<&PlotContent>) -> bool {
    plot.and_then(|content| content.crop.as_ref())
        .is_some_and(|crop| crop.is_fertilized)
}

/// Matches planted crops that have been fertilized.
pub const PLOT_IS_FERTILIZED: PlotPredicate =
    PlotPredicate::new("is-fertilized", plot_is_fertilized);

fn scan_key(field: &Field, predicate: PlotPredicate) -> u64 {
    cache::composite_key(&[
        cache::content_key(field),
        cache::hash_bytes(predicate.token().as_bytes()),
    ])
}

/// First non-empty plot content matching `predicate`, in row-major order.
///
/// Empty cells are passed to the predicate (it is null-safe) but never
/// produce a hit. Results are memoized per (field snapshot, predicate token).
#[must_use]
pub fn find_in_field(
    catalog: &Catalog,
    cache: &SimCache,
    field: &Field,
    predicate: PlotPredicate,
) -> Option<PlotContent> {
    cache.field_find(scan_key(field, predicate), || {
        field.plots.iter().flatten().find_map(|plot| {
            if predicate.evaluate(catalog, plot.as_ref()) {
                plot.clone()
            } else {
                None
            }
        })
    })
}

/// All non-empty plot contents matching `predicate`, flattened row-major.
///
/// Memoized the same way as [`find_in_field`].
#[must_use]
pub fn get_crops(
    catalog: &Catalog,
    cache: &SimCache,
    field: &Field,
    predicate: PlotPredicate,
) -> Vec<PlotContent> {
    cache.field_filter(scan_key(field, predicate), || {
        field
            .plots
            .iter()
            .flatten()
            .filter(|plot| predicate.evaluate(catalog, plot.as_ref()))
            .filter_map(Clone::clone)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::standard()
    }

    #[test]
    fn new_field_is_empty_with_requested_dimensions() {
        let field = Field::new(10, 6);
        assert_eq!(field.rows(), 10);
        assert_eq!(field.columns(), 6);
        assert!(field.plots.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn range_coords_center_and_shape() {
        let coords = get_range_coords(1, 2, 3);
        assert_eq!(coords.len(), 3);
        assert!(coords.iter().all(|row| row.len() == 3));
        assert_eq!(coords[0][0], Coord { x: 1, y: 2 });
        assert_eq!(coords[1][1], Coord { x: 2, y: 3 });
        assert_eq!(coords[2][2], Coord { x: 3, y: 4 });
    }

    #[test]
    fn range_coords_may_go_out_of_bounds() {
        let coords = get_range_coords(1, 0, 0);
        assert_eq!(coords[0][0], Coord { x: -1, y: -1 });
    }

    #[test]
    fn plot_containment_is_null_safe_and_type_aware() {
        let catalog = catalog();
        assert!(!does_plot_contain_crop(&catalog, None));

        let crop = PlotContent::new_crop("carrot");
        assert!(does_plot_contain_crop(&catalog, Some(&crop)));

        let sprinkler = PlotContent::from_item_id("sprinkler");
        assert!(!does_plot_contain_crop(&catalog, Some(&sprinkler)));

        let bogus = PlotContent::from_item_id("plutonium");
        assert!(!does_plot_contain_crop(&catalog, Some(&bogus)));
    }

    #[test]
    fn find_in_field_scans_row_major() {
        let catalog = catalog();
        let cache = SimCache::new();
        let mut field = Field::new(3, 3);
        field.plots[1][2] = Some(PlotContent::new_crop("pumpkin"));
        field.plots[2][0] = Some(PlotContent::new_crop("carrot"));

        let found = find_in_field(&catalog, &cache, &field, PLOT_CONTAINS_CROP).unwrap();
        assert_eq!(found.item_id, "pumpkin");
    }

    #[test]
    fn field_scans_do_not_serve_stale_results_after_mutation() {
        let catalog = catalog();
        let cache = SimCache::new();
        let mut field = Field::new(2, 2);
        assert!(find_in_field(&catalog, &cache, &field, PLOT_CONTAINS_CROP).is_none());

        field.plots[0][0] = Some(PlotContent::new_crop("spinach"));
        let found = find_in_field(&catalog, &cache, &field, PLOT_CONTAINS_CROP);
        assert_eq!(found.unwrap().item_id, "spinach");
    }

    #[test]
    fn distinct_predicate_tokens_never_share_cache_lines() {
        let catalog = catalog();
        let cache = SimCache::new();
        let mut field = Field::new(2, 2);
        field.plots[0][1] = Some(PlotContent::new_crop("carrot"));

        let all = get_crops(&catalog, &cache, &field, PLOT_CONTAINS_CROP);
        let fertilized = get_crops(&catalog, &cache, &field, PLOT_IS_FERTILIZED);
        assert_eq!(all.len(), 1);
        assert!(fertilized.is_empty());
    }
}
