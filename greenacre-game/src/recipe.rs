//! Recipe feasibility and display sorting.
//!
//! Both queries run once per render in the host shell, so they memoize
//! through [`SimCache`]: feasibility per (recipe id, inventory snapshot),
//! sort order per id list.

use crate::cache::{self, SimCache};
use crate::catalog::{Catalog, Item, ItemType, Recipe};
use crate::state::InventoryEntry;

// Item categories whose values display highest-first.
const TYPES_TO_SHOW_IN_REVERSE: [ItemType; 1] = [ItemType::Milk];

/// Whether every ingredient requirement is satisfiable from `inventory`.
///
/// A missing ingredient fails the check outright. Results are memoized per
/// (recipe id, inventory snapshot).
#[must_use]
pub fn can_make_recipe(cache: &SimCache, recipe: &Recipe, inventory: &[InventoryEntry]) -> bool {
    let key = cache::composite_key(&[
        cache::hash_bytes(recipe.id.as_bytes()),
        cache::content_key(&inventory),
    ]);
    cache.recipe_check(key, || {
        recipe.ingredients.iter().all(|(item_id, required)| {
            inventory
                .iter()
                .find(|entry| entry.item_id == *item_id)
                .is_some_and(|entry| entry.quantity >= *required)
        })
    })
}

fn sort_rank(item: &Item) -> (u8, i64) {
    let non_crop = u8::from(item.item_type != ItemType::Crop);
    let value = if TYPES_TO_SHOW_IN_REVERSE.contains(&item.item_type) {
        -item.value_cents
    } else {
        item.value_cents
    };
    (non_crop, value)
}

/// Stable sort for display: crops before everything else, ascending value
/// within each group, except reverse-display categories (milk) descending.
///
/// The id ordering is memoized per input id list; unknown ids keep their
/// relative position at the end of the ordering.
#[must_use]
pub fn sort_items(catalog: &Catalog, cache: &SimCache, items: &[Item]) -> Vec<Item> {
    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    let order = cache.sorted_id_order(cache::content_key(&ids), || {
        // Rank from the immutable catalog entry, so the id-keyed memo can
        // never go stale against a caller-side copy.
        let mut sorted: Vec<&Item> = items
            .iter()
            .filter_map(|item| catalog.get(&item.id))
            .collect();
        sorted.sort_by_key(|item| sort_rank(item));
        let mut id_order: Vec<String> = sorted.iter().map(|item| item.id.clone()).collect();
        id_order.extend(
            items
                .iter()
                .filter(|item| catalog.get(&item.id).is_none())
                .map(|item| item.id.clone()),
        );
        id_order
    });

    order
        .iter()
        .filter_map(|id| items.iter().find(|item| item.id == *id).cloned())
        .collect()
}
