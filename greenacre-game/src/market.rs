//! Price events and per-item value adjustments.
//!
//! Adjustments are regenerated once per in-game day by the external tick:
//! every fluctuating item receives exactly one multiplier, with active
//! crashes and surges pinning the multiplier before random fluctuation
//! applies. Items that never fluctuate get no entry and default to 1.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cache::SimCache;
use crate::catalog::{Catalog, Item};
use crate::constants::{
    PRICE_CRASH_MULTIPLIER, PRICE_EVENT_STANDARD_DURATION_DECREASE, PRICE_FLUCTUATION_CEILING,
    PRICE_FLUCTUATION_FLOOR, PRICE_SURGE_MULTIPLIER,
};
use crate::crop::{get_crop_lifecycle_duration, is_item_a_grown_crop};
use crate::error::EngineError;
use crate::money::{to_cents, to_dollars};

/// Per-item value multipliers for the current day, keyed by item id.
pub type ValueAdjustments = BTreeMap<String, f64>;

/// A scheduled crash or surge affecting one item for a limited time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEvent {
    pub item_id: String,
    /// Decremented once per day by the external tick; the event ends at 0.
    pub days_remaining: u32,
}

/// Active price events keyed by item id; presence signals "active".
pub type PriceEvents = BTreeMap<String, PriceEvent>;

/// Generate the day's value adjustments.
///
/// Fluctuating items under an active crash get exactly 0.5, under an active
/// surge exactly 1.5, and otherwise a uniform multiplier in [0.5, 1.5).
/// Non-fluctuating items receive no entry. Iteration follows the catalog's
/// stable id order so a seeded RNG reproduces the same adjustments.
pub fn generate_value_adjustments(
    catalog: &Catalog,
    price_crashes: &PriceEvents,
    price_surges: &PriceEvents,
    rng: &mut impl Rng,
) -> ValueAdjustments {
    let mut adjustments = ValueAdjustments::new();
    for item in catalog.items() {
        if !item.does_price_fluctuate {
            continue;
        }
        let multiplier = if price_crashes.contains_key(&item.id) {
            PRICE_CRASH_MULTIPLIER
        } else if price_surges.contains_key(&item.id) {
            PRICE_SURGE_MULTIPLIER
        } else {
            rng.gen_range(PRICE_FLUCTUATION_FLOOR..PRICE_FLUCTUATION_CEILING)
        };
        adjustments.insert(item.id.clone(), multiplier);
    }
    log::debug!(
        "regenerated value adjustments for {} fluctuating items",
        adjustments.len()
    );
    adjustments
}

/// Seed a new crash/surge for a crop, with duration tied to how long the
/// crop takes to mature: shorter-cycle crops get shorter price events.
#[must_use]
pub fn get_price_event_for_crop(cache: &SimCache, crop_item: &Item) -> PriceEvent {
    PriceEvent {
        item_id: crop_item.id.clone(),
        days_remaining: get_crop_lifecycle_duration(cache, crop_item)
            .saturating_sub(PRICE_EVENT_STANDARD_DURATION_DECREASE),
    }
}

/// Adjusted value of an item in cents, applying the day's multiplier when
/// the item fluctuates and an adjustment entry exists.
///
/// The multiplication rounds through integer cents, never raw floats.
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] for an unknown item id.
pub fn get_item_value(
    catalog: &Catalog,
    item_id: &str,
    adjustments: &ValueAdjustments,
) -> Result<i64, EngineError> {
    let item = catalog.item(item_id)?;
    let multiplier = if item.does_price_fluctuate {
        adjustments.get(item_id).copied().unwrap_or(1.0)
    } else {
        1.0
    };
    Ok(to_cents(to_dollars(item.value_cents) * multiplier))
}

/// Adjusted value keyed the other way around, for callers iterating an
/// adjustment map: missing entries default to multiplier 1.
///
/// # Errors
///
/// Returns [`EngineError::CatalogLookup`] for an unknown item id.
pub fn get_adjusted_item_value(
    catalog: &Catalog,
    adjustments: &ValueAdjustments,
    item_id: &str,
) -> Result<i64, EngineError> {
    let item = catalog.item(item_id)?;
    let multiplier = adjustments.get(item_id).copied().unwrap_or(1.0);
    Ok(to_cents(to_dollars(item.value_cents) * multiplier))
}

/// Uniform random pick over the catalog's final-stage grown-crop items,
/// used by the external tick to target a new crash or surge.
#[must_use]
pub fn get_random_crop_item<'a>(catalog: &'a Catalog, rng: &mut impl Rng) -> Option<&'a Item> {
    let grown: Vec<&Item> = catalog.items().filter(|item| is_item_a_grown_crop(item)).collect();
    if grown.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..grown.len());
    Some(grown[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn event(item_id: &str) -> PriceEvent {
        PriceEvent {
            item_id: item_id.to_string(),
            days_remaining: 3,
        }
    }

    #[test]
    fn adjustments_cover_exactly_the_fluctuating_items() {
        let catalog = Catalog::standard();
        let mut rng = SmallRng::seed_from_u64(11);
        let adjustments =
            generate_value_adjustments(&catalog, &PriceEvents::new(), &PriceEvents::new(), &mut rng);

        for item in catalog.items() {
            assert_eq!(
                adjustments.contains_key(&item.id),
                item.does_price_fluctuate,
                "item {}",
                item.id
            );
        }
        for multiplier in adjustments.values() {
            assert!((0.5..1.5).contains(multiplier));
        }
    }

    #[test]
    fn crash_and_surge_pin_multipliers() {
        let catalog = Catalog::standard();
        let mut rng = SmallRng::seed_from_u64(11);
        let crashes = PriceEvents::from([("carrot".to_string(), event("carrot"))]);
        let surges = PriceEvents::from([
            ("carrot".to_string(), event("carrot")),
            ("pumpkin".to_string(), event("pumpkin")),
        ]);

        let adjustments = generate_value_adjustments(&catalog, &crashes, &surges, &mut rng);
        // Crash wins over a simultaneous surge.
        assert!((adjustments["carrot"] - 0.5).abs() < f64::EPSILON);
        assert!((adjustments["pumpkin"] - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn seeded_adjustments_are_reproducible() {
        let catalog = Catalog::standard();
        let mut a = SmallRng::seed_from_u64(0xFACE);
        let mut b = SmallRng::seed_from_u64(0xFACE);
        let first =
            generate_value_adjustments(&catalog, &PriceEvents::new(), &PriceEvents::new(), &mut a);
        let second =
            generate_value_adjustments(&catalog, &PriceEvents::new(), &PriceEvents::new(), &mut b);
        assert_eq!(first, second);
    }

    #[test]
    fn price_event_duration_follows_lifecycle() {
        let catalog = Catalog::standard();
        let cache = SimCache::new();
        // carrot lifecycle 5 days, standard decrease 2
        let carrot = catalog.item("carrot").unwrap();
        let event = get_price_event_for_crop(&cache, carrot);
        assert_eq!(event.item_id, "carrot");
        assert_eq!(event.days_remaining, 3);
        // pumpkin lifecycle 8 days
        let pumpkin = catalog.item("pumpkin").unwrap();
        assert_eq!(get_price_event_for_crop(&cache, pumpkin).days_remaining, 6);
    }

    #[test]
    fn item_value_applies_multiplier_through_cents() {
        let catalog = Catalog::standard();
        let adjustments = ValueAdjustments::from([("carrot".to_string(), 1.5)]);
        // carrot base 750 cents
        assert_eq!(get_item_value(&catalog, "carrot", &adjustments).unwrap(), 1_125);
        // milk never fluctuates, even with a stray entry
        let stray = ValueAdjustments::from([("milk-1".to_string(), 1.5)]);
        assert_eq!(get_item_value(&catalog, "milk-1", &stray).unwrap(), 4_000);
        // missing entry defaults to 1
        assert_eq!(
            get_item_value(&catalog, "carrot", &ValueAdjustments::new()).unwrap(),
            750
        );
    }

    #[test]
    fn adjusted_item_value_defaults_missing_keys_to_one() {
        let catalog = Catalog::standard();
        let adjustments = ValueAdjustments::from([("pumpkin".to_string(), 0.5)]);
        assert_eq!(
            get_adjusted_item_value(&catalog, &adjustments, "pumpkin").unwrap(),
            625
        );
        assert_eq!(
            get_adjusted_item_value(&catalog, &adjustments, "carrot").unwrap(),
            750
        );
        assert!(get_adjusted_item_value(&catalog, &adjustments, "plutonium").is_err());
    }

    #[test]
    fn random_crop_pick_only_returns_grown_crops() {
        let catalog = Catalog::standard();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..50 {
            let item = get_random_crop_item(&catalog, &mut rng).unwrap();
            assert!(is_item_a_grown_crop(item), "picked {}", item.id);
        }
    }
}
