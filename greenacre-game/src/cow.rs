//! Cow generation and valuation.
//!
//! Cows are generated at purchase time from an injected RNG; every derived
//! attribute (weight, milk tier, milk rate, market value) is a pure
//! function of the cow's current state. Care and milking mutations happen
//! in the host's handler layer.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{MILK_GOLD_STAR, MILK_PLAIN, MILK_PREMIUM};
use crate::constants::{
    COW_MAXIMUM_AGE_VALUE_DROPOFF, COW_MAXIMUM_VALUE_MULTIPLIER, COW_MILK_RATE_FASTEST,
    COW_MILK_RATE_SLOWEST, COW_MINIMUM_VALUE_MULTIPLIER, COW_STARTING_WEIGHT_BASE,
    COW_STARTING_WEIGHT_VARIANCE, COW_WEIGHT_MULTIPLIER_MAXIMUM, COW_WEIGHT_MULTIPLIER_MINIMUM,
    MALE_COW_WEIGHT_MULTIPLIER, MILK_TIER_MID_HAPPINESS, MILK_TIER_TOP_HAPPINESS,
};
use crate::error::EngineError;
use crate::money::to_cents;
use crate::numbers::{clamp_number, round_f64_to_i32, scale_number, u32_to_f64};
use crate::state::GameState;

/// Cow gender; only females produce milk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

const GENDERS: [Gender; 2] = [Gender::Male, Gender::Female];

/// Coat color, chosen uniformly at generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CowColor {
    Blue,
    Brown,
    Green,
    Orange,
    Purple,
    White,
    Yellow,
}

impl CowColor {
    pub const ALL: [Self; 7] = [
        Self::Blue,
        Self::Brown,
        Self::Green,
        Self::Orange,
        Self::Purple,
        Self::White,
        Self::Yellow,
    ];
}

impl fmt::Display for CowColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blue => "blue",
            Self::Brown => "brown",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::White => "white",
            Self::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

// Friendly names assigned at generation.
const COW_NAMES: [&str; 24] = [
    "Apple", "Apricot", "Avocado", "Banana", "Blackberry", "Blueberry", "Cantaloupe", "Cherry",
    "Clementine", "Fig", "Grape", "Guava", "Kiwi", "Lemon", "Lime", "Mango", "Nectarine", "Olive",
    "Papaya", "Peach", "Pear", "Plum", "Raspberry", "Strawberry",
];

/// A cow owned by (or offered to) the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cow {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub color: CowColor,
    pub base_weight: i32,
    /// Scaled by feeding/care events, bounded to the configured range.
    pub weight_multiplier: f64,
    pub days_old: u32,
    pub days_since_milking: u32,
    /// Always in [0, 1].
    pub happiness: f64,
    /// Reset each day by the external tick.
    pub happiness_boosts_today: u32,
}

impl Cow {
    /// Verify the invariants the handler layer must maintain.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] when happiness leaves
    /// [0, 1] or the weight multiplier leaves its configured bounds.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.happiness) {
            log::warn!("cow {} happiness out of range: {}", self.id, self.happiness);
            return Err(EngineError::InvariantViolation {
                what: "cow happiness must be within [0, 1]",
                value: self.happiness.to_string(),
            });
        }
        let bounds = COW_WEIGHT_MULTIPLIER_MINIMUM..=COW_WEIGHT_MULTIPLIER_MAXIMUM;
        if !bounds.contains(&self.weight_multiplier) {
            log::warn!(
                "cow {} weight multiplier out of range: {}",
                self.id,
                self.weight_multiplier
            );
            return Err(EngineError::InvariantViolation {
                what: "cow weight multiplier outside configured bounds",
                value: self.weight_multiplier.to_string(),
            });
        }
        Ok(())
    }
}

/// Overrides applied on top of generated defaults; a present field always
/// wins over the generated value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CowOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CowColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_weight: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_old: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_since_milking: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happiness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happiness_boosts_today: Option<u32>,
}

fn generate_cow_id(rng: &mut impl Rng) -> String {
    // 128 random bits; collision-resistant for a single session.
    let hi: u64 = rng.next_u64();
    let lo: u64 = rng.next_u64();
    format!("{hi:016x}{lo:016x}")
}

/// Generate a friendly cow.
///
/// Gender defaults to a uniform choice; base weight is uniform in
/// `[base × gender_mult − variance, base × gender_mult + variance)`;
/// color and name are uniform picks. Any field present in `options`
/// overrides the generated default.
pub fn generate_cow(rng: &mut impl Rng, options: &CowOptions) -> Cow {
    let gender = options.gender.unwrap_or_else(|| {
        *GENDERS.choose(rng).unwrap_or(&Gender::Female)
    });

    let gender_multiplier = match gender {
        Gender::Male => MALE_COW_WEIGHT_MULTIPLIER,
        Gender::Female => 1.0,
    };
    let base_weight = options.base_weight.unwrap_or_else(|| {
        let variance = rng.gen_range(0.0..COW_STARTING_WEIGHT_VARIANCE * 2.0);
        round_f64_to_i32(
            COW_STARTING_WEIGHT_BASE * gender_multiplier - COW_STARTING_WEIGHT_VARIANCE + variance,
        )
    });

    let color = options.color.unwrap_or_else(|| {
        *CowColor::ALL.choose(rng).unwrap_or(&CowColor::White)
    });
    let name = options.name.clone().unwrap_or_else(|| {
        COW_NAMES
            .choose(rng)
            .copied()
            .unwrap_or("Apple")
            .to_string()
    });
    let id = options.id.clone().unwrap_or_else(|| generate_cow_id(rng));

    Cow {
        id,
        name,
        gender,
        color,
        base_weight,
        weight_multiplier: options.weight_multiplier.unwrap_or(1.0),
        days_old: options.days_old.unwrap_or(1),
        days_since_milking: options.days_since_milking.unwrap_or(0),
        happiness: options.happiness.unwrap_or(0.0),
        happiness_boosts_today: options.happiness_boosts_today.unwrap_or(0),
    }
}

/// Current weight: base weight scaled by the care multiplier.
#[must_use]
pub fn get_cow_weight(cow: &Cow) -> i32 {
    round_f64_to_i32(f64::from(cow.base_weight) * cow.weight_multiplier)
}

/// Milk item id produced at the cow's happiness tier.
///
/// Tier boundaries are half-open on the low end: happiness of exactly 1/3
/// produces the mid tier.
#[must_use]
pub fn get_cow_milk_item(cow: &Cow) -> &'static str {
    if cow.happiness < MILK_TIER_MID_HAPPINESS {
        MILK_PLAIN
    } else if cow.happiness < MILK_TIER_TOP_HAPPINESS {
        MILK_GOLD_STAR
    } else {
        MILK_PREMIUM
    }
}

/// Days between milkings.
///
/// Females scale linearly from the weight-multiplier bounds onto the
/// slowest/fastest rate bounds (a cow at maximum weight multiplier milks
/// fastest, i.e. the lowest rate). Males cannot be milked and return
/// `f64::INFINITY`.
#[must_use]
pub fn get_cow_milk_rate(cow: &Cow) -> f64 {
    match cow.gender {
        Gender::Female => scale_number(
            cow.weight_multiplier,
            COW_WEIGHT_MULTIPLIER_MINIMUM,
            COW_WEIGHT_MULTIPLIER_MAXIMUM,
            COW_MILK_RATE_SLOWEST,
            COW_MILK_RATE_FASTEST,
        ),
        Gender::Male => f64::INFINITY,
    }
}

/// Market value in cents.
///
/// Value decreases monotonically from the maximum multiplier at one day
/// old down to the floor multiplier at the age dropoff, then stays flat.
#[must_use]
pub fn get_cow_value(cow: &Cow) -> i64 {
    let age_multiplier = clamp_number(
        scale_number(
            u32_to_f64(cow.days_old),
            1.0,
            u32_to_f64(COW_MAXIMUM_AGE_VALUE_DROPOFF),
            COW_MAXIMUM_VALUE_MULTIPLIER,
            COW_MINIMUM_VALUE_MULTIPLIER,
        ),
        COW_MINIMUM_VALUE_MULTIPLIER,
        COW_MAXIMUM_VALUE_MULTIPLIER,
    );
    to_cents(f64::from(get_cow_weight(cow)) * age_multiplier)
}

/// Whether the player can buy a cow at `cow_value_cents`: money covers the
/// price and the pen has space.
#[must_use]
pub fn can_purchase_cow(state: &GameState, cow_value_cents: i64) -> bool {
    let herd_size = u64::try_from(state.cows.len()).unwrap_or(u64::MAX);
    state.money_cents >= cow_value_cents && herd_size < u64::from(state.cow_pen_capacity)
}
