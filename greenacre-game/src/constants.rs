//! Centralized balance and tuning constants for Greenacre game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Field layout -------------------------------------------------------------
pub const INITIAL_FIELD_WIDTH: usize = 6;
pub const INITIAL_FIELD_HEIGHT: usize = 10;

// Player start -------------------------------------------------------------
pub const STARTING_MONEY_CENTS: i64 = 50_000;
pub const INITIAL_COW_PEN_CAPACITY: u32 = 10;

// Cow generation -----------------------------------------------------------
pub const COW_STARTING_WEIGHT_BASE: f64 = 1_800.0;
pub const COW_STARTING_WEIGHT_VARIANCE: f64 = 200.0;
pub const MALE_COW_WEIGHT_MULTIPLIER: f64 = 1.25;
pub const COW_WEIGHT_MULTIPLIER_MINIMUM: f64 = 0.5;
pub const COW_WEIGHT_MULTIPLIER_MAXIMUM: f64 = 1.5;

// Cow milking --------------------------------------------------------------
// Rates are days between milkings; a lower rate milks more often.
pub const COW_MILK_RATE_SLOWEST: f64 = 7.0;
pub const COW_MILK_RATE_FASTEST: f64 = 1.0;
pub const MILK_TIER_MID_HAPPINESS: f64 = 1.0 / 3.0;
pub const MILK_TIER_TOP_HAPPINESS: f64 = 2.0 / 3.0;

// Cow valuation ------------------------------------------------------------
pub const COW_MAXIMUM_AGE_VALUE_DROPOFF: u32 = 100;
pub const COW_MAXIMUM_VALUE_MULTIPLIER: f64 = 1.0;
pub const COW_MINIMUM_VALUE_MULTIPLIER: f64 = 0.5;

// Market tuning ------------------------------------------------------------
pub const PRICE_CRASH_MULTIPLIER: f64 = 0.5;
pub const PRICE_SURGE_MULTIPLIER: f64 = 1.5;
pub const PRICE_FLUCTUATION_FLOOR: f64 = 0.5;
pub const PRICE_FLUCTUATION_CEILING: f64 = 1.5;
pub const PRICE_EVENT_STANDARD_DURATION_DECREASE: u32 = 2;
