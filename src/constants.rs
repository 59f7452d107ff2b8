//! Stable application-wide constants.
//!
//! Values here are the built-in defaults of the journey planner. They are used
//! when an instance does not configure a parameter, and as fallbacks for the
//! env-var-based overrides in [`DefaultParameters::from_env`](crate::defaults::DefaultParameters::from_env).
//! Instances are created from these values but are not updated when they change.

use crate::models::JourneyOrder;

// --- Process settings (used when env vars are absent) ---

/// Directory holding one JSON configuration file per instance.
pub const DEFAULT_INSTANCES_DIR: &str = "/etc/jormungandr.d";
/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "planner_params=info";
/// Prefix of the env vars overriding entries of the default parameter table.
pub const PARAMETER_ENV_PREFIX: &str = "PLANNER_";

// --- Maximum approach durations to public transport (seconds) ---

pub const DEFAULT_MAX_WALKING_DURATION_TO_PT: u32 = 15 * 60;
pub const DEFAULT_MAX_BIKE_DURATION_TO_PT: u32 = 15 * 60;
pub const DEFAULT_MAX_BSS_DURATION_TO_PT: u32 = 15 * 60;
pub const DEFAULT_MAX_CAR_DURATION_TO_PT: u32 = 30 * 60;

// --- Speeds (meters per second) ---

pub const DEFAULT_WALKING_SPEED: f64 = 1.12;
pub const DEFAULT_BIKE_SPEED: f64 = 4.1;
pub const DEFAULT_BSS_SPEED: f64 = 4.1;
pub const DEFAULT_CAR_SPEED: f64 = 11.11;

// --- Journey search ---

pub const DEFAULT_MAX_NB_TRANSFERS: u32 = 10;
pub const DEFAULT_JOURNEY_ORDER: JourneyOrder = JourneyOrder::ArrivalTime;

// --- Fallback mode suggestion thresholds (seconds) ---
// A journey using a non-walking fallback mode is only worth proposing when
// the public transport part and the fallback part last at least this long.

pub const DEFAULT_DESTINEO_MIN_TC_WITH_CAR: u32 = 5 * 60;
pub const DEFAULT_DESTINEO_MIN_TC_WITH_BIKE: u32 = 5 * 60;
pub const DEFAULT_DESTINEO_MIN_TC_WITH_BSS: u32 = 5 * 60;
pub const DEFAULT_DESTINEO_MIN_BIKE: u32 = 4 * 60;
/// 4 minutes on the bike plus the time to pick up and put back the bike-share.
pub const DEFAULT_DESTINEO_MIN_BSS: u32 = 4 * 60 + 3 * 60;
pub const DEFAULT_DESTINEO_MIN_CAR: u32 = 5 * 60;

// --- Journey filtering ---

/// A journey this many times longer than the earliest one is removed.
pub const DEFAULT_FACTOR_TOO_LONG_JOURNEY: u32 = 4;
/// Journeys shorter than this (seconds) are always kept, whatever the factor.
pub const DEFAULT_MIN_DURATION_TOO_LONG_JOURNEY: u32 = 15 * 60;

// --- Traveler profile construction defaults ---
// Used by `TravelerProfileBuilder` for fields a profile entry does not set.
// Note the bike speed is lower than DEFAULT_BIKE_SPEED.

pub const PROFILE_DEFAULT_WALKING_SPEED: f64 = 1.12;
pub const PROFILE_DEFAULT_BIKE_SPEED: f64 = 3.33;
pub const PROFILE_DEFAULT_CAR_SPEED: f64 = 11.11;
pub const PROFILE_DEFAULT_MAX_DURATION_TO_PT: u32 = 15 * 60;
