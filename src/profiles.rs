//! Traveler profiles: named bundles of journey-request overrides.

use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{FallbackMode, JourneyCategory, ParameterName, ParameterValue};
use derive_builder::Builder;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Journey-request arguments, keyed by parameter name.
pub type RequestArgs = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct TravelerProfile {
    walking_speed: f64,
    bike_speed: f64,
    bss_speed: Option<f64>,
    car_speed: f64,
    max_duration_to_pt: u32,
    first_section_mode: Vec<FallbackMode>,
    last_section_mode: Vec<FallbackMode>,
    wheelchair: bool,
    keolis_type_map: BTreeMap<JourneyCategory, Vec<String>>,
}

impl TravelerProfile {
    pub fn builder() -> TravelerProfileBuilder {
        TravelerProfileBuilder::default()
    }

    pub fn walking_speed(&self) -> f64 {
        self.walking_speed
    }

    pub fn bike_speed(&self) -> f64 {
        self.bike_speed
    }

    /// Bike-share speed: the bike speed unless the profile sets its own.
    pub fn bss_speed(&self) -> f64 {
        self.bss_speed.unwrap_or(self.bike_speed)
    }

    pub fn car_speed(&self) -> f64 {
        self.car_speed
    }

    pub fn max_duration_to_pt(&self) -> u32 {
        self.max_duration_to_pt
    }

    pub fn first_section_mode(&self) -> &[FallbackMode] {
        &self.first_section_mode
    }

    pub fn last_section_mode(&self) -> &[FallbackMode] {
        &self.last_section_mode
    }

    pub fn wheelchair(&self) -> bool {
        self.wheelchair
    }

    pub fn keolis_type_map(&self) -> &BTreeMap<JourneyCategory, Vec<String>> {
        &self.keolis_type_map
    }

    /// Ranking criteria used to pick journeys of `category`, best first.
    pub fn criteria(&self, category: JourneyCategory) -> &[String] {
        self.keolis_type_map
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Overwrite the request keys this profile models. Other keys are left
    /// as they are; applying the same profile twice is the same as once.
    pub fn override_params(&self, args: &mut RequestArgs) {
        args.insert("walking_speed".into(), Value::from(self.walking_speed));
        args.insert("bike_speed".into(), Value::from(self.bike_speed));
        args.insert("bss_speed".into(), Value::from(self.bss_speed()));
        args.insert("car_speed".into(), Value::from(self.car_speed));
        args.insert(
            "max_duration_to_pt".into(),
            Value::from(self.max_duration_to_pt),
        );
        args.insert(
            "origin_mode".into(),
            modes_to_json(&self.first_section_mode),
        );
        args.insert(
            "destination_mode".into(),
            modes_to_json(&self.last_section_mode),
        );
        args.insert("wheelchair".into(), Value::from(self.wheelchair));

        tracing::debug!(
            "Applied traveler profile (walking {} m/s, max {}s to pt, wheelchair {})",
            self.walking_speed,
            self.max_duration_to_pt,
            self.wheelchair
        );
    }

    fn from_args(args: ProfileArgs) -> Result<Self> {
        let speeds = [
            ("walking_speed", Some(args.walking_speed)),
            ("bike_speed", Some(args.bike_speed)),
            ("bss_speed", args.bss_speed),
            ("car_speed", Some(args.car_speed)),
        ];
        for (field, speed) in speeds {
            if let Some(v) = speed {
                if !v.is_finite() || v <= 0.0 {
                    return Err(AppError::Config(format!(
                        "{} must be a positive speed, got {}",
                        field, v
                    )));
                }
            }
        }

        let (first_section_mode, last_section_mode) =
            if args.first_and_last_section_mode.is_empty() {
                (args.first_section_mode, args.last_section_mode)
            } else {
                (
                    args.first_and_last_section_mode.clone(),
                    args.first_and_last_section_mode,
                )
            };

        Ok(TravelerProfile {
            walking_speed: args.walking_speed,
            bike_speed: args.bike_speed,
            bss_speed: args.bss_speed,
            car_speed: args.car_speed,
            max_duration_to_pt: args.max_duration_to_pt,
            first_section_mode,
            last_section_mode,
            wheelchair: args.wheelchair,
            keolis_type_map: args.keolis_type_map,
        })
    }
}

impl Serialize for TravelerProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'p> {
            walking_speed: f64,
            bike_speed: f64,
            bss_speed: f64,
            car_speed: f64,
            max_duration_to_pt: u32,
            first_section_mode: &'p [FallbackMode],
            last_section_mode: &'p [FallbackMode],
            wheelchair: bool,
            keolis_type_map: &'p BTreeMap<JourneyCategory, Vec<String>>,
        }

        Repr {
            walking_speed: self.walking_speed,
            bike_speed: self.bike_speed,
            bss_speed: self.bss_speed(),
            car_speed: self.car_speed,
            max_duration_to_pt: self.max_duration_to_pt,
            first_section_mode: &self.first_section_mode,
            last_section_mode: &self.last_section_mode,
            wheelchair: self.wheelchair,
            keolis_type_map: &self.keolis_type_map,
        }
        .serialize(serializer)
    }
}

fn modes_to_json(modes: &[FallbackMode]) -> Value {
    Value::Array(modes.iter().map(|m| Value::from(m.as_str())).collect())
}

/// Constructor arguments of a [`TravelerProfile`]. Every builder owns its
/// own lists, so profiles never share section-mode or category storage.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "TravelerProfileBuilder",
    pattern = "owned",
    public,
    derive(Debug),
    build_fn(private, name = "build_args", error = "AppError")
)]
struct ProfileArgs {
    #[builder(default = "PROFILE_DEFAULT_WALKING_SPEED")]
    walking_speed: f64,

    #[builder(default = "PROFILE_DEFAULT_BIKE_SPEED")]
    bike_speed: f64,

    #[builder(setter(strip_option), default)]
    bss_speed: Option<f64>,

    #[builder(default = "PROFILE_DEFAULT_CAR_SPEED")]
    car_speed: f64,

    #[builder(default = "PROFILE_DEFAULT_MAX_DURATION_TO_PT")]
    max_duration_to_pt: u32,

    #[builder(default)]
    first_section_mode: Vec<FallbackMode>,

    #[builder(default)]
    last_section_mode: Vec<FallbackMode>,

    /// Takes precedence over the separate first/last lists when non-empty.
    #[builder(default)]
    first_and_last_section_mode: Vec<FallbackMode>,

    #[builder(default)]
    wheelchair: bool,

    #[builder(setter(custom), default)]
    keolis_type_map: BTreeMap<JourneyCategory, Vec<String>>,
}

impl TravelerProfileBuilder {
    pub fn criteria(mut self, category: JourneyCategory, criteria: &[&str]) -> Self {
        self.keolis_type_map
            .get_or_insert_with(BTreeMap::new)
            .insert(category, criteria.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Build the profile. Fails with [`AppError::Config`] on a non-positive
    /// or non-finite speed.
    pub fn build(self) -> Result<TravelerProfile> {
        TravelerProfile::from_args(self.build_args()?)
    }
}

/// Read-only registry of named traveler profiles.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<String, TravelerProfile>,
}

impl ProfileRegistry {
    /// Registry seeded with the ten built-in profiles.
    pub fn new() -> Result<Self> {
        Self::from_profiles(builtin_profiles()?)
    }

    /// Fails with [`AppError::Config`] if a name appears twice.
    pub fn from_profiles<I>(profiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, TravelerProfile)>,
    {
        let mut registered = HashMap::new();
        for (name, profile) in profiles {
            if registered.contains_key(&name) {
                return Err(AppError::Config(format!(
                    "duplicate traveler profile '{}'",
                    name
                )));
            }
            registered.insert(name, profile);
        }

        Ok(Self {
            profiles: registered,
        })
    }

    /// Exact-name lookup. Callers wanting a fallback must ask for
    /// `standard` themselves.
    pub fn lookup(&self, name: &str) -> Result<&TravelerProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| AppError::UnknownProfile(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Apply `profile` to a request and hand the request back.
pub fn apply_overrides(profile: &TravelerProfile, mut args: RequestArgs) -> RequestArgs {
    profile.override_params(&mut args);
    args
}

/// Request arguments seeded with `seed` (the default table, or the resolved
/// parameters of an instance), then overridden by `profile`.
pub fn build_request_args<I>(seed: I, profile: &TravelerProfile) -> RequestArgs
where
    I: IntoIterator<Item = (ParameterName, ParameterValue)>,
{
    let args: RequestArgs = seed
        .into_iter()
        .map(|(name, value)| (name.as_str().to_string(), value.to_json()))
        .collect();

    tracing::debug!("Seeded {} request args before applying profile", args.len());
    apply_overrides(profile, args)
}

fn with_bss_categories(builder: TravelerProfileBuilder) -> TravelerProfileBuilder {
    builder
        .criteria(JourneyCategory::Rapid, &["best"])
        .criteria(
            JourneyCategory::Comfort,
            &["less_fallback_walk", "less_fallback_bss"],
        )
        .criteria(
            JourneyCategory::Healthy,
            &["non_pt_walk", "non_pt_bss", "comfort", "fastest"],
        )
}

fn with_walking_categories(builder: TravelerProfileBuilder) -> TravelerProfileBuilder {
    builder
        .criteria(JourneyCategory::Rapid, &["best"])
        .criteria(JourneyCategory::Comfort, &["less_fallback_walk"])
        .criteria(
            JourneyCategory::Healthy,
            &["non_pt_walk", "comfort", "fastest"],
        )
}

fn builtin_profiles() -> Result<Vec<(String, TravelerProfile)>> {
    use FallbackMode::{Bike, Bss, Car, Walking};

    let profiles = [
        (
            "standard",
            with_bss_categories(TravelerProfile::builder())
                .walking_speed(1.39)
                .bike_speed(3.33)
                .max_duration_to_pt(12 * 60)
                .first_and_last_section_mode(vec![Walking, Bss]),
        ),
        (
            "slow_walker",
            with_walking_categories(TravelerProfile::builder())
                .walking_speed(0.83)
                .max_duration_to_pt(20 * 60)
                .first_and_last_section_mode(vec![Walking]),
        ),
        (
            "fast_walker",
            with_bss_categories(TravelerProfile::builder())
                .walking_speed(1.67)
                .bike_speed(3.33)
                .max_duration_to_pt(20 * 60)
                .first_and_last_section_mode(vec![Walking, Bss]),
        ),
        (
            "stroller",
            with_walking_categories(TravelerProfile::builder())
                .walking_speed(1.11)
                .max_duration_to_pt(15 * 60)
                .first_and_last_section_mode(vec![Walking])
                .wheelchair(true),
        ),
        (
            "wheelchair",
            with_walking_categories(TravelerProfile::builder())
                .walking_speed(0.83)
                .max_duration_to_pt(20 * 60)
                .first_and_last_section_mode(vec![Walking])
                .wheelchair(true),
        ),
        (
            "luggage",
            with_walking_categories(TravelerProfile::builder())
                .walking_speed(1.11)
                .max_duration_to_pt(15 * 60)
                .first_and_last_section_mode(vec![Walking])
                .wheelchair(true),
        ),
        (
            "heels",
            with_bss_categories(TravelerProfile::builder())
                .walking_speed(1.11)
                .bike_speed(3.33)
                .max_duration_to_pt(15 * 60)
                .first_and_last_section_mode(vec![Walking, Bss]),
        ),
        (
            "scooter",
            with_walking_categories(TravelerProfile::builder())
                .walking_speed(2.22)
                .max_duration_to_pt(15 * 60)
                .first_and_last_section_mode(vec![Walking]),
        ),
        (
            "cyclist",
            TravelerProfile::builder()
                .walking_speed(1.39)
                .bike_speed(3.33)
                .max_duration_to_pt(12 * 60)
                .first_section_mode(vec![Walking, Bike])
                .last_section_mode(vec![Walking])
                .criteria(JourneyCategory::Rapid, &["best"])
                .criteria(
                    JourneyCategory::Comfort,
                    &["less_fallback_walk", "less_fallback_bss", "less_fallback_bike"],
                )
                .criteria(
                    JourneyCategory::Healthy,
                    &["non_pt_walk", "non_pt_bss", "non_pt_bike", "comfort", "fastest"],
                ),
        ),
        (
            "motorist",
            TravelerProfile::builder()
                .walking_speed(1.11)
                .car_speed(11.11)
                .max_duration_to_pt(15 * 60)
                .first_section_mode(vec![Walking, Car])
                .last_section_mode(vec![Walking])
                .criteria(JourneyCategory::Rapid, &["best"])
                .criteria(JourneyCategory::Comfort, &["car", "less_fallback_walk"])
                .criteria(
                    JourneyCategory::Healthy,
                    &["non_pt_walk", "comfort", "fastest"],
                ),
        ),
    ];

    profiles
        .into_iter()
        .map(|(name, builder)| Ok((name.to_string(), builder.build()?)))
        .collect()
}
