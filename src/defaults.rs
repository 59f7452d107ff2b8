//! The default parameter table.
//!
//! Built once at startup (from [`constants`](crate::constants), optionally
//! overridden through `PLANNER_*` env vars) and then only read. Consumers get
//! it by reference, typically through [`Config`](crate::config::Config).

use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{JourneyOrder, ParameterKind, ParameterName, ParameterValue};
use std::env::{self, VarError};

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultParameters {
    max_walking_duration_to_pt: u32,
    max_bike_duration_to_pt: u32,
    max_bss_duration_to_pt: u32,
    max_car_duration_to_pt: u32,
    walking_speed: f64,
    bike_speed: f64,
    bss_speed: f64,
    car_speed: f64,
    max_nb_transfers: u32,
    journey_order: JourneyOrder,
    destineo_min_tc_with_car: u32,
    destineo_min_tc_with_bike: u32,
    destineo_min_tc_with_bss: u32,
    destineo_min_bike: u32,
    destineo_min_bss: u32,
    destineo_min_car: u32,
    factor_too_long_journey: u32,
    min_duration_too_long_journey: u32,
}

impl Default for DefaultParameters {
    fn default() -> Self {
        Self {
            max_walking_duration_to_pt: DEFAULT_MAX_WALKING_DURATION_TO_PT,
            max_bike_duration_to_pt: DEFAULT_MAX_BIKE_DURATION_TO_PT,
            max_bss_duration_to_pt: DEFAULT_MAX_BSS_DURATION_TO_PT,
            max_car_duration_to_pt: DEFAULT_MAX_CAR_DURATION_TO_PT,
            walking_speed: DEFAULT_WALKING_SPEED,
            bike_speed: DEFAULT_BIKE_SPEED,
            bss_speed: DEFAULT_BSS_SPEED,
            car_speed: DEFAULT_CAR_SPEED,
            max_nb_transfers: DEFAULT_MAX_NB_TRANSFERS,
            journey_order: DEFAULT_JOURNEY_ORDER,
            destineo_min_tc_with_car: DEFAULT_DESTINEO_MIN_TC_WITH_CAR,
            destineo_min_tc_with_bike: DEFAULT_DESTINEO_MIN_TC_WITH_BIKE,
            destineo_min_tc_with_bss: DEFAULT_DESTINEO_MIN_TC_WITH_BSS,
            destineo_min_bike: DEFAULT_DESTINEO_MIN_BIKE,
            destineo_min_bss: DEFAULT_DESTINEO_MIN_BSS,
            destineo_min_car: DEFAULT_DESTINEO_MIN_CAR,
            factor_too_long_journey: DEFAULT_FACTOR_TOO_LONG_JOURNEY,
            min_duration_too_long_journey: DEFAULT_MIN_DURATION_TOO_LONG_JOURNEY,
        }
    }
}

impl DefaultParameters {
    /// Build the table from the built-in constants, letting any
    /// `PLANNER_<NAME>` env var replace the matching entry.
    pub fn from_env() -> Result<Self> {
        let mut params = Self::default();

        for name in ParameterName::ALL {
            let var = name.env_var();
            let raw = match env::var(&var) {
                Ok(raw) => raw,
                Err(VarError::NotPresent) => continue,
                Err(VarError::NotUnicode(_)) => {
                    return Err(AppError::Config(format!(
                        "Invalid {}: not valid UTF-8",
                        var
                    )));
                }
            };
            let value = parse_value(name, raw.trim())
                .map_err(|e| AppError::Config(format!("Invalid {}: {}", var, e)))?;
            params.set(name, value)?;
        }

        params.validate()?;
        Ok(params)
    }

    /// Look up a default by name. Unknown names are a programming error and
    /// fail with [`AppError::NotFound`].
    pub fn get(&self, name: &str) -> Result<ParameterValue> {
        let name: ParameterName = name
            .parse()
            .map_err(|_| AppError::NotFound(name.to_string()))?;
        Ok(self.value(name))
    }

    pub fn value(&self, name: ParameterName) -> ParameterValue {
        use ParameterValue::{Count, Duration, Order, Speed};

        match name {
            ParameterName::MaxWalkingDurationToPt => Duration(self.max_walking_duration_to_pt),
            ParameterName::MaxBikeDurationToPt => Duration(self.max_bike_duration_to_pt),
            ParameterName::MaxBssDurationToPt => Duration(self.max_bss_duration_to_pt),
            ParameterName::MaxCarDurationToPt => Duration(self.max_car_duration_to_pt),
            ParameterName::WalkingSpeed => Speed(self.walking_speed),
            ParameterName::BikeSpeed => Speed(self.bike_speed),
            ParameterName::BssSpeed => Speed(self.bss_speed),
            ParameterName::CarSpeed => Speed(self.car_speed),
            ParameterName::MaxNbTransfers => Count(self.max_nb_transfers),
            ParameterName::JourneyOrder => Order(self.journey_order),
            ParameterName::DestineoMinTcWithCar => Duration(self.destineo_min_tc_with_car),
            ParameterName::DestineoMinTcWithBike => Duration(self.destineo_min_tc_with_bike),
            ParameterName::DestineoMinTcWithBss => Duration(self.destineo_min_tc_with_bss),
            ParameterName::DestineoMinBike => Duration(self.destineo_min_bike),
            ParameterName::DestineoMinBss => Duration(self.destineo_min_bss),
            ParameterName::DestineoMinCar => Duration(self.destineo_min_car),
            ParameterName::FactorTooLongJourney => Count(self.factor_too_long_journey),
            ParameterName::MinDurationTooLongJourney => {
                Duration(self.min_duration_too_long_journey)
            }
        }
    }

    /// All entries, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterName, ParameterValue)> + '_ {
        ParameterName::ALL
            .into_iter()
            .map(move |name| (name, self.value(name)))
    }

    fn set(&mut self, name: ParameterName, value: ParameterValue) -> Result<()> {
        use ParameterValue::{Count, Duration, Order, Speed};

        match (name, value) {
            (ParameterName::MaxWalkingDurationToPt, Duration(s)) => {
                self.max_walking_duration_to_pt = s
            }
            (ParameterName::MaxBikeDurationToPt, Duration(s)) => self.max_bike_duration_to_pt = s,
            (ParameterName::MaxBssDurationToPt, Duration(s)) => self.max_bss_duration_to_pt = s,
            (ParameterName::MaxCarDurationToPt, Duration(s)) => self.max_car_duration_to_pt = s,
            (ParameterName::WalkingSpeed, Speed(v)) => self.walking_speed = v,
            (ParameterName::BikeSpeed, Speed(v)) => self.bike_speed = v,
            (ParameterName::BssSpeed, Speed(v)) => self.bss_speed = v,
            (ParameterName::CarSpeed, Speed(v)) => self.car_speed = v,
            (ParameterName::MaxNbTransfers, Count(n)) => self.max_nb_transfers = n,
            (ParameterName::JourneyOrder, Order(o)) => self.journey_order = o,
            (ParameterName::DestineoMinTcWithCar, Duration(s)) => {
                self.destineo_min_tc_with_car = s
            }
            (ParameterName::DestineoMinTcWithBike, Duration(s)) => {
                self.destineo_min_tc_with_bike = s
            }
            (ParameterName::DestineoMinTcWithBss, Duration(s)) => {
                self.destineo_min_tc_with_bss = s
            }
            (ParameterName::DestineoMinBike, Duration(s)) => self.destineo_min_bike = s,
            (ParameterName::DestineoMinBss, Duration(s)) => self.destineo_min_bss = s,
            (ParameterName::DestineoMinCar, Duration(s)) => self.destineo_min_car = s,
            (ParameterName::FactorTooLongJourney, Count(n)) => self.factor_too_long_journey = n,
            (ParameterName::MinDurationTooLongJourney, Duration(s)) => {
                self.min_duration_too_long_journey = s
            }
            (name, value) => {
                return Err(AppError::Config(format!(
                    "{} expects a {:?} value, got {:?}",
                    name,
                    name.kind(),
                    value.kind()
                )))
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in self.iter() {
            if let ParameterValue::Speed(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(AppError::Config(format!(
                        "{} must be a positive speed, got {}",
                        name, v
                    )));
                }
            }
        }

        if self.factor_too_long_journey == 0 {
            return Err(AppError::Config(
                "factor_too_long_journey must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_value(name: ParameterName, raw: &str) -> std::result::Result<ParameterValue, String> {
    match name.kind() {
        ParameterKind::Duration => raw
            .parse()
            .map(ParameterValue::Duration)
            .map_err(|_| format!("expected seconds, got '{}'", raw)),
        ParameterKind::Speed => raw
            .parse()
            .map(ParameterValue::Speed)
            .map_err(|_| format!("expected meters per second, got '{}'", raw)),
        ParameterKind::Count => raw
            .parse()
            .map(ParameterValue::Count)
            .map_err(|_| format!("expected a count, got '{}'", raw)),
        ParameterKind::Ordering => raw.parse().map(ParameterValue::Order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_builtin_values() {
        let defaults = DefaultParameters::default();

        assert_eq!(
            defaults.get("walking_speed").unwrap(),
            ParameterValue::Speed(1.12)
        );
        assert_eq!(defaults.get("bike_speed").unwrap(), ParameterValue::Speed(4.1));
        assert_eq!(defaults.get("bss_speed").unwrap(), ParameterValue::Speed(4.1));
        assert_eq!(defaults.get("car_speed").unwrap(), ParameterValue::Speed(11.11));
        assert_eq!(
            defaults.get("max_nb_transfers").unwrap(),
            ParameterValue::Count(10)
        );
        assert_eq!(
            defaults.get("journey_order").unwrap(),
            ParameterValue::Order(JourneyOrder::ArrivalTime)
        );
        assert_eq!(
            defaults.get("max_car_duration_to_pt").unwrap(),
            ParameterValue::Duration(1800)
        );
        assert_eq!(
            defaults.get("destineo_min_bss").unwrap(),
            ParameterValue::Duration(420)
        );
        assert_eq!(
            defaults.get("factor_too_long_journey").unwrap(),
            ParameterValue::Count(4)
        );
        assert_eq!(
            defaults.get("min_duration_too_long_journey").unwrap(),
            ParameterValue::Duration(900)
        );
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let defaults = DefaultParameters::default();
        match defaults.get("max_speed") {
            Err(AppError::NotFound(name)) => assert_eq!(name, "max_speed"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_iter_covers_every_parameter() {
        let defaults = DefaultParameters::default();
        assert_eq!(defaults.iter().count(), ParameterName::ALL.len());
        for (name, value) in defaults.iter() {
            assert_eq!(value.kind(), name.kind(), "kind mismatch for {}", name);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        env::set_var("PLANNER_MAX_NB_TRANSFERS", "5");
        env::set_var("PLANNER_JOURNEY_ORDER", "departure_time");
        let params = DefaultParameters::from_env();
        env::remove_var("PLANNER_MAX_NB_TRANSFERS");
        env::remove_var("PLANNER_JOURNEY_ORDER");

        let params = params.unwrap();
        assert_eq!(params.value(ParameterName::MaxNbTransfers), ParameterValue::Count(5));
        assert_eq!(
            params.value(ParameterName::JourneyOrder),
            ParameterValue::Order(JourneyOrder::DepartureTime)
        );
        assert_eq!(params.value(ParameterName::CarSpeed), ParameterValue::Speed(11.11));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_values() {
        env::set_var("PLANNER_WALKING_SPEED", "fast");
        let result = DefaultParameters::from_env();
        env::remove_var("PLANNER_WALKING_SPEED");

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("PLANNER_WALKING_SPEED")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_positive_speed() {
        env::set_var("PLANNER_BIKE_SPEED", "0");
        let result = DefaultParameters::from_env();
        env::remove_var("PLANNER_BIKE_SPEED");

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_finite_speeds() {
        for (var, raw) in [("PLANNER_WALKING_SPEED", "NaN"), ("PLANNER_CAR_SPEED", "inf")] {
            env::set_var(var, raw);
            let result = DefaultParameters::from_env();
            env::remove_var(var);

            match result {
                Err(AppError::Config(msg)) => assert!(msg.contains("positive speed"), "{}", msg),
                other => panic!("expected Config error for {}={}, got {:?}", var, raw, other),
            }
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_zero_too_long_factor() {
        env::set_var("PLANNER_FACTOR_TOO_LONG_JOURNEY", "0");
        let result = DefaultParameters::from_env();
        env::remove_var("PLANNER_FACTOR_TOO_LONG_JOURNEY");

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("factor_too_long_journey")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_from_env_rejects_non_utf8_values() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        env::set_var("PLANNER_MAX_NB_TRANSFERS", OsStr::from_bytes(b"\xff5"));
        let result = DefaultParameters::from_env();
        env::remove_var("PLANNER_MAX_NB_TRANSFERS");

        match result {
            Err(AppError::Config(msg)) => {
                assert_eq!(msg, "Invalid PLANNER_MAX_NB_TRANSFERS: not valid UTF-8")
            }
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_set_rejects_kind_mismatch() {
        let mut params = DefaultParameters::default();
        let result = params.set(ParameterName::WalkingSpeed, ParameterValue::Count(3));
        assert!(result.is_err());
        assert_eq!(params, DefaultParameters::default());
    }
}
