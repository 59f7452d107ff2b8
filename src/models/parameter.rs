use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Criterion used to rank candidate journeys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JourneyOrder {
    #[default]
    ArrivalTime,
    DepartureTime,
}

impl JourneyOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyOrder::ArrivalTime => "arrival_time",
            JourneyOrder::DepartureTime => "departure_time",
        }
    }
}

impl fmt::Display for JourneyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JourneyOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrival_time" => Ok(JourneyOrder::ArrivalTime),
            "departure_time" => Ok(JourneyOrder::DepartureTime),
            _ => Err(format!(
                "Invalid journey order: '{}'. Use 'arrival_time' or 'departure_time'",
                s
            )),
        }
    }
}

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Seconds.
    Duration,
    /// Meters per second.
    Speed,
    Count,
    Ordering,
}

/// The closed set of journey-planning parameters with a built-in default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterName {
    MaxWalkingDurationToPt,
    MaxBikeDurationToPt,
    MaxBssDurationToPt,
    MaxCarDurationToPt,
    WalkingSpeed,
    BikeSpeed,
    BssSpeed,
    CarSpeed,
    MaxNbTransfers,
    JourneyOrder,
    DestineoMinTcWithCar,
    DestineoMinTcWithBike,
    DestineoMinTcWithBss,
    DestineoMinBike,
    DestineoMinBss,
    DestineoMinCar,
    FactorTooLongJourney,
    MinDurationTooLongJourney,
}

impl ParameterName {
    pub const ALL: [ParameterName; 18] = [
        ParameterName::MaxWalkingDurationToPt,
        ParameterName::MaxBikeDurationToPt,
        ParameterName::MaxBssDurationToPt,
        ParameterName::MaxCarDurationToPt,
        ParameterName::WalkingSpeed,
        ParameterName::BikeSpeed,
        ParameterName::BssSpeed,
        ParameterName::CarSpeed,
        ParameterName::MaxNbTransfers,
        ParameterName::JourneyOrder,
        ParameterName::DestineoMinTcWithCar,
        ParameterName::DestineoMinTcWithBike,
        ParameterName::DestineoMinTcWithBss,
        ParameterName::DestineoMinBike,
        ParameterName::DestineoMinBss,
        ParameterName::DestineoMinCar,
        ParameterName::FactorTooLongJourney,
        ParameterName::MinDurationTooLongJourney,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterName::MaxWalkingDurationToPt => "max_walking_duration_to_pt",
            ParameterName::MaxBikeDurationToPt => "max_bike_duration_to_pt",
            ParameterName::MaxBssDurationToPt => "max_bss_duration_to_pt",
            ParameterName::MaxCarDurationToPt => "max_car_duration_to_pt",
            ParameterName::WalkingSpeed => "walking_speed",
            ParameterName::BikeSpeed => "bike_speed",
            ParameterName::BssSpeed => "bss_speed",
            ParameterName::CarSpeed => "car_speed",
            ParameterName::MaxNbTransfers => "max_nb_transfers",
            ParameterName::JourneyOrder => "journey_order",
            ParameterName::DestineoMinTcWithCar => "destineo_min_tc_with_car",
            ParameterName::DestineoMinTcWithBike => "destineo_min_tc_with_bike",
            ParameterName::DestineoMinTcWithBss => "destineo_min_tc_with_bss",
            ParameterName::DestineoMinBike => "destineo_min_bike",
            ParameterName::DestineoMinBss => "destineo_min_bss",
            ParameterName::DestineoMinCar => "destineo_min_car",
            ParameterName::FactorTooLongJourney => "factor_too_long_journey",
            ParameterName::MinDurationTooLongJourney => "min_duration_too_long_journey",
        }
    }

    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterName::WalkingSpeed
            | ParameterName::BikeSpeed
            | ParameterName::BssSpeed
            | ParameterName::CarSpeed => ParameterKind::Speed,
            ParameterName::MaxNbTransfers | ParameterName::FactorTooLongJourney => {
                ParameterKind::Count
            }
            ParameterName::JourneyOrder => ParameterKind::Ordering,
            _ => ParameterKind::Duration,
        }
    }

    /// Name of the env var overriding this parameter's default,
    /// e.g. `PLANNER_MAX_NB_TRANSFERS`.
    pub fn env_var(&self) -> String {
        format!(
            "{}{}",
            crate::constants::PARAMETER_ENV_PREFIX,
            self.as_str().to_uppercase()
        )
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterName::ALL
            .iter()
            .find(|name| name.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown parameter: '{}'", s))
    }
}

/// A parameter value, tagged with its declared kind.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ParameterValue {
    Duration(u32),
    Speed(f64),
    Count(u32),
    Order(JourneyOrder),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Duration(_) => ParameterKind::Duration,
            ParameterValue::Speed(_) => ParameterKind::Speed,
            ParameterValue::Count(_) => ParameterKind::Count,
            ParameterValue::Order(_) => ParameterKind::Ordering,
        }
    }

    /// JSON form used in journey-request argument sets.
    pub fn to_json(&self) -> Value {
        match self {
            ParameterValue::Duration(s) | ParameterValue::Count(s) => Value::from(*s),
            ParameterValue::Speed(v) => Value::from(*v),
            ParameterValue::Order(o) => Value::from(o.as_str()),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Duration(s) | ParameterValue::Count(s) => write!(f, "{}", s),
            ParameterValue::Speed(v) => write!(f, "{}", v),
            ParameterValue::Order(o) => write!(f, "{}", o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_name_from_str() {
        assert_eq!(
            "max_nb_transfers".parse::<ParameterName>().unwrap(),
            ParameterName::MaxNbTransfers
        );
        assert_eq!(
            "destineo_min_bss".parse::<ParameterName>().unwrap(),
            ParameterName::DestineoMinBss
        );
        assert!("MAX_NB_TRANSFERS".parse::<ParameterName>().is_err());
        assert!("max_nb_transfer".parse::<ParameterName>().is_err());
    }

    #[test]
    fn test_parameter_names_are_unique() {
        let mut names: Vec<&str> = ParameterName::ALL.iter().map(|n| n.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ParameterName::ALL.len());
    }

    #[test]
    fn test_parameter_kinds() {
        assert_eq!(ParameterName::CarSpeed.kind(), ParameterKind::Speed);
        assert_eq!(ParameterName::MaxNbTransfers.kind(), ParameterKind::Count);
        assert_eq!(ParameterName::JourneyOrder.kind(), ParameterKind::Ordering);
        assert_eq!(
            ParameterName::MinDurationTooLongJourney.kind(),
            ParameterKind::Duration
        );
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(
            ParameterName::MaxNbTransfers.env_var(),
            "PLANNER_MAX_NB_TRANSFERS"
        );
    }

    #[test]
    fn test_journey_order_from_str() {
        assert_eq!(
            "arrival_time".parse::<JourneyOrder>().unwrap(),
            JourneyOrder::ArrivalTime
        );
        assert_eq!(
            "departure_time".parse::<JourneyOrder>().unwrap(),
            JourneyOrder::DepartureTime
        );
        assert!("Departure_Time".parse::<JourneyOrder>().is_err());
        assert!("fastest".parse::<JourneyOrder>().is_err());
    }

    #[test]
    fn test_value_display_and_json() {
        assert_eq!(ParameterValue::Count(10).to_string(), "10");
        assert_eq!(ParameterValue::Speed(1.12).to_string(), "1.12");
        assert_eq!(
            ParameterValue::Order(JourneyOrder::ArrivalTime).to_string(),
            "arrival_time"
        );
        assert_eq!(ParameterValue::Duration(900).to_json(), serde_json::json!(900));
        assert_eq!(
            serde_json::to_value(ParameterValue::Order(JourneyOrder::DepartureTime)).unwrap(),
            serde_json::json!("departure_time")
        );
    }
}
