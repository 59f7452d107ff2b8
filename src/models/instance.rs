use crate::models::{JourneyOrder, ParameterName, ParameterValue};
use crate::resolution::ParameterSource;
use serde::{Deserialize, Serialize};

/// Per-instance parameter overrides. `None` (missing or `null` in JSON)
/// means the instance does not configure the parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InstanceParameters {
    pub max_walking_duration_to_pt: Option<u32>,
    pub max_bike_duration_to_pt: Option<u32>,
    pub max_bss_duration_to_pt: Option<u32>,
    pub max_car_duration_to_pt: Option<u32>,
    pub walking_speed: Option<f64>,
    pub bike_speed: Option<f64>,
    pub bss_speed: Option<f64>,
    pub car_speed: Option<f64>,
    pub max_nb_transfers: Option<u32>,
    pub journey_order: Option<JourneyOrder>,
    pub destineo_min_tc_with_car: Option<u32>,
    pub destineo_min_tc_with_bike: Option<u32>,
    pub destineo_min_tc_with_bss: Option<u32>,
    pub destineo_min_bike: Option<u32>,
    pub destineo_min_bss: Option<u32>,
    pub destineo_min_car: Option<u32>,
    pub factor_too_long_journey: Option<u32>,
    pub min_duration_too_long_journey: Option<u32>,
}

impl ParameterSource for InstanceParameters {
    fn parameter(&self, name: ParameterName) -> Option<ParameterValue> {
        use ParameterValue::{Count, Duration, Order, Speed};

        match name {
            ParameterName::MaxWalkingDurationToPt => self.max_walking_duration_to_pt.map(Duration),
            ParameterName::MaxBikeDurationToPt => self.max_bike_duration_to_pt.map(Duration),
            ParameterName::MaxBssDurationToPt => self.max_bss_duration_to_pt.map(Duration),
            ParameterName::MaxCarDurationToPt => self.max_car_duration_to_pt.map(Duration),
            ParameterName::WalkingSpeed => self.walking_speed.map(Speed),
            ParameterName::BikeSpeed => self.bike_speed.map(Speed),
            ParameterName::BssSpeed => self.bss_speed.map(Speed),
            ParameterName::CarSpeed => self.car_speed.map(Speed),
            ParameterName::MaxNbTransfers => self.max_nb_transfers.map(Count),
            ParameterName::JourneyOrder => self.journey_order.map(Order),
            ParameterName::DestineoMinTcWithCar => self.destineo_min_tc_with_car.map(Duration),
            ParameterName::DestineoMinTcWithBike => self.destineo_min_tc_with_bike.map(Duration),
            ParameterName::DestineoMinTcWithBss => self.destineo_min_tc_with_bss.map(Duration),
            ParameterName::DestineoMinBike => self.destineo_min_bike.map(Duration),
            ParameterName::DestineoMinBss => self.destineo_min_bss.map(Duration),
            ParameterName::DestineoMinCar => self.destineo_min_car.map(Duration),
            ParameterName::FactorTooLongJourney => self.factor_too_long_journey.map(Count),
            ParameterName::MinDurationTooLongJourney => {
                self.min_duration_too_long_journey.map(Duration)
            }
        }
    }
}

/// One deployment (e.g. a transit region) as stored in the instances directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceConfig {
    pub key: String,
    #[serde(default)]
    pub parameters: InstanceParameters,
}
