use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transport mode allowed on the first or last section of a journey,
/// before reaching or after leaving public transport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    #[default]
    Walking,
    Bike,
    Car,
    /// Bike-sharing system.
    Bss,
}

impl FallbackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackMode::Walking => "walking",
            FallbackMode::Bike => "bike",
            FallbackMode::Car => "car",
            FallbackMode::Bss => "bss",
        }
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walking" => Ok(FallbackMode::Walking),
            "bike" => Ok(FallbackMode::Bike),
            "car" => Ok(FallbackMode::Car),
            "bss" => Ok(FallbackMode::Bss),
            _ => Err(format!("Invalid fallback mode: '{}'", s)),
        }
    }
}

/// Journey-quality category a traveler can ask for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum JourneyCategory {
    Rapid,
    Comfort,
    Healthy,
}

impl fmt::Display for JourneyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyCategory::Rapid => write!(f, "rapid"),
            JourneyCategory::Comfort => write!(f, "comfort"),
            JourneyCategory::Healthy => write!(f, "healthy"),
        }
    }
}

impl FromStr for JourneyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rapid" => Ok(JourneyCategory::Rapid),
            "comfort" => Ok(JourneyCategory::Comfort),
            "healthy" => Ok(JourneyCategory::Healthy),
            _ => Err(format!("Invalid journey category: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_mode_from_str() {
        assert_eq!("walking".parse::<FallbackMode>().unwrap(), FallbackMode::Walking);
        assert_eq!("bss".parse::<FallbackMode>().unwrap(), FallbackMode::Bss);
        assert!("BSS".parse::<FallbackMode>().is_err());
        assert_eq!("car".parse::<FallbackMode>().unwrap(), FallbackMode::Car);
        assert!("scooter".parse::<FallbackMode>().is_err());
    }

    #[test]
    fn test_fallback_mode_serde() {
        let modes: Vec<FallbackMode> = serde_json::from_str(r#"["walking","bike"]"#).unwrap();
        assert_eq!(modes, vec![FallbackMode::Walking, FallbackMode::Bike]);
        assert_eq!(
            serde_json::to_string(&FallbackMode::Bss).unwrap(),
            "\"bss\""
        );
    }

    #[test]
    fn test_journey_category_display() {
        assert_eq!(JourneyCategory::Healthy.to_string(), "healthy");
        assert_eq!(
            "comfort".parse::<JourneyCategory>().unwrap(),
            JourneyCategory::Comfort
        );
        assert!("Comfort".parse::<JourneyCategory>().is_err());
    }
}
