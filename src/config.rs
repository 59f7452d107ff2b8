use crate::constants::*;
use crate::defaults::DefaultParameters;
use crate::error::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `*.json` file per instance
    pub instances_dir: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
    pub defaults: DefaultParameters,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            instances_dir: env::var("INSTANCES_DIR")
                .unwrap_or_else(|_| DEFAULT_INSTANCES_DIR.to_string())
                .into(),
            log_filter: env::var("LOG_FILTER").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            defaults: DefaultParameters::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_uses_fallbacks() {
        env::remove_var("INSTANCES_DIR");
        env::remove_var("LOG_FILTER");

        let config = Config::from_env().unwrap();
        assert_eq!(config.instances_dir, PathBuf::from("/etc/jormungandr.d"));
        assert_eq!(config.log_filter, "planner_params=info");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_vars() {
        env::set_var("INSTANCES_DIR", "/tmp/instances");
        env::set_var("PLANNER_CAR_SPEED", "13.9");
        let config = Config::from_env();
        env::remove_var("INSTANCES_DIR");
        env::remove_var("PLANNER_CAR_SPEED");

        let config = config.unwrap();
        assert_eq!(config.instances_dir, PathBuf::from("/tmp/instances"));
        assert_eq!(
            config.defaults.get("car_speed").unwrap(),
            crate::models::ParameterValue::Speed(13.9)
        );
    }

    #[test]
    #[serial]
    fn test_from_env_propagates_parameter_errors() {
        env::set_var("PLANNER_MAX_NB_TRANSFERS", "-1");
        let result = Config::from_env();
        env::remove_var("PLANNER_MAX_NB_TRANSFERS");

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
