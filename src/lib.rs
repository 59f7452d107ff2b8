// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod defaults;
pub mod error;
pub mod instances;
pub mod models;
pub mod profiles;
pub mod resolution;

// Re-export commonly used types
pub use defaults::DefaultParameters;
pub use error::{AppError, Result};
pub use instances::InstanceStore;
pub use profiles::{apply_overrides, build_request_args, ProfileRegistry, RequestArgs, TravelerProfile};
pub use resolution::{ParameterSource, ResolvedParameters, Resolver};
