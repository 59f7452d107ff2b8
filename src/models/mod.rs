pub mod instance;
pub mod mode;
pub mod parameter;

pub use instance::{InstanceConfig, InstanceParameters};
pub use mode::{FallbackMode, JourneyCategory};
pub use parameter::{JourneyOrder, ParameterKind, ParameterName, ParameterValue};
