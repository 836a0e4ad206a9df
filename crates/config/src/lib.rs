//! CancerRAG Configuration
//!
//! Settings, secret resolution and startup logging for the annotation service.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError, ENV_PREFIX};
pub use settings::{
	CompletionSettings, ConfigValidationError, LogFormat, LoggingSettings, Settings,
	SourceSettings, SourcesSettings,
};
pub use startup_logger::{log_service_info, log_service_shutdown};
