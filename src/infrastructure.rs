// Infrastructure layer modules
pub mod config;
pub mod downstream;
pub mod logging;
pub mod runtime_metrics;
pub mod telemetry;

// Re-exports
pub use config::{ConfigError, LeadForwardConfig, StageConfig};
pub use downstream::{ForwardError, ForwardOutcome, HttpLeadForwarder, LeadForward};
pub use logging::init_logging;
pub use runtime_metrics::{LambdaRuntimeMetrics, RuntimeMetrics};
pub use telemetry::{MetricUnit, Telemetry};
