// Domain layer modules
pub mod envelope;
pub mod field_spec;
pub mod health;
pub mod pitch;
pub mod validator;

// Re-exports
pub use envelope::{ErrorCode, ResponseBuilder};
pub use field_spec::{FieldRule, FieldSpec};
pub use health::{DependencyCheck, HealthReport, SystemInfo};
pub use pitch::{Focus, PitchTemplate, Role, template_for};
pub use validator::{ValidationResult, validate};
