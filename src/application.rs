// Application layer modules
pub mod body;
pub mod correlation;
pub mod health_handler;
pub mod lead_handler;
pub mod pitch_handler;

// Re-exports
pub use correlation::CorrelationId;
pub use health_handler::HealthHandler;
pub use lead_handler::LeadHandler;
pub use pitch_handler::PitchHandler;
