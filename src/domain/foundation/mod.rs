//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, validation errors and the state machine trait
//! used across the interview domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
