//! Domain layer containing interview logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `interview` - Session state, phase transitions, stopping rules and transcript rendering

pub mod foundation;
pub mod interview;
