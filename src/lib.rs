//! Essay Interview - Guided College Essay Interview
//!
//! This crate drives a spoken interview that gathers material for a college
//! application essay. A remote question service writes the questions; this
//! crate owns the turn flow, the rapid-fire to theme phase switch, the
//! stopping rules and the final transcript.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
