//! Test utilities.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - Stub repositories for simulating storage faults
//! - A builder for constructing `AppState` with in-memory dependencies

mod app_state_builder;
mod factories;

pub use app_state_builder::*;
pub use factories::*;
