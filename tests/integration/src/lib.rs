//! Integration test utilities for the guild store
//!
//! Helpers for running the full storage stack (pool, schema, gateway,
//! repositories, store) against a throwaway SQLite file.

pub mod helpers;

pub use helpers::*;
