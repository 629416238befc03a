//! Infrastructure layer providing external service integrations.
//!
//! This module contains the CSV file repository the partner registry
//! is loaded from and saved to.

pub mod persistence;

pub use persistence::*;
