//! Partners - Terminal Partner Program
//!
//! A terminal record-keeper for business and community partners, stored
//! in a flat CSV file.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
