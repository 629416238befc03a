//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! holding the partner registry, the list view and popup state.

pub mod form;
pub mod state;

pub use form::*;
pub use state::*;
