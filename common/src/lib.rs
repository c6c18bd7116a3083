//! Shared data model for the deck generator: slide records, themes,
//! deck plans and configuration.

pub mod config;
pub mod theme;
pub mod types;

pub use config::*;
pub use theme::*;
pub use types::*;
