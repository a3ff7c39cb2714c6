//! Domain layer of the Vent climate-equipment site: lead forms and visitor
//! preferences.

pub mod config;
pub mod error;
pub mod form;
pub mod preferences;

// Re-export common error type
pub use error::{Result, VentError};
