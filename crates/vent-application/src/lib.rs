//! Wiring for the Vent site: preference bootstrap, lead intake and logging.
//!
//! # Module Structure
//!
//! - `bootstrap`: builds storage and hydrates preferences from `SiteConfig`
//! - `leads`: submits forms and routes validated leads to a `LeadSink`
//! - `telemetry`: tracing subscriber initialisation

pub mod bootstrap;
pub mod leads;
pub mod telemetry;

pub use bootstrap::{SiteBootstrap, SitePreferences};
pub use leads::{LeadDesk, LeadOutbox, LeadSink, LeadSubmission, TracingLeadSink};
pub use telemetry::init_tracing;
