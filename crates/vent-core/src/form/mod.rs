//! Lead-capture forms.
//!
//! # Module Structure
//!
//! - `field`: typed field accessors and validation rules
//! - `errors`: per-field error map
//! - `session`: the idle/submitted state machine shared by every form
//! - `leads`: concrete forms used on the site
//! - `messages`: user-facing validation messages
//!
//! # Usage
//!
//! ```ignore
//! use vent_core::form::{ContactForm, FormSession};
//! ```

mod errors;
mod field;
mod leads;
pub mod messages;
mod session;

// Re-export public API
pub use errors::FieldErrors;
pub use field::{Field, FieldRule, digit_count, is_email, is_present};
pub use leads::{
    CALLBACK_PHONE_DIGITS, CallbackRequest, ConsultationRequest, ContactForm, LeadForm,
    NewsletterSignup, ProductInquiry,
};
pub use session::{FormSession, FormStatus};
