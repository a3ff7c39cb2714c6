//! Visitor preferences persisted in durable key/value storage.
//!
//! # Module Structure
//!
//! - `store`: `KeyValueStore` seam and the typed `PreferenceStore`
//! - `memory`: in-process backend
//! - `system`: OS preference hints and subscriptions
//! - `accessibility`: accessibility panel settings
//! - `comparison`: product comparison list
//! - `theme`: light/dark theme with OS follower

mod accessibility;
mod comparison;
mod memory;
mod store;
mod system;
mod theme;

// Re-export public API
pub use accessibility::{AccessibilityPreferences, AccessibilitySettings, Contrast, FontSize};
pub use comparison::{AddOutcome, ComparisonList, ComparisonPreferences};
pub use memory::MemoryStore;
pub use store::{KeyValueStore, PreferenceStore};
pub use system::{Subscription, SystemHints, SystemListener, SystemPreference, SystemPreferences};
pub use theme::{ThemeController, ThemePreference};

/// Default storage key of the theme choice.
pub const THEME_KEY: &str = "theme";
/// Default storage key of the accessibility settings object.
pub const ACCESSIBILITY_KEY: &str = "accessibility-settings";
/// Default storage key of the comparison id array.
pub const COMPARISON_KEY: &str = "comparison-list";
