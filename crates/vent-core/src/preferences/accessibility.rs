//! Accessibility panel settings.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::store::PreferenceStore;
use super::system::SystemPreferences;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FontSize {
    #[default]
    Normal,
    Large,
    ExtraLarge,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Contrast {
    #[default]
    Normal,
    High,
}

/// Persisted accessibility settings.
///
/// Stored as a camelCase JSON object; missing keys take the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    pub font_size: FontSize,
    pub contrast: Contrast,
    pub dyslexia_friendly: bool,
    pub reduced_motion: bool,
    pub screen_reader: bool,
}

impl AccessibilitySettings {
    /// Defaults seeded from the OS hints: reduced motion and contrast follow
    /// the system, everything else takes the hard defaults.
    pub fn from_system(system: &dyn SystemPreferences) -> Self {
        Self {
            reduced_motion: system.prefers_reduced_motion(),
            contrast: if system.prefers_high_contrast() {
                Contrast::High
            } else {
                Contrast::Normal
            },
            ..Self::default()
        }
    }

    /// CSS classes the page applies to the document root for these settings.
    pub fn document_classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        match self.font_size {
            FontSize::Normal => {}
            FontSize::Large => classes.push("font-large"),
            FontSize::ExtraLarge => classes.push("font-extra-large"),
        }
        if self.contrast == Contrast::High {
            classes.push("high-contrast");
        }
        if self.dyslexia_friendly {
            classes.push("dyslexia-friendly");
        }
        if self.reduced_motion {
            classes.push("reduced-motion");
        }
        if self.screen_reader {
            classes.push("screen-reader-optimized");
        }
        classes
    }
}

/// Write-through holder of the accessibility settings for one page load.
///
/// Storage is read once, at [`AccessibilityPreferences::hydrate`]. Each setter
/// writes the whole object; a failed write is logged and the page keeps the
/// new settings.
#[derive(Debug)]
pub struct AccessibilityPreferences {
    store: PreferenceStore,
    key: String,
    settings: AccessibilitySettings,
}

impl AccessibilityPreferences {
    /// Hydrates the settings once at mount.
    ///
    /// A stored value wins outright (merged over the hard defaults). With
    /// nothing stored, the OS hints seed reduced motion and contrast.
    /// Hydration never writes.
    pub fn hydrate(
        store: PreferenceStore,
        key: impl Into<String>,
        system: &dyn SystemPreferences,
    ) -> Self {
        let key = key.into();
        let settings = match store.load_stored(&key, &AccessibilitySettings::default()) {
            Some(stored) => stored,
            None => AccessibilitySettings::from_system(system),
        };
        tracing::debug!(key = %key, ?settings, "Hydrated accessibility settings");
        Self {
            store,
            key,
            settings,
        }
    }

    pub fn settings(&self) -> &AccessibilitySettings {
        &self.settings
    }

    pub fn set_font_size(&mut self, font_size: FontSize) {
        self.apply(|s| s.font_size = font_size);
    }

    pub fn set_contrast(&mut self, contrast: Contrast) {
        self.apply(|s| s.contrast = contrast);
    }

    pub fn set_dyslexia_friendly(&mut self, enabled: bool) {
        self.apply(|s| s.dyslexia_friendly = enabled);
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.apply(|s| s.reduced_motion = enabled);
    }

    pub fn set_screen_reader(&mut self, enabled: bool) {
        self.apply(|s| s.screen_reader = enabled);
    }

    /// Drops the stored settings and re-seeds from the OS hints.
    pub fn reset(&mut self, system: &dyn SystemPreferences) {
        if let Err(e) = self.store.clear(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "Failed to clear accessibility settings");
        }
        self.settings = AccessibilitySettings::from_system(system);
    }

    /// The in-memory settings are authoritative; storage only mirrors them.
    fn apply(&mut self, mutate: impl FnOnce(&mut AccessibilitySettings)) {
        mutate(&mut self.settings);
        self.store.replace(&self.key, &self.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{ACCESSIBILITY_KEY, KeyValueStore, MemoryStore, SystemHints};
    use std::sync::Arc;

    #[test]
    fn test_serialized_shape() {
        let settings = AccessibilitySettings {
            font_size: FontSize::ExtraLarge,
            contrast: Contrast::High,
            dyslexia_friendly: true,
            reduced_motion: false,
            screen_reader: true,
        };
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            serde_json::json!({
                "fontSize": "extra-large",
                "contrast": "high",
                "dyslexiaFriendly": true,
                "reducedMotion": false,
                "screenReader": true,
            })
        );
    }

    #[test]
    fn test_hydrate_without_stored_value_uses_hints() {
        let hints = SystemHints::new(false, true, true);
        let prefs =
            AccessibilityPreferences::hydrate(PreferenceStore::in_memory(), ACCESSIBILITY_KEY, &hints);
        assert!(prefs.settings().reduced_motion);
        assert_eq!(prefs.settings().contrast, Contrast::High);
        assert_eq!(prefs.settings().font_size, FontSize::Normal);
    }

    #[test]
    fn test_hydrate_does_not_write() {
        let store = PreferenceStore::in_memory();
        let hints = SystemHints::new(false, true, false);
        let _prefs = AccessibilityPreferences::hydrate(store.clone(), ACCESSIBILITY_KEY, &hints);
        assert!(
            store
                .load_stored(ACCESSIBILITY_KEY, &AccessibilitySettings::default())
                .is_none()
        );
    }

    #[test]
    fn test_stored_value_wins_over_hints() {
        let store = PreferenceStore::in_memory();
        store
            .save(ACCESSIBILITY_KEY, &serde_json::json!({ "fontSize": "large" }))
            .unwrap();
        let hints = SystemHints::new(false, true, true);
        let prefs = AccessibilityPreferences::hydrate(store, ACCESSIBILITY_KEY, &hints);
        assert_eq!(prefs.settings().font_size, FontSize::Large);
        // stored object pins the rest to hard defaults, not to hints
        assert!(!prefs.settings().reduced_motion);
        assert_eq!(prefs.settings().contrast, Contrast::Normal);
    }

    #[test]
    fn test_setter_writes_full_object_including_seeded_hints() {
        let store = PreferenceStore::in_memory();
        let hints = SystemHints::new(false, true, false);
        let mut prefs = AccessibilityPreferences::hydrate(store.clone(), ACCESSIBILITY_KEY, &hints);
        prefs.set_font_size(FontSize::Large);

        let stored: AccessibilitySettings = store.load(ACCESSIBILITY_KEY, AccessibilitySettings::default());
        assert_eq!(stored.font_size, FontSize::Large);
        assert!(stored.reduced_motion);
        assert_eq!(&stored, prefs.settings());
    }

    #[test]
    fn test_each_setter_persists() {
        let store = PreferenceStore::in_memory();
        let hints = SystemHints::default();
        let mut prefs = AccessibilityPreferences::hydrate(store.clone(), ACCESSIBILITY_KEY, &hints);
        prefs.set_contrast(Contrast::High);
        prefs.set_dyslexia_friendly(true);
        prefs.set_reduced_motion(true);
        prefs.set_screen_reader(true);

        let reloaded = AccessibilityPreferences::hydrate(store, ACCESSIBILITY_KEY, &hints);
        assert_eq!(reloaded.settings(), prefs.settings());
        assert_eq!(
            reloaded.settings().document_classes(),
            vec![
                "high-contrast",
                "dyslexia-friendly",
                "reduced-motion",
                "screen-reader-optimized"
            ]
        );
    }

    #[test]
    fn test_reset_returns_to_hints() {
        let store = PreferenceStore::in_memory();
        let hints = SystemHints::new(false, false, true);
        let mut prefs = AccessibilityPreferences::hydrate(store.clone(), ACCESSIBILITY_KEY, &hints);
        prefs.set_contrast(Contrast::Normal);
        prefs.set_font_size(FontSize::ExtraLarge);

        prefs.reset(&hints);
        assert_eq!(prefs.settings().contrast, Contrast::High);
        assert_eq!(prefs.settings().font_size, FontSize::Normal);
        assert!(
            store
                .load_stored(ACCESSIBILITY_KEY, &AccessibilitySettings::default())
                .is_none()
        );
    }

    #[test]
    fn test_font_size_strings() {
        assert_eq!(FontSize::ExtraLarge.as_ref(), "extra-large");
        assert_eq!("large".parse::<FontSize>().unwrap(), FontSize::Large);
    }

    #[test]
    fn test_settings_survive_failed_writes() {
        let backend = MemoryStore::with_quota(16);
        backend.set("a11y", "{}").unwrap();
        let store = PreferenceStore::new(Arc::new(backend.clone()));
        let mut prefs = AccessibilityPreferences::hydrate(store, "a11y", &SystemHints::default());

        prefs.set_font_size(FontSize::Large);
        prefs.set_contrast(Contrast::High);

        assert_eq!(prefs.settings().font_size, FontSize::Large);
        assert_eq!(prefs.settings().contrast, Contrast::High);
        // The full object never fit; storage still holds the original value
        assert_eq!(backend.get("a11y").unwrap().as_deref(), Some("{}"));
    }
}
