//! Light/dark theme preference.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use strum::{AsRefStr, Display, EnumString};

use super::store::PreferenceStore;
use super::system::{Subscription, SystemPreference, SystemPreferences};

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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

struct ThemeState {
    store: PreferenceStore,
    key: String,
    theme: ThemePreference,
    /// The user made an explicit choice that is stored; OS changes are ignored.
    pinned: bool,
}

/// Page-header theme switcher.
///
/// Without a stored choice the theme follows the OS dark-mode hint, live.
/// Once the user picks a theme it is stored and pinned; OS changes are then
/// ignored until [`ThemeController::follow_system`] clears the choice.
pub struct ThemeController {
    state: Rc<RefCell<ThemeState>>,
    _subscription: Subscription,
}

impl ThemeController {
    pub fn mount(
        store: PreferenceStore,
        key: impl Into<String>,
        system: &dyn SystemPreferences,
    ) -> Self {
        let key = key.into();
        let stored = store.load_stored(&key, &ThemePreference::default());
        let (theme, pinned) = match stored {
            Some(theme) => (theme, true),
            None => (ThemePreference::from_dark_mode(system.prefers_dark_mode()), false),
        };
        tracing::debug!(key = %key, theme = %theme, pinned, "Hydrated theme preference");

        let state = Rc::new(RefCell::new(ThemeState {
            store,
            key,
            theme,
            pinned,
        }));

        let weak: Weak<RefCell<ThemeState>> = Rc::downgrade(&state);
        let subscription = system.subscribe(Box::new(move |change| {
            let SystemPreference::DarkMode(dark) = change else {
                return;
            };
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = state.borrow_mut();
            if !state.pinned {
                state.theme = ThemePreference::from_dark_mode(dark);
            }
        }));

        Self {
            state,
            _subscription: subscription,
        }
    }

    pub fn theme(&self) -> ThemePreference {
        self.state.borrow().theme
    }

    /// Whether an explicit user choice is in effect.
    pub fn is_pinned(&self) -> bool {
        self.state.borrow().pinned
    }

    /// Applies and stores an explicit choice.
    pub fn set_theme(&self, theme: ThemePreference) {
        let mut state = self.state.borrow_mut();
        if let Err(e) = state.store.save(&state.key, &theme) {
            tracing::warn!(key = %state.key, error = %e, "Failed to persist theme; keeping it for this page");
        }
        state.theme = theme;
        state.pinned = true;
    }

    /// Flips the theme and stores the result.
    pub fn toggle(&self) -> ThemePreference {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }

    /// Forgets the explicit choice and goes back to following the OS.
    pub fn follow_system(&self, system: &dyn SystemPreferences) {
        let mut state = self.state.borrow_mut();
        if let Err(e) = state.store.clear(&state.key) {
            tracing::warn!(key = %state.key, error = %e, "Failed to clear stored theme");
        }
        state.pinned = false;
        state.theme = ThemePreference::from_dark_mode(system.prefers_dark_mode());
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ThemeController")
            .field("theme", &state.theme)
            .field("pinned", &state.pinned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{SystemHints, THEME_KEY};
    use std::str::FromStr;

    #[test]
    fn test_follows_system_without_stored_choice() {
        let store = PreferenceStore::in_memory();
        let hints = SystemHints::new(true, false, false);
        let theme = ThemeController::mount(store, THEME_KEY, &hints);
        assert_eq!(theme.theme(), ThemePreference::Dark);
        assert!(!theme.is_pinned());

        hints.set_dark_mode(false);
        assert_eq!(theme.theme(), ThemePreference::Light);
    }

    #[test]
    fn test_stored_choice_pins_theme() {
        let store = PreferenceStore::in_memory();
        store.save(THEME_KEY, &ThemePreference::Light).unwrap();
        let hints = SystemHints::new(true, false, false);
        let theme = ThemeController::mount(store, THEME_KEY, &hints);
        assert_eq!(theme.theme(), ThemePreference::Light);
        assert!(theme.is_pinned());

        hints.set_dark_mode(false);
        hints.set_dark_mode(true);
        assert_eq!(theme.theme(), ThemePreference::Light);
    }

    #[test]
    fn test_toggle_persists_and_pins() {
        let store = PreferenceStore::in_memory();
        let hints = SystemHints::default();
        let theme = ThemeController::mount(store.clone(), THEME_KEY, &hints);
        assert_eq!(theme.toggle(), ThemePreference::Dark);
        assert!(theme.is_pinned());
        assert_eq!(
            store.load(THEME_KEY, ThemePreference::Light),
            ThemePreference::Dark
        );

        hints.set_dark_mode(true);
        hints.set_dark_mode(false);
        assert_eq!(theme.theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_follow_system_clears_choice() {
        let store = PreferenceStore::in_memory();
        let hints = SystemHints::new(true, false, false);
        let theme = ThemeController::mount(store.clone(), THEME_KEY, &hints);
        theme.set_theme(ThemePreference::Light);

        theme.follow_system(&hints);
        assert_eq!(theme.theme(), ThemePreference::Dark);
        assert!(!theme.is_pinned());
        assert!(
            store
                .load_stored(THEME_KEY, &ThemePreference::default())
                .is_none()
        );
    }

    #[test]
    fn test_unmount_detaches_listener() {
        let hints = SystemHints::default();
        let theme = ThemeController::mount(PreferenceStore::in_memory(), THEME_KEY, &hints);
        assert_eq!(hints.listener_count(), 1);
        drop(theme);
        assert_eq!(hints.listener_count(), 0);
    }

    #[test]
    fn test_corrupt_stored_theme_follows_system() {
        let store = PreferenceStore::in_memory();
        store.save(THEME_KEY, "sepia").unwrap();
        let hints = SystemHints::new(true, false, false);
        let theme = ThemeController::mount(store, THEME_KEY, &hints);
        assert_eq!(theme.theme(), ThemePreference::Dark);
        assert!(!theme.is_pinned());
    }

    #[test]
    fn test_theme_strings() {
        assert_eq!(ThemePreference::Dark.to_string(), "dark");
        assert_eq!(
            ThemePreference::from_str("light").unwrap(),
            ThemePreference::Light
        );
        assert_eq!(
            serde_json::to_string(&ThemePreference::Dark).unwrap(),
            "\"dark\""
        );
    }
}
