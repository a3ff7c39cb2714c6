//! OS-level preference hints (dark mode, reduced motion, contrast).
//!
//! The page reads these once when it mounts and may subscribe to changes.
//! Subscriptions are explicit values: dropping a [`Subscription`] detaches
//! its listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A change reported by the operating system / browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPreference {
    /// `prefers-color-scheme: dark`
    DarkMode(bool),
    /// `prefers-reduced-motion: reduce`
    ReducedMotion(bool),
    /// `prefers-contrast: more`
    HighContrast(bool),
}

pub type SystemListener = Box<dyn Fn(SystemPreference)>;

/// Source of OS-level preference hints.
pub trait SystemPreferences {
    fn prefers_dark_mode(&self) -> bool;

    fn prefers_reduced_motion(&self) -> bool;

    fn prefers_high_contrast(&self) -> bool;

    /// Registers `listener` for future changes until the returned
    /// subscription is dropped.
    fn subscribe(&self, listener: SystemListener) -> Subscription;
}

/// Handle for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately detaches the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Detaches the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Default)]
struct HintsState {
    dark_mode: bool,
    reduced_motion: bool,
    high_contrast: bool,
    next_id: u64,
    listeners: Vec<(u64, Rc<dyn Fn(SystemPreference)>)>,
}

/// In-process [`SystemPreferences`] implementation.
///
/// Holds the current hint values; the setters notify subscribers when a value
/// actually changes. Clones share state. Single-threaded, like the UI event
/// loop that drives it.
#[derive(Clone, Default)]
pub struct SystemHints {
    state: Rc<RefCell<HintsState>>,
}

impl SystemHints {
    pub fn new(dark_mode: bool, reduced_motion: bool, high_contrast: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(HintsState {
                dark_mode,
                reduced_motion,
                high_contrast,
                ..HintsState::default()
            })),
        }
    }

    pub fn set_dark_mode(&self, enabled: bool) {
        self.change(SystemPreference::DarkMode(enabled));
    }

    pub fn set_reduced_motion(&self, enabled: bool) {
        self.change(SystemPreference::ReducedMotion(enabled));
    }

    pub fn set_high_contrast(&self, enabled: bool) {
        self.change(SystemPreference::HighContrast(enabled));
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    fn change(&self, change: SystemPreference) {
        let listeners = {
            let mut state = self.state.borrow_mut();
            let slot = match change {
                SystemPreference::DarkMode(_) => &mut state.dark_mode,
                SystemPreference::ReducedMotion(_) => &mut state.reduced_motion,
                SystemPreference::HighContrast(_) => &mut state.high_contrast,
            };
            let value = match change {
                SystemPreference::DarkMode(v)
                | SystemPreference::ReducedMotion(v)
                | SystemPreference::HighContrast(v) => v,
            };
            if *slot == value {
                return;
            }
            *slot = value;
            state
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect::<Vec<_>>()
        };

        // Borrow released: listeners may read hints or (un)subscribe.
        for listener in listeners {
            listener(change);
        }
    }
}

impl SystemPreferences for SystemHints {
    fn prefers_dark_mode(&self) -> bool {
        self.state.borrow().dark_mode
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.state.borrow().reduced_motion
    }

    fn prefers_high_contrast(&self) -> bool {
        self.state.borrow().high_contrast
    }

    fn subscribe(&self, listener: SystemListener) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, Rc::from(listener)));
            id
        };

        let weak: Weak<RefCell<HintsState>> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}

impl std::fmt::Debug for SystemHints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SystemHints")
            .field("dark_mode", &state.dark_mode)
            .field("reduced_motion", &state.reduced_motion)
            .field("high_contrast", &state.high_contrast)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}
