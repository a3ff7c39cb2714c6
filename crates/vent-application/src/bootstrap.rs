use std::sync::Arc;

use anyhow::{Context, Result};
use vent_core::config::SiteConfig;
use vent_core::preferences::{
    AccessibilityPreferences, ComparisonPreferences, PreferenceStore, SystemPreferences,
    ThemeController,
};
use vent_infrastructure::{ConfigService, open_backend};

use crate::leads::{LeadDesk, LeadSink};
use crate::telemetry::init_tracing;

/// Preferences hydrated for one page session.
pub struct SitePreferences {
    pub store: PreferenceStore,
    pub accessibility: AccessibilityPreferences,
    pub comparison: ComparisonPreferences,
    pub theme: ThemeController,
}

impl SitePreferences {
    /// Opens the configured backend and hydrates every preference from it.
    pub fn hydrate(config: &SiteConfig, system: &dyn SystemPreferences) -> Result<Self> {
        let backend =
            open_backend(&config.storage).context("Failed to open preference storage")?;
        let store = PreferenceStore::new(backend);
        Ok(Self::with_store(store, config, system))
    }

    /// Hydrates from an existing store, using the keys from `config`.
    pub fn with_store(
        store: PreferenceStore,
        config: &SiteConfig,
        system: &dyn SystemPreferences,
    ) -> Self {
        let keys = &config.preferences;
        let accessibility =
            AccessibilityPreferences::hydrate(store.clone(), &keys.accessibility_key, system);
        let comparison = ComparisonPreferences::hydrate(
            store.clone(),
            &keys.comparison_key,
            keys.comparison_capacity,
        );
        let theme = ThemeController::mount(store.clone(), &keys.theme_key, system);

        Self {
            store,
            accessibility,
            comparison,
            theme,
        }
    }
}

/// Everything a page needs: configuration, preferences and the lead desk.
pub struct SiteBootstrap {
    pub config: SiteConfig,
    pub preferences: SitePreferences,
    pub leads: LeadDesk,
}

impl SiteBootstrap {
    /// Loads `site.toml` through `config_service`, initialises tracing and
    /// hydrates preferences.
    pub fn start(
        config_service: &ConfigService,
        system: &dyn SystemPreferences,
        sink: Arc<dyn LeadSink>,
    ) -> Result<Self> {
        let config = config_service.get_config();
        init_tracing(&config.logging)?;
        tracing::info!(config = %config_service.path().display(), "[Bootstrap] Starting site");
        Self::from_config(config, system, sink)
    }

    pub fn from_config(
        config: SiteConfig,
        system: &dyn SystemPreferences,
        sink: Arc<dyn LeadSink>,
    ) -> Result<Self> {
        let preferences = SitePreferences::hydrate(&config, system)?;
        tracing::debug!(
            backend = ?config.storage.backend,
            theme = %preferences.theme.theme(),
            compared = preferences.comparison.count(),
            "[Bootstrap] Preferences hydrated"
        );
        Ok(Self {
            config,
            preferences,
            leads: LeadDesk::new(sink),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vent_core::config::StorageBackend;
    use vent_core::preferences::{FontSize, SystemHints, ThemePreference};

    use crate::leads::LeadOutbox;

    fn memory_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config
    }

    #[test]
    fn test_fresh_visit_follows_system_hints() {
        let hints = SystemHints::new(true, true, false);
        let prefs = SitePreferences::hydrate(&memory_config(), &hints).unwrap();

        assert_eq!(prefs.theme.theme(), ThemePreference::Dark);
        assert!(!prefs.theme.is_pinned());
        assert!(prefs.accessibility.settings().reduced_motion);
        assert!(prefs.comparison.is_empty());
    }

    #[test]
    fn test_custom_keys_and_capacity() {
        let mut config = memory_config();
        config.preferences.comparison_key = "compare".to_string();
        config.preferences.comparison_capacity = Some(2);

        let store = PreferenceStore::in_memory();
        store.save("compare", &vec!["a", "b"]).unwrap();

        let prefs = SitePreferences::with_store(store, &config, &SystemHints::default());
        assert_eq!(prefs.comparison.ids(), ["a", "b"]);
        assert!(prefs.comparison.is_full());
    }

    #[test]
    fn test_start_reads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let prefs_dir = temp_dir.path().join("prefs");
        let config_path = temp_dir.path().join("site.toml");
        std::fs::write(
            &config_path,
            format!(
                "[storage]\nbackend = \"file\"\ndirectory = {:?}\n",
                prefs_dir.display().to_string()
            ),
        )
        .unwrap();

        let service = ConfigService::with_path(&config_path);
        let outbox = LeadOutbox::new();
        let mut site =
            SiteBootstrap::start(&service, &SystemHints::default(), Arc::new(outbox)).unwrap();

        assert_eq!(site.config.storage.directory.as_deref(), Some(prefs_dir.as_path()));
        site.preferences.accessibility.set_font_size(FontSize::Large);
        assert!(prefs_dir.join("accessibility-settings.json").exists());
    }
}
