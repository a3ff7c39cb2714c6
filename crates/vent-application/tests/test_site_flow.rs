use std::sync::Arc;

use tempfile::TempDir;
use vent_application::{LeadOutbox, SiteBootstrap};
use vent_core::config::{SiteConfig, StorageBackend};
use vent_core::form::{ConsultationRequest, FormSession, messages};
use vent_core::preferences::{Contrast, SystemHints, ThemePreference};

fn file_config(dir: &TempDir) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.directory = Some(dir.path().join("prefs"));
    config
}

#[test]
fn test_consultation_lead_reaches_outbox() {
    let temp_dir = TempDir::new().unwrap();
    let outbox = LeadOutbox::new();
    let site = SiteBootstrap::from_config(
        file_config(&temp_dir),
        &SystemHints::default(),
        Arc::new(outbox.clone()),
    )
    .unwrap();

    let mut form = FormSession::<ConsultationRequest>::for_form();
    assert!(!site.leads.submit(&mut form));
    assert_eq!(
        form.error_for(ConsultationRequest::NAME),
        Some(messages::NAME_REQUIRED)
    );

    form.set_field(ConsultationRequest::NAME, "Maria");
    form.set_field(ConsultationRequest::PHONE, "+7 (900) 123-45-67");
    form.set_field(ConsultationRequest::EMAIL, "maria@vent.example");
    form.set_field(ConsultationRequest::AGREEMENT, true);
    assert!(site.leads.submit(&mut form));
    assert!(site.leads.submit(&mut form));

    let leads = outbox.submissions();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].form, "consultation");
    assert_eq!(leads[0].fields["name"], "Maria");
    assert_eq!(leads[0].fields["email"], "maria@vent.example");

    form.reset();
    assert!(!form.is_submitted());
    assert_eq!(form.value(ConsultationRequest::NAME), "");
}

#[test]
fn test_preferences_survive_a_second_visit() {
    let temp_dir = TempDir::new().unwrap();
    let hints = SystemHints::new(false, false, false);

    {
        let mut site = SiteBootstrap::from_config(
            file_config(&temp_dir),
            &hints,
            Arc::new(LeadOutbox::new()),
        )
        .unwrap();
        site.preferences.theme.set_theme(ThemePreference::Dark);
        site.preferences.accessibility.set_contrast(Contrast::High);
        site.preferences.comparison.add("vrf-200");
    }

    let site =
        SiteBootstrap::from_config(file_config(&temp_dir), &hints, Arc::new(LeadOutbox::new()))
            .unwrap();
    assert_eq!(site.preferences.theme.theme(), ThemePreference::Dark);
    assert!(site.preferences.theme.is_pinned());
    assert_eq!(site.preferences.accessibility.settings().contrast, Contrast::High);
    assert_eq!(site.preferences.comparison.ids(), ["vrf-200"]);
}
