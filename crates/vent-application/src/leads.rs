//! Lead intake: what happens after a form validates.
//!
//! The site has no lead backend. A validated form is turned into a
//! [`LeadSubmission`] and handed to a [`LeadSink`]; the default sink logs it.
//! Delivery problems are logged and never change the form's state.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vent_core::error::{Result, VentError};
use vent_core::form::{FormSession, LeadForm};

/// A validated lead as recorded by a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub id: Uuid,
    /// [`LeadForm::FORM_ID`] of the originating form.
    pub form: String,
    pub received_at: DateTime<Utc>,
    /// The form's fields as a JSON object.
    pub fields: serde_json::Value,
}

impl LeadSubmission {
    pub fn capture<F: LeadForm>(fields: &F) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            form: F::FORM_ID.to_string(),
            received_at: Utc::now(),
            fields: serde_json::to_value(fields)?,
        })
    }
}

/// Destination for validated leads.
pub trait LeadSink: Send + Sync {
    fn deliver(&self, lead: &LeadSubmission) -> Result<()>;
}

/// Writes every lead to the log.
#[derive(Debug, Clone, Default)]
pub struct TracingLeadSink;

impl LeadSink for TracingLeadSink {
    fn deliver(&self, lead: &LeadSubmission) -> Result<()> {
        tracing::info!(
            lead_id = %lead.id,
            form = %lead.form,
            received_at = %lead.received_at.to_rfc3339(),
            fields = %lead.fields,
            "Lead received"
        );
        Ok(())
    }
}

/// Keeps leads in memory, e.g. for a confirmation screen or tests.
#[derive(Debug, Clone, Default)]
pub struct LeadOutbox {
    leads: Arc<Mutex<Vec<LeadSubmission>>>,
}

impl LeadOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<LeadSubmission> {
        self.leads.lock().map(|leads| leads.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.leads.lock().map(|leads| leads.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LeadSink for LeadOutbox {
    fn deliver(&self, lead: &LeadSubmission) -> Result<()> {
        let mut leads = self
            .leads
            .lock()
            .map_err(|e| VentError::internal(format!("lead outbox lock poisoned: {}", e)))?;
        leads.push(lead.clone());
        Ok(())
    }
}

/// Submits forms and routes their leads to a sink.
#[derive(Clone)]
pub struct LeadDesk {
    sink: Arc<dyn LeadSink>,
}

impl LeadDesk {
    pub fn new(sink: Arc<dyn LeadSink>) -> Self {
        Self { sink }
    }

    /// Submits `session`; on success its fields are delivered as a lead.
    ///
    /// Returns the session's submit result. A sink failure is logged only.
    pub fn submit<F: LeadForm>(&self, session: &mut FormSession<F>) -> bool {
        session.submit(|fields| self.deliver(fields))
    }

    fn deliver<F: LeadForm>(&self, fields: &F) {
        let lead = match LeadSubmission::capture(fields) {
            Ok(lead) => lead,
            Err(e) => {
                tracing::warn!(form = F::FORM_ID, error = %e, "Failed to capture lead");
                return;
            }
        };
        if let Err(e) = self.sink.deliver(&lead) {
            tracing::warn!(lead_id = %lead.id, form = F::FORM_ID, error = %e, "Failed to deliver lead");
        }
    }
}

impl Default for LeadDesk {
    fn default() -> Self {
        Self::new(Arc::new(TracingLeadSink))
    }
}

impl std::fmt::Debug for LeadDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadDesk").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vent_core::form::{CallbackRequest, ContactForm, FormStatus};

    struct FailingSink;

    impl LeadSink for FailingSink {
        fn deliver(&self, _lead: &LeadSubmission) -> Result<()> {
            Err(VentError::storage("crm unavailable"))
        }
    }

    fn filled_callback() -> FormSession<CallbackRequest> {
        let mut form = FormSession::<CallbackRequest>::for_form();
        form.set_field(CallbackRequest::NAME, "Ivan");
        form.set_field(CallbackRequest::PHONE, "+7 912 000 11 22");
        form.set_field(CallbackRequest::AGREEMENT, true);
        form
    }

    #[test]
    fn test_capture_records_form_and_fields() {
        let mut fields = ContactForm::default();
        fields.name = "Ann".to_string();
        let lead = LeadSubmission::capture(&fields).unwrap();
        assert_eq!(lead.form, "contact");
        assert_eq!(lead.fields["name"], "Ann");
        assert_eq!(lead.fields["agreement"], false);
    }

    #[test]
    fn test_valid_submit_delivers_exactly_once() {
        let outbox = LeadOutbox::new();
        let desk = LeadDesk::new(Arc::new(outbox.clone()));
        let mut form = filled_callback();

        assert!(desk.submit(&mut form));
        assert!(desk.submit(&mut form));
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox.submissions()[0].form, "callback");
        assert_eq!(outbox.submissions()[0].fields["preferredTime"], "");
    }

    #[test]
    fn test_invalid_submit_delivers_nothing() {
        let outbox = LeadOutbox::new();
        let desk = LeadDesk::new(Arc::new(outbox.clone()));
        let mut form = FormSession::<ContactForm>::for_form();

        assert!(!desk.submit(&mut form));
        assert!(outbox.is_empty());
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn test_sink_failure_does_not_block_submission() {
        let desk = LeadDesk::new(Arc::new(FailingSink));
        let mut form = filled_callback();
        assert!(desk.submit(&mut form));
        assert!(form.is_submitted());
    }

    #[test]
    fn test_tracing_sink_accepts_leads() {
        let desk = LeadDesk::default();
        let mut form = filled_callback();
        assert!(desk.submit(&mut form));
    }

    #[test]
    fn test_submission_json_shape() {
        let lead = LeadSubmission::capture(&ContactForm::default()).unwrap();
        let json = serde_json::to_value(&lead).unwrap();
        assert!(json.get("receivedAt").is_some());
        assert_eq!(json["form"], "contact");
        let back: LeadSubmission = serde_json::from_value(json).unwrap();
        assert_eq!(back, lead);
    }
}
