//! The site's lead-capture forms.
//!
//! Each form is a plain struct of string/boolean values plus the rule list it
//! is validated against. Field accessors are associated constants so pages
//! can only refer to fields the form actually has.

use serde::{Deserialize, Serialize};

use super::field::{Field, FieldRule};
use super::messages;

/// A form schema that can be mounted in a [`super::FormSession`].
pub trait LeadForm: Clone + Default + Serialize + Send + Sync + 'static {
    /// Stable identifier used when the lead is recorded (e.g. `"contact"`).
    const FORM_ID: &'static str;

    /// Rules checked on submit, in display order.
    fn rules() -> Vec<FieldRule<Self>>;
}

/// Minimum number of digits accepted in a callback phone number.
pub const CALLBACK_PHONE_DIGITS: usize = 10;

/// "Contact us" page form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub agreement: bool,
}

impl ContactForm {
    pub const NAME: Field<Self, String> = Field::new("name", |f| &f.name, |f| &mut f.name);
    pub const PHONE: Field<Self, String> = Field::new("phone", |f| &f.phone, |f| &mut f.phone);
    pub const EMAIL: Field<Self, String> = Field::new("email", |f| &f.email, |f| &mut f.email);
    pub const MESSAGE: Field<Self, String> =
        Field::new("message", |f| &f.message, |f| &mut f.message);
    pub const AGREEMENT: Field<Self, bool> =
        Field::new("agreement", |f| &f.agreement, |f| &mut f.agreement);
}

impl LeadForm for ContactForm {
    const FORM_ID: &'static str = "contact";

    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            Self::NAME.required(messages::NAME_REQUIRED),
            Self::PHONE.required(messages::PHONE_REQUIRED),
            Self::EMAIL.required(messages::EMAIL_REQUIRED),
            Self::EMAIL.email(messages::EMAIL_INVALID),
            Self::MESSAGE.required(messages::MESSAGE_REQUIRED),
            Self::AGREEMENT.accepted(messages::AGREEMENT_REQUIRED),
        ]
    }
}

/// Free consultation modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub agreement: bool,
}

impl ConsultationRequest {
    pub const NAME: Field<Self, String> = Field::new("name", |f| &f.name, |f| &mut f.name);
    pub const PHONE: Field<Self, String> = Field::new("phone", |f| &f.phone, |f| &mut f.phone);
    pub const EMAIL: Field<Self, String> = Field::new("email", |f| &f.email, |f| &mut f.email);
    pub const AGREEMENT: Field<Self, bool> =
        Field::new("agreement", |f| &f.agreement, |f| &mut f.agreement);
}

impl LeadForm for ConsultationRequest {
    const FORM_ID: &'static str = "consultation";

    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            Self::NAME.required(messages::NAME_REQUIRED),
            Self::PHONE.required(messages::PHONE_REQUIRED),
            Self::EMAIL.required(messages::EMAIL_REQUIRED),
            Self::EMAIL.email(messages::EMAIL_INVALID),
            Self::AGREEMENT.accepted(messages::AGREEMENT_REQUIRED),
        ]
    }
}

/// "Call me back" widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackRequest {
    pub name: String,
    pub phone: String,
    /// Free-form time window, optional.
    pub preferred_time: String,
    pub agreement: bool,
}

impl CallbackRequest {
    pub const NAME: Field<Self, String> = Field::new("name", |f| &f.name, |f| &mut f.name);
    pub const PHONE: Field<Self, String> = Field::new("phone", |f| &f.phone, |f| &mut f.phone);
    pub const PREFERRED_TIME: Field<Self, String> =
        Field::new("preferredTime", |f| &f.preferred_time, |f| &mut f.preferred_time);
    pub const AGREEMENT: Field<Self, bool> =
        Field::new("agreement", |f| &f.agreement, |f| &mut f.agreement);
}

impl LeadForm for CallbackRequest {
    const FORM_ID: &'static str = "callback";

    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            Self::NAME.required(messages::NAME_REQUIRED),
            Self::PHONE.required(messages::PHONE_REQUIRED),
            Self::PHONE.phone(CALLBACK_PHONE_DIGITS, messages::PHONE_TOO_SHORT),
            Self::AGREEMENT.accepted(messages::AGREEMENT_REQUIRED),
        ]
    }
}

/// Inquiry opened from a catalog product card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInquiry {
    pub product_id: String,
    pub name: String,
    pub phone: String,
    /// Optional, but must be well formed when given.
    pub email: String,
    pub message: String,
    pub agreement: bool,
}

impl ProductInquiry {
    pub const PRODUCT_ID: Field<Self, String> =
        Field::new("productId", |f| &f.product_id, |f| &mut f.product_id);
    pub const NAME: Field<Self, String> = Field::new("name", |f| &f.name, |f| &mut f.name);
    pub const PHONE: Field<Self, String> = Field::new("phone", |f| &f.phone, |f| &mut f.phone);
    pub const EMAIL: Field<Self, String> = Field::new("email", |f| &f.email, |f| &mut f.email);
    pub const MESSAGE: Field<Self, String> =
        Field::new("message", |f| &f.message, |f| &mut f.message);
    pub const AGREEMENT: Field<Self, bool> =
        Field::new("agreement", |f| &f.agreement, |f| &mut f.agreement);

    /// Starting values for an inquiry about `product_id`.
    pub fn for_product(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            ..Self::default()
        }
    }
}

impl LeadForm for ProductInquiry {
    const FORM_ID: &'static str = "product-inquiry";

    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            Self::PRODUCT_ID.required(messages::PRODUCT_REQUIRED),
            Self::NAME.required(messages::NAME_REQUIRED),
            Self::PHONE.required(messages::PHONE_REQUIRED),
            Self::EMAIL.email(messages::EMAIL_INVALID),
            Self::AGREEMENT.accepted(messages::AGREEMENT_REQUIRED),
        ]
    }
}

/// Blog newsletter subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSignup {
    pub email: String,
    pub agreement: bool,
}

impl NewsletterSignup {
    pub const EMAIL: Field<Self, String> = Field::new("email", |f| &f.email, |f| &mut f.email);
    pub const AGREEMENT: Field<Self, bool> =
        Field::new("agreement", |f| &f.agreement, |f| &mut f.agreement);
}

impl LeadForm for NewsletterSignup {
    const FORM_ID: &'static str = "newsletter";

    fn rules() -> Vec<FieldRule<Self>> {
        vec![
            Self::EMAIL.required(messages::EMAIL_REQUIRED),
            Self::EMAIL.email(messages::EMAIL_INVALID),
            Self::AGREEMENT.accepted(messages::AGREEMENT_REQUIRED),
        ]
    }
}
