//! Validation messages shown next to form inputs.

pub const NAME_REQUIRED: &str = "Please enter your name";
pub const PHONE_REQUIRED: &str = "Please enter your phone number";
pub const PHONE_TOO_SHORT: &str = "Phone number must contain at least 10 digits";
pub const EMAIL_REQUIRED: &str = "Please enter your email";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_REQUIRED: &str = "Please enter a message";
pub const PRODUCT_REQUIRED: &str = "Please choose a product";
pub const AGREEMENT_REQUIRED: &str = "Please accept the personal data processing terms";
