//! Typed field accessors and validation rules.
//!
//! A [`Field`] names one member of a form struct and knows how to read and
//! write it. Forms publish their fields as associated constants, so a field
//! that does not exist, or a value of the wrong type, is rejected by the
//! compiler instead of at runtime.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

/// A named, typed accessor into a form struct `F` holding a `T`.
///
/// # Example
///
/// ```
/// use vent_core::form::Field;
///
/// #[derive(Default)]
/// struct Search {
///     query: String,
/// }
///
/// const QUERY: Field<Search, String> = Field::new("query", |s| &s.query, |s| &mut s.query);
///
/// let mut search = Search::default();
/// QUERY.set(&mut search, "split system".to_string());
/// assert_eq!(QUERY.get(&search), "split system");
/// ```
pub struct Field<F, T> {
    name: &'static str,
    get: fn(&F) -> &T,
    get_mut: fn(&mut F) -> &mut T,
}

impl<F, T> Field<F, T> {
    /// Creates a field accessor.
    ///
    /// `name` is the key used in error maps and serialized lead records.
    pub const fn new(name: &'static str, get: fn(&F) -> &T, get_mut: fn(&mut F) -> &mut T) -> Self {
        Self { name, get, get_mut }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<'a>(&self, fields: &'a F) -> &'a T {
        (self.get)(fields)
    }

    pub fn set(&self, fields: &mut F, value: T) {
        *(self.get_mut)(fields) = value;
    }
}

impl<F, T> Clone for Field<F, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F, T> Copy for Field<F, T> {}

impl<F, T> fmt::Debug for Field<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

type Check<F> = Box<dyn Fn(&F) -> Option<String> + Send + Sync>;

/// One validation rule bound to one field.
///
/// Rules are produced by the builder methods on [`Field`] (`required`,
/// `email`, `accepted`, ...). A field may carry several rules; the first one
/// that fails provides the field's message.
pub struct FieldRule<F> {
    field: &'static str,
    check: Check<F>,
}

impl<F> FieldRule<F> {
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Runs the rule, returning the error message when the value is invalid.
    pub fn check(&self, fields: &F) -> Option<String> {
        (self.check)(fields)
    }
}

impl<F> fmt::Debug for FieldRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl<F: 'static> Field<F, String> {
    fn text_rule(
        self,
        message: impl Into<String>,
        accept: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> FieldRule<F> {
        let message = message.into();
        FieldRule {
            field: self.name,
            check: Box::new(move |fields| {
                if accept(self.get(fields)) {
                    None
                } else {
                    Some(message.clone())
                }
            }),
        }
    }

    /// Value must be non-empty after trimming whitespace.
    pub fn required(self, message: impl Into<String>) -> FieldRule<F> {
        self.text_rule(message, is_present)
    }

    /// Value must look like an e-mail address.
    ///
    /// Empty input passes; combine with [`Field::required`] for a mandatory
    /// address.
    pub fn email(self, message: impl Into<String>) -> FieldRule<F> {
        self.text_rule(message, |value| !is_present(value) || is_email(value))
    }

    /// Value must contain at least `min_digits` digits. Formatting characters
    /// such as `+`, brackets, dashes and spaces are ignored.
    pub fn phone(self, min_digits: usize, message: impl Into<String>) -> FieldRule<F> {
        self.text_rule(message, move |value| digit_count(value) >= min_digits)
    }
}

impl<F: 'static> Field<F, bool> {
    /// Checkbox must be ticked (consent / agreement fields).
    pub fn accepted(self, message: impl Into<String>) -> FieldRule<F> {
        let message = message.into();
        FieldRule {
            field: self.name,
            check: Box::new(move |fields| (!*self.get(fields)).then(|| message.clone())),
        }
    }
}

/// True when the value has non-whitespace content.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when the value matches `\S+@\S+\.\S+`.
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}
