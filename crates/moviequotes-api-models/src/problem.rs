//! Validation error payloads returned with 4xx responses.
//!
//! The backend reports `{ "message": "...", "errors": { field: [ ... ] } }`
//! where each entry is either a plain string or a locale-keyed map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Single validation message, localized or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedMessage {
    /// Message keyed by locale code.
    Localized(BTreeMap<String, String>),
    /// Message without translations.
    Plain(String),
}

impl LocalizedMessage {
    /// Message text for the locale, falling back to English.
    #[must_use]
    pub fn text(&self, locale: Locale) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Localized(messages) => messages
                .get(locale.code())
                .or_else(|| messages.get(Locale::En.code()))
                .map(String::as_str),
        }
    }
}

/// Problem body attached to rejected requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationProblem {
    /// Summary message.
    #[serde(default)]
    pub message: Option<String>,
    /// Ordered messages per form field.
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<LocalizedMessage>>,
}

impl ValidationProblem {
    /// Whether the problem carries any field errors.
    #[must_use]
    pub fn has_field_errors(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }

    /// First message for a field in the given locale.
    #[must_use]
    pub fn first_message(&self, field: &str, locale: Locale) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .and_then(|message| message.text(locale))
    }

    /// First message of every field, resolved for the locale.
    #[must_use]
    pub fn field_messages(&self, locale: Locale) -> BTreeMap<String, String> {
        self.errors
            .keys()
            .filter_map(|field| {
                self.first_message(field, locale)
                    .map(|message| (field.clone(), message.to_string()))
            })
            .collect()
    }
}
