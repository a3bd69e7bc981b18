//! Locales supported by the backend's bilingual content.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported locale codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Georgian.
    Ka,
}

impl Locale {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Ka]
    }

    /// Locale key used in localized payloads.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ka => "ka",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

/// Error returned when a locale code is not supported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownLocale {
    /// Code that failed to parse.
    pub value: String,
}

impl Display for UnknownLocale {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "unsupported locale '{}'", self.value)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ka" => Ok(Self::Ka),
            _ => Err(UnknownLocale {
                value: value.to_string(),
            }),
        }
    }
}
