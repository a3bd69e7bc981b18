//! Error types for remote calls and user-initiated actions.
//!
//! # Design
//! - `RemoteError` describes what went wrong on the wire and keeps the parsed
//!   validation problem for non-success statuses.
//! - `ActionError` is what controllers hand back to views: field errors are
//!   already resolved for the active locale.

use std::collections::BTreeMap;

use moviequotes_api_models::{Locale, QuoteId, ValidationProblem};
use thiserror::Error;

use crate::remote::Method;

/// Result alias for remote calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Result alias for controller actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// Field name to message, resolved for one locale.
pub type FieldErrors = BTreeMap<String, String>;

/// Failures produced by a [`RemoteClient`](crate::remote::RemoteClient).
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("{method} {path} could not be completed: {detail}")]
    Transport {
        /// Request method.
        method: Method,
        /// Request path relative to the API root.
        path: String,
        /// Transport-level failure description.
        detail: String,
    },
    /// The server answered with a non-success status.
    #[error("{method} {path} failed with status {status}")]
    Status {
        /// Request method.
        method: Method,
        /// Request path relative to the API root.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Parsed problem body; empty when the body was not a problem document.
        problem: ValidationProblem,
    },
    /// A success body did not match the expected shape.
    #[error("response from {path} could not be decoded: {detail}")]
    Decode {
        /// Request path relative to the API root.
        path: String,
        /// Decoder failure description.
        detail: String,
    },
}

impl RemoteError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Whether the backend refused the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Whether the requested entity does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Whether the server rejected the submitted data.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.status(), Some(400 | 409 | 422))
    }

    /// Parsed problem body for status failures.
    #[must_use]
    pub const fn problem(&self) -> Option<&ValidationProblem> {
        match self {
            Self::Status { problem, .. } => Some(problem),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Summary message reported by the server.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.problem()
            .and_then(|problem| problem.message.as_deref())
    }
}

/// Failures surfaced by mutation controllers.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The server rejected the submission; `fields` holds per-field messages.
    #[error("the server rejected the submission")]
    Rejected {
        /// Summary message, when the server sent one.
        message: Option<String>,
        /// Per-field messages in the active locale.
        fields: FieldErrors,
    },
    /// The session is no longer authenticated.
    #[error("the session is not authenticated")]
    Unauthorized,
    /// The same action is still pending for this target.
    #[error("a previous {action} is still in flight")]
    Busy {
        /// Action label.
        action: &'static str,
    },
    /// An unlike was requested but no like id is known.
    #[error("no like is recorded for quote {quote_id}")]
    MissingLike {
        /// Quote being unliked.
        quote_id: QuoteId,
    },
    /// The server answered with a success status the action does not accept.
    #[error("the server answered with unexpected status {status}")]
    Unconfirmed {
        /// Status received.
        status: u16,
    },
    /// The action needs route parameters the current route does not carry.
    #[error("the current route does not carry {missing}")]
    MissingRouteParameter {
        /// Missing parameter name.
        missing: &'static str,
    },
    /// A request body could not be encoded.
    #[error("request body could not be encoded")]
    Encode(#[from] serde_json::Error),
    /// Any other remote failure.
    #[error(transparent)]
    Remote(RemoteError),
}

impl ActionError {
    /// Map a remote failure into an action error for the given locale.
    ///
    /// Validation statuses become [`ActionError::Rejected`] and 401 becomes
    /// [`ActionError::Unauthorized`]; everything else stays a remote failure.
    #[must_use]
    pub fn from_remote(err: RemoteError, locale: Locale) -> Self {
        if err.is_unauthorized() {
            return Self::Unauthorized;
        }
        if err.is_validation()
            && let RemoteError::Status { problem, .. } = &err
        {
            return Self::Rejected {
                message: problem.message.clone(),
                fields: problem.field_messages(locale),
            };
        }
        Self::Remote(err)
    }

    /// Message for one field, when the server rejected it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Rejected { fields, .. } => fields.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// All field messages carried by the error.
    #[must_use]
    pub fn fields(&self) -> FieldErrors {
        match self {
            Self::Rejected { fields, .. } => fields.clone(),
            _ => FieldErrors::new(),
        }
    }

    /// Summary message suitable for an inline error banner.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Remote(err) => err.server_message(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviequotes_api_models::LocalizedMessage;

    fn status_error(status: u16, problem: ValidationProblem) -> RemoteError {
        RemoteError::Status {
            method: Method::Post,
            path: "/api/movies".into(),
            status,
            problem,
        }
    }

    fn name_problem() -> ValidationProblem {
        let mut errors = BTreeMap::new();
        errors.insert(
            "name_en".to_string(),
            vec![LocalizedMessage::Localized(BTreeMap::from([
                ("en".to_string(), "Name is required".to_string()),
                ("ka".to_string(), "სახელი სავალდებულოა".to_string()),
            ]))],
        );
        ValidationProblem {
            message: Some("The given data was invalid.".into()),
            errors,
        }
    }

    #[test]
    fn validation_status_becomes_rejected_with_localized_fields() {
        let err = ActionError::from_remote(status_error(422, name_problem()), Locale::Ka);
        assert_eq!(err.field("name_en"), Some("სახელი სავალდებულოა"));
        assert_eq!(err.message(), Some("The given data was invalid."));
    }

    #[test]
    fn unauthorized_status_is_not_inline() {
        let err = ActionError::from_remote(
            status_error(401, ValidationProblem::default()),
            Locale::En,
        );
        assert!(matches!(err, ActionError::Unauthorized));
        assert!(err.fields().is_empty());
    }

    #[test]
    fn server_errors_stay_remote() {
        let problem = ValidationProblem {
            message: Some("Server Error".into()),
            errors: BTreeMap::new(),
        };
        let err = ActionError::from_remote(status_error(500, problem), Locale::En);
        assert!(matches!(err, ActionError::Remote(_)));
        assert_eq!(err.message(), Some("Server Error"));
    }

    #[test]
    fn remote_error_predicates() {
        let transport = RemoteError::Transport {
            method: Method::Get,
            path: "/api/user".into(),
            detail: "connection refused".into(),
        };
        assert_eq!(transport.status(), None);
        assert!(!transport.is_unauthorized());
        assert!(status_error(404, ValidationProblem::default()).is_not_found());
        assert!(
            transport
                .to_string()
                .contains("GET /api/user could not be completed")
        );
    }
}
