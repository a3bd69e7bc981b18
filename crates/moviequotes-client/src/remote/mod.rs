//! Request/response seam between stores and the backend.
//!
//! # Design
//! - Stores and controllers only talk to `dyn RemoteClient`; the reqwest
//!   implementation lives in [`http`], scripted doubles live in test support.
//! - Bodies are either JSON or multipart; multipart is used when a file is
//!   attached.
//! - Non-success statuses are turned into [`RemoteError::Status`] by the
//!   implementation, so callers only see success bodies on `Ok`.

pub mod forms;
pub mod http;

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use moviequotes_api_models::Upload;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RemoteError, RemoteResult};

/// HTTP verbs used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    /// Read.
    Get,
    /// Create or form-style update.
    Post,
    /// Partial update.
    Patch,
    /// Removal.
    Delete,
}

impl Method {
    /// Upper-case verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Multipart form with text fields and attached files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    files: Vec<(String, Upload)>,
}

impl MultipartForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append a file field.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, upload: Upload) -> Self {
        self.files.push((name.into(), upload));
        self
    }

    /// Text fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// File fields in insertion order.
    #[must_use]
    pub fn files(&self) -> &[(String, Upload)] {
        &self.files
    }

    /// Value of the first text field with the given name.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// File attached under the given name.
    #[must_use]
    pub fn file_value(&self, name: &str) -> Option<&Upload> {
        self.files
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, upload)| upload)
    }
}

/// Request payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON document.
    Json(Value),
    /// Multipart form.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serialize a value into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error when the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Json)
    }

    /// JSON document, when this is a JSON body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Empty | Self::Multipart(_) => None,
        }
    }

    /// Multipart form, when this is a multipart body.
    #[must_use]
    pub const fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            Self::Multipart(form) => Some(form),
            Self::Empty | Self::Json(_) => None,
        }
    }
}

/// Successful response.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Parsed body; `Value::Null` when the body was empty.
    pub body: Value,
}

impl RemoteResponse {
    /// Build a response from status and body.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the server confirmed a creation (200 or 201).
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Decode the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self, path: &str) -> RemoteResult<T> {
        serde_json::from_value(self.body).map_err(|err| RemoteError::Decode {
            path: path.to_string(),
            detail: err.to_string(),
        })
    }
}

/// Transport used by stores and controllers.
///
/// Implementations only need [`RemoteClient::send`]; the verb helpers
/// delegate to it.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Dispatch a request to `path` (relative to the API root).
    async fn send(&self, method: Method, path: &str, body: RequestBody)
    -> RemoteResult<RemoteResponse>;

    /// `GET path`.
    async fn get(&self, path: &str) -> RemoteResult<RemoteResponse> {
        self.send(Method::Get, path, RequestBody::Empty).await
    }

    /// `POST path` with a body.
    async fn post(&self, path: &str, body: RequestBody) -> RemoteResult<RemoteResponse> {
        self.send(Method::Post, path, body).await
    }

    /// `PATCH path` with a body.
    async fn patch(&self, path: &str, body: RequestBody) -> RemoteResult<RemoteResponse> {
        self.send(Method::Patch, path, body).await
    }

    /// `DELETE path`.
    async fn delete(&self, path: &str) -> RemoteResult<RemoteResponse> {
        self.send(Method::Delete, path, RequestBody::Empty).await
    }
}

/// `GET path` and decode the body.
///
/// # Errors
///
/// Propagates transport and status failures, and decode failures of the body.
pub async fn fetch_json<T: DeserializeOwned>(
    remote: &dyn RemoteClient,
    path: &str,
) -> RemoteResult<T> {
    remote.get(path).await?.decode(path)
}
