//! reqwest-backed [`RemoteClient`].
//!
//! # Design
//! - One `reqwest::Client` with a cookie store carries the session cookie.
//! - Bodies are parsed once; empty bodies become `Value::Null`.
//! - Non-success statuses are classified into [`RemoteError::Status`] with
//!   the validation problem decoded when the body is a problem document.

use async_trait::async_trait;
use moviequotes_api_models::ValidationProblem;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{Method, MultipartForm, RemoteClient, RemoteResponse, RequestBody};
use crate::config::{ClientConfig, ConfigError, parse_api_url};
use crate::error::{RemoteError, RemoteResult};

const HEADER_REQUESTED_WITH: &str = "x-requested-with";

/// HTTP transport talking to the Movie Quotes backend.
#[derive(Clone, Debug)]
pub struct HttpRemoteClient {
    client: Client,
    base_url: Url,
}

impl HttpRemoteClient {
    /// Build a client for the configured API root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] when the TLS backend or client
    /// settings cannot be initialised, or a URL error when `api_url` does not
    /// parse.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let base_url = parse_api_url(&config.api_url)?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HEADER_REQUESTED_WITH,
            HeaderValue::from_static("XMLHttpRequest"),
        );
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| ConfigError::HttpClient { source })?;
        Ok(Self {
            client,
            base_url,
        })
    }

    /// API root requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> RemoteResult<RemoteResponse> {
        let url = self.url_for(path);
        let request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        let request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => {
                request.multipart(multipart(form).map_err(|err| transport(method, path, &err))?)
            }
        };

        debug!(%method, path, "dispatching request");
        let response = request
            .send()
            .await
            .map_err(|err| transport(method, path, &err))?;
        classify(method, path, response).await
    }
}

fn transport(method: Method, path: &str, err: &reqwest::Error) -> RemoteError {
    RemoteError::Transport {
        method,
        path: path.to_string(),
        detail: err.to_string(),
    }
}

fn multipart(form: MultipartForm) -> Result<Form, reqwest::Error> {
    let mut encoded = Form::new();
    for (name, value) in form.fields() {
        encoded = encoded.text(name.clone(), value.clone());
    }
    for (name, upload) in form.files() {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;
        encoded = encoded.part(name.clone(), part);
    }
    Ok(encoded)
}

async fn classify(method: Method, path: &str, response: Response) -> RemoteResult<RemoteResponse> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| transport(method, path, &err))?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).trim().to_string()))
    };

    if status.is_success() {
        return Ok(RemoteResponse::new(status.as_u16(), body));
    }

    let problem = match &body {
        Value::Object(_) => serde_json::from_value::<ValidationProblem>(body.clone())
            .unwrap_or_default(),
        Value::String(text) if !text.is_empty() => ValidationProblem {
            message: Some(text.clone()),
            ..ValidationProblem::default()
        },
        _ => ValidationProblem::default(),
    };
    debug!(%method, path, status = status.as_u16(), "request rejected");
    Err(RemoteError::Status {
        method,
        path: path.to_string(),
        status: status.as_u16(),
        problem,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn url_for_joins_without_duplicate_slashes() -> Result<(), Box<dyn std::error::Error>> {
        let config = ClientConfig::default().with_api_url("http://localhost:8000/")?;
        let client = HttpRemoteClient::new(&config)?;
        assert_eq!(client.url_for("/api/user"), "http://localhost:8000/api/user");
        assert_eq!(client.url_for("api/user"), "http://localhost:8000/api/user");
        Ok(())
    }

    #[test]
    fn url_for_keeps_path_prefix() -> Result<(), Box<dyn std::error::Error>> {
        let config = ClientConfig::default().with_api_url("https://example.test/backend")?;
        let client = HttpRemoteClient::new(&config)?;
        assert_eq!(
            client.url_for("/api/quotes?page=2"),
            "https://example.test/backend/api/quotes?page=2"
        );
        Ok(())
    }
}
