//! Shared CLI error type and client-context construction.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use moviequotes_api_models::Locale;
use moviequotes_client::{ActionError, AppContext, ClientConfig, RemoteError};

/// CLI-level error type to distinguish user mistakes from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ActionError> for CliError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::Rejected { message, fields } => {
                let mut lines =
                    vec![message.unwrap_or_else(|| "the server rejected the submission".into())];
                lines.extend(
                    fields
                        .into_iter()
                        .map(|(field, text)| format!("  {field}: {text}")),
                );
                Self::validation(lines.join("\n"))
            }
            ActionError::Unauthorized => Self::validation("not signed in"),
            ActionError::Busy { action } => {
                Self::validation(format!("{action} already in progress"))
            }
            other => Self::failure(other),
        }
    }
}

impl From<RemoteError> for CliError {
    fn from(err: RemoteError) -> Self {
        if err.is_unauthorized() {
            return Self::validation("not signed in");
        }
        Self::failure(err)
    }
}

/// Options the user supplied for reaching the backend.
#[derive(Debug, Clone)]
pub(crate) struct ConnectOptions {
    pub(crate) api_url: String,
    pub(crate) timeout_secs: u64,
    pub(crate) locale: Locale,
}

/// Build the client configuration from CLI options.
pub(crate) fn build_config(options: &ConnectOptions) -> CliResult<ClientConfig> {
    if options.timeout_secs == 0 {
        return Err(CliError::validation("timeout must be at least one second"));
    }
    let config = ClientConfig::default()
        .with_api_url(&options.api_url)
        .map_err(|err| CliError::validation(err.to_string()))?
        .with_timeout(Duration::from_secs(options.timeout_secs))
        .with_locale(options.locale);
    Ok(config)
}

/// Wire an application context talking HTTP to the configured backend.
pub(crate) fn connect(options: &ConnectOptions) -> CliResult<AppContext> {
    let config = build_config(options)?;
    AppContext::connect(config)
        .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))
}
