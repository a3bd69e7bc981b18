//! Argument parsing and command dispatch.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use moviequotes_api_models::Locale;
use moviequotes_client::AppContext;
use moviequotes_client::config::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, ENV_API_URL, ENV_LOCALE, ENV_TIMEOUT_SECS,
};
use moviequotes_events::{EventEnvelope, EventStream};
use moviequotes_telemetry::{LogFormat, LoggingConfig, init_logging};
use tokio::time::timeout;
use tokio_stream::StreamExt;

use crate::client::{CliResult, ConnectOptions, connect};
use crate::commands::{account, feed, quotes, session};

/// Parses CLI arguments, executes the requested command, and prints its
/// output. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.into(),
        build_sha: option_env!("MOVIE_QUOTES_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: logging disabled: {err}");
    }

    let command = cli.command.label();
    match dispatch(cli).await {
        Ok(text) => {
            if !text.is_empty() {
                println!("{text}");
            }
            tracing::debug!(command, "command completed");
            0
        }
        Err(err) => {
            tracing::debug!(command, exit_code = err.exit_code(), "command failed");
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

/// How long to wait for trailing notifications once a command has finished.
const NOTIFICATION_DRAIN: Duration = Duration::from_millis(250);

/// Execute one parsed invocation and return the rendered output.
///
/// Notifications published while the command runs are logged afterwards.
pub(crate) async fn dispatch(cli: Cli) -> CliResult<String> {
    let context = connect(&cli.connect_options())?;
    let notifications = context.events.subscribe(None);
    let rendered = execute(context, cli.command, cli.output).await;
    for envelope in drain_notifications(notifications).await {
        tracing::info!(
            event_id = envelope.id,
            event = ?envelope.event,
            "ui notification"
        );
    }
    rendered
}

/// Run a command against `context`, dropping it once the command finishes.
pub(crate) async fn execute(
    context: AppContext,
    command: Command,
    output: OutputFormat,
) -> CliResult<String> {
    match command {
        Command::Whoami => session::whoami(&context, output).await,
        Command::Feed(args) => feed::handle_feed(&context, args, output).await,
        Command::Movie(args) => feed::handle_movie(&context, args, output).await,
        Command::Like(args) => quotes::handle_like(&context, args, output).await,
        Command::Comment(args) => quotes::handle_comment(&context, args, output).await,
        Command::ForgotPassword(args) => account::handle_forgot_password(&context, args).await,
    }
}

/// Collect buffered notifications until the bus closes or the drain window ends.
pub(crate) async fn drain_notifications(mut notifications: EventStream) -> Vec<EventEnvelope> {
    let mut received = Vec::new();
    let collect = async {
        while let Some(envelope) = notifications.next().await {
            received.push(envelope);
        }
    };
    if timeout(NOTIFICATION_DRAIN, collect).await.is_err() {
        tracing::debug!("notification drain window elapsed");
    }
    received
}

#[derive(Debug, Parser)]
#[command(
    name = "moviequotes",
    about = "Browse and interact with a Movie Quotes backend"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, env = ENV_API_URL, default_value = DEFAULT_API_URL)]
    pub(crate) api_url: String,
    #[arg(
        long,
        global = true,
        env = ENV_TIMEOUT_SECS,
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = ENV_LOCALE,
        value_parser = parse_locale,
        default_value = "en"
    )]
    pub(crate) locale: Locale,
    #[arg(long, global = true, default_value = "warn")]
    pub(crate) log_level: String,
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Compact)]
    pub(crate) log_format: LogFormatArg,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            locale: self.locale,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show the signed-in user, if any.
    Whoami,
    /// Page through the quote feed.
    Feed(FeedArgs),
    /// Show one movie with its quotes.
    Movie(MovieArgs),
    /// Toggle the like on a quote.
    Like(QuoteArgs),
    /// Comment on a quote.
    Comment(CommentArgs),
    /// Request a password recovery email.
    ForgotPassword(ForgotPasswordArgs),
}

impl Command {
    const fn label(&self) -> &'static str {
        match self {
            Self::Whoami => "whoami",
            Self::Feed(_) => "feed",
            Self::Movie(_) => "movie",
            Self::Like(_) => "like",
            Self::Comment(_) => "comment",
            Self::ForgotPassword(_) => "forgot-password",
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct FeedArgs {
    /// Number of pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) pages: u32,
    /// Search term applied to the feed.
    #[arg(long)]
    pub(crate) search: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct MovieArgs {
    pub(crate) id: u64,
}

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    pub(crate) quote_id: u64,
}

#[derive(Debug, Args)]
pub(crate) struct CommentArgs {
    pub(crate) quote_id: u64,
    pub(crate) body: String,
}

#[derive(Debug, Args)]
pub(crate) struct ForgotPasswordArgs {
    pub(crate) email: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormatArg {
    Pretty,
    #[default]
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

fn parse_locale(raw: &str) -> Result<Locale, String> {
    raw.parse::<Locale>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviequotes_api_models::QuoteId;
    use moviequotes_client::remote::Method;
    use moviequotes_events::UiEvent;
    use moviequotes_test_support::fixtures::{comment_json, quote_json};
    use moviequotes_test_support::{Reply, scripted_context};

    #[test]
    fn defaults_apply_without_flags() {
        let cli = Cli::try_parse_from(["moviequotes", "whoami"]).expect("parses");
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.log_format, LogFormatArg::Compact);
        assert!(matches!(cli.command, Command::Whoami));
    }

    #[test]
    fn feed_accepts_pages_and_search() {
        let cli = Cli::try_parse_from([
            "moviequotes",
            "feed",
            "--pages",
            "3",
            "--search",
            "heat",
            "--output",
            "json",
        ])
        .expect("parses");
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Command::Feed(args) => {
                assert_eq!(args.pages, 3);
                assert_eq!(args.search.as_deref(), Some("heat"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn zero_pages_is_rejected() {
        assert!(Cli::try_parse_from(["moviequotes", "feed", "--pages", "0"]).is_err());
    }

    #[test]
    fn locale_flag_is_parsed() {
        let cli = Cli::try_parse_from(["moviequotes", "--locale", "KA", "movie", "4"])
            .expect("parses");
        assert_eq!(cli.locale, Locale::Ka);
        assert_eq!(cli.command.label(), "movie");
        assert!(Cli::try_parse_from(["moviequotes", "--locale", "fr", "whoami"]).is_err());
    }

    #[test]
    fn comment_takes_quote_and_body() {
        let cli = Cli::try_parse_from(["moviequotes", "comment", "42", "great line"])
            .expect("parses");
        match cli.command {
            Command::Comment(args) => {
                assert_eq!(args.quote_id, 42);
                assert_eq!(args.body, "great line");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn notifications_from_a_command_are_drained() {
        let (remote, context) = scripted_context();
        remote
            .on(
                Method::Post,
                "/api/comments",
                Reply::created(comment_json(1, 42, "great line")),
            )
            .on_get("/api/quotes/42", quote_json(42, 1, 0));
        let notifications = context.events.subscribe(None);
        let command = Command::Comment(CommentArgs {
            quote_id: 42,
            body: "great line".into(),
        });

        let text = execute(context, command, OutputFormat::Text)
            .await
            .expect("comment succeeds");
        let drained = drain_notifications(notifications).await;

        assert_eq!(text, "comment added to quote 42");
        assert_eq!(
            drained
                .iter()
                .map(|envelope| envelope.event.clone())
                .collect::<Vec<_>>(),
            vec![UiEvent::CommentAdded {
                quote_id: QuoteId(42)
            }]
        );
    }
}
