use moviequotes_api_models::MovieId;
use moviequotes_client::core::PageLoad;
use moviequotes_client::{AppContext, Route};

use crate::cli::{FeedArgs, MovieArgs, OutputFormat};
use crate::client::{CliError, CliResult};
use crate::commands::enter;
use crate::output::{render_movie, render_quotes};

pub(crate) async fn handle_feed(
    context: &AppContext,
    args: FeedArgs,
    output: OutputFormat,
) -> CliResult<String> {
    enter(context, Route::NewsFeed).await?;
    context.quotes.set_query(args.search);

    let mut load = context.quotes.load_next_page().await?;
    for _ in 1..args.pages {
        if !matches!(load, PageLoad::Loaded { count, .. } if count > 0) {
            break;
        }
        load = context.quotes.load_more().await?;
    }
    tracing::info!(
        pages = context.quotes.cursor().loaded_pages(),
        quotes = context.quotes.len(),
        "feed loaded"
    );
    render_quotes(&context.quotes.items(), context.config.locale, output)
}

pub(crate) async fn handle_movie(
    context: &AppContext,
    args: MovieArgs,
    output: OutputFormat,
) -> CliResult<String> {
    let id = MovieId(args.id);
    enter(context, Route::MovieDetail { id }).await?;
    let movie = context
        .movies
        .get_one(id)
        .await
        .ok_or_else(|| CliError::validation(format!("movie {id} could not be loaded")))?;
    render_movie(&movie, context.config.locale, output)
}
