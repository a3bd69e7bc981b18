use moviequotes_api_models::QuoteId;
use moviequotes_client::AppContext;

use crate::cli::{CommentArgs, OutputFormat, QuoteArgs};
use crate::client::{CliError, CliResult};
use crate::output::render_like;

pub(crate) async fn handle_like(
    context: &AppContext,
    args: QuoteArgs,
    output: OutputFormat,
) -> CliResult<String> {
    let quote_id = QuoteId(args.quote_id);
    context.likes.load_likeable(quote_id).await?;
    let liked = context.likes.toggle(quote_id).await?;
    let likes = context.quotes.get(quote_id).map(|quote| quote.likes_count);
    render_like(quote_id, liked, likes, output)
}

pub(crate) async fn handle_comment(
    context: &AppContext,
    args: CommentArgs,
    output: OutputFormat,
) -> CliResult<String> {
    let body = args.body.trim();
    if body.is_empty() {
        return Err(CliError::validation("comment body must not be empty"));
    }
    let quote_id = QuoteId(args.quote_id);
    context.comments.set_input(quote_id, body);
    context.comments.submit(quote_id).await?;
    match output {
        OutputFormat::Text => Ok(format!("comment added to quote {quote_id}")),
        OutputFormat::Json => {
            let comments = context
                .quotes
                .get(quote_id)
                .map(|quote| quote.comments)
                .unwrap_or_default();
            crate::output::to_json(&comments)
        }
    }
}
