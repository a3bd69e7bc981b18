//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use moviequotes_api_models::{Locale, Movie, Quote, QuoteId, User};
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

pub(crate) fn render_user(user: Option<&User>, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&user),
        OutputFormat::Text => Ok(user.map_or_else(
            || "not signed in".to_string(),
            |user| format!("{} <{}> (id {})", user.username, user.email, user.id),
        )),
    }
}

pub(crate) fn render_quotes(
    quotes: &[Quote],
    locale: Locale,
    format: OutputFormat,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(quotes);
    }
    let mut text = format!("{:<6} {:<6} {:>5} {:>8} QUOTE", "ID", "MOVIE", "LIKES", "COMMENTS");
    for quote in quotes {
        let _ = write!(
            text,
            "\n{:<6} {:<6} {:>5} {:>8} {}",
            quote.id,
            quote.movie_id,
            quote.likes_count,
            quote.comments.len(),
            truncate(quote.body.get(locale), 60)
        );
    }
    if quotes.is_empty() {
        text.push_str("\n(no quotes)");
    }
    Ok(text)
}

pub(crate) fn render_movie(movie: &Movie, locale: Locale, format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(movie);
    }
    let mut text = format!("id: {}", movie.id);
    let _ = write!(text, "\nname: {}", movie.name.get(locale));
    let _ = write!(text, "\ndirector: {}", movie.director.get(locale));
    let _ = write!(text, "\nreleased: {}", movie.release_date);
    let _ = write!(text, "\nbudget: {}", movie.budget);
    if !movie.genres.is_empty() {
        let genres: Vec<&str> = movie
            .genres
            .iter()
            .map(|genre| genre.name.get(locale))
            .collect();
        let _ = write!(text, "\ngenres: {}", genres.join(", "));
    }
    let _ = write!(text, "\nquotes: {}", movie.quotes.len());
    for quote in &movie.quotes {
        let _ = write!(
            text,
            "\n  #{} ({} likes) {}",
            quote.id,
            quote.likes_count,
            truncate(quote.body.get(locale), 60)
        );
    }
    Ok(text)
}

pub(crate) fn render_like(
    quote_id: QuoteId,
    liked: bool,
    likes: Option<u32>,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&json!({
            "quote_id": quote_id,
            "liked": liked,
            "likes_count": likes,
        })),
        OutputFormat::Text => {
            let verb = if liked { "liked" } else { "unliked" };
            Ok(likes.map_or_else(
                || format!("{verb} quote {quote_id}"),
                |count| format!("{verb} quote {quote_id} ({count} likes)"),
            ))
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviequotes_api_models::{LocalizedText, MovieId};

    fn quote(id: u64, en: &str) -> Quote {
        Quote {
            id: QuoteId(id),
            body: LocalizedText::new(en, "ქართულად"),
            thumbnail: None,
            movie_id: MovieId(1),
            likes_count: 4,
            comments: Vec::new(),
            author: None,
            created_at: None,
        }
    }

    #[test]
    fn quotes_render_in_the_requested_locale() {
        let text = render_quotes(&[quote(3, "Hello")], Locale::Ka, OutputFormat::Text)
            .expect("renders");
        assert!(text.starts_with("ID"));
        assert!(text.contains("ქართულად"));
        assert!(!text.contains("Hello"));
    }

    #[test]
    fn empty_feed_says_so() {
        let text = render_quotes(&[], Locale::En, OutputFormat::Text).expect("renders");
        assert!(text.ends_with("(no quotes)"));
    }

    #[test]
    fn long_quotes_are_truncated_on_char_boundaries() {
        let long = "ა".repeat(80);
        let short = truncate(&long, 10);
        assert_eq!(short.chars().count(), 10);
        assert!(short.ends_with('…'));
    }

    #[test]
    fn like_json_reports_state() {
        let text = render_like(QuoteId(5), true, Some(8), OutputFormat::Json).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["quote_id"], 5);
        assert_eq!(value["liked"], true);
        assert_eq!(value["likes_count"], 8);
    }

    #[test]
    fn anonymous_whoami_text() {
        assert_eq!(
            render_user(None, OutputFormat::Text).expect("renders"),
            "not signed in"
        );
        assert_eq!(render_user(None, OutputFormat::Json).expect("renders"), "null");
    }
}
