//! Entities returned by the backend.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, GenreId, LikeId, MovieId, QuoteId, UserId};
use crate::locale::Locale;

/// Text stored in every supported locale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// English text.
    #[serde(default)]
    pub en: String,
    /// Georgian text.
    #[serde(default)]
    pub ka: String,
}

impl LocalizedText {
    /// Build a bilingual value.
    #[must_use]
    pub fn new(en: impl Into<String>, ka: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ka: ka.into(),
        }
    }

    /// Text for the requested locale.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Ka => &self.ka,
        }
    }
}

/// Author reference embedded in quotes and comments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Author id.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Avatar URL when one was uploaded.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Comment attached to a quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id.
    pub id: CommentId,
    /// Comment text.
    pub body: String,
    /// Quote the comment belongs to.
    pub quote_id: QuoteId,
    /// Comment author.
    #[serde(default, alias = "user")]
    pub author: Option<UserSummary>,
}

/// Quote from a movie, with its aggregate like count and comments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote id.
    pub id: QuoteId,
    /// Quote text.
    pub body: LocalizedText,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Movie the quote was taken from.
    pub movie_id: MovieId,
    /// Server-computed like count.
    #[serde(default)]
    pub likes_count: u32,
    /// Comments in server order.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Quote author.
    #[serde(default, alias = "user")]
    pub author: Option<UserSummary>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Movie genre.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre id.
    pub id: GenreId,
    /// Genre name.
    #[serde(default)]
    pub name: LocalizedText,
}

/// Movie with its metadata and, on single fetches, its quotes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Movie id.
    pub id: MovieId,
    /// Title.
    pub name: LocalizedText,
    /// Director.
    pub director: LocalizedText,
    /// Synopsis.
    pub description: LocalizedText,
    /// Budget in whole currency units.
    #[serde(default)]
    pub budget: u64,
    /// Release date.
    pub release_date: NaiveDate,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Genres attached to the movie.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Quotes, populated by the single-movie endpoint.
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

impl Movie {
    /// Genre ids as a set.
    #[must_use]
    pub fn genre_ids(&self) -> BTreeSet<GenreId> {
        self.genres.iter().map(|genre| genre.id).collect()
    }
}

/// Signed-in account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account id.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Primary email address.
    pub email: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// When the email address was verified.
    #[serde(default)]
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the account finished email verification.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Author reference for this account.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Like relation created by `POST /api/likes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRecord {
    /// Like id, needed to delete the like later.
    pub id: LikeId,
    /// Liked quote.
    pub quote_id: QuoteId,
    /// User who liked the quote.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Like status of a quote for the signed-in user.
///
/// `likeable` is `true` while the user has not liked the quote yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Likeable {
    /// Whether a like can still be added.
    pub likeable: bool,
    /// Existing like id when the quote is already liked.
    #[serde(default)]
    pub like_id: Option<LikeId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_defaults_optional_collections() -> Result<(), serde_json::Error> {
        let quote: Quote = serde_json::from_value(json!({
            "id": 42,
            "body": { "en": "Here's looking at you, kid.", "ka": "" },
            "movie_id": 3
        }))?;
        assert_eq!(quote.id, QuoteId(42));
        assert_eq!(quote.likes_count, 0);
        assert!(quote.comments.is_empty());
        assert_eq!(quote.body.get(Locale::En), "Here's looking at you, kid.");
        Ok(())
    }

    #[test]
    fn comment_accepts_user_alias_for_author() -> Result<(), serde_json::Error> {
        let comment: Comment = serde_json::from_value(json!({
            "id": 1,
            "body": "great line",
            "quote_id": 42,
            "user": { "id": 5, "username": "rick" }
        }))?;
        assert_eq!(comment.author.map(|author| author.username), Some("rick".into()));
        Ok(())
    }

    #[test]
    fn movie_exposes_genre_ids() -> Result<(), serde_json::Error> {
        let movie: Movie = serde_json::from_value(json!({
            "id": 1,
            "name": { "en": "Casablanca", "ka": "კასაბლანკა" },
            "director": { "en": "Michael Curtiz", "ka": "" },
            "description": { "en": "", "ka": "" },
            "budget": 950_000,
            "release_date": "1942-11-26",
            "genres": [ { "id": 4 }, { "id": 2 }, { "id": 4 } ]
        }))?;
        assert_eq!(
            movie.genre_ids().into_iter().collect::<Vec<_>>(),
            vec![GenreId(2), GenreId(4)]
        );
        assert_eq!(movie.name.get(Locale::Ka), "კასაბლანკა");
        Ok(())
    }

    #[test]
    fn user_verification_follows_timestamp() -> Result<(), serde_json::Error> {
        let pending: User = serde_json::from_value(json!({
            "id": 1, "username": "ilsa", "email": "ilsa@example.com"
        }))?;
        assert!(!pending.is_verified());
        let verified: User = serde_json::from_value(json!({
            "id": 1, "username": "ilsa", "email": "ilsa@example.com",
            "email_verified_at": "2024-01-01T00:00:00Z"
        }))?;
        assert!(verified.is_verified());
        assert_eq!(verified.summary().username, "ilsa");
        Ok(())
    }
}
