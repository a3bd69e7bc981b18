//! JSON bodies and drafts shaped like the backend's.

use chrono::NaiveDate;
use moviequotes_api_models::{GenreId, LocalizedText, MovieDraft, MovieId, QuoteDraft, Upload};
use serde_json::{Value, json};

/// Quote body as returned by `/api/quotes`.
#[must_use]
pub fn quote_json(id: u64, movie_id: u64, likes_count: u32) -> Value {
    json!({
        "id": id,
        "body": { "en": format!("Quote {id}"), "ka": format!("ციტატა {id}") },
        "thumbnail": format!("/storage/quotes/{id}.jpg"),
        "movie_id": movie_id,
        "likes_count": likes_count,
        "comments": [],
        "user": { "id": 1, "username": "nino", "avatar": null },
        "created_at": "2024-03-01T10:00:00Z"
    })
}

/// Page of quotes with the given ids, all from movie 1.
#[must_use]
pub fn quote_page(ids: &[u64]) -> Value {
    Value::Array(ids.iter().map(|id| quote_json(*id, 1, 0)).collect())
}

/// Movie body as returned by `/api/movies`.
#[must_use]
pub fn movie_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": { "en": name, "ka": format!("{name} (ka)") },
        "director": { "en": "Director", "ka": "რეჟისორი" },
        "description": { "en": "Description", "ka": "აღწერა" },
        "budget": 1_000_000,
        "release_date": "2001-05-20",
        "thumbnail": format!("/storage/movies/{id}.jpg"),
        "genres": [{ "id": 1, "name": { "en": "Drama", "ka": "დრამა" } }],
        "quotes": []
    })
}

/// Movie body including its quotes.
#[must_use]
pub fn movie_with_quotes_json(id: u64, name: &str, quote_ids: &[u64]) -> Value {
    let mut movie = movie_json(id, name);
    movie["quotes"] = Value::Array(
        quote_ids
            .iter()
            .map(|quote_id| quote_json(*quote_id, id, 0))
            .collect(),
    );
    movie
}

/// User body as returned by `/api/user`.
#[must_use]
pub fn user_json(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.test"),
        "avatar": null,
        "email_verified_at": "2024-01-01T00:00:00Z"
    })
}

/// Like relation as returned by `POST /api/likes`.
#[must_use]
pub fn like_json(id: u64, quote_id: u64) -> Value {
    json!({ "id": id, "quote_id": quote_id, "user_id": 1 })
}

/// Comment as returned by `POST /api/comments`.
#[must_use]
pub fn comment_json(id: u64, quote_id: u64, body: &str) -> Value {
    json!({ "id": id, "quote_id": quote_id, "body": body, "user": { "id": 1, "username": "nino" } })
}

/// `422` problem body with one localized field message.
#[must_use]
pub fn validation_json(field: &str, en: &str, ka: &str) -> Value {
    json!({
        "message": en,
        "errors": { field: [{ "en": en, "ka": ka }] }
    })
}

/// Small JPEG upload.
#[must_use]
pub fn poster() -> Upload {
    Upload {
        file_name: "poster.jpg".into(),
        content_type: "image/jpeg".into(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

/// Movie draft with a thumbnail.
#[must_use]
pub fn movie_draft(name: &str) -> MovieDraft {
    MovieDraft {
        name: LocalizedText::new(name, format!("{name} (ka)")),
        director: LocalizedText::new("Director", "რეჟისორი"),
        description: LocalizedText::new("Description", "აღწერა"),
        budget: 1_000_000,
        release_date: NaiveDate::from_ymd_opt(2001, 5, 20).unwrap_or_default(),
        genre_ids: vec![GenreId(1)],
        thumbnail: Some(poster()),
    }
}

/// Quote draft with a thumbnail.
#[must_use]
pub fn quote_draft(movie_id: u64, text: &str) -> QuoteDraft {
    QuoteDraft {
        body: LocalizedText::new(text, format!("{text} (ka)")),
        movie_id: MovieId(movie_id),
        thumbnail: Some(poster()),
    }
}
