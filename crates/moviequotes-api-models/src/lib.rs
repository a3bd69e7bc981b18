#![forbid(unsafe_code)]
#![warn(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Movie Quotes public API.
//!
//! These types describe the wire contract consumed by the client stores and
//! the CLI. Entities are what the backend returns; drafts are what the client
//! submits. Form encoding of drafts lives in the client crate so this crate
//! stays transport-agnostic.

pub mod drafts;
pub mod entities;
pub mod ids;
pub mod locale;
pub mod problem;

pub use drafts::{
    CommentDraft, MovieDraft, PasswordChange, PasswordReset, ProfileChanges, ProfileField,
    QuoteDraft, QuoteEdit, Registration, Upload,
};
pub use entities::{
    Comment, Genre, LikeRecord, Likeable, LocalizedText, Movie, Quote, User, UserSummary,
};
pub use ids::{CommentId, GenreId, LikeId, MovieId, QuoteId, UserId};
pub use locale::{Locale, UnknownLocale};
pub use problem::{LocalizedMessage, ValidationProblem};
