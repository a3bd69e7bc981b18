//! Payloads submitted by the client.
//!
//! # Design
//! - Keep drafts as plain data; form/multipart encoding happens in the client.
//! - Optional fields on `ProfileChanges` double as the caller's dirty markers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::LocalizedText;
use crate::ids::{GenreId, MovieId, QuoteId};

/// Binary file attached to a multipart submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type of the payload.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// New or replacement movie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieDraft {
    /// Title.
    pub name: LocalizedText,
    /// Director.
    pub director: LocalizedText,
    /// Synopsis.
    pub description: LocalizedText,
    /// Budget in whole currency units.
    pub budget: u64,
    /// Release date.
    pub release_date: NaiveDate,
    /// Selected genres.
    pub genre_ids: Vec<GenreId>,
    /// Thumbnail image; required on create, optional on edit.
    pub thumbnail: Option<Upload>,
}

/// New quote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteDraft {
    /// Quote text.
    pub body: LocalizedText,
    /// Movie the quote belongs to.
    pub movie_id: MovieId,
    /// Thumbnail image.
    pub thumbnail: Option<Upload>,
}

/// Replacement content for an existing quote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteEdit {
    /// Quote text.
    pub body: LocalizedText,
    /// Optional new thumbnail.
    pub thumbnail: Option<Upload>,
}

/// New comment on a quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentDraft {
    /// Commented quote.
    pub quote_id: QuoteId,
    /// Comment text.
    pub body: String,
}

/// New password plus confirmation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    /// New password.
    pub password: String,
    /// Confirmation of the new password.
    pub password_confirmation: String,
}

/// Independently submitted parts of a profile edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    /// Display name.
    Username,
    /// Avatar image.
    Avatar,
    /// Password.
    Password,
    /// Additional email address.
    Email,
}

impl ProfileField {
    /// Form field key used in validation payloads.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Avatar => "avatar",
            Self::Password => "password",
            Self::Email => "email",
        }
    }
}

/// Profile edits submitted together; `Some` marks a field as dirty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// New display name.
    pub username: Option<String>,
    /// New avatar image.
    pub avatar: Option<Upload>,
    /// New password.
    pub password: Option<PasswordChange>,
    /// Additional email address.
    pub email: Option<String>,
}

impl ProfileChanges {
    /// Fields marked dirty, in submission order.
    #[must_use]
    pub fn dirty_fields(&self) -> Vec<ProfileField> {
        let mut fields = Vec::new();
        if self.username.is_some() {
            fields.push(ProfileField::Username);
        }
        if self.avatar.is_some() {
            fields.push(ProfileField::Avatar);
        }
        if self.password.is_some() {
            fields.push(ProfileField::Password);
        }
        if self.email.is_some() {
            fields.push(ProfileField::Email);
        }
        fields
    }

    /// Whether no field is dirty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.avatar.is_none()
            && self.password.is_none()
            && self.email.is_none()
    }
}

/// Sign-up form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Desired display name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub password_confirmation: String,
}

/// Password reset submitted from the emailed link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordReset {
    /// Account email taken from the link.
    pub email: String,
    /// Reset token taken from the link.
    pub token: String,
    /// New password.
    pub password: String,
    /// New password confirmation.
    pub password_confirmation: String,
}
