//! Form encodings for drafts submitted to the backend.
//!
//! Field names follow the backend's form requests: localized values are
//! split into `<field>_en` / `<field>_ka`, genres travel as a JSON array
//! string. A body becomes multipart only when a file is attached.

use moviequotes_api_models::{
    GenreId, LocalizedText, MovieDraft, MovieId, QuoteDraft, QuoteEdit, Upload,
};
use serde_json::{Map, Value};

use super::{MultipartForm, RequestBody};

/// Ordered text fields plus an optional file, encoded on demand.
#[derive(Debug, Default)]
struct FormFields {
    text: Vec<(String, String)>,
    file: Option<(&'static str, Upload)>,
}

impl FormFields {
    fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.text.push((name.to_string(), value.into()));
        self
    }

    fn localized(self, prefix: &str, value: &LocalizedText) -> Self {
        self.text(&format!("{prefix}_en"), value.en.clone())
            .text(&format!("{prefix}_ka"), value.ka.clone())
    }

    fn file(mut self, name: &'static str, upload: Option<&Upload>) -> Self {
        self.file = upload.map(|upload| (name, upload.clone()));
        self
    }

    fn into_body(self) -> RequestBody {
        match self.file {
            Some((name, upload)) => {
                let form = self
                    .text
                    .into_iter()
                    .fold(MultipartForm::new(), |form, (field, value)| {
                        form.text(field, value)
                    });
                RequestBody::Multipart(form.file(name, upload))
            }
            None => {
                let map: Map<String, Value> = self
                    .text
                    .into_iter()
                    .map(|(field, value)| (field, Value::String(value)))
                    .collect();
                RequestBody::Json(Value::Object(map))
            }
        }
    }
}

fn genre_list(ids: &[GenreId]) -> String {
    let values: Vec<Value> = ids.iter().map(|id| Value::from(id.get())).collect();
    Value::Array(values).to_string()
}

/// Encode a movie create/edit submission.
#[must_use]
pub fn movie_body(draft: &MovieDraft) -> RequestBody {
    FormFields::default()
        .localized("name", &draft.name)
        .text("genre", genre_list(&draft.genre_ids))
        .localized("director", &draft.director)
        .localized("description", &draft.description)
        .text("budget", draft.budget.to_string())
        .text("release_date", draft.release_date.format("%Y-%m-%d").to_string())
        .file("thumbnail", draft.thumbnail.as_ref())
        .into_body()
}

/// Encode a quote create submission.
#[must_use]
pub fn quote_body(draft: &QuoteDraft) -> RequestBody {
    quote_fields(&draft.body, Some(draft.movie_id), draft.thumbnail.as_ref())
}

/// Encode a quote edit submission.
#[must_use]
pub fn quote_edit_body(edit: &QuoteEdit) -> RequestBody {
    quote_fields(&edit.body, None, edit.thumbnail.as_ref())
}

fn quote_fields(
    body: &LocalizedText,
    movie_id: Option<MovieId>,
    thumbnail: Option<&Upload>,
) -> RequestBody {
    let fields = FormFields::default().localized("body", body);
    let fields = match movie_id {
        Some(movie_id) => fields.text("movie_id", movie_id.to_string()),
        None => fields,
    };
    fields.file("thumbnail", thumbnail).into_body()
}

/// Encode an avatar upload.
#[must_use]
pub fn avatar_body(upload: &Upload) -> RequestBody {
    RequestBody::Multipart(MultipartForm::new().file("avatar", upload.clone()))
}
