use moviequotes_api_models::{LocalizedText, MovieId, QuoteEdit, QuoteId, Registration};
use moviequotes_client::remote::Method;
use moviequotes_client::stores::Modal;
use moviequotes_client::{ActionError, Route};
use moviequotes_events::UiEvent;
use moviequotes_test_support::fixtures::{
    movie_draft, movie_json, movie_with_quotes_json, quote_draft, quote_json, quote_page,
};
use moviequotes_test_support::{Reply, scripted_context};
use serde_json::json;

#[tokio::test]
async fn movie_creation_toggles_dialogs_and_notifies() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    remote.on(Method::Post, "/api/movies", Reply::created(movie_json(3, "Heat")));
    context.ui.open(Modal::AddMovie);

    let movie = context.movie_forms.create(&movie_draft("Heat")).await?;

    assert_eq!(movie.id, MovieId(3));
    assert_eq!(context.movies.ids(), vec![MovieId(3)]);
    let flags = context.ui.snapshot();
    assert!(!flags.is_open(Modal::AddMovie));
    assert!(flags.is_open(Modal::MovieAdded));
    assert_eq!(flags.movie_error, None);
    assert_eq!(
        context.events.backlog_since(0)[0].event,
        UiEvent::MovieAdded {
            movie_id: MovieId(3)
        }
    );
    Ok(())
}

#[tokio::test]
async fn rejected_movie_shows_server_message() {
    let (remote, context) = scripted_context();
    remote.on(
        Method::Post,
        "/api/movies",
        Reply::validation(
            "name_en",
            "The name en has already been taken.",
            "სახელი უკვე დაკავებულია.",
        ),
    );
    context.ui.open(Modal::AddMovie);

    let result = context.movie_forms.create(&movie_draft("Heat")).await;

    assert_eq!(
        result.err().and_then(|err| err.field("name_en").map(str::to_string)),
        Some("The name en has already been taken.".to_string())
    );
    let flags = context.ui.snapshot();
    assert!(flags.is_open(Modal::AddMovie));
    assert_eq!(
        flags.movie_error.as_deref(),
        Some("The name en has already been taken.")
    );
    assert!(context.movies.is_empty());
    assert!(context.events.backlog_since(0).is_empty());
}

#[tokio::test]
async fn movie_edit_closes_dialog() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    remote.on(Method::Post, "/api/movies/3", Reply::ok(movie_json(3, "Heat 2")));
    context.ui.open(Modal::EditMovie);

    let movie = context
        .movie_forms
        .edit(MovieId(3), &movie_draft("Heat 2"))
        .await?;

    assert_eq!(movie.name.en, "Heat 2");
    assert!(!context.ui.is_open(Modal::EditMovie));
    assert_eq!(
        context.movies.get(MovieId(3)).map(|movie| movie.name.en),
        Some("Heat 2".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn quote_creation_prepends_then_reloads_feed() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    remote
        .on_get("/api/quotes?page=1", quote_page(&[1, 2]))
        .on_get("/api/quotes?page=1", quote_page(&[9, 1, 2]))
        .on(Method::Post, "/api/quotes", Reply::created(quote_json(9, 1, 0)));
    context.quotes.load_next_page().await?;
    context.ui.open(Modal::AddQuote);

    let quote = context.quote_forms.create(&quote_draft(1, "Say hello")).await?;

    assert_eq!(quote.id, QuoteId(9));
    assert_eq!(
        context.quotes.ids(),
        vec![QuoteId(9), QuoteId(1), QuoteId(2)]
    );
    assert!(context.ui.is_open(Modal::QuoteAdded));
    assert!(!context.ui.is_open(Modal::AddQuote));
    assert_eq!(remote.count(Method::Get, "/api/quotes?page=1"), 2);
    let form = remote.calls_to(Method::Post, "/api/quotes")[0].body.clone();
    assert_eq!(
        form.as_multipart().and_then(|form| form.text_value("movie_id")),
        Some("1")
    );
    Ok(())
}

#[tokio::test]
async fn quote_edit_refreshes_cached_movie_only() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    remote
        .on_get("/api/movies/1", movie_with_quotes_json(1, "Heat", &[4]))
        .on(Method::Post, "/api/quotes/4", Reply::ok(quote_json(4, 1, 0)))
        .on(Method::Post, "/api/quotes/5", Reply::ok(quote_json(5, 2, 0)));
    let _ = context.movies.get_one(MovieId(1)).await;
    let edit = QuoteEdit {
        body: LocalizedText::new("Edited", "შესწორებული"),
        thumbnail: None,
    };

    context.quote_forms.edit(QuoteId(4), &edit).await?;
    context.quote_forms.edit(QuoteId(5), &edit).await?;

    assert!(context.ui.snapshot().quote_edit_succeeded);
    assert_eq!(remote.count(Method::Get, "/api/movies/1"), 2);
    assert_eq!(remote.count(Method::Get, "/api/movies/2"), 0);
    Ok(())
}

#[tokio::test]
async fn registration_navigates_to_sent_email() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    remote.on(Method::Post, "/api/register", Reply::created(json!({})));
    let registration = Registration {
        username: "nino".into(),
        email: "nino@example.test".into(),
        password: "secret-pass".into(),
        password_confirmation: "secret-pass".into(),
    };

    context.account.register(&registration).await?;

    assert_eq!(context.router.current(), Some(Route::SentEmail));
    let body = remote.calls_to(Method::Post, "/api/register")[0].body.clone();
    assert_eq!(
        body.as_json().map(|body| body["email"].clone()),
        Some(json!("nino@example.test"))
    );
    Ok(())
}

#[tokio::test]
async fn registration_errors_are_reported_per_field() {
    let (remote, context) = scripted_context();
    remote.on(
        Method::Post,
        "/api/register",
        Reply::validation(
            "email",
            "The email has already been taken.",
            "ელფოსტა უკვე დაკავებულია.",
        ),
    );
    let registration = Registration {
        username: "nino".into(),
        email: "taken@example.test".into(),
        password: "secret-pass".into(),
        password_confirmation: "secret-pass".into(),
    };

    let result = context.account.register(&registration).await;

    assert!(matches!(
        &result,
        Err(ActionError::Rejected { fields, .. }) if fields.contains_key("email")
    ));
    assert_eq!(context.router.current(), None);
}

#[tokio::test]
async fn password_recovery_flow() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    remote
        .on(Method::Post, "/api/forgot-password", Reply::ok(json!({})))
        .on(Method::Post, "/api/reset-password", Reply::ok(json!({})));

    context.account.forgot_password("nino@example.test").await?;
    assert_eq!(context.router.current(), Some(Route::RecoverInstructions));

    let link = Route::CreatePassword {
        email: "nino@example.test".into(),
        token: "reset-token".into(),
    };
    context
        .account
        .reset_password(&link, "new-secret", "new-secret")
        .await?;

    assert_eq!(context.router.current(), Some(Route::ChangedPassword));
    let body = remote.calls_to(Method::Post, "/api/reset-password")[0]
        .body
        .clone();
    assert_eq!(
        body.as_json().map(|body| body["token"].clone()),
        Some(json!("reset-token"))
    );
    Ok(())
}
