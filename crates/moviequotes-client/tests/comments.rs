use moviequotes_api_models::QuoteId;
use moviequotes_client::ActionError;
use moviequotes_client::remote::Method;
use moviequotes_client::stores::Modal;
use moviequotes_events::UiEvent;
use moviequotes_test_support::fixtures::{comment_json, quote_json, quote_page};
use moviequotes_test_support::{Reply, scripted_context};
use serde_json::json;

const QUOTE: QuoteId = QuoteId(42);

fn comment_events(context: &moviequotes_client::AppContext) -> usize {
    context
        .events
        .count_matching(|event| matches!(event, UiEvent::CommentAdded { .. }))
}

#[tokio::test]
async fn confirmed_comment_refreshes_quote_and_feed() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    let mut commented = quote_json(42, 1, 0);
    commented["comments"] = json!([comment_json(1, 42, "great line")]);
    remote
        .on_get("/api/quotes?page=1", quote_page(&[41, 42]))
        .on(
            Method::Post,
            "/api/comments",
            Reply::created(comment_json(1, 42, "great line")),
        )
        .on_get("/api/quotes/42", commented);

    context.quotes.load_next_page().await?;
    context.comments.set_input(QUOTE, "great line");
    context.comments.submit(QUOTE).await?;

    let post = &remote.calls_to(Method::Post, "/api/comments")[0];
    assert_eq!(
        post.body.as_json(),
        Some(&json!({ "quote_id": 42, "body": "great line" }))
    );
    assert_eq!(context.comments.input(QUOTE), "");
    assert!(context.ui.is_open(Modal::CommentAdded));
    assert_eq!(comment_events(&context), 1);
    assert_eq!(remote.count(Method::Get, "/api/quotes/42"), 1);
    assert_eq!(remote.count(Method::Get, "/api/quotes?page=1"), 2);
    Ok(())
}

#[tokio::test]
async fn comment_is_not_inserted_before_refresh() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    remote
        .on_get("/api/quotes?page=1", quote_page(&[42]))
        .on(
            Method::Post,
            "/api/comments",
            Reply::ok(comment_json(1, 42, "great line")),
        );

    context.quotes.load_next_page().await?;
    context.comments.set_input(QUOTE, "great line");
    context.comments.submit(QUOTE).await?;

    // The quote refresh is unscripted and fails, so the cached quote keeps
    // whatever the feed reload returned: no comments.
    let comments = context
        .quotes
        .get(QUOTE)
        .map(|quote| quote.comments.len());
    assert_eq!(comments, Some(0));
    Ok(())
}

#[tokio::test]
async fn rejected_comment_has_no_side_effects() {
    let (remote, context) = scripted_context();
    remote.on(
        Method::Post,
        "/api/comments",
        Reply::validation("body", "The body field is required.", "ველი სავალდებულოა"),
    );

    context.comments.set_input(QUOTE, "");
    let result = context.comments.submit(QUOTE).await;

    assert_eq!(
        result.err().and_then(|err| err.field("body").map(str::to_string)),
        Some("The body field is required.".to_string())
    );
    assert!(!context.ui.is_open(Modal::CommentAdded));
    assert_eq!(comment_events(&context), 0);
    assert_eq!(remote.count(Method::Get, "/api/quotes/42"), 0);
}

#[tokio::test]
async fn unexpected_success_status_is_not_treated_as_confirmation() {
    let (remote, context) = scripted_context();
    remote.on(
        Method::Post,
        "/api/comments",
        Reply::Success {
            status: 202,
            body: json!(null),
        },
    );

    context.comments.set_input(QUOTE, "queued");
    let result = context.comments.submit(QUOTE).await;

    assert!(matches!(result, Err(ActionError::Unconfirmed { status: 202 })));
    assert_eq!(context.comments.input(QUOTE), "queued");
    assert_eq!(comment_events(&context), 0);
}

#[tokio::test]
async fn comment_during_page_load_still_confirms() -> anyhow::Result<()> {
    let (remote, context) = scripted_context();
    remote
        .on_get("/api/quotes?page=1", quote_page(&[41, 42]))
        .on_get("/api/quotes?page=2", quote_page(&[43]))
        .on(
            Method::Post,
            "/api/comments",
            Reply::created(comment_json(2, 42, "again")),
        )
        .on_get("/api/quotes/42", quote_json(42, 1, 0));
    context.quotes.load_next_page().await?;
    let gate = remote.hold(Method::Get, "/api/quotes?page=2");
    context.comments.set_input(QUOTE, "again");

    let (page, submitted) = tokio::join!(context.quotes.load_more(), async {
        let submitted = context.comments.submit(QUOTE).await;
        gate.release();
        submitted
    });

    submitted?;
    assert!(page?.is_loaded());
    assert_eq!(comment_events(&context), 1);
    assert_eq!(remote.count(Method::Get, "/api/quotes?page=1"), 1);
    assert_eq!(
        context.quotes.ids(),
        vec![QuoteId(41), QuoteId(42), QuoteId(43)]
    );
    Ok(())
}
