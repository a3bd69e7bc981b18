use moviequotes_api_models::{PasswordChange, ProfileChanges, ProfileField};
use moviequotes_client::features::FieldOutcome;
use moviequotes_client::remote::Method;
use moviequotes_client::{ActionError, Route};
use moviequotes_events::UiEvent;
use moviequotes_test_support::fixtures::{poster, user_json};
use moviequotes_test_support::{Reply, scripted_context};
use serde_json::json;

fn all_fields() -> ProfileChanges {
    ProfileChanges {
        username: Some("nino_new".into()),
        avatar: Some(poster()),
        password: Some(PasswordChange {
            password: "longer-secret".into(),
            password_confirmation: "longer-secret".into(),
        }),
        email: Some("second@example.test".into()),
    }
}

#[tokio::test]
async fn failed_field_does_not_block_the_others() {
    let (remote, context) = scripted_context();
    remote
        .on(Method::Patch, "/api/user/update-name", Reply::ok(json!({})))
        .on(Method::Post, "/api/user/profile-avatar", Reply::ok(json!({})))
        .on(
            Method::Post,
            "/api/user/update-password",
            Reply::validation(
                "password",
                "The password must be at least 8 characters.",
                "პაროლი უნდა იყოს მინიმუმ 8 სიმბოლო.",
            ),
        )
        .on(Method::Post, "/api/user/add-email", Reply::ok(json!({})))
        .on_get("/api/user", user_json(1, "nino_new"));

    let report = context.profile.submit(&all_fields()).await;

    assert!(!report.all_succeeded());
    assert_eq!(
        report.updated(),
        vec![ProfileField::Username, ProfileField::Avatar, ProfileField::Email]
    );
    assert_eq!(report.failed(), vec![ProfileField::Password]);
    assert_eq!(
        report.field_errors().get("password").map(String::as_str),
        Some("The password must be at least 8 characters.")
    );
    assert_eq!(remote.count(Method::Get, "/api/user"), 1);
    assert_eq!(
        context.users.current().map(|user| user.username),
        Some("nino_new".to_string())
    );
    let profile_events = context.events.count_matching(|event| {
        matches!(
            event,
            UiEvent::ProfileUpdated { failed, .. } if failed == &vec![ProfileField::Password]
        )
    });
    assert_eq!(profile_events, 1);
}

#[tokio::test]
async fn only_dirty_fields_are_sent() {
    let (remote, context) = scripted_context();
    remote
        .on(Method::Patch, "/api/user/update-name", Reply::ok(json!({})))
        .on_get("/api/user", user_json(1, "renamed"));
    let changes = ProfileChanges {
        username: Some("renamed".into()),
        ..ProfileChanges::default()
    };

    let report = context.profile.submit(&changes).await;

    assert!(report.all_succeeded());
    assert!(matches!(
        report.outcome(ProfileField::Avatar),
        FieldOutcome::Skipped
    ));
    let paths: Vec<String> = remote.calls().into_iter().map(|call| call.path).collect();
    assert_eq!(paths, vec!["/api/user/update-name", "/api/user"]);
    let body = remote.calls_to(Method::Patch, "/api/user/update-name")[0]
        .body
        .clone();
    assert_eq!(body.as_json(), Some(&json!({ "username": "renamed" })));
}

#[tokio::test]
async fn nothing_accepted_means_no_user_refresh() {
    let (remote, context) = scripted_context();
    remote.on(Method::Post, "/api/user/add-email", Reply::server_error());
    let changes = ProfileChanges {
        email: Some("dup@example.test".into()),
        ..ProfileChanges::default()
    };

    let report = context.profile.submit(&changes).await;

    assert!(report.into_result().is_err());
    assert_eq!(remote.count(Method::Get, "/api/user"), 0);
}

#[tokio::test]
async fn empty_changes_send_nothing() {
    let (remote, context) = scripted_context();

    let report = context.profile.submit(&ProfileChanges::default()).await;

    assert!(report.all_succeeded());
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn rejected_session_returns_to_landing_once() {
    let (remote, context) = scripted_context();
    remote
        .on(Method::Get, "/api/user", Reply::ok(user_json(1, "nino")))
        .on(Method::Patch, "/api/user/update-name", Reply::unauthorized())
        .on(Method::Post, "/api/user/add-email", Reply::unauthorized());
    let _ = context.router.navigate(Route::Profile).await;
    let changes = ProfileChanges {
        username: Some("x".into()),
        email: Some("x@example.test".into()),
        ..ProfileChanges::default()
    };

    let report = context.profile.submit(&changes).await;

    assert!(matches!(
        report.outcome(ProfileField::Username),
        FieldOutcome::Failed(ActionError::Unauthorized)
    ));
    let landings = context
        .router
        .history()
        .iter()
        .filter(|route| **route == Route::Landing)
        .count();
    assert_eq!(landings, 1);
}
