use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use services::http::Method;
use services::resources::{AddFlashcardPhase, AddFlashcardResource};
use services::{AddFlashcardError, ApiClient, ClientConfig, RequestConfig, ScriptedReply, ScriptedTransport};
use vocab_core::ErrorKind;
use vocab_core::model::{Flashcard, FlashcardId, UserId};

fn resource(transport: &ScriptedTransport) -> AddFlashcardResource {
    AddFlashcardResource::new(Arc::new(ApiClient::new(
        ClientConfig::new("http://api.test", RequestConfig::default()),
        Arc::new(transport.clone()),
    )))
}

fn existing() -> Vec<Flashcard> {
    vec![
        serde_json::from_value(json!({
            "flashcardId": "f-account",
            "word": { "wordId": "w-account", "word": "account" }
        }))
        .unwrap(),
    ]
}

#[tokio::test(start_paused = true)]
async fn duplicate_word_fails_before_any_request() {
    let transport = ScriptedTransport::new();
    let add = resource(&transport);

    let err = add
        .add(&UserId::new("u-1"), "Account", &existing())
        .await
        .unwrap_err();

    assert!(matches!(err, AddFlashcardError::Duplicate(_)));
    assert_eq!(transport.call_count(), 0);
    let state = add.state();
    assert!(!state.is_loading);
    assert_eq!(state.phase, AddFlashcardPhase::Failed);
    assert_eq!(
        state.error.as_deref(),
        Some("\"Account\" is already in your flashcards.")
    );
}

#[tokio::test(start_paused = true)]
async fn empty_word_fails_before_any_request() {
    let transport = ScriptedTransport::new();
    let add = resource(&transport);

    let err = add.add(&UserId::new("u-1"), "  ", &[]).await.unwrap_err();

    assert!(matches!(err, AddFlashcardError::EmptyWord));
    assert_eq!(transport.call_count(), 0);
    assert!(!add.state().is_loading);
}

#[tokio::test(start_paused = true)]
async fn known_word_reuses_flashcard_and_attaches() {
    let transport = ScriptedTransport::new()
        .with(
            Method::Get,
            "/word/ledger",
            ScriptedReply::json(200, &json!({ "flashcardId": "f-ledger" })),
        )
        .with(
            Method::Put,
            "/user/add/usingFlashcard",
            ScriptedReply::status(200, ""),
        );
    let add = resource(&transport);

    let id = add
        .add(&UserId::new("u-1"), "ledger", &existing())
        .await
        .unwrap();

    assert_eq!(id, FlashcardId::new("f-ledger"));
    assert_eq!(transport.calls_to(Method::Post, "/flashcard/create"), 0);
    let attach = transport.calls().pop().unwrap();
    assert_eq!(
        attach.body,
        Some(json!({ "userId": "u-1", "flashcardId": "f-ledger" }))
    );
    let state = add.state();
    assert!(state.is_success);
    assert!(!state.is_loading);
    assert_eq!(state.phase, AddFlashcardPhase::Succeeded);
    assert_eq!(state.added, Some(FlashcardId::new("f-ledger")));
}

#[tokio::test(start_paused = true)]
async fn unknown_word_is_created_first() {
    let transport = ScriptedTransport::new()
        .with(
            Method::Get,
            "/word/ice%20cream",
            ScriptedReply::json(404, &json!({ "error": "word not found" })),
        )
        .with(
            Method::Post,
            "/flashcard/create",
            ScriptedReply::json(201, &json!({ "flashcardId": "f-new" })),
        )
        .with(
            Method::Put,
            "/user/add/usingFlashcard",
            ScriptedReply::status(200, ""),
        );
    let add = resource(&transport);

    let id = add
        .add(&UserId::new("u-1"), " ice cream ", &existing())
        .await
        .unwrap();

    assert_eq!(id, FlashcardId::new("f-new"));
    let methods: Vec<Method> = transport.calls().iter().map(|call| call.method).collect();
    assert_eq!(methods, vec![Method::Get, Method::Post, Method::Put]);
    assert_eq!(transport.calls()[1].body, Some(json!({ "word": "ice cream" })));
}

#[tokio::test(start_paused = true)]
async fn lookup_failure_other_than_not_found_aborts() {
    let transport = ScriptedTransport::new().with(
        Method::Get,
        "/word/ledger",
        ScriptedReply::status(401, "expired"),
    );
    let add = resource(&transport);

    let err = add
        .add(&UserId::new("u-1"), "ledger", &[])
        .await
        .unwrap_err();

    let AddFlashcardError::Api(err) = err else {
        panic!("expected an api error");
    };
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(transport.call_count(), 1);
    let state = add.state();
    assert!(!state.is_loading);
    assert_eq!(
        state.error.as_deref(),
        Some("Your session has expired. Please sign in again.")
    );
}

#[tokio::test(start_paused = true)]
async fn attach_failure_still_clears_loading() {
    let transport = ScriptedTransport::new()
        .with(
            Method::Get,
            "/word/ledger",
            ScriptedReply::json(200, &json!({ "flashcardId": "f-ledger" })),
        )
        .with(
            Method::Put,
            "/user/add/usingFlashcard",
            ScriptedReply::status(500, ""),
        );
    let add = resource(&transport);

    assert!(add.add(&UserId::new("u-1"), "ledger", &[]).await.is_err());

    assert!(!add.state().is_loading);
    assert_eq!(transport.calls_to(Method::Put, "/user/add/usingFlashcard"), 3);
}

#[tokio::test(start_paused = true)]
async fn loading_is_visible_before_first_request() {
    let transport = ScriptedTransport::new()
        .with(
            Method::Get,
            "/word/ledger",
            ScriptedReply::json(200, &json!({ "flashcardId": "f-ledger" })),
        )
        .with(
            Method::Put,
            "/user/add/usingFlashcard",
            ScriptedReply::status(200, ""),
        );
    let add = resource(&transport).with_paint_delay(Duration::from_millis(100));
    let user = UserId::new("u-1");

    let started = tokio::time::Instant::now();
    let observe = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        (add.state().is_loading, transport.call_count())
    };
    let (result, (loading, calls)) = tokio::join!(add.add(&user, "ledger", &[]), observe);

    assert!(result.is_ok());
    assert!(loading);
    assert_eq!(calls, 0);
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn abandoned_add_clears_loading() {
    let transport = ScriptedTransport::new().with(Method::Get, "/word/ledger", ScriptedReply::Hang);
    let add = resource(&transport);
    let user = UserId::new("u-1");

    let outcome = tokio::time::timeout(
        Duration::from_millis(500),
        add.add(&user, "ledger", &[]),
    )
    .await;

    assert!(outcome.is_err());
    assert!(!add.state().is_loading);
}
