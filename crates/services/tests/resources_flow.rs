use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use services::api::{ComparisonUpdateRequest, MediaCreateRequest};
use services::http::Method;
use services::resources::comparison::COMPARISON_UPDATE_ERROR;
use services::resources::media::MEDIA_CREATE_ERROR;
use services::resources::templates::TEMPLATES_LOAD_ERROR;
use services::resources::{
    ComparisonResource, ComparisonState, MediaResource, MediaState, TemplatesResource,
    TemplatesState,
};
use services::{AppServices, ApiClient, ClientConfig, RequestConfig, ScriptedReply, ScriptedTransport};
use vocab_core::ErrorKind;
use vocab_core::model::{Comparison, Flashcard, UserId};

fn api(transport: &ScriptedTransport) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(
        ClientConfig::new("http://api.test", RequestConfig::default()),
        Arc::new(transport.clone()),
    ))
}

fn media_request() -> MediaCreateRequest {
    let card: Flashcard = serde_json::from_value(json!({
        "flashcardId": "f1",
        "word": { "wordId": "w1", "word": "run" },
        "meanings": [{ "meaningId": "m1", "pos": "verb", "translation": "hashiru" }]
    }))
    .unwrap();
    MediaCreateRequest::for_meaning(&card, &card.meanings[0])
}

#[tokio::test(start_paused = true)]
async fn media_success_stores_payload_and_clears_creating() {
    let transport = ScriptedTransport::new().with(
        Method::Post,
        "/media/create",
        ScriptedReply::json(
            200,
            &json!({ "comparisonId": "c1", "newMediaId": "nm1", "newMediaUrls": ["https://cdn/1.png"] }),
        )
        .after(Duration::from_secs(20)),
    );
    let media = MediaResource::new(api(&transport));

    let created = media.create(&media_request()).await.expect("created");

    assert_eq!(created.new_media_urls, vec!["https://cdn/1.png".to_string()]);
    let state = media.state();
    assert!(state.is_success);
    assert!(!state.is_creating);
    assert_eq!(state.created, Some(created));
}

#[tokio::test(start_paused = true)]
async fn media_failure_stores_sentence_and_clears_creating() {
    let transport = ScriptedTransport::new().with(
        Method::Post,
        "/media/create",
        ScriptedReply::status(503, "busy"),
    );
    let media = MediaResource::new(api(&transport));

    assert!(media.create(&media_request()).await.is_none());

    let state = media.state();
    assert!(!state.is_creating);
    assert!(!state.is_success);
    assert_eq!(state.error.as_deref(), Some(MEDIA_CREATE_ERROR));
    // The media policy allows a single retry.
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn media_is_creating_while_in_flight() {
    let transport = ScriptedTransport::new().with(
        Method::Post,
        "/media/create",
        ScriptedReply::json(200, &json!({ "comparisonId": "c1", "newMediaId": "nm1" }))
            .after(Duration::from_secs(5)),
    );
    let media = MediaResource::new(api(&transport));
    let request = media_request();

    let observe = async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        media.state().is_creating
    };
    let (created, creating) = tokio::join!(media.create(&request), observe);

    assert!(created.is_some());
    assert!(creating);
    assert!(!media.state().is_creating);
}

#[tokio::test(start_paused = true)]
async fn templates_fall_back_to_empty() {
    let transport =
        ScriptedTransport::new().with(Method::Get, "/template", ScriptedReply::json(200, &json!({})));
    let templates = TemplatesResource::new(api(&transport));

    templates.load().await;

    let state = templates.state();
    assert!(state.templates.is_empty());
    assert!(state.error.is_none());
    assert!(!state.is_loading);
}

#[tokio::test(start_paused = true)]
async fn templates_load_and_fail() {
    let transport = ScriptedTransport::new();
    transport.push(
        Method::Get,
        "/template",
        ScriptedReply::json(
            200,
            &json!({ "templates": [{ "templateId": "t1", "name": "Watercolor" }] }),
        ),
    );
    transport.push(Method::Get, "/template", ScriptedReply::status(404, ""));
    let templates = TemplatesResource::new(api(&transport));

    templates.load().await;
    assert_eq!(templates.state().templates[0].name, "Watercolor");

    templates.load().await;
    let state = templates.state();
    assert_eq!(state.error.as_deref(), Some(TEMPLATES_LOAD_ERROR));
    assert_eq!(state.templates.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn abandoned_template_load_and_comparison_update_clear_loading() {
    let transport = ScriptedTransport::new()
        .with(Method::Get, "/template", ScriptedReply::Hang)
        .with(Method::Put, "/comparison/update", ScriptedReply::Hang);
    let templates = TemplatesResource::new(api(&transport));
    let comparison = ComparisonResource::new(api(&transport));
    let pending: Comparison = serde_json::from_value(json!({
        "comparisonId": "c1",
        "flashcardId": "f1",
        "oldMediaId": "old",
        "newMediaId": "new"
    }))
    .unwrap();
    let request = ComparisonUpdateRequest::select(&pending, false);

    let load = tokio::time::timeout(Duration::from_millis(500), templates.load()).await;
    let update =
        tokio::time::timeout(Duration::from_millis(500), comparison.update(&request)).await;

    assert!(load.is_err());
    assert!(update.is_err());
    assert!(!templates.state().is_loading);
    assert!(!comparison.state().is_loading);
}

#[tokio::test(start_paused = true)]
async fn get_comparisons_returns_error_to_caller() {
    let transport = ScriptedTransport::new().with(
        Method::Get,
        "/comparison/u-1",
        ScriptedReply::json(403, &json!({ "error": "not yours" })),
    );
    let comparison = ComparisonResource::new(api(&transport));

    let err = comparison
        .get_comparisons(&UserId::new("u-1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(err.message(), "not yours");
    assert_eq!(comparison.state(), ComparisonState::default());
}

#[tokio::test(start_paused = true)]
async fn get_comparisons_distinguishes_empty_from_failed() {
    let transport = ScriptedTransport::new().with(
        Method::Get,
        "/comparison/u-1",
        ScriptedReply::json(200, &json!({ "comparisons": [] })),
    );
    let comparison = ComparisonResource::new(api(&transport));

    let list = comparison.get_comparisons(&UserId::new("u-1")).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test(start_paused = true)]
async fn comparison_update_records_selection() {
    let transport = ScriptedTransport::new();
    transport.push(Method::Put, "/comparison/update", ScriptedReply::status(200, ""));
    transport.push(Method::Put, "/comparison/update", ScriptedReply::status(400, "bad"));
    let comparison = ComparisonResource::new(api(&transport));
    let pending: Comparison = serde_json::from_value(json!({
        "comparisonId": "c1",
        "flashcardId": "f1",
        "oldMediaId": "old",
        "newMediaId": "new"
    }))
    .unwrap();
    let request = ComparisonUpdateRequest::select(&pending, true);

    assert!(comparison.update(&request).await);
    assert_eq!(comparison.state().update_result, Some(request.clone()));
    assert_eq!(
        transport.calls()[0].body,
        Some(json!({
            "flashcardId": "f1",
            "comparisonId": "c1",
            "oldMediaId": "old",
            "newMediaId": "new",
            "isSelectedNew": true
        }))
    );

    assert!(!comparison.update(&request).await);
    let state = comparison.state();
    assert!(!state.is_success);
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some(COMPARISON_UPDATE_ERROR));
}

#[tokio::test(start_paused = true)]
async fn user_calls_go_to_backend_origin() {
    let api_transport = ScriptedTransport::new();
    let backend_transport = ScriptedTransport::new()
        .with(Method::Post, "/user/setup", ScriptedReply::status(200, ""))
        .with(
            Method::Put,
            "/user/update",
            ScriptedReply::json(400, &json!({ "message": "email already used" })),
        );
    let services = AppServices::new(
        ApiClient::new(
            ClientConfig::new("http://api.test", RequestConfig::default()),
            Arc::new(api_transport.clone()),
        ),
        ApiClient::new(
            ClientConfig::new("http://backend.test", RequestConfig::backend()),
            Arc::new(backend_transport.clone()),
        ),
    );
    let user = UserId::new("u-1");

    services
        .user()
        .setup(&user, " Kim ", "kim@example.com")
        .await
        .unwrap();
    assert_eq!(
        backend_transport.calls()[0].url,
        "http://backend.test/user/setup"
    );
    assert_eq!(
        backend_transport.calls()[0].body,
        Some(json!({ "userId": "u-1", "userName": "Kim", "email": "kim@example.com" }))
    );

    let err = services
        .user()
        .update(&user, "Kim", "taken@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let state = services.user().state();
    assert_eq!(
        state.error.as_deref(),
        Some("The request was invalid: email already used")
    );
    assert!(!state.is_loading);
    assert_eq!(api_transport.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn reset_all_twice_is_stable() {
    let transport = ScriptedTransport::new()
        .with(
            Method::Get,
            "/template",
            ScriptedReply::json(
                200,
                &json!({ "templates": [{ "templateId": "t1", "name": "Ink" }] }),
            ),
        )
        .with(Method::Post, "/media/create", ScriptedReply::status(500, ""));
    let services = AppServices::new(
        ApiClient::new(
            ClientConfig::new("http://api.test", RequestConfig::default()),
            Arc::new(transport.clone()),
        ),
        ApiClient::new(
            ClientConfig::new("http://backend.test", RequestConfig::backend()),
            Arc::new(transport.clone()),
        ),
    );
    services.templates().load().await;
    let _ = services.media().create(&media_request()).await;

    services.reset_all();
    let templates_first = services.templates().state();
    let media_first = services.media().state();
    services.reset_all();

    assert_eq!(templates_first, TemplatesState::default());
    assert_eq!(services.templates().state(), templates_first);
    assert_eq!(media_first, MediaState::default());
    assert_eq!(services.media().state(), media_first);
}
