use serde_json::json;
use services::http::Method;
use services::{ScriptedReply, ScriptedTransport};

use super::test_harness::{TEST_USER, ViewKind, flashcards_reply, setup_view_harness};

fn two_cards() -> serde_json::Value {
    json!({ "flashcards": [
        {
            "flashcardId": "f1",
            "word": { "wordId": "w1", "word": "account", "explanation": "a record" },
            "meanings": [{ "meaningId": "m1", "pos": "noun", "translation": "kouza", "exampleEng": "Open an account." }],
            "checkFlag": true
        },
        {
            "flashcardId": "f2",
            "word": { "wordId": "w2", "word": "ledger" }
        }
    ] })
}

#[tokio::test(flavor = "current_thread")]
async fn memorization_view_renders_loaded_cards() {
    let transport = ScriptedTransport::new();
    flashcards_reply(&transport, &two_cards());
    let mut harness = setup_view_harness(ViewKind::Memorization, transport);

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("account"), "missing first card in {html}");
    assert!(html.contains("ledger"), "missing second card in {html}");
    assert!(html.contains("Open an account."), "missing example in {html}");
    assert!(html.contains("Hide all"), "missing visibility controls in {html}");
    assert_eq!(
        harness
            .transport
            .calls_to(Method::Get, &format!("/flashcard/{TEST_USER}")),
        1
    );
}

#[tokio::test(flavor = "current_thread")]
async fn memorization_view_offers_retry_on_failure() {
    let transport = ScriptedTransport::new().with(
        Method::Get,
        &format!("/flashcard/{TEST_USER}"),
        ScriptedReply::status(500, "down"),
    );
    let mut harness = setup_view_harness(ViewKind::Memorization, transport);

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Failed to load your flashcards. Please try again."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn memorization_view_shows_empty_state() {
    let transport = ScriptedTransport::new();
    flashcards_reply(&transport, &json!({ "flashcards": [] }));
    let mut harness = setup_view_harness(ViewKind::Memorization, transport);

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("No flashcards yet"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn comparisons_view_tells_empty_from_failed() {
    let transport = ScriptedTransport::new().with(
        Method::Get,
        &format!("/comparison/{TEST_USER}"),
        ScriptedReply::json(200, &json!({ "comparisons": [] })),
    );
    let mut harness = setup_view_harness(ViewKind::Comparisons, transport);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Nothing to compare yet."), "missing empty state in {html}");

    let transport = ScriptedTransport::new().with(
        Method::Get,
        &format!("/comparison/{TEST_USER}"),
        ScriptedReply::status(500, "down"),
    );
    let mut harness = setup_view_harness(ViewKind::Comparisons, transport);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong. Please try again."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}
