use dioxus::prelude::*;
use services::api::ComparisonUpdateRequest;
use tracing::warn;
use vocab_core::model::{Comparison, Flashcard, Media};

use crate::context::AppContext;
use crate::views::state::{ViewError, ViewState, use_watch, view_state_from_resource};
use crate::vm::{ComparisonCardVm, merge_comparisons};

#[component]
pub fn ComparisonsView() -> Element {
    let ctx = use_context::<AppContext>();
    let user_id = ctx.user_id();
    let comparison = ctx.services().comparison().clone();
    let flashcards = ctx.services().flashcards().clone();

    let cards_state = use_watch({
        let flashcards = flashcards.clone();
        move || flashcards.subscribe()
    });
    let comparison_state = use_watch({
        let comparison = comparison.clone();
        move || comparison.subscribe()
    });

    let resource = use_resource({
        let comparison = comparison.clone();
        move || {
            let comparison = comparison.clone();
            let user_id = user_id.clone();
            async move {
                comparison
                    .get_comparisons(&user_id)
                    .await
                    .map_err(|err| ViewError::from_app_error(&err))
            }
        }
    });

    let on_select = use_callback(move |(picked, keep_new): (Comparison, bool)| {
        let comparison = comparison.clone();
        let flashcards = flashcards.clone();
        let mut resource = resource;
        spawn(async move {
            let request = ComparisonUpdateRequest::select(&picked, keep_new);
            if !comparison.update(&request).await {
                warn!(comparison_id = %picked.comparison_id, "selection not saved");
                return;
            }
            if keep_new {
                flashcards.replace_media(
                    &picked.flashcard_id,
                    Media {
                        media_id: picked.new_media_id.clone(),
                        meaning_id: None,
                        media_urls: picked.new_media_urls.clone(),
                    },
                );
            }
            resource.restart();
        });
    });

    let state = match view_state_from_resource(resource) {
        ViewState::Ready(comparisons) => ViewState::Ready(pending_rows(
            &cards_state.read().flashcards,
            &comparisons,
        )),
        ViewState::Idle => ViewState::Idle,
        ViewState::Loading => ViewState::Loading,
        ViewState::Error(err) => ViewState::Error(err),
    };
    let saving = comparison_state.read().is_loading;
    let save_error = comparison_state.read().error.clone();

    rsx! {
        div { class: "page comparisons",
            h2 { "Compare media" }

            if let Some(error) = save_error {
                p { class: "form-error", "{error}" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "status", "Loading..." }
                },
                ViewState::Ready(pending) => rsx! {
                    if pending.is_empty() {
                        p { class: "status", "Nothing to compare yet." }
                    } else {
                        ul { class: "comparison-list",
                            for vm in pending {
                                ComparisonRow {
                                    key: "{vm.comparison.comparison_id}",
                                    vm,
                                    saving,
                                    on_select,
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "status error",
                        p { "{err.message()}" }
                        button {
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
            }
        }
    }
}

fn pending_rows(flashcards: &[Flashcard], comparisons: &[Comparison]) -> Vec<ComparisonCardVm> {
    merge_comparisons(flashcards, comparisons)
        .into_iter()
        .filter(|vm| vm.is_pending)
        .collect()
}

#[component]
fn ComparisonRow(
    vm: ComparisonCardVm,
    saving: bool,
    on_select: EventHandler<(Comparison, bool)>,
) -> Element {
    let keep_old = vm.comparison.clone();
    let keep_new = vm.comparison.clone();
    rsx! {
        li { class: "comparison",
            h3 { "{vm.word}" }
            div { class: "comparison-media",
                figure {
                    for url in vm.old_media_urls.iter() {
                        img { key: "{url}", src: "{url}", alt: "current" }
                    }
                    figcaption { "Current" }
                }
                figure {
                    for url in vm.new_media_urls.iter() {
                        img { key: "{url}", src: "{url}", alt: "new" }
                    }
                    figcaption { "New" }
                }
            }
            div { class: "comparison-actions",
                button {
                    r#type: "button",
                    disabled: saving,
                    onclick: move |_| on_select.call((keep_old.clone(), false)),
                    "Keep current"
                }
                button {
                    r#type: "button",
                    disabled: saving,
                    onclick: move |_| on_select.call((keep_new.clone(), true)),
                    "Use new"
                }
            }
        }
    }
}
