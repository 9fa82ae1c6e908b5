use dioxus::prelude::*;
use services::resources::FlashcardsState;
use tracing::debug;
use vocab_core::model::{FlashcardId, VisibilitySettings};

use crate::context::AppContext;
use crate::views::flashcard_item::FlashcardItem;
use crate::views::state::use_watch;
use crate::views::visibility_controls::VisibilityControls;
use crate::vm::{BroadcastStep, FlashcardVm, SETTLE_DELAY, VisibilityBroadcast, map_flashcards};

#[derive(Clone, Debug, PartialEq)]
enum ListStatus {
    Loading,
    Failed { message: String, retrying: bool },
    Empty,
    Ready(Vec<FlashcardVm>),
}

impl ListStatus {
    fn from_state(state: &FlashcardsState) -> Self {
        if let Some(message) = state.error.clone() {
            Self::Failed {
                message,
                retrying: state.is_loading,
            }
        } else if state.flashcards.is_empty() {
            if state.is_loading {
                Self::Loading
            } else {
                Self::Empty
            }
        } else {
            Self::Ready(map_flashcards(&state.flashcards))
        }
    }

    /// Cards mounted on the page. A failed reload keeps the old list in
    /// state but shows none of it.
    fn card_count(&self) -> usize {
        match self {
            Self::Ready(cards) => cards.len(),
            Self::Loading | Self::Failed { .. } | Self::Empty => 0,
        }
    }
}

#[component]
pub fn MemorizationView() -> Element {
    let ctx = use_context::<AppContext>();
    let user_id = ctx.user_id();
    let flashcards = ctx.services().flashcards().clone();

    let state = use_watch({
        let flashcards = flashcards.clone();
        move || flashcards.subscribe()
    });

    let load = {
        let flashcards = flashcards.clone();
        use_callback(move |()| {
            let flashcards = flashcards.clone();
            let user_id = user_id.clone();
            spawn(async move {
                flashcards.load(&user_id).await;
            });
        })
    };
    use_hook(move || load.call(()));

    let broadcast = use_signal(VisibilityBroadcast::new);

    let status = ListStatus::from_state(&state.read());

    // Cards may come and go mid-broadcast; completion is measured against
    // whatever is mounted now.
    let card_count = status.card_count();
    use_effect(use_reactive!(|card_count| {
        let mut broadcast = broadcast;
        let step = broadcast.write().sync_total(card_count);
        schedule_settle(broadcast, step);
    }));

    let apply = use_callback(move |settings: VisibilitySettings| {
        let mut broadcast = broadcast;
        let total = ListStatus::from_state(&state.read()).card_count();
        let step = broadcast.write().begin(settings, total);
        debug!(cards = total, ?step, "visibility broadcast started");
        schedule_settle(broadcast, step);
    });
    let on_applied = use_callback(move |cycle: u64| {
        let mut broadcast = broadcast;
        let step = broadcast.write().mark_applied(cycle);
        schedule_settle(broadcast, step);
    });
    let on_check = use_callback(move |(flashcard_id, check_flag): (FlashcardId, bool)| {
        let flashcards = flashcards.clone();
        spawn(async move {
            flashcards.update_check_flag(&flashcard_id, check_flag).await;
        });
    });

    let page = broadcast.read().clone();
    let command = page.command();

    rsx! {
        div { class: "page memorization",
            header { class: "memorization-header",
                h2 { "Memorize" }
                VisibilityControls {
                    settings: page.desired(),
                    is_applying: page.is_applying(),
                    on_apply: apply,
                }
            }

            AddWordForm {}

            match status {
                ListStatus::Loading => rsx! {
                    p { class: "status", "Loading..." }
                },
                ListStatus::Failed { message, retrying } => rsx! {
                    div { class: "status error",
                        p { "{message}" }
                        button {
                            r#type: "button",
                            disabled: retrying,
                            onclick: move |_| load.call(()),
                            "Retry"
                        }
                    }
                },
                ListStatus::Empty => rsx! {
                    p { class: "status", "No flashcards yet. Add a word to get started." }
                },
                ListStatus::Ready(cards) => rsx! {
                    div { class: "flashcard-list",
                        for card in cards {
                            FlashcardItem {
                                key: "{card.flashcard_id}",
                                card: card.clone(),
                                command,
                                on_applied,
                                on_check,
                            }
                        }
                    }
                },
            }
        }
    }
}

fn schedule_settle(broadcast: Signal<VisibilityBroadcast>, step: BroadcastStep) {
    if let BroadcastStep::Complete { cycle } = step {
        let mut broadcast = broadcast;
        spawn(async move {
            tokio::time::sleep(SETTLE_DELAY).await;
            broadcast.write().settle(cycle);
        });
    }
}

#[component]
fn AddWordForm() -> Element {
    let ctx = use_context::<AppContext>();
    let user_id = ctx.user_id();
    let add_flashcard = ctx.services().add_flashcard().clone();
    let flashcards = ctx.services().flashcards().clone();

    let add_state = use_watch({
        let add_flashcard = add_flashcard.clone();
        move || add_flashcard.subscribe()
    });
    let mut word = use_signal(String::new);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let add_flashcard = add_flashcard.clone();
        let flashcards = flashcards.clone();
        let user_id = user_id.clone();
        let input = word.read().clone();
        let mut word = word;
        spawn(async move {
            let existing = flashcards.state().flashcards;
            if add_flashcard.add(&user_id, &input, &existing).await.is_ok() {
                word.set(String::new());
                flashcards.load(&user_id).await;
            }
        });
    };

    let current = add_state.read().clone();

    rsx! {
        form { class: "add-word",
            onsubmit: submit,
            input {
                r#type: "text",
                placeholder: "Add a word",
                value: "{word}",
                disabled: current.is_loading,
                oninput: move |evt| word.set(evt.value()),
            }
            button {
                r#type: "submit",
                disabled: current.is_loading,
                if current.is_loading { "Adding..." } else { "Add" }
            }
            if let Some(error) = current.error.as_deref() {
                p { class: "form-error", "{error}" }
            }
        }
    }
}
