use dioxus::prelude::*;
use vocab_core::model::{FlashcardId, VisibilityField};

use crate::vm::{BroadcastCommand, CARD_APPLY_DELAY, CardVisibility, FlashcardVm};

/// One card on the memorization page.
///
/// Outside a broadcast each field is shown or hidden by clicking it. While
/// the page broadcasts (`command` is set) the card adopts the pushed value
/// and reports back through `on_applied` once it has had time to render.
#[component]
pub fn FlashcardItem(
    card: FlashcardVm,
    command: Option<BroadcastCommand>,
    on_applied: EventHandler<u64>,
    on_check: EventHandler<(FlashcardId, bool)>,
) -> Element {
    let mut visibility = use_signal(CardVisibility::default);

    use_effect(use_reactive!(|command| {
        let Some(command) = command else {
            return;
        };
        if visibility.write().adopt(command) {
            spawn(async move {
                tokio::time::sleep(CARD_APPLY_DELAY).await;
                on_applied.call(command.cycle);
            });
        }
    }));

    let shown = visibility.read().settings();
    let flashcard_id = card.flashcard_id.clone();
    let check_flag = card.check_flag;
    let has_examples = card.has_examples();

    rsx! {
        article { class: if check_flag { "flashcard is-checked" } else { "flashcard" },
            header { class: "flashcard-header",
                FieldToggle {
                    field: VisibilityField::Word,
                    visible: shown.word,
                    on_toggle: move |field| visibility.write().toggle(field),
                    h3 { class: "flashcard-word", "{card.word}" }
                }
                label { class: "flashcard-check",
                    input {
                        r#type: "checkbox",
                        checked: check_flag,
                        onchange: move |_| on_check.call((flashcard_id.clone(), !check_flag)),
                    }
                    "Learned"
                }
            }

            if let Some(url) = card.image_url.clone() {
                FieldToggle {
                    field: VisibilityField::Image,
                    visible: shown.image,
                    on_toggle: move |field| visibility.write().toggle(field),
                    img { class: "flashcard-image", src: "{url}", alt: "{card.word}" }
                }
            }

            FieldToggle {
                field: VisibilityField::Meanings,
                visible: shown.meanings,
                on_toggle: move |field| visibility.write().toggle(field),
                ul { class: "flashcard-meanings",
                    for (idx, meaning) in card.meanings.iter().enumerate() {
                        li { key: "{idx}",
                            span { class: "meaning-pos", "{meaning.pos}" }
                            span { class: "meaning-translation", "{meaning.translation}" }
                            if let Some(pronunciation) = meaning.pronunciation.as_deref() {
                                span { class: "meaning-pronunciation", "{pronunciation}" }
                            }
                        }
                    }
                }
            }

            if has_examples {
                FieldToggle {
                    field: VisibilityField::Examples,
                    visible: shown.examples,
                    on_toggle: move |field| visibility.write().toggle(field),
                    ul { class: "flashcard-examples",
                        for (idx, meaning) in card.meanings.iter().enumerate() {
                            li { key: "{idx}",
                                p { class: "example-eng", "{meaning.example_eng}" }
                                p { class: "example-jpn", "{meaning.example_jpn}" }
                            }
                        }
                    }
                }
            }

            if card.core_meaning.is_some() || card.explanation.is_some() {
                FieldToggle {
                    field: VisibilityField::Explanation,
                    visible: shown.explanation,
                    on_toggle: move |field| visibility.write().toggle(field),
                    div { class: "flashcard-explanation",
                        if let Some(core) = card.core_meaning.as_deref() {
                            p { class: "core-meaning", "{core}" }
                        }
                        if let Some(explanation) = card.explanation.as_deref() {
                            p { "{explanation}" }
                        }
                    }
                }
            }

            if !card.memo.is_empty() {
                p { class: "flashcard-memo", "{card.memo}" }
            }
        }
    }
}

#[component]
fn FieldToggle(
    field: VisibilityField,
    visible: bool,
    on_toggle: EventHandler<VisibilityField>,
    children: Element,
) -> Element {
    rsx! {
        section {
            class: if visible { "card-field" } else { "card-field is-hidden" },
            "data-field": field.label(),
            onclick: move |_| on_toggle.call(field),
            if visible {
                {children}
            } else {
                span { class: "card-field-placeholder", "{field.label()}" }
            }
        }
    }
}
