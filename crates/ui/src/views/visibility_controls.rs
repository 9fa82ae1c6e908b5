use dioxus::prelude::*;
use vocab_core::model::{VisibilityField, VisibilitySettings};

/// Header control that pushes one visibility value to every card.
#[component]
pub fn VisibilityControls(
    settings: VisibilitySettings,
    is_applying: bool,
    on_apply: EventHandler<VisibilitySettings>,
) -> Element {
    rsx! {
        div { class: "visibility-controls",
            for field in VisibilityField::ALL {
                button {
                    key: "{field.label()}",
                    class: if settings.is_visible(field) { "visibility-toggle is-on" } else { "visibility-toggle" },
                    r#type: "button",
                    disabled: is_applying,
                    aria_pressed: settings.is_visible(field),
                    onclick: move |_| on_apply.call(settings.toggled(field)),
                    "{field.label()}"
                }
            }
            div { class: "visibility-controls-group",
                button {
                    class: "visibility-all",
                    r#type: "button",
                    disabled: is_applying,
                    onclick: move |_| on_apply.call(VisibilitySettings::all_visible()),
                    "Show all"
                }
                button {
                    class: "visibility-all",
                    r#type: "button",
                    disabled: is_applying,
                    onclick: move |_| on_apply.call(VisibilitySettings::all_hidden()),
                    "Hide all"
                }
            }
            if is_applying {
                span { class: "visibility-status", "Applying..." }
            }
        }
    }
}
