use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{ComparisonsView, MemorizationView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", MemorizationView)] Memorization {},
        #[route("/comparisons", ComparisonsView)] Comparisons {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Vocab" }
            ul {
                li { Link { to: Route::Memorization {}, "Flashcards" } }
                li { Link { to: Route::Comparisons {}, "Compare media" } }
            }
        }
    }
}
