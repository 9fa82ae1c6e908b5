use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::http::Method;
use services::{
    AppServices, ApiClient, ClientConfig, RequestConfig, ScriptedReply, ScriptedTransport,
};
use vocab_core::model::UserId;

use crate::context::{UiApp, build_app_context};
use crate::views::{ComparisonsView, MemorizationView};

pub const TEST_USER: &str = "u-test";

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn user_id(&self) -> UserId {
        UserId::new(TEST_USER)
    }

    fn services(&self) -> AppServices {
        self.services.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Memorization,
    Comparisons,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::Memorization => rsx! { MemorizationView {} },
        ViewKind::Comparisons => rsx! { ComparisonsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub transport: ScriptedTransport,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Let spawned tasks and state feeds settle, then re-render.
    pub async fn settle(&mut self) {
        for _ in 0..6 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Build a view over scripted HTTP replies. Register replies on the
/// returned transport before calling `rebuild`.
pub fn setup_view_harness(view: ViewKind, transport: ScriptedTransport) -> ViewHarness {
    let client = |base: &str| {
        ApiClient::new(
            ClientConfig::new(base, RequestConfig::default().with_max_retries(0)),
            Arc::new(transport.clone()),
        )
    };
    let services = AppServices::new(client("http://api.test"), client("http://backend.test"));
    let app = Arc::new(TestApp { services });

    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, view });
    ViewHarness { dom, transport }
}

pub fn flashcards_reply(transport: &ScriptedTransport, body: &serde_json::Value) {
    transport.push(
        Method::Get,
        &format!("/flashcard/{TEST_USER}"),
        ScriptedReply::json(200, body),
    );
}
