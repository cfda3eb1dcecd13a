use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, Clock, TrainerIdentity};
use storage::repository::Storage;
use trainer_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    ClientDetailView, ClientsView, DashboardView, ExercisesView, LogSessionView, ProgressView,
    SessionDetailView, WorkoutDetailView, WorkoutsView,
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Clients,
    ClientDetail(u64),
    Workouts,
    WorkoutDetail(u64),
    Exercises,
    Progress,
    LogSession,
    SessionDetail(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Clients => rsx! { ClientsView {} },
        ViewKind::ClientDetail(id) => rsx! { ClientDetailView { id } },
        ViewKind::Workouts => rsx! { WorkoutsView {} },
        ViewKind::WorkoutDetail(id) => rsx! { WorkoutDetailView { id } },
        ViewKind::Exercises => rsx! { ExercisesView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
        ViewKind::LogSession => rsx! { LogSessionView {} },
        ViewKind::SessionDetail(id) => rsx! { SessionDetailView { id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
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

/// Services over `storage` for a fixed trainer and a fixed clock.
pub async fn test_services(storage: &Storage) -> Arc<AppServices> {
    let app = AppServices::new(
        storage,
        Clock::fixed(fixed_now()),
        &TrainerIdentity::new("coach@gymble.com", Some("Coach Kim".into())),
    )
    .await
    .expect("app services");
    Arc::new(app)
}

pub fn mount(app: Arc<AppServices>, view: ViewKind) -> ViewHarness {
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
