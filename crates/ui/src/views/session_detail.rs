use dioxus::prelude::*;
use dioxus_router::Link;
use trainer_core::model::SessionId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExerciseTableVm, SessionDetailVm, map_session_detail};

#[component]
pub fn SessionDetailView(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let trainer_id = ctx.trainer_id();

    let mut resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let detail = progress
                .session_detail(trainer_id, SessionId::new(id))
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_session_detail(&detail))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            Link { class: "back-link", to: Route::Progress {}, "← Back to Progress" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    SessionBody { vm }
                },
                ViewState::Error(err) => rsx! {
                    ErrorBanner { error: err, on_retry: move |()| resource.restart() }
                },
            }
        }
    }
}

#[component]
fn SessionBody(vm: SessionDetailVm) -> Element {
    rsx! {
        header { class: "session-header",
            h2 { "{vm.workout_name}" }
            if let Some(focus) = vm.workout_focus.clone() {
                p { class: "muted", "{focus}" }
            }
            p { "{vm.client_name}" }
            p { class: "meta",
                span { "{vm.date} at {vm.time}" }
                if let Some(duration) = vm.duration.clone() {
                    span { " • {duration}" }
                }
                span { class: "badge", "{vm.status}" }
            }
        }

        div { class: "stats",
            for card in vm.cards.iter() {
                div { class: "stat-card", key: "{card.label}",
                    p { class: "stat-label", "{card.label}" }
                    p { class: "stat-value", "{card.value}" }
                }
            }
        }

        if let Some(note) = vm.incomplete_note.clone() {
            p { class: "notice", "{note}" }
        }

        if let Some(notes) = vm.notes_html.clone() {
            section { class: "card",
                h3 { "Session Notes" }
                div { class: "notes", dangerous_inner_html: "{notes}" }
            }
        }

        section { class: "card",
            h3 { "Exercises Performed" }
            if vm.exercises.is_empty() {
                p { class: "muted", "No exercises logged for this session." }
            } else {
                for table in vm.exercises.iter() {
                    ExerciseTable { key: "{table.position}", table: table.clone() }
                }
            }
        }
    }
}

#[component]
fn ExerciseTable(table: ExerciseTableVm) -> Element {
    rsx! {
        div { class: "exercise-block",
            div { class: "exercise-title",
                span { class: "position", "{table.position}" }
                h4 { "{table.name}" }
                if let Some(group) = table.muscle_group.clone() {
                    span { class: "muted", "{group}" }
                }
            }
            table {
                thead {
                    tr {
                        th { "Set" }
                        th { "Reps" }
                        th { "Weight (kg)" }
                        th { "Volume" }
                    }
                }
                tbody {
                    for row in table.rows.iter() {
                        tr {
                            td { "{row.set_number}" }
                            td { "{row.reps}" }
                            td { "{row.weight}" }
                            td { "{row.volume}" }
                        }
                    }
                }
            }
            p { class: "exercise-totals",
                span { "Total Sets: {table.total_sets}" }
                span { "Total Reps: {table.total_reps}" }
                span { "Volume: {table.total_volume}" }
            }
        }
    }
}
