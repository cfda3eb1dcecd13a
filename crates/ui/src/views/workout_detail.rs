use dioxus::prelude::*;
use dioxus_router::Link;
use trainer_core::model::WorkoutId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::map_workout_detail;

#[component]
pub fn WorkoutDetailView(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let workouts = ctx.workouts();
    let trainer_id = ctx.trainer_id();

    let mut resource = use_resource(move || {
        let workouts = workouts.clone();
        async move {
            let detail = workouts
                .get_workout_detail(trainer_id, WorkoutId::new(id))
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_workout_detail(&detail))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            Link { class: "back-link", to: Route::Workouts {}, "← Back to Workouts" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    header { class: "workout-header",
                        h2 { "{vm.card.name}" }
                        if let Some(level) = vm.card.difficulty.clone() {
                            span { class: vm.card.difficulty_class, "{level}" }
                        }
                        if let Some(focus) = vm.card.focus.clone() {
                            p { "{focus}" }
                        }
                        p { class: "muted",
                            if let Some(duration) = vm.card.duration.clone() {
                                "{duration} • "
                            }
                            "{vm.exercises.len()} exercises • {vm.total_sets} sets"
                        }
                    }

                    if let Some(notes) = vm.notes_html.clone() {
                        section { class: "card",
                            h3 { "Notes" }
                            div { class: "notes", dangerous_inner_html: "{notes}" }
                        }
                    }

                    section { class: "card",
                        h3 { "Exercises" }
                        table {
                            thead {
                                tr {
                                    th { "#" }
                                    th { "Exercise" }
                                    th { "Sets" }
                                    th { "Reps" }
                                    th { "Rest" }
                                }
                            }
                            tbody {
                                for row in vm.exercises.iter() {
                                    tr { key: "{row.position}",
                                        td { "{row.position}" }
                                        td {
                                            "{row.name}"
                                            if let Some(group) = row.muscle_group.clone() {
                                                span { class: "muted", " ({group})" }
                                            }
                                        }
                                        td { "{row.sets}" }
                                        td { "{row.reps}" }
                                        td { "{row.rest}" }
                                    }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    ErrorBanner { error: err, on_retry: move |()| resource.restart() }
                },
            }
        }
    }
}
