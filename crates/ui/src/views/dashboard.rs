use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ClientRowVm, WorkoutCardVm, map_client_rows, map_workout_cards};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    clients: Vec<ClientRowVm>,
    workouts: Vec<WorkoutCardVm>,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = ctx.dashboard();
    let trainer_id = ctx.trainer_id();
    let trainer_name = ctx.trainer_name().to_owned();

    let mut resource = use_resource(move || {
        let dashboard = dashboard.clone();
        async move {
            let overview = dashboard.overview(trainer_id).await.map_err(|err| {
                tracing::warn!(error = %err, "dashboard load failed");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(DashboardData {
                clients: map_client_rows(&overview.recent_clients),
                workouts: map_workout_cards(&overview.recent_workouts),
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Welcome back, {trainer_name}" }

            div { class: "quick-actions",
                Link { class: "btn btn-primary", to: Route::Clients {}, "Add Client" }
                Link { class: "btn", to: Route::NewWorkout {}, "Create Workout" }
                Link { class: "btn", to: Route::LogSession {}, "Log Session" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "grid-2",
                        section { class: "card",
                            h3 { "Recent Clients" }
                            if data.clients.is_empty() {
                                p { class: "muted", "No clients yet." }
                            } else {
                                ul { class: "list",
                                    for client in data.clients {
                                        li { key: "{client.id}",
                                            Link { to: Route::ClientDetail { id: client.id },
                                                span { class: "avatar", "{client.initials}" }
                                                span { "{client.name}" }
                                            }
                                            span { class: "muted", "Joined {client.joined}" }
                                        }
                                    }
                                }
                            }
                        }
                        section { class: "card",
                            h3 { "Recent Workouts" }
                            if data.workouts.is_empty() {
                                p { class: "muted", "No workouts yet." }
                            } else {
                                ul { class: "list",
                                    for workout in data.workouts {
                                        li { key: "{workout.id}",
                                            Link { to: Route::WorkoutDetail { id: workout.id }, "{workout.name}" }
                                            if let Some(level) = workout.difficulty.clone() {
                                                span { class: workout.difficulty_class, "{level}" }
                                            }
                                        }
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
