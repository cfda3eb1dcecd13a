use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{WorkoutCardVm, map_workout_cards};

#[component]
pub fn WorkoutsView() -> Element {
    let ctx = use_context::<AppContext>();
    let workouts = ctx.workouts();
    let trainer_id = ctx.trainer_id();

    let mut resource = use_resource(move || {
        let workouts = workouts.clone();
        async move {
            let list = workouts
                .list_workouts(trainer_id)
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_workout_cards(&list))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h2 { "Workout Templates" }
                Link { class: "btn btn-primary", to: Route::NewWorkout {}, "Create Workout" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "muted", "No workout templates yet." }
                    } else {
                        div { class: "workout-grid",
                            for card in cards {
                                WorkoutCard { key: "{card.id}", card: card.clone() }
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

#[component]
fn WorkoutCard(card: WorkoutCardVm) -> Element {
    rsx! {
        Link { class: "card workout-card", to: Route::WorkoutDetail { id: card.id },
            div { class: "card-title",
                h3 { "{card.name}" }
                if let Some(level) = card.difficulty.clone() {
                    span { class: card.difficulty_class, "{level}" }
                }
            }
            if let Some(focus) = card.focus.clone() {
                p { "{focus}" }
            }
            p { class: "muted",
                if let Some(duration) = card.duration.clone() {
                    "{duration} • "
                }
                "Created {card.created}"
            }
        }
    }
}
