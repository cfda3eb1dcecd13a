use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use trainer_core::model::WorkoutId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    ClientRowVm, LogForm, SetField, WorkoutCardVm, format_datetime, map_client_rows,
    map_workout_cards,
};

#[derive(Clone, Debug, PartialEq)]
struct LogChoices {
    clients: Vec<ClientRowVm>,
    workouts: Vec<WorkoutCardVm>,
}

#[component]
pub fn LogSessionView() -> Element {
    let ctx = use_context::<AppContext>();
    let trainer_id = ctx.trainer_id();
    let progress = ctx.progress();
    let navigator = use_navigator();

    let started_at = progress.clock().now();
    let mut form = use_signal(move || LogForm::new(started_at));
    let mut form_error = use_signal(|| None::<ViewError>);

    let mut choices = use_resource({
        let clients = ctx.clients();
        let workouts = ctx.workouts();
        move || {
            let clients = clients.clone();
            let workouts = workouts.clone();
            async move {
                let client_list = clients
                    .list_clients(trainer_id)
                    .await
                    .map_err(ViewError::from)?;
                let workout_list = workouts
                    .list_workouts(trainer_id)
                    .await
                    .map_err(ViewError::from)?;
                Ok::<_, ViewError>(LogChoices {
                    clients: map_client_rows(&client_list),
                    workouts: map_workout_cards(&workout_list),
                })
            }
        }
    });
    let choices_state = view_state_from_resource(&choices);

    let pick_workout = use_callback({
        let progress = progress.clone();
        move |raw: String| {
            form.write().workout_id = raw.clone();
            let Ok(workout_id) = raw.parse::<WorkoutId>() else {
                form.write().exercises.clear();
                return;
            };
            let progress = progress.clone();
            spawn(async move {
                // A newer selection owns the grid; late results are dropped.
                match progress.start_log(trainer_id, workout_id).await {
                    Ok(template) => {
                        if form.write().seed_if_selected(workout_id, &template) {
                            form_error.set(None);
                        }
                    }
                    Err(err) => {
                        if form.read().workout_id.parse::<WorkoutId>().ok() == Some(workout_id) {
                            form_error.set(Some(ViewError::from(err)));
                        }
                    }
                }
            });
        }
    });

    let submit = use_callback(move |()| {
        let Some((header, entries)) = form.write().begin_submit() else {
            return;
        };
        let progress = progress.clone();
        spawn(async move {
            match progress.log_session(trainer_id, header, entries).await {
                Ok(_) => {
                    navigator.push(Route::Progress {});
                }
                Err(err) => form_error.set(Some(ViewError::from(err))),
            }
            form.write().finish_submit();
        });
    });

    let started_label = format_datetime(form.read().started_at);
    let exercises = form.read().exercises.clone();
    let saving = form.read().saving;

    rsx! {
        div { class: "page",
            Link { class: "back-link", to: Route::Progress {}, "← Back to Progress" }
            h2 { "Log Workout Session" }
            p { class: "muted", "Started {started_label}" }

            match choices_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorBanner { error: err, on_retry: move |()| choices.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    form {
                        class: "card form",
                        onsubmit: move |evt: FormEvent| {
                            evt.prevent_default();
                            submit.call(());
                        },
                        label { "Client"
                            select {
                                value: "{form.read().client_id}",
                                onchange: move |evt| form.write().client_id = evt.value(),
                                option { value: "", "Select a client" }
                                for client in data.clients.iter() {
                                    option { key: "{client.id}", value: "{client.id}", "{client.name}" }
                                }
                            }
                        }
                        label { "Workout"
                            select {
                                value: "{form.read().workout_id}",
                                onchange: move |evt| pick_workout.call(evt.value()),
                                option { value: "", "Select a workout" }
                                for workout in data.workouts.iter() {
                                    option { key: "{workout.id}", value: "{workout.id}", "{workout.name}" }
                                }
                            }
                        }
                        label { "Duration (minutes)"
                            input {
                                r#type: "number",
                                min: "0",
                                value: "{form.read().duration}",
                                oninput: move |evt| form.write().duration = evt.value(),
                            }
                        }

                        for (ex_index, exercise) in exercises.iter().cloned().enumerate() {
                            fieldset { class: "log-exercise", key: "{ex_index}",
                                legend { "{exercise.name}" }
                                p { class: "muted", "Target: {exercise.reps_hint} reps" }
                                for (set_index, set) in exercise.sets.iter().cloned().enumerate() {
                                    div { class: "set-row", key: "{set_index}",
                                        span { "Set {set.template.set_number}" }
                                        input {
                                            r#type: "number",
                                            min: "0",
                                            placeholder: "Reps",
                                            value: "{set.reps}",
                                            oninput: move |evt| {
                                                form.write().set_value(ex_index, set_index, SetField::Reps, evt.value());
                                            },
                                        }
                                        input {
                                            r#type: "number",
                                            min: "0",
                                            step: "0.5",
                                            placeholder: "Weight (kg)",
                                            value: "{set.weight}",
                                            oninput: move |evt| {
                                                form.write().set_value(ex_index, set_index, SetField::Weight, evt.value());
                                            },
                                        }
                                    }
                                }
                            }
                        }

                        label { "Notes"
                            textarea {
                                rows: "4",
                                placeholder: "How did the session go? Markdown is supported.",
                                value: "{form.read().notes}",
                                oninput: move |evt| form.write().notes = evt.value(),
                            }
                        }

                        if let Some(err) = form_error() {
                            ErrorBanner { error: err }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: saving,
                            if saving { "Saving..." } else { "Save Session" }
                        }
                    }
                },
            }
        }
    }
}
