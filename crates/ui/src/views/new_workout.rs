use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use trainer_core::model::ExerciseId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::exercises::DIFFICULTY_OPTIONS;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    ExerciseFilterState, ExerciseRowVm, WorkoutBuilderForm, filter_exercise_rows,
    muscle_group_options,
};

#[component]
pub fn NewWorkoutView() -> Element {
    let ctx = use_context::<AppContext>();
    let trainer_id = ctx.trainer_id();
    let navigator = use_navigator();

    let mut form = use_signal(WorkoutBuilderForm::default);
    let mut filter = use_signal(ExerciseFilterState::default);
    let mut saving = use_signal(|| false);
    let mut form_error = use_signal(|| None::<ViewError>);

    let mut library = use_resource({
        let exercises = ctx.exercises();
        move || {
            let exercises = exercises.clone();
            async move { exercises.list_exercises().await.map_err(ViewError::from) }
        }
    });
    let library_state = view_state_from_resource(&library);

    let submit = use_callback({
        let workouts = ctx.workouts();
        move |()| {
            if saving() {
                return;
            }
            let draft = match form.read().to_draft() {
                Ok(draft) => draft,
                Err(message) => {
                    form_error.set(Some(ViewError::Invalid(message)));
                    return;
                }
            };
            let workouts = workouts.clone();
            spawn(async move {
                saving.set(true);
                match workouts.create_workout(trainer_id, draft).await {
                    Ok(id) => {
                        navigator.push(Route::WorkoutDetail { id: id.value() });
                    }
                    Err(err) => form_error.set(Some(ViewError::from(err))),
                }
                saving.set(false);
            });
        }
    });

    let rows = form.read().rows.clone();

    rsx! {
        div { class: "page",
            Link { class: "back-link", to: Route::Workouts {}, "← Back to Workouts" }
            h2 { "Create Workout Template" }

            div { class: "builder",
                form {
                    class: "card form",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        submit.call(());
                    },
                    label { "Name"
                        input {
                            value: "{form.read().name}",
                            oninput: move |evt| form.write().name = evt.value(),
                        }
                    }
                    label { "Focus"
                        input {
                            placeholder: "e.g. Upper body strength",
                            value: "{form.read().focus}",
                            oninput: move |evt| form.write().focus = evt.value(),
                        }
                    }
                    label { "Duration"
                        input {
                            placeholder: "e.g. 45 min",
                            value: "{form.read().duration}",
                            oninput: move |evt| form.write().duration = evt.value(),
                        }
                    }
                    label { "Difficulty"
                        select {
                            value: "{form.read().difficulty}",
                            onchange: move |evt| form.write().difficulty = evt.value(),
                            option { value: "", "Select..." }
                            for level in DIFFICULTY_OPTIONS {
                                option { key: "{level}", value: level, "{level}" }
                            }
                        }
                    }
                    label { "Notes"
                        textarea {
                            rows: "3",
                            value: "{form.read().notes}",
                            oninput: move |evt| form.write().notes = evt.value(),
                        }
                    }

                    h3 { "Exercises ({rows.len()})" }
                    if rows.is_empty() {
                        p { class: "muted", "Add exercises from the library." }
                    }
                    for (index, row) in rows.iter().cloned().enumerate() {
                        div { class: "builder-row", key: "{row.exercise_id}",
                            span { class: "position", "{index + 1}" }
                            span { class: "builder-name", "{row.name}" }
                            label { "Sets"
                                input {
                                    r#type: "number",
                                    min: "1",
                                    value: "{row.sets}",
                                    oninput: move |evt| {
                                        if let Some(row) = form.write().rows.get_mut(index) {
                                            row.sets = evt.value();
                                        }
                                    },
                                }
                            }
                            label { "Reps"
                                input {
                                    value: "{row.reps}",
                                    oninput: move |evt| {
                                        if let Some(row) = form.write().rows.get_mut(index) {
                                            row.reps = evt.value();
                                        }
                                    },
                                }
                            }
                            label { "Rest (s)"
                                input {
                                    r#type: "number",
                                    min: "0",
                                    value: "{row.rest_seconds}",
                                    oninput: move |evt| {
                                        if let Some(row) = form.write().rows.get_mut(index) {
                                            row.rest_seconds = evt.value();
                                        }
                                    },
                                }
                            }
                            button {
                                class: "btn btn-small",
                                r#type: "button",
                                disabled: index == 0,
                                onclick: move |_| form.write().move_up(index),
                                "↑"
                            }
                            button {
                                class: "btn btn-small",
                                r#type: "button",
                                onclick: move |_| form.write().remove(index),
                                "Remove"
                            }
                        }
                    }

                    if let Some(err) = form_error() {
                        ErrorBanner { error: err }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save Template" }
                    }
                }

                aside { class: "card library",
                    h3 { "Exercise Library" }
                    div { class: "filters",
                        input {
                            r#type: "search",
                            placeholder: "Search exercises...",
                            value: "{filter.read().query}",
                            oninput: move |evt| filter.write().query = evt.value(),
                        }
                        select {
                            value: "{filter.read().muscle_group}",
                            onchange: move |evt| filter.write().muscle_group = evt.value(),
                            for group in muscle_group_options() {
                                option { key: "{group}", value: group, "{group}" }
                            }
                        }
                    }
                    match library_state {
                        ViewState::Idle => rsx! {
                            p { "Idle" }
                        },
                        ViewState::Loading => rsx! {
                            p { "Loading..." }
                        },
                        ViewState::Ready(all) => {
                            let visible = filter_exercise_rows(&all, &filter.read());
                            rsx! {
                                ul { class: "list",
                                    for row in visible {
                                        LibraryItem {
                                            key: "{row.id}",
                                            row: row.clone(),
                                            on_add: move |(id, name): (u64, String)| {
                                                form.write().add_exercise(ExerciseId::new(id), &name);
                                            },
                                        }
                                    }
                                }
                            }
                        }
                        ViewState::Error(err) => rsx! {
                            ErrorBanner { error: err, on_retry: move |()| library.restart() }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn LibraryItem(row: ExerciseRowVm, on_add: EventHandler<(u64, String)>) -> Element {
    let id = row.id;
    let name = row.name.clone();
    rsx! {
        li {
            span { "{row.name}" }
            if let Some(group) = row.muscle_group.clone() {
                span { class: "muted", "{group}" }
            }
            button {
                class: "btn btn-small",
                r#type: "button",
                onclick: move |_| on_add.call((id, name.clone())),
                "Add"
            }
        }
    }
}
