use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExerciseFilterState, ExerciseForm, ExerciseRowVm, muscle_group_options};

pub(crate) const DIFFICULTY_OPTIONS: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];

#[component]
pub fn ExercisesView() -> Element {
    let ctx = use_context::<AppContext>();
    let exercises = ctx.exercises();

    let mut filter = use_signal(ExerciseFilterState::default);
    let mut form = use_signal(ExerciseForm::default);
    let mut show_form = use_signal(|| false);
    let mut form_error = use_signal(|| None::<ViewError>);

    let mut resource = use_resource({
        let exercises = exercises.clone();
        move || {
            let exercises = exercises.clone();
            let filter = filter.read().to_filter();
            async move {
                let found = exercises.search(&filter).await.map_err(ViewError::from)?;
                Ok::<_, ViewError>(found.iter().map(ExerciseRowVm::from).collect::<Vec<_>>())
            }
        }
    });
    let state = view_state_from_resource(&resource);

    let submit = use_callback(move |()| {
        let exercises = exercises.clone();
        let draft = form.read().to_draft();
        spawn(async move {
            match exercises.add_exercise(draft).await {
                Ok(_) => {
                    form.set(ExerciseForm::default());
                    form_error.set(None);
                    show_form.set(false);
                    resource.restart();
                }
                Err(err) => form_error.set(Some(ViewError::from(err))),
            }
        });
    });

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h2 { "Exercise Library" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| show_form.toggle(),
                    if show_form() { "Cancel" } else { "Add Exercise" }
                }
            }

            if show_form() {
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
                    label { "Muscle group"
                        select {
                            value: "{form.read().muscle_group}",
                            onchange: move |evt| form.write().muscle_group = evt.value(),
                            option { value: "", "Select..." }
                            for group in muscle_group_options().into_iter().skip(1) {
                                option { key: "{group}", value: group, "{group}" }
                            }
                        }
                    }
                    label { "Equipment"
                        input {
                            value: "{form.read().equipment}",
                            oninput: move |evt| form.write().equipment = evt.value(),
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
                    if let Some(err) = form_error() {
                        ErrorBanner { error: err }
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Save Exercise" }
                }
            }

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

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "muted", "No exercises match your search." }
                    } else {
                        div { class: "exercise-grid",
                            for row in rows {
                                ExerciseCard { key: "{row.id}", row: row.clone() }
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
fn ExerciseCard(row: ExerciseRowVm) -> Element {
    rsx! {
        div { class: "card exercise-card",
            h3 { "{row.name}" }
            div { class: "tags",
                if let Some(group) = row.muscle_group.clone() {
                    span { class: "badge", "{group}" }
                }
                if let Some(equipment) = row.equipment.clone() {
                    span { class: "badge badge-muted", "{equipment}" }
                }
                if let Some(level) = row.difficulty.clone() {
                    span { class: row.difficulty_class, "{level}" }
                }
            }
        }
    }
}
