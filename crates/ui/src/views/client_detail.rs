use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use trainer_core::model::{ClientId, WorkoutId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    ClientForm, ClientProfileVm, SessionRowVm, WorkoutCardVm, map_client_profile,
    map_session_rows, map_workout_cards,
};

#[derive(Clone, Debug, PartialEq)]
struct ClientDetailData {
    profile: ClientProfileVm,
    form: ClientForm,
    sessions: Vec<SessionRowVm>,
    assignable: Vec<WorkoutCardVm>,
}

#[component]
pub fn ClientDetailView(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let trainer_id = ctx.trainer_id();
    let client_id = ClientId::new(id);
    let navigator = use_navigator();

    let mut editing = use_signal(|| false);
    let mut form = use_signal(ClientForm::default);
    let mut confirm_delete = use_signal(|| false);
    let mut selected_workout = use_signal(String::new);
    let mut action_error = use_signal(|| None::<ViewError>);

    let mut resource = use_resource({
        let ctx = ctx.clone();
        move || {
            let clients = ctx.clients();
            let workouts = ctx.workouts();
            let progress = ctx.progress();
            async move {
                let profile = clients
                    .get_profile(trainer_id, client_id)
                    .await
                    .map_err(ViewError::from)?;
                let sessions = progress
                    .list_sessions_for_client(trainer_id, client_id)
                    .await
                    .map_err(ViewError::from)?;
                let library = workouts
                    .list_workouts(trainer_id)
                    .await
                    .map_err(ViewError::from)?;

                let assigned: Vec<_> = profile.workouts.iter().map(|a| a.workout.id()).collect();
                let assignable: Vec<_> = library
                    .into_iter()
                    .filter(|w| !assigned.contains(&w.id()))
                    .collect();

                Ok::<_, ViewError>(ClientDetailData {
                    form: ClientForm::from_client(&profile.client),
                    profile: map_client_profile(&profile),
                    sessions: map_session_rows(&sessions),
                    assignable: map_workout_cards(&assignable),
                })
            }
        }
    });
    let state = view_state_from_resource(&resource);

    let save = use_callback({
        let clients = ctx.clients();
        move |()| {
            let clients = clients.clone();
            let draft = form.read().to_draft();
            spawn(async move {
                match clients.update_client(trainer_id, client_id, draft).await {
                    Ok(_) => {
                        editing.set(false);
                        action_error.set(None);
                        resource.restart();
                    }
                    Err(err) => action_error.set(Some(ViewError::from(err))),
                }
            });
        }
    });

    let delete = use_callback({
        let clients = ctx.clients();
        move |()| {
            let clients = clients.clone();
            spawn(async move {
                match clients.delete_client(trainer_id, client_id).await {
                    Ok(()) => {
                        navigator.push(Route::Clients {});
                    }
                    Err(err) => {
                        confirm_delete.set(false);
                        action_error.set(Some(ViewError::from(err)));
                    }
                }
            });
        }
    });

    let assign = use_callback({
        let clients = ctx.clients();
        move |()| {
            let Ok(workout_id) = selected_workout.read().parse::<WorkoutId>() else {
                return;
            };
            let clients = clients.clone();
            spawn(async move {
                match clients.assign_workout(trainer_id, client_id, workout_id).await {
                    Ok(()) => {
                        selected_workout.set(String::new());
                        action_error.set(None);
                        resource.restart();
                    }
                    Err(err) => action_error.set(Some(ViewError::from(err))),
                }
            });
        }
    });

    let unassign = use_callback({
        let clients = ctx.clients();
        move |workout_id: u64| {
            let clients = clients.clone();
            spawn(async move {
                match clients
                    .unassign_workout(trainer_id, client_id, WorkoutId::new(workout_id))
                    .await
                {
                    Ok(()) => resource.restart(),
                    Err(err) => action_error.set(Some(ViewError::from(err))),
                }
            });
        }
    });

    rsx! {
        div { class: "page",
            Link { class: "back-link", to: Route::Clients {}, "← Back to Clients" }

            if let Some(err) = action_error() {
                ErrorBanner { error: err }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => {
                    let client = data.profile.client.clone();
                    let current = data.form.clone();
                    rsx! {
                        section { class: "card profile",
                            span { class: "avatar avatar-lg", "{client.initials}" }
                            if editing() {
                                form {
                                    class: "form",
                                    onsubmit: move |evt: FormEvent| {
                                        evt.prevent_default();
                                        save.call(());
                                    },
                                    label { "Name"
                                        input {
                                            value: "{form.read().name}",
                                            oninput: move |evt| form.write().name = evt.value(),
                                        }
                                    }
                                    label { "Email"
                                        input {
                                            r#type: "email",
                                            value: "{form.read().email}",
                                            oninput: move |evt| form.write().email = evt.value(),
                                        }
                                    }
                                    label { "Phone"
                                        input {
                                            r#type: "tel",
                                            value: "{form.read().phone}",
                                            oninput: move |evt| form.write().phone = evt.value(),
                                        }
                                    }
                                    div { class: "actions",
                                        button { class: "btn btn-primary", r#type: "submit", "Save" }
                                        button {
                                            class: "btn",
                                            r#type: "button",
                                            onclick: move |_| editing.set(false),
                                            "Cancel"
                                        }
                                    }
                                }
                            } else {
                                div {
                                    h2 { "{client.name}" }
                                    if let Some(email) = client.email.clone() {
                                        p { "{email}" }
                                    }
                                    if let Some(phone) = client.phone.clone() {
                                        p { "{phone}" }
                                    }
                                    p { class: "muted", "Client since {client.joined}" }
                                }
                                div { class: "actions",
                                    button {
                                        class: "btn",
                                        r#type: "button",
                                        onclick: move |_| {
                                            form.set(current.clone());
                                            editing.set(true);
                                        },
                                        "Edit"
                                    }
                                    if confirm_delete() {
                                        span { "Delete this client and all their sessions?" }
                                        button {
                                            class: "btn btn-danger",
                                            r#type: "button",
                                            onclick: move |_| delete.call(()),
                                            "Delete"
                                        }
                                        button {
                                            class: "btn",
                                            r#type: "button",
                                            onclick: move |_| confirm_delete.set(false),
                                            "Keep"
                                        }
                                    } else {
                                        button {
                                            class: "btn btn-danger",
                                            r#type: "button",
                                            onclick: move |_| confirm_delete.set(true),
                                            "Delete Client"
                                        }
                                    }
                                }
                            }
                        }

                        section { class: "card",
                            h3 { "Assigned Workouts" }
                            if data.profile.workouts.is_empty() {
                                p { class: "muted", "No workouts assigned." }
                            } else {
                                ul { class: "list",
                                    for assigned in data.profile.workouts.clone() {
                                        li { key: "{assigned.workout_id}",
                                            Link { to: Route::WorkoutDetail { id: assigned.workout_id }, "{assigned.name}" }
                                            if let Some(level) = assigned.difficulty.clone() {
                                                span { class: assigned.difficulty_class, "{level}" }
                                            }
                                            span { class: "muted", "Assigned {assigned.assigned}" }
                                            button {
                                                class: "btn btn-small",
                                                r#type: "button",
                                                onclick: move |_| unassign.call(assigned.workout_id),
                                                "Remove"
                                            }
                                        }
                                    }
                                }
                            }
                            if !data.assignable.is_empty() {
                                div { class: "inline-form",
                                    select {
                                        value: "{selected_workout}",
                                        onchange: move |evt| selected_workout.set(evt.value()),
                                        option { value: "", "Select a workout" }
                                        for workout in data.assignable.iter() {
                                            option { key: "{workout.id}", value: "{workout.id}", "{workout.name}" }
                                        }
                                    }
                                    button {
                                        class: "btn",
                                        r#type: "button",
                                        disabled: selected_workout.read().is_empty(),
                                        onclick: move |_| assign.call(()),
                                        "Assign"
                                    }
                                }
                            }
                        }

                        section { class: "card",
                            div { class: "section-header",
                                h3 { "Session History" }
                                Link { class: "btn btn-small", to: Route::LogSession {}, "Log Session" }
                            }
                            SessionRows { rows: data.sessions.clone() }
                        }
                    }
                }
                ViewState::Error(err) => rsx! {
                    ErrorBanner { error: err, on_retry: move |()| resource.restart() }
                },
            }
        }
    }
}

/// Session history table shared with the progress page.
#[component]
pub fn SessionRows(rows: Vec<SessionRowVm>) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "muted", "No sessions logged yet." }
        };
    }
    rsx! {
        ul { class: "session-list",
            for row in rows {
                li { key: "{row.id}",
                    Link { to: Route::SessionDetail { id: row.id },
                        span { class: "session-title", "{row.workout_name}" }
                        span { class: "muted", "{row.started_at}" }
                    }
                    span { class: row.status_class, "{row.status}" }
                    if let Some(duration) = row.duration.clone() {
                        span { class: "muted", "{duration}" }
                    }
                    if let Some(notes) = row.notes.clone() {
                        p { class: "excerpt", "{notes}" }
                    }
                }
            }
        }
    }
}
