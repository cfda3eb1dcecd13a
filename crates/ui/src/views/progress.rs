use dioxus::prelude::*;
use dioxus_router::Link;
use trainer_core::model::ClientId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::client_detail::SessionRows;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{map_client_rows, map_session_rows};

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let trainer_id = ctx.trainer_id();

    let mut selected = use_signal(String::new);

    let mut clients = use_resource({
        let service = ctx.clients();
        move || {
            let service = service.clone();
            async move {
                let list = service
                    .list_clients(trainer_id)
                    .await
                    .map_err(ViewError::from)?;
                Ok::<_, ViewError>(map_client_rows(&list))
            }
        }
    });
    let clients_state = view_state_from_resource(&clients);

    let mut sessions = use_resource({
        let progress = ctx.progress();
        move || {
            let progress = progress.clone();
            let client_id = selected.read().parse::<ClientId>().ok();
            async move {
                let Some(client_id) = client_id else {
                    return Ok(None);
                };
                let items = progress
                    .list_sessions_for_client(trainer_id, client_id)
                    .await
                    .map_err(ViewError::from)?;
                Ok::<_, ViewError>(Some(map_session_rows(&items)))
            }
        }
    });
    let sessions_state = view_state_from_resource(&sessions);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h2 { "Client Progress" }
                Link { class: "btn btn-primary", to: Route::LogSession {}, "Log Session" }
            }

            match clients_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "muted", "Add a client to start tracking progress." }
                    } else {
                        label { class: "inline-form", "Client"
                            select {
                                value: "{selected}",
                                onchange: move |evt| selected.set(evt.value()),
                                option { value: "", "Select a client" }
                                for row in rows {
                                    option { key: "{row.id}", value: "{row.id}", "{row.name}" }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    ErrorBanner { error: err, on_retry: move |()| clients.restart() }
                },
            }

            match sessions_state {
                ViewState::Ready(Some(rows)) => rsx! {
                    section { class: "card",
                        h3 { "Workout History" }
                        SessionRows { rows }
                    }
                },
                ViewState::Ready(None) | ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorBanner { error: err, on_retry: move |()| sessions.restart() }
                },
            }
        }
    }
}
