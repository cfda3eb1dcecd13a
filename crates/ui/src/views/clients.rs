use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ClientForm, ClientRowVm, map_client_rows};

#[component]
pub fn ClientsView() -> Element {
    let ctx = use_context::<AppContext>();
    let trainer_id = ctx.trainer_id();
    let clients = ctx.clients();

    let mut form = use_signal(ClientForm::default);
    let mut show_form = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut form_error = use_signal(|| None::<ViewError>);

    let mut resource = use_resource({
        let clients = clients.clone();
        move || {
            let clients = clients.clone();
            async move {
                let list = clients
                    .list_clients(trainer_id)
                    .await
                    .map_err(ViewError::from)?;
                Ok::<_, ViewError>(map_client_rows(&list))
            }
        }
    });
    let state = view_state_from_resource(&resource);

    let submit = use_callback(move |()| {
        if saving() {
            return;
        }
        let clients = clients.clone();
        let draft = form.read().to_draft();
        spawn(async move {
            saving.set(true);
            match clients.add_client(trainer_id, draft).await {
                Ok(_) => {
                    form.set(ClientForm::default());
                    form_error.set(None);
                    show_form.set(false);
                    resource.restart();
                }
                Err(err) => form_error.set(Some(ViewError::from(err))),
            }
            saving.set(false);
        });
    });

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h2 { "Clients" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| show_form.toggle(),
                    if show_form() { "Cancel" } else { "Add Client" }
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
                            r#type: "text",
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
                    if let Some(err) = form_error() {
                        ErrorBanner { error: err }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save Client" }
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
                        p { class: "muted", "No clients yet. Add your first client to get started." }
                    } else {
                        div { class: "client-grid",
                            for row in rows {
                                ClientCard { key: "{row.id}", row: row.clone() }
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
fn ClientCard(row: ClientRowVm) -> Element {
    rsx! {
        Link { class: "card client-card", to: Route::ClientDetail { id: row.id },
            span { class: "avatar", "{row.initials}" }
            div {
                h3 { "{row.name}" }
                if let Some(email) = row.email.clone() {
                    p { class: "muted", "{email}" }
                }
                if let Some(phone) = row.phone.clone() {
                    p { class: "muted", "{phone}" }
                }
                p { class: "muted", "Joined {row.joined}" }
            }
        }
    }
}
