//! Clients page

use crate::api::{self, ApiResult};
use crate::components::{remote_view, EmptyRow};
use crate::state::AppState;
use crate::types::Client;
use leptos::prelude::*;

#[component]
pub fn ClientsPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let clients = RwSignal::new(None::<ApiResult<Vec<Client>>>);

    api::load_into(&state, clients, |base, token| async move {
        api::fetch_clients(&base, &token).await
    });

    view! {
        <section class="page">
            <h2 class="page-title">"Clients"</h2>
            {move || remote_view(clients.get(), |clients| {
                let rows = if clients.is_empty() {
                    view! { <EmptyRow columns=3 message="No clients yet" /> }.into_any()
                } else {
                    clients
                        .into_iter()
                        .map(|c| view! {
                            <tr>
                                <td>{c.name}</td>
                                <td>{c.contact_name.unwrap_or_default()}</td>
                                <td>{c.contact_email.or(c.phone).unwrap_or_default()}</td>
                            </tr>
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                };
                view! {
                    <table class="table">
                        <thead>
                            <tr><th>"Name"</th><th>"Contact"</th><th>"Email / Phone"</th></tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                }
                .into_any()
            })}
        </section>
    }
}
