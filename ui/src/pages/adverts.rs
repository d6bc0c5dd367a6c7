//! Adverts page

use crate::api::{self, ApiResult};
use crate::components::{remote_view, EmptyRow};
use crate::state::AppState;
use crate::types::Advert;
use leptos::prelude::*;

#[component]
pub fn AdvertsPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let adverts = RwSignal::new(None::<ApiResult<Vec<Advert>>>);

    api::load_into(&state, adverts, |base, token| async move {
        api::fetch_adverts(&base, &token).await
    });

    view! {
        <section class="page">
            <h2 class="page-title">"Adverts"</h2>
            {move || remote_view(adverts.get(), |adverts| {
                let rows = if adverts.is_empty() {
                    view! { <EmptyRow columns=3 message="No adverts yet" /> }.into_any()
                } else {
                    adverts
                        .into_iter()
                        .map(|a| view! {
                            <tr>
                                <td>{a.title}</td>
                                <td>{a.channel}</td>
                                <td><span class=format!("badge badge-{}", a.status)>{a.status.clone()}</span></td>
                            </tr>
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                };
                view! {
                    <table class="table">
                        <thead>
                            <tr><th>"Title"</th><th>"Channel"</th><th>"Status"</th></tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                }
                .into_any()
            })}
        </section>
    }
}
