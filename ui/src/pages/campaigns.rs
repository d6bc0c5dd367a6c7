//! Campaigns page with a status filter

use crate::api::{self, ApiResult};
use crate::components::{remote_view, EmptyRow};
use crate::state::AppState;
use crate::types::Campaign;
use leptos::prelude::*;

const STATUSES: [&str; 5] = ["draft", "active", "paused", "completed", "archived"];

#[component]
pub fn CampaignsPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let campaigns = RwSignal::new(None::<ApiResult<Vec<Campaign>>>);
    let status = RwSignal::new(String::new());

    Effect::new(move |_| {
        let filter = status.get();
        campaigns.set(None);
        api::load_into(&state, campaigns, move |base, token| async move {
            let filter = (!filter.is_empty()).then_some(filter);
            api::fetch_campaigns(&base, &token, filter.as_deref()).await
        });
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2 class="page-title">"Campaigns"</h2>
                <select
                    class="input input-sm"
                    on:change=move |ev| status.set(event_target_value(&ev))
                >
                    <option value="">"All statuses"</option>
                    {STATUSES
                        .into_iter()
                        .map(|s| view! { <option value=s>{s}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </div>
            {move || remote_view(campaigns.get(), |campaigns| {
                let rows = if campaigns.is_empty() {
                    view! { <EmptyRow columns=3 message="No campaigns match" /> }.into_any()
                } else {
                    campaigns
                        .into_iter()
                        .map(|c| {
                            let dates = format!(
                                "{} - {}",
                                c.start_date.unwrap_or_else(|| "?".to_string()),
                                c.end_date.unwrap_or_else(|| "open".to_string())
                            );
                            view! {
                                <tr>
                                    <td>{c.name}</td>
                                    <td><span class=format!("badge badge-{}", c.status)>{c.status.clone()}</span></td>
                                    <td>{dates}</td>
                                </tr>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                };
                view! {
                    <table class="table">
                        <thead>
                            <tr><th>"Name"</th><th>"Status"</th><th>"Dates"</th></tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                }
                .into_any()
            })}
        </section>
    }
}
