//! Dashboard page

use crate::api::{self, ApiResult};
use crate::components::remote_view;
use crate::state::AppState;
use crate::types::DashboardStats;
use leptos::prelude::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let stats = RwSignal::new(None::<ApiResult<DashboardStats>>);

    api::load_into(&state, stats, |base, token| async move {
        api::fetch_dashboard(&base, &token).await
    });

    view! {
        <section class="page">
            <h2 class="page-title">"Dashboard"</h2>
            {move || remote_view(stats.get(), |stats| {
                let by_status = stats
                    .campaigns_by_status
                    .into_iter()
                    .map(|s| view! {
                        <li class="status-row">
                            <span class=format!("badge badge-{}", s.status)>{s.status.clone()}</span>
                            <span>{s.count}</span>
                        </li>
                    })
                    .collect::<Vec<_>>();

                view! {
                    <div class="stat-grid">
                        <StatCard label="Clients" value=stats.clients />
                        <StatCard label="Campaigns" value=stats.campaigns />
                        <StatCard label="Adverts" value=stats.adverts />
                        <StatCard label="Concept Notes" value=stats.concept_notes />
                        <StatCard label="Budget Lines" value=stats.budgets />
                    </div>
                    <h3 class="section-title">"Campaigns by status"</h3>
                    <ul class="status-list">{by_status}</ul>
                }
                .into_any()
            })}
        </section>
    }
}

#[component]
fn StatCard(label: &'static str, value: i64) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <div class="stat-value">{value}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}
