//! Budgets page

use crate::api::{self, ApiResult};
use crate::components::{remote_view, EmptyRow};
use crate::state::AppState;
use crate::types::Budget;
use leptos::prelude::*;

#[component]
pub fn BudgetsPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let budgets = RwSignal::new(None::<ApiResult<Vec<Budget>>>);

    api::load_into(&state, budgets, |base, token| async move {
        api::fetch_budgets(&base, &token).await
    });

    view! {
        <section class="page">
            <h2 class="page-title">"Budgets"</h2>
            {move || remote_view(budgets.get(), |budgets| {
                let rows = if budgets.is_empty() {
                    view! { <EmptyRow columns=2 message="No budget lines yet" /> }.into_any()
                } else {
                    budgets
                        .into_iter()
                        .map(|b| {
                            let amount = b.display_amount();
                            view! {
                                <tr>
                                    <td>{b.category}</td>
                                    <td class="text-right">{amount}</td>
                                </tr>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                };
                view! {
                    <table class="table">
                        <thead>
                            <tr><th>"Category"</th><th class="text-right">"Amount"</th></tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                }
                .into_any()
            })}
        </section>
    }
}
