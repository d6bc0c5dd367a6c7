//! Sidebar navigation

use leptos::prelude::*;
use leptos_router::hooks::use_location;

const LINKS: [(&str, &str); 6] = [
    ("/dashboard", "Dashboard"),
    ("/clients", "Clients"),
    ("/campaigns", "Campaigns"),
    ("/adverts", "Adverts"),
    ("/concept-notes", "Concept Notes"),
    ("/budgets", "Budgets"),
];

/// Section links for the authenticated shell
#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();

    view! {
        <aside class="sidebar">
            <div class="sidebar-brand">"Campaign Desk"</div>
            <nav class="sidebar-nav">
                {LINKS
                    .into_iter()
                    .map(|(href, label)| {
                        let pathname = location.pathname;
                        view! {
                            <a
                                href=href
                                class=move || {
                                    if pathname.get().starts_with(href) {
                                        "sidebar-item sidebar-item-active"
                                    } else {
                                        "sidebar-item"
                                    }
                                }
                            >
                                {label}
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </nav>
        </aside>
    }
}
