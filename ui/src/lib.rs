//! Campaign Desk web UI
//!
//! Without a valid session only the login form renders. Signing in swaps in
//! the shell: sidebar, navbar and the routed page.

pub mod api;
pub mod components;
pub mod pages;
pub mod session;
pub mod state;
pub mod types;

use leptos::prelude::*;
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    hooks::use_location,
    path,
};

use components::{Navbar, Sidebar};
use pages::{
    AdvertsPage, BudgetsPage, CampaignsPage, ClientsPage, ConceptNotesPage, DashboardPage,
    LoginPage,
};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_context(AppState::new());

    view! {
        <Router>
            <Gate />
        </Router>
    }
}

/// Picks login or shell, re-checking the session on every navigation.
#[component]
fn Gate() -> impl IntoView {
    let state = expect_context::<AppState>();
    let token = state.token;
    let location = use_location();

    Effect::new(move |_| {
        location.pathname.track();
        state.refresh_session();
    });

    view! {
        <Show when=move || token.get().is_some() fallback=|| view! { <LoginPage /> }>
            <Shell />
        </Show>
    }
}

#[component]
fn Shell() -> impl IntoView {
    view! {
        <div class="layout">
            <Sidebar />
            <div class="layout-main">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=|| view! { <Redirect path="/dashboard" /> } />
                        <Route path=path!("/login") view=|| view! { <Redirect path="/dashboard" /> } />
                        <Route path=path!("/dashboard") view=DashboardPage />
                        <Route path=path!("/clients") view=ClientsPage />
                        <Route path=path!("/campaigns") view=CampaignsPage />
                        <Route path=path!("/adverts") view=AdvertsPage />
                        <Route path=path!("/concept-notes") view=ConceptNotesPage />
                        <Route path=path!("/budgets") view=BudgetsPage />
                    </Routes>
                </main>
            </div>
        </div>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page text-center">
            <h1 class="page-title">"404"</h1>
            <p class="text-muted">"Page not found"</p>
            <a href="/dashboard" class="btn btn-primary">"Back to dashboard"</a>
        </div>
    }
}
