//! Top navigation bar

use crate::api::{self, ApiResult};
use crate::state::AppState;
use crate::types::UserProfile;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Shows the signed-in user and a sign-out button
#[component]
pub fn Navbar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let profile = RwSignal::new(None::<ApiResult<UserProfile>>);

    api::load_into(&state, profile, |base, token| async move {
        api::fetch_me(&base, &token).await
    });

    let who = move || match profile.get() {
        Some(Ok(user)) => format!("{} ({})", user.name, user.role),
        _ => String::new(),
    };

    view! {
        <header class="navbar">
            <span class="navbar-user">{who}</span>
            <button
                class="btn btn-ghost"
                on:click=move |_| {
                    state.sign_out();
                    navigate("/", Default::default());
                }
            >
                "Sign Out"
            </button>
        </header>
    }
}
