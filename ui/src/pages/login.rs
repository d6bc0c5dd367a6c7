//! Login page

use crate::api::login;
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

/// Shown for every failed attempt, whatever the cause.
pub const LOGIN_FAILED: &str = "Invalid email or password";

/// Login form; the only screen reachable without a session
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        // A second submit while the first is pending is ignored
        let Some(guard) = state.login_in_flight.try_begin() else {
            return;
        };
        is_loading.set(true);
        error.set(None);

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let state = state.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            let base = state.api_base.get_untracked();
            let result = login(&base, &email_val, &password_val).await;

            drop(guard);
            is_loading.set(false);

            match result {
                Ok(resp) => {
                    state.sign_in(&resp.token);
                    navigate("/dashboard", Default::default());
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    password.set(String::new());
                    error.set(Some(LOGIN_FAILED.to_string()));
                }
            }
        });
    };

    view! {
        <main class="auth-container">
            <div class="auth-card">
                <div class="auth-header">
                    <h1 class="auth-title">"Campaign Desk"</h1>
                    <p class="auth-subtitle">"Sign in to continue"</p>
                </div>

                <Show when=move || error.get().is_some()>
                    <div class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
                </Show>

                <form on:submit=on_submit class="auth-form">
                    <div class="auth-input-group">
                        <label class="auth-label">"Email"</label>
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            placeholder="you@example.com"
                            required=true
                            class="input"
                        />
                    </div>

                    <div class="auth-input-group">
                        <label class="auth-label">"Password"</label>
                        <input
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required=true
                            class="input"
                        />
                    </div>

                    <button
                        type="submit"
                        disabled=move || is_loading.get()
                        class="btn btn-primary w-full"
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </main>
    }
}
