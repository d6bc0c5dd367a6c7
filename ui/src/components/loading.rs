//! Loading indicators

use crate::api::ApiResult;
use leptos::prelude::*;

/// Spinner loading indicator
#[component]
pub fn LoadingSpinner(#[prop(default = "w-5 h-5")] size: &'static str) -> impl IntoView {
    view! {
        <svg
            class=format!("{} animate-spin text-blue-500", size)
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
            <path
                class="opacity-75"
                fill="currentColor"
                d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"
            ></path>
        </svg>
    }
}

/// Renders a pending, failed or loaded API result.
pub fn remote_view<T>(value: Option<ApiResult<T>>, render: impl FnOnce(T) -> AnyView) -> AnyView {
    match value {
        None => view! {
            <div class="flex justify-center py-12">
                <LoadingSpinner size="w-8 h-8" />
            </div>
        }
        .into_any(),
        Some(Err(e)) => view! {
            <div class="alert alert-error">{e.to_string()}</div>
        }
        .into_any(),
        Some(Ok(value)) => render(value),
    }
}

/// Placeholder row for an empty table
#[component]
pub fn EmptyRow(columns: u8, message: &'static str) -> impl IntoView {
    view! {
        <tr>
            <td colspan=columns.to_string() class="text-center text-muted py-6">{message}</td>
        </tr>
    }
}
