use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "ui/dist"]
struct UiAssets;

/// Serves the built frontend. Unknown paths get `index.html` so client-side
/// routes like `/dashboard` survive a reload.
pub async fn serve_ui(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match UiAssets::get(path) {
        Some(asset) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], asset.data).into_response()
        }
        None => match UiAssets::get("index.html") {
            Some(index) => Html(index.data).into_response(),
            None => (StatusCode::NOT_FOUND, "UI not built").into_response(),
        },
    }
}
