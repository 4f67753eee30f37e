use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page front end. All state lives server-side in the session store.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
