use axum::{
    http::header,
    response::{Html, IntoResponse},
};

use crate::views::{INDEX_HTML, SCRIPT_JS, STYLE_CSS, SUGGESTIONS_HTML};

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn suggestions_handler() -> Html<&'static str> {
    Html(SUGGESTIONS_HTML)
}

pub async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

pub async fn style_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}
