// SPDX-License-Identifier: MIT

//! Page shell handlers.
//!
//! Rendering is the frontend's job; these handlers serve a minimal
//! shell per route so the gate has real pages to guard. They read the
//! pathname and query string the gate attached to the request.

use axum::{http::HeaderMap, response::Html, routing::get, Router};
use std::sync::Arc;

use crate::middleware::gate::{PATHNAME_HEADER, SEARCH_PARAMS_HEADER};
use crate::routes::paths;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    let mut router = Router::new();
    for path in paths::PAGES {
        router = router.route(path, get(page_shell));
    }
    router
}

async fn page_shell(headers: HeaderMap) -> Html<String> {
    let pathname = headers
        .get(PATHNAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(paths::HOME);
    let search_params = headers
        .get(SEARCH_PARAMS_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let slug = match pathname {
        paths::HOME => "home",
        other => other.trim_start_matches('/'),
    };

    Html(format!(
        "<!doctype html>\n<html>\n<body data-page=\"{slug}\" data-pathname=\"{pathname}\" \
         data-search-params=\"{search_params}\"></body>\n</html>\n"
    ))
}
