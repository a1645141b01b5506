//! Server-rendered HTML pages.
//!
//! Pages are dioxus components rendered to strings with `dioxus-ssr`, which
//! escapes text and attribute values.

use dioxus::prelude::*;

mod counter;
mod layout;

pub use counter::{CounterPage, LimitPage};
pub use layout::{ErrorPage, Layout, MetaRefreshPage};

/// Render a page element to a complete HTML document.
pub fn render_page(page: Element) -> String {
    format!("<!DOCTYPE html>\n{}", dioxus_ssr::render_element(page))
}

pub fn counter_page(view: &api::CounterView) -> String {
    let view = view.clone();
    render_page(rsx! { CounterPage { view: view } })
}

pub fn limit_page(limit: i64) -> String {
    render_page(rsx! { LimitPage { limit: limit } })
}

/// The page a server render emits instead of its content when it redirects.
pub fn meta_refresh_page(url: &str) -> String {
    let url = url.to_string();
    render_page(rsx! { MetaRefreshPage { url: url } })
}

pub fn error_page(status: axum::http::StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error").to_string();
    let message = message.to_string();
    render_page(rsx! { ErrorPage { code: code, reason: reason, message: message } })
}
