use std::sync::Arc;

use api::{CounterStore, DEFAULT_COUNTER};
use axum::extract::{Path, State};
use axum::response::{Html, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::pages;
use crate::respond::{respond, RenderMode};
use crate::settings::Settings;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CounterStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: Arc<dyn CounterStore>, settings: Settings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
        }
    }

    fn limit(&self) -> i64 {
        self.settings.counter.limit
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(home))
        .route("/counters/{name}", get(counter))
        .route("/legacy", get(legacy))
        .route("/limit", get(limit))
        // Form actions
        .route("/counters/{name}/increment", post(increment))
        .route("/counters/{name}/reset", post(reset))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Response {
    render_counter(&state, DEFAULT_COUNTER).await
}

async fn counter(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    render_counter(&state, &name).await
}

async fn render_counter(state: &AppState, name: &str) -> Response {
    let result = api::load_counter(state.store.as_ref(), name, state.limit())
        .await
        .map(|view| Html(pages::counter_page(&view)));
    respond(RenderMode::ServerRender, result)
}

async fn legacy() -> Response {
    let result = api::legacy_counter().map(|view| Html(pages::counter_page(&view)));
    respond(RenderMode::ServerRender, result)
}

async fn limit(State(state): State<AppState>) -> Html<String> {
    Html(pages::limit_page(state.limit()))
}

#[derive(Debug, Deserialize)]
struct IncrementForm {
    #[serde(default = "default_by")]
    by: i64,
}

fn default_by() -> i64 {
    1
}

async fn increment(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<IncrementForm>,
) -> Response {
    let result = api::increment_counter(state.store.as_ref(), &name, form.by, state.limit())
        .await
        .map(|value| value.to_string());
    respond(RenderMode::Route, result)
}

async fn reset(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let result = api::reset_counter(state.store.as_ref(), &name)
        .await
        .map(|value| value.to_string());
    respond(RenderMode::Route, result)
}

async fn healthz() -> &'static str {
    "ok"
}
