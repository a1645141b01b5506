use anyhow::Context;

use web::{logging, router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging()?;

    let settings = Settings::new().context("Failed to load settings")?;
    let store = web::build_store(&settings.database)
        .await
        .context("Failed to set up database")?;

    let addr = settings.server.address();
    let state = AppState::new(store, settings);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state).into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
