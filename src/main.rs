//! Server: settings from env, table config, optional schema bootstrap, then serve.

use prodynamic_admin::{app, bootstrap, load_tables, resolve, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("prodynamic_admin=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let tables = load_tables(settings.tables_path.as_deref()).await?;
    let registry = resolve(&tables)?;
    let state = AppState::new(&settings, registry);
    tracing::info!(db = %state.db.path().display(), tables = state.registry.tables.len(), "database configured");

    if settings.bootstrap {
        bootstrap(&state).await?;
    }

    let listener = TcpListener::bind(settings.bind).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
