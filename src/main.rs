// ABOUTME: Entry point for the inkstone binary.
// ABOUTME: Parses CLI arguments, loads config, hydrates the session, and starts the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use inkstone_server::{AppState, AuthContext, InkstoneConfig, create_router};
use inkstone_store::PostStore;

/// Self-hosted blog authoring and viewing service.
#[derive(Parser, Debug)]
#[command(name = "inkstone", version, about)]
struct Args {
    /// Socket address to bind (overrides INKSTONE_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Data directory (overrides INKSTONE_HOME)
    #[arg(long)]
    home: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkstone=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let mut config = InkstoneConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(home) = args.home {
        config.home = home;
    }

    tracing::info!(
        "inkstone starting up, data directory {}",
        config.home.display()
    );

    let store = PostStore::open(&config.home.join("inkstone.db"))?;
    let auth = AuthContext::new(config.auth_token.clone());
    let state = Arc::new(AppState::new(store, auth));

    // Hydrate the in-memory list from the persisted blob; a corrupt blob
    // surfaces as an error banner rather than a startup failure.
    state.session.load_posts().await;
    {
        let blog = state.session.read_state().await;
        tracing::info!("loaded {} posts", blog.posts.len());
    }

    let router = create_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("listening on http://{}", config.bind);

    axum::serve(listener, router).await?;

    Ok(())
}
