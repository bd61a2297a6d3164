mod api;
mod middleware;

use shopmap_core::SitemapSettings;
use shopmap_storefront::StorefrontClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = SitemapSettings::resolve(&config)?;
    let client = StorefrontClient::new(
        &config.storefront_endpoint,
        config.storefront_token.clone(),
        config.request_timeout_secs,
    )?;

    tracing::info!(
        env = %config.env,
        endpoint = %client.endpoint(),
        language = %config.language,
        chunk_size = settings.chunk_size.get(),
        page_size = settings.page_size.get(),
        entry_cap = settings.entry_cap(),
        "sitemap settings resolved"
    );

    let app = build_app(AppState::new(
        client,
        settings,
        config.language.clone(),
        config.public_base_url.clone(),
    ));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
