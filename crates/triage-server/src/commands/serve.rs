use anyhow::Context;
use tokio::net::TcpListener;
use triage_config::{ServerConfig, TriageConfig};
use triage_server::{AppState, build_router};

use crate::bootstrap;
use crate::cli::ServeArgs;

/// Handle `triage serve`.
pub async fn handle(args: &ServeArgs, config: &TriageConfig) -> anyhow::Result<()> {
    let analyzer = bootstrap::build_analyzer(config)?;
    let state = AppState::new(analyzer, &config.ui.api_base_url);

    let addr = listen_config(args, &config.server).bind_addr();

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, ttl_secs = config.cache.ttl_secs, "triage server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    tracing::info!("triage server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Server settings with `--host`/`--port` applied on top of the config.
fn listen_config(args: &ServeArgs, configured: &ServerConfig) -> ServerConfig {
    let mut server = configured.clone();
    if let Some(host) = &args.host {
        server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    server
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> ServerConfig {
        ServerConfig {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }

    #[test]
    fn config_address_used_without_flags() {
        let args = ServeArgs {
            host: None,
            port: None,
        };
        assert_eq!(listen_config(&args, &configured()).bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn flags_override_config_address() {
        let args = ServeArgs {
            host: Some("127.0.0.1".into()),
            port: Some(9100),
        };
        assert_eq!(listen_config(&args, &configured()).bind_addr(), "127.0.0.1:9100");

        let port_only = ServeArgs {
            host: None,
            port: Some(9100),
        };
        assert_eq!(listen_config(&port_only, &configured()).bind_addr(), "0.0.0.0:9100");
    }
}
