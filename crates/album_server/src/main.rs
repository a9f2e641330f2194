//! Album registry web server entry point.

use std::sync::Arc;

use album_server::{album_routes, config, ServerConfig};
use anyhow::Context as _;
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Some(path) = config::load_dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }

    let config = ServerConfig::from_env().context("invalid configuration")?;
    album_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;
    info!(
        "event=server_start module=http status=start core_version={} store={}",
        album_core::core_version(),
        config.store
    );

    // Fail fast on an unusable store instead of on the first request.
    drop(album_core::connect(&config.store).context("failed to open album store")?);

    let socket_addr = config.socket_addr()?;
    let routes = album_routes(Arc::new(config.store));

    let (bound_addr, server) =
        warp::serve(routes).try_bind_with_graceful_shutdown(socket_addr, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {err}");
            }
        })?;
    info!("event=server_listen module=http status=ok addr={bound_addr}");

    server.await;

    info!("event=server_stop module=http status=ok");
    Ok(())
}
