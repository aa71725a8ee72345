use anyhow::Result;
use clap::Parser;
use mood_server::{app, init_tracing, perform_health_check, AppState, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();

	if config.health_check {
		return perform_health_check(&config).await;
	}

	init_tracing(&config)?;

	let listener = TcpListener::bind(config.bind_addr()).await?;
	tracing::info!(min_history = config.min_history, "listening on {}", listener.local_addr()?);

	let app = app(AppState::new(config));

	axum::serve(listener, app.into_make_service()).with_graceful_shutdown(shutdown_signal()).await?;

	tracing::info!("Server stopped");
	Ok(())
}

async fn shutdown_signal() {
	tokio::signal::ctrl_c().await.ok();
	tracing::info!("Received Ctrl+C, initiating shutdown...");
}
