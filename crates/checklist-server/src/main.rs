use checklist_server::settings::{CONFIG_ENV_VAR, config_path_from};
use checklist_server::{
	ChecklistApp, HttpServer, Settings, ShutdownCoordinator, init_logging, shutdown_signal,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let config = config_path_from(std::env::var(CONFIG_ENV_VAR).ok(), std::env::args().skip(1));
	let settings = Settings::load(config.as_deref())?;
	init_logging(&settings.log_level)?;

	let addr = settings.socket_addr()?;
	tracing::info!(
		%addr,
		page = %settings.page_name,
		path = %settings.page_path,
		policy = %settings.initial_policy,
		aria_mode = %settings.aria_mode,
		"starting checklist server"
	);

	let coordinator = ShutdownCoordinator::new(settings.shutdown_timeout());
	let trigger = coordinator.clone();
	tokio::spawn(async move {
		shutdown_signal().await;
		tracing::info!("received shutdown signal, shutting down gracefully");
		trigger.shutdown();
	});

	let app = Arc::new(ChecklistApp::new(&settings));
	HttpServer::new(app)
		.with_max_body_size(settings.max_body_size)
		.listen_with_shutdown(addr, coordinator.clone())
		.await?;

	if !coordinator.wait_for_shutdown().await {
		tracing::warn!(
			timeout_secs = settings.shutdown_timeout_secs,
			"server did not stop within the shutdown timeout"
		);
	}
	Ok(())
}
