//! Graceful shutdown coordination

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, watch};

struct Inner {
	timeout: Duration,
	shutdown_tx: broadcast::Sender<()>,
	complete_tx: watch::Sender<bool>,
	shutting_down: AtomicBool,
}

/// Broadcasts a shutdown request to the accept loop and every connection.
///
/// # Examples
///
/// ```
/// use checklist_server::ShutdownCoordinator;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
/// let mut rx = coordinator.subscribe();
///
/// coordinator.shutdown();
/// assert!(rx.recv().await.is_ok());
///
/// coordinator.notify_shutdown_complete();
/// assert!(coordinator.wait_for_shutdown().await);
/// # }
/// ```
#[derive(Clone)]
pub struct ShutdownCoordinator {
	inner: Arc<Inner>,
}

impl ShutdownCoordinator {
	/// Creates a coordinator that waits at most `timeout` for the server to stop.
	pub fn new(timeout: Duration) -> Self {
		let (shutdown_tx, _) = broadcast::channel(1);
		let (complete_tx, _) = watch::channel(false);
		Self {
			inner: Arc::new(Inner {
				timeout,
				shutdown_tx,
				complete_tx,
				shutting_down: AtomicBool::new(false),
			}),
		}
	}

	pub fn timeout(&self) -> Duration {
		self.inner.timeout
	}

	/// Returns a receiver that fires once shutdown is requested.
	pub fn subscribe(&self) -> broadcast::Receiver<()> {
		self.inner.shutdown_tx.subscribe()
	}

	/// Requests shutdown. Repeated calls are ignored.
	pub fn shutdown(&self) {
		if self.inner.shutting_down.swap(true, Ordering::SeqCst) {
			return;
		}
		// No receivers simply means nothing is running yet.
		let _ = self.inner.shutdown_tx.send(());
	}

	pub fn is_shutting_down(&self) -> bool {
		self.inner.shutting_down.load(Ordering::SeqCst)
	}

	/// Marks the server as stopped.
	pub fn notify_shutdown_complete(&self) {
		self.inner.complete_tx.send_replace(true);
	}

	/// Waits until the server reports it has stopped.
	///
	/// Returns false if the timeout elapsed first.
	pub async fn wait_for_shutdown(&self) -> bool {
		let mut rx = self.inner.complete_tx.subscribe();
		tokio::time::timeout(self.inner.timeout, rx.wait_for(|done| *done))
			.await
			.is_ok_and(|result| result.is_ok())
	}
}

impl std::fmt::Debug for ShutdownCoordinator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ShutdownCoordinator")
			.field("timeout", &self.inner.timeout)
			.field("shutting_down", &self.is_shutting_down())
			.finish()
	}
}

/// Resolves when the process receives Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "failed to listen for Ctrl-C");
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
				tracing::error!(error = %e, "failed to listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {}
		_ = terminate => {}
	}
}
