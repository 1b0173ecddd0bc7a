//! # Checklist Server
//!
//! Serves the checkbox list page over HTTP/1.1.
//!
//! ## Overview
//!
//! - [`ChecklistApp`]: routes `GET`/`POST` on the page path and `/health`
//! - [`SelectionSubmitHandler`]: logs which items were checked on a post
//! - [`Settings`]: layered configuration (defaults, TOML file, `CHECKLIST_*` env vars)
//! - [`HttpServer`]: hyper connection loop with graceful shutdown
//!
//! ## Example
//!
//! ```no_run
//! use checklist_server::{ChecklistApp, HttpServer, Settings, ShutdownCoordinator, shutdown_signal};
//! use std::sync::Arc;
//!
//! # async fn run() -> checklist_server::Result<()> {
//! let settings = Settings::load(None)?;
//! let coordinator = ShutdownCoordinator::new(settings.shutdown_timeout());
//!
//! let trigger = coordinator.clone();
//! tokio::spawn(async move {
//!     shutdown_signal().await;
//!     trigger.shutdown();
//! });
//!
//! HttpServer::new(Arc::new(ChecklistApp::new(&settings)))
//!     .listen_with_shutdown(settings.socket_addr()?, coordinator)
//!     .await
//! # }
//! ```

pub mod error;
pub mod handler;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod server;
pub mod settings;
pub mod shutdown;

pub use error::{Error, Result};
pub use handler::Handler;
pub use handlers::{ChecklistApp, SelectionSubmitHandler, SubmitOutcome};
pub use http::{Request, Response, render_html, render_text};
pub use logging::init_logging;
pub use server::HttpServer;
pub use settings::{Settings, SettingsError};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
