//! HTTP/1 server loop

use crate::handler::Handler;
use crate::http::{Request, Response};
use crate::shutdown::ShutdownCoordinator;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Default maximum request body size (10 MiB)
pub const DEFAULT_MAX_BODY_SIZE: u64 = 10 * 1024 * 1024;

/// Serves a [`Handler`] over HTTP/1.1, one task per connection.
///
/// Request bodies larger than the configured limit are answered with
/// `413 Payload Too Large` without reaching the handler.
pub struct HttpServer {
	handler: Arc<dyn Handler>,
	max_body_size: u64,
}

impl HttpServer {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			handler,
			max_body_size: DEFAULT_MAX_BODY_SIZE,
		}
	}

	/// Sets the largest request body accepted, in bytes.
	pub fn with_max_body_size(mut self, max_body_size: u64) -> Self {
		self.max_body_size = max_body_size;
		self
	}

	pub fn max_body_size(&self) -> u64 {
		self.max_body_size
	}

	pub fn handler(&self) -> Arc<dyn Handler> {
		self.handler.clone()
	}

	/// Accepts connections on `addr` until an accept error occurs.
	pub async fn listen(self, addr: SocketAddr) -> crate::Result<()> {
		let listener = TcpListener::bind(addr).await?;
		tracing::info!(%addr, "server listening");

		loop {
			let (stream, remote_addr) = listener.accept().await?;
			let handler = self.handler.clone();
			let max_body_size = self.max_body_size;

			tokio::task::spawn(async move {
				if let Err(err) =
					Self::handle_connection(stream, remote_addr, handler, max_body_size).await
				{
					tracing::warn!(%remote_addr, error = %err, "connection error");
				}
			});
		}
	}

	/// Binds `addr` and serves until `coordinator` requests shutdown.
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
		coordinator: ShutdownCoordinator,
	) -> crate::Result<()> {
		let listener = TcpListener::bind(addr).await?;
		self.serve_with_shutdown(listener, coordinator).await
	}

	/// Serves an already bound listener until `coordinator` requests shutdown.
	pub async fn serve_with_shutdown(
		self,
		listener: TcpListener,
		coordinator: ShutdownCoordinator,
	) -> crate::Result<()> {
		tracing::info!(addr = %listener.local_addr()?, "server listening");
		let mut shutdown_rx = coordinator.subscribe();

		loop {
			tokio::select! {
				result = listener.accept() => {
					let (stream, remote_addr) = result?;
					let handler = self.handler.clone();
					let max_body_size = self.max_body_size;
					let mut conn_shutdown = coordinator.subscribe();

					tokio::task::spawn(async move {
						tokio::select! {
							result = Self::handle_connection(stream, remote_addr, handler, max_body_size) => {
								if let Err(err) = result {
									tracing::warn!(%remote_addr, error = %err, "connection error");
								}
							}
							_ = conn_shutdown.recv() => {
								tracing::debug!(%remote_addr, "connection closed by shutdown");
							}
						}
					});
				}
				_ = shutdown_rx.recv() => {
					tracing::info!("shutdown signal received, stopping server");
					break;
				}
			}
		}

		coordinator.notify_shutdown_complete();
		Ok(())
	}

	/// Serves a single TCP connection.
	pub async fn handle_connection(
		stream: TcpStream,
		remote_addr: SocketAddr,
		handler: Arc<dyn Handler>,
		max_body_size: u64,
	) -> crate::Result<()> {
		let io = TokioIo::new(stream);
		let service = RequestService {
			handler,
			remote_addr,
			max_body_size,
		};

		http1::Builder::new().serve_connection(io, service).await?;
		Ok(())
	}
}

struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
	max_body_size: u64,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;
		let max_body_size = self.max_body_size;

		Box::pin(async move {
			if let Some(content_length) = req.headers().get(hyper::header::CONTENT_LENGTH)
				&& let Ok(len_str) = content_length.to_str()
				&& let Ok(len) = len_str.parse::<u64>()
				&& len > max_body_size
			{
				tracing::warn!(%remote_addr, len, max_body_size, "rejected oversized request");
				return Ok(into_hyper(Response::payload_too_large())?);
			}

			let (parts, body) = req.into_parts();
			let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
			let body = match Limited::new(body, limit).collect().await {
				Ok(collected) => collected.to_bytes(),
				Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
					tracing::warn!(%remote_addr, max_body_size, "request body exceeded size limit");
					return Ok(into_hyper(Response::payload_too_large())?);
				}
				Err(err) => return Err(err),
			};

			let mut request = Request::new(parts.method, parts.uri, parts.version, parts.headers, body);
			request.remote_addr = Some(remote_addr);

			let response = handler.handle(request).await.unwrap_or_else(|err| {
				tracing::error!(%remote_addr, error = %err, "handler failed");
				Response::internal_server_error()
			});

			Ok::<_, Self::Error>(into_hyper(response)?)
		})
	}
}

fn into_hyper(response: Response) -> Result<hyper::Response<Full<Bytes>>, ::http::Error> {
	let mut builder = hyper::Response::builder().status(response.status);
	for (key, value) in response.headers.iter() {
		builder = builder.header(key, value);
	}
	builder.body(Full::new(response.body))
}
