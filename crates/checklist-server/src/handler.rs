//! Request handler trait

use crate::error::Result;
use crate::http::{Request, Response};
use async_trait::async_trait;
use std::sync::Arc;

/// Handles one request.
///
/// # Examples
///
/// ```
/// use checklist_server::{Handler, Request, Response, Result};
///
/// struct Hello;
///
/// #[async_trait::async_trait]
/// impl Handler for Hello {
///     async fn handle(&self, _request: Request) -> Result<Response> {
///         Ok(Response::ok().with_body("Hello"))
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}
