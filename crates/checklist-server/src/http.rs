//! Request and response types

use bytes::Bytes;
use hyper::header::{self, HeaderMap, HeaderName, HeaderValue};
use hyper::{Method, StatusCode, Uri, Version};
use std::net::SocketAddr;

/// An HTTP request with its body already collected.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub remote_addr: Option<SocketAddr>,
}

impl Request {
	pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
			remote_addr: None,
		}
	}

	/// Builds a request without headers, mostly for tests.
	///
	/// # Examples
	///
	/// ```
	/// use checklist_server::Request;
	/// use hyper::Method;
	///
	/// let request = Request::simple(Method::GET, "/checkboxes?x=1", "");
	/// assert_eq!(request.path(), "/checkboxes");
	/// ```
	pub fn simple(method: Method, uri: &str, body: impl Into<Bytes>) -> Self {
		let uri = uri.parse::<Uri>().unwrap_or_else(|_| Uri::from_static("/"));
		Self::new(method, uri, Version::HTTP_11, HeaderMap::new(), body.into())
	}

	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let (Ok(name), Ok(value)) = (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			self.headers.insert(name, value);
		}
		self
	}

	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Returns the media type of the body without parameters.
	pub fn content_type(&self) -> Option<&str> {
		self.headers
			.get(header::CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(|value| value.split(';').next().unwrap_or_default().trim())
	}
}

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// 405 with the `Allow` header listing `allowed`.
	pub fn method_not_allowed(allowed: &[Method]) -> Self {
		let allow = allowed
			.iter()
			.map(Method::as_str)
			.collect::<Vec<_>>()
			.join(", ");
		Self::new(StatusCode::METHOD_NOT_ALLOWED).with_header("allow", &allow)
	}

	pub fn payload_too_large() -> Self {
		Self::new(StatusCode::PAYLOAD_TOO_LARGE).with_body("Request body too large")
	}

	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// 302 Found to `location`.
	pub fn found(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::FOUND).with_location(location.as_ref())
	}

	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}

	pub fn with_location(mut self, location: &str) -> Self {
		if let Ok(value) = HeaderValue::from_str(location) {
			self.headers.insert(header::LOCATION, value);
		}
		self
	}

	pub fn location(&self) -> Option<&str> {
		self.headers
			.get(header::LOCATION)
			.and_then(|value| value.to_str().ok())
	}

	/// Returns the body as UTF-8 text, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Renders an HTML response.
pub fn render_html(html: impl Into<String>) -> Response {
	Response::ok()
		.with_header("content-type", "text/html; charset=utf-8")
		.with_body(html.into())
}

/// Renders a plain text response.
pub fn render_text(text: impl Into<String>) -> Response {
	Response::ok()
		.with_header("content-type", "text/plain; charset=utf-8")
		.with_body(text.into())
}
