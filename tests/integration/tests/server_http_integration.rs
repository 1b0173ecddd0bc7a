//! Checkbox page served over a real TCP socket

use aria_checklist::prelude::{ChecklistApp, HttpServer, Settings, ShutdownCoordinator};
use checklist_integration_tests::{capture_logs, default_app, form_body, with_checked};
use checklist_server::settings::sources::{ConfigSource, EnvSource, TomlFileSource};
use rstest::rstest;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

struct RunningServer {
	addr: SocketAddr,
	coordinator: ShutdownCoordinator,
	task: JoinHandle<checklist_server::Result<()>>,
}

impl RunningServer {
	async fn start(app: ChecklistApp) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));

		let server = HttpServer::new(Arc::new(app));
		let task = tokio::spawn(server.serve_with_shutdown(listener, coordinator.clone()));

		Self {
			addr,
			coordinator,
			task,
		}
	}

	async fn stop(self) {
		self.coordinator.shutdown();
		assert!(self.coordinator.wait_for_shutdown().await);
		self.task.await.unwrap().unwrap();
	}
}

/// Sends one HTTP/1.1 request and returns the raw response.
async fn send(addr: SocketAddr, method: &str, path: &str, content_type: Option<&str>, body: &str) -> String {
	let mut stream = TcpStream::connect(addr).await.unwrap();

	let mut request = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
	if let Some(content_type) = content_type {
		request.push_str(&format!("Content-Type: {content_type}\r\n"));
	}
	request.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));
	stream.write_all(request.as_bytes()).await.unwrap();

	let mut response = String::new();
	stream.read_to_string(&mut response).await.unwrap();
	response
}

fn status_line(response: &str) -> &str {
	response.lines().next().unwrap_or_default()
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
	response
		.lines()
		.take_while(|line| !line.is_empty())
		.find_map(|line| {
			let (key, value) = line.split_once(':')?;
			key.eq_ignore_ascii_case(name).then(|| value.trim())
		})
}

#[rstest]
#[tokio::test]
async fn test_get_page_over_tcp() {
	// Arrange
	let server = RunningServer::start(default_app()).await;

	// Act
	let response = send(server.addr, "GET", "/checkboxes", None, "").await;

	// Assert
	assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
	assert_eq!(header(&response, "content-type"), Some("text/html; charset=utf-8"));
	assert!(response.contains(r#"aria-checked="true" aria-label="Door Jamb Switches""#));
	server.stop().await;
}

#[rstest]
#[tokio::test]
async fn test_post_redirects_over_tcp() {
	// Arrange
	let server = RunningServer::start(default_app()).await;
	let items = with_checked(&default_app().initial_items(), &[true, false, false, false]);

	// Act
	let response = send(
		server.addr,
		"POST",
		"/checkboxes",
		Some("application/x-www-form-urlencoded"),
		&form_body(&items),
	)
	.await;

	// Assert
	assert_eq!(status_line(&response), "HTTP/1.1 302 Found");
	assert_eq!(header(&response, "location"), Some("/checkboxes"));
	server.stop().await;
}

#[rstest]
#[case("GET", "/health", None, "", "HTTP/1.1 200 OK")]
#[case("GET", "/nowhere", None, "", "HTTP/1.1 404 Not Found")]
#[case("PUT", "/checkboxes", None, "", "HTTP/1.1 405 Method Not Allowed")]
#[case("POST", "/checkboxes", Some("application/x-www-form-urlencoded"), "items[0].id=x&items[0].name=A", "HTTP/1.1 400 Bad Request")]
#[case("POST", "/checkboxes", Some("text/plain"), "hello", "HTTP/1.1 415 Unsupported Media Type")]
#[tokio::test]
async fn test_status_codes_over_tcp(
	#[case] method: &str,
	#[case] path: &str,
	#[case] content_type: Option<&str>,
	#[case] body: &str,
	#[case] expected: &str,
) {
	let server = RunningServer::start(default_app()).await;

	let response = send(server.addr, method, path, content_type, body).await;

	assert_eq!(status_line(&response), expected);
	server.stop().await;
}

#[rstest]
#[tokio::test]
async fn test_oversized_post_rejected_before_handler() {
	// Arrange
	let (_guard, logs) = capture_logs();
	let server = RunningServer::start(default_app()).await;
	let mut stream = TcpStream::connect(server.addr).await.unwrap();
	let head = format!(
		"POST /checkboxes HTTP/1.1\r\nHost: {}\r\nConnection: close\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n",
		server.addr,
		64 * 1024 * 1024
	);

	// Act
	stream.write_all(head.as_bytes()).await.unwrap();
	let mut response = String::new();
	stream.read_to_string(&mut response).await.unwrap();

	// Assert
	assert_eq!(status_line(&response), "HTTP/1.1 413 Payload Too Large");
	assert!(logs.submit_lines().is_empty());
	server.stop().await;
}

#[rstest]
#[tokio::test]
async fn test_shutdown_stops_accepting() {
	// Arrange
	let server = RunningServer::start(default_app()).await;
	let addr = server.addr;

	// Act
	server.stop().await;

	// Assert
	assert!(TcpStream::connect(addr).await.is_err());
}

#[rstest]
#[tokio::test]
async fn test_server_from_toml_settings() {
	// Arrange
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "page_name = \"Parts\"\npage_path = \"/parts\"\ninitial_policy = \"none\"").unwrap();
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(TomlFileSource::required(file.path())),
		Box::new(EnvSource::from_vars("CHECKLIST_", Vec::<(String, String)>::new())),
	];
	let settings = Settings::from_sources(sources).unwrap();
	let server = RunningServer::start(ChecklistApp::new(&settings)).await;

	// Act
	let page = send(server.addr, "GET", "/parts", None, "").await;
	let old_path = send(server.addr, "GET", "/checkboxes", None, "").await;

	// Assert
	assert_eq!(status_line(&page), "HTTP/1.1 200 OK");
	assert!(page.contains("<title>Parts</title>"));
	assert!(!page.contains(r#"aria-checked="true""#));
	assert_eq!(status_line(&old_path), "HTTP/1.1 404 Not Found");
	server.stop().await;
}
