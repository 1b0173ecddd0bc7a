//! Page handlers and routing
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `GET` | page path | the checkbox list page |
//! | `POST` | page path | submit report logged, 302 back to the page |
//! | `GET` | `/health` | `OK` |
//!
//! Anything else answers 404, or 405 for a wrong method on a known path.

use crate::error::{Error, Result};
use crate::handler::Handler;
use crate::http::{Request, Response, render_html, render_text};
use crate::settings::Settings;
use async_trait::async_trait;
use checklist_core::{PartCatalog, SelectionInitializer, SelectionViewModel, SubmitReport};
use checklist_forms::SelectionForm;
use checklist_pages::{ChecklistPage, PageOptions};
use hyper::Method;

const HEALTH_PATH: &str = "/health";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// What the submit handler decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
	pub report: SubmitReport,
	pub redirect_to: String,
}

impl SubmitOutcome {
	pub fn into_response(self) -> Response {
		Response::found(&self.redirect_to)
	}
}

/// Reads the posted checked states and logs which items were checked.
#[derive(Debug, Clone)]
pub struct SelectionSubmitHandler {
	page_name: String,
	page_path: String,
}

impl SelectionSubmitHandler {
	pub fn new(page_name: impl Into<String>, page_path: impl Into<String>) -> Self {
		Self {
			page_name: page_name.into(),
			page_path: page_path.into(),
		}
	}

	/// Logs the report at `INFO` and redirects back to the page.
	pub fn on_submit(&self, items: Vec<SelectionViewModel>) -> SubmitOutcome {
		let report = SubmitReport::from_items(items);
		for line in report.lines(&self.page_name) {
			tracing::info!("{}", line);
		}

		SubmitOutcome {
			report,
			redirect_to: self.page_path.clone(),
		}
	}
}

/// The checkbox list application.
pub struct ChecklistApp {
	catalog: &'static PartCatalog,
	initializer: SelectionInitializer,
	page: ChecklistPage,
	submit: SelectionSubmitHandler,
	page_path: String,
}

impl ChecklistApp {
	/// Builds the app over the global catalog.
	pub fn new(settings: &Settings) -> Self {
		Self::with_catalog(settings, PartCatalog::global())
	}

	pub fn with_catalog(settings: &Settings, catalog: &'static PartCatalog) -> Self {
		let options = PageOptions::new()
			.title(settings.page_name.as_str())
			.action(settings.page_path.as_str())
			.aria_mode(settings.aria_mode);

		Self {
			catalog,
			initializer: SelectionInitializer::from_shared(settings.initial_policy.into_policy()),
			page: ChecklistPage::new(options),
			submit: SelectionSubmitHandler::new(
				settings.page_name.as_str(),
				settings.page_path.as_str(),
			),
			page_path: settings.page_path.clone(),
		}
	}

	/// Builds the view-models for a fresh page load.
	pub fn initial_items(&self) -> Vec<SelectionViewModel> {
		self.initializer.build(self.catalog.list())
	}

	fn get_page(&self) -> Response {
		render_html(self.page.render(&self.initial_items()))
	}

	fn post_page(&self, request: &Request) -> Result<Response> {
		if let Some(content_type) = request.content_type()
			&& !content_type.eq_ignore_ascii_case(FORM_CONTENT_TYPE)
		{
			tracing::warn!(content_type, "rejected submit with unexpected content type");
			return Ok(Response::new(hyper::StatusCode::UNSUPPORTED_MEDIA_TYPE));
		}

		let items = SelectionForm::decode(&request.body)?;
		Ok(self.submit.on_submit(items).into_response())
	}

	fn route(&self, request: &Request) -> Result<Response> {
		let path = request.path();

		if path == self.page_path {
			return match request.method {
				Method::GET | Method::HEAD => Ok(self.get_page()),
				Method::POST => self.post_page(request),
				_ => Ok(Response::method_not_allowed(&[Method::GET, Method::POST])),
			};
		}

		if path == HEALTH_PATH {
			return Ok(match request.method {
				Method::GET | Method::HEAD => render_text("OK"),
				_ => Response::method_not_allowed(&[Method::GET]),
			});
		}

		Ok(Response::not_found().with_body("Not Found"))
	}
}

#[async_trait]
impl Handler for ChecklistApp {
	async fn handle(&self, request: Request) -> Result<Response> {
		let response = match self.route(&request) {
			Ok(response) => response,
			Err(Error::Form(err)) => {
				tracing::warn!(error = %err, "rejected malformed submit");
				Response::bad_request().with_body(err.to_string())
			}
			Err(err) => return Err(err),
		};

		tracing::debug!(
			method = %request.method,
			path = request.path(),
			status = response.status.as_u16(),
			"request handled"
		);
		Ok(response)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hyper::StatusCode;
	use rstest::{fixture, rstest};

	#[fixture]
	fn app() -> ChecklistApp {
		ChecklistApp::new(&Settings::default())
	}

	#[rstest]
	fn test_on_submit_redirects_to_page() {
		let handler = SelectionSubmitHandler::new("Checkboxes", "/checkboxes");

		let outcome = handler.on_submit(vec![SelectionViewModel::new(2, "Brake Light Switches", true)]);

		assert_eq!(outcome.redirect_to, "/checkboxes");
		assert_eq!(outcome.report.checked_pairs(), vec![(2, "Brake Light Switches")]);
		let response = outcome.into_response();
		assert_eq!(response.status, StatusCode::FOUND);
		assert_eq!(response.location(), Some("/checkboxes"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_get_page(app: ChecklistApp) {
		let response = app.handle(Request::simple(Method::GET, "/checkboxes", "")).await.unwrap();

		assert_eq!(response.status, StatusCode::OK);
		let html = response.text();
		assert!(html.contains(r#"aria-checked="true" aria-label="Brake Light Switches""#));
		assert!(html.contains(r#"aria-checked="false" aria-label="Headlights""#));
	}

	#[rstest]
	#[tokio::test]
	async fn test_post_redirects(app: ChecklistApp) {
		let body = "items[0].id=1&items[0].name=Headlights&items[1].id=2&items[1].checked=true&items[1].name=Brake+Light+Switches";
		let request = Request::simple(Method::POST, "/checkboxes", body)
			.with_header("content-type", "application/x-www-form-urlencoded");

		let response = app.handle(request).await.unwrap();

		assert_eq!(response.status, StatusCode::FOUND);
		assert_eq!(response.location(), Some("/checkboxes"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_malformed_post_is_bad_request(app: ChecklistApp) {
		let request = Request::simple(Method::POST, "/checkboxes", "items[0].id=abc&items[0].name=A");

		let response = app.handle(request).await.unwrap();

		assert_eq!(response.status, StatusCode::BAD_REQUEST);
		assert_eq!(response.text(), "Invalid id for item 0: abc");
	}

	#[rstest]
	#[tokio::test]
	async fn test_wrong_content_type(app: ChecklistApp) {
		let request = Request::simple(Method::POST, "/checkboxes", "{}")
			.with_header("content-type", "application/json");

		let response = app.handle(request).await.unwrap();

		assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
	}

	#[rstest]
	#[case(Method::GET, "/health", StatusCode::OK)]
	#[case(Method::POST, "/health", StatusCode::METHOD_NOT_ALLOWED)]
	#[case(Method::DELETE, "/checkboxes", StatusCode::METHOD_NOT_ALLOWED)]
	#[case(Method::GET, "/missing", StatusCode::NOT_FOUND)]
	#[case(Method::GET, "/checkboxes/", StatusCode::NOT_FOUND)]
	#[tokio::test]
	async fn test_routing(
		app: ChecklistApp,
		#[case] method: Method,
		#[case] path: &str,
		#[case] expected: StatusCode,
	) {
		let response = app.handle(Request::simple(method, path, "")).await.unwrap();
		assert_eq!(response.status, expected);
	}

	#[rstest]
	fn test_policy_from_settings() {
		let settings = Settings {
			initial_policy: checklist_core::PolicyKind::All,
			..Settings::default()
		};
		let app = ChecklistApp::new(&settings);

		assert!(app.initial_items().iter().all(|item| item.checked));
	}

	#[rstest]
	#[tokio::test]
	async fn test_custom_page_path() {
		let settings = Settings {
			page_path: "/parts".to_string(),
			page_name: "Parts".to_string(),
			..Settings::default()
		};
		let app = ChecklistApp::new(&settings);

		let response = app.handle(Request::simple(Method::GET, "/parts", "")).await.unwrap();

		let html = response.text();
		assert!(html.contains(r#"<form method="post" action="/parts">"#));
		assert!(html.contains("<title>Parts</title>"));
	}
}
