//! Shared helpers for the checklist integration tests

use checklist_core::SelectionViewModel;
use checklist_forms::SelectionForm;
use checklist_server::{ChecklistApp, Request, Settings};
use hyper::Method;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// One captured log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
	pub level: tracing::Level,
	pub target: String,
	pub message: String,
}

/// Log events recorded while a capture guard is alive.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
	events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedLogs {
	pub fn events(&self) -> Vec<CapturedEvent> {
		self.events.lock().clone()
	}

	/// Messages logged at `level` under targets starting with `target`.
	pub fn messages(&self, level: tracing::Level, target: &str) -> Vec<String> {
		self.events
			.lock()
			.iter()
			.filter(|event| event.level == level && event.target.starts_with(target))
			.map(|event| event.message.clone())
			.collect()
	}

	/// `INFO` messages of the submit handler.
	pub fn submit_lines(&self) -> Vec<String> {
		self.messages(tracing::Level::INFO, "checklist_server::handlers")
	}

	pub fn clear(&self) {
		self.events.lock().clear();
	}
}

struct LogCapture {
	events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		self.events.lock().push(CapturedEvent {
			level: *event.metadata().level(),
			target: event.metadata().target().to_string(),
			message: visitor.message,
		});
	}
}

/// Installs a capturing subscriber on the current thread.
///
/// Events are recorded until the returned guard is dropped.
pub fn capture_logs() -> (DefaultGuard, CapturedLogs) {
	let logs = CapturedLogs::default();
	let capture = LogCapture {
		events: logs.events.clone(),
	};
	let guard = tracing_subscriber::registry().with(capture).set_default();
	(guard, logs)
}

/// The app with default settings.
pub fn default_app() -> ChecklistApp {
	ChecklistApp::new(&Settings::default())
}

/// Encodes `items` the way a browser posts the rendered form.
pub fn form_body(items: &[SelectionViewModel]) -> String {
	SelectionForm::encode(items).expect("view-models always encode")
}

/// A urlencoded `POST` to `path`.
pub fn form_post(path: &str, body: impl Into<String>) -> Request {
	let body: String = body.into();
	Request::simple(Method::POST, path, body)
		.with_header("content-type", "application/x-www-form-urlencoded")
}

/// Applies `checked` to the default catalog items, in order.
pub fn with_checked(items: &[SelectionViewModel], checked: &[bool]) -> Vec<SelectionViewModel> {
	items
		.iter()
		.zip(checked)
		.map(|(item, checked)| SelectionViewModel::new(item.id, item.name.clone(), *checked))
		.collect()
}

/// Reads the current state of every marked checkbox in `document`.
///
/// Names come from `aria-label`, the way the hidden name field mirrors them.
pub fn items_from_document(document: &checklist_pages::Document) -> Vec<SelectionViewModel> {
	document
		.elements_by_class(checklist_pages::MARKER_CLASS)
		.iter()
		.filter_map(|control| {
			let id = control.id()?.parse().ok()?;
			let name = control.get_attribute("aria-label")?;
			Some(SelectionViewModel::new(id, name, control.is_checked()))
		})
		.collect()
}
