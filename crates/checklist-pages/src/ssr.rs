//! Server-side rendering of the checkbox list page

use crate::aria::AriaSyncMode;
use crate::builder::{body, button, form, h1, script};
use crate::client::client_script;
use crate::dom::Document;
use crate::form::html_escape;
use crate::renderer::CheckboxRenderer;
use checklist_core::SelectionViewModel;

/// Options for rendering the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
	/// Language attribute for HTML element.
	pub lang: String,
	/// Document title.
	pub title: String,
	/// Heading shown above the form.
	pub heading: String,
	/// Form `action`, the path the form posts to.
	pub action: String,
	/// Caption of the submit button.
	pub submit_label: String,
	/// Mode wired into the bootstrap script.
	pub aria_mode: AriaSyncMode,
	/// Whether to embed the bootstrap script.
	pub include_client_script: bool,
}

impl Default for PageOptions {
	fn default() -> Self {
		Self {
			lang: "en".to_string(),
			title: "Checkboxes".to_string(),
			heading: "Checkboxes".to_string(),
			action: "/checkboxes".to_string(),
			submit_label: "Submit".to_string(),
			aria_mode: AriaSyncMode::default(),
			include_client_script: true,
		}
	}
}

impl PageOptions {
	/// Creates new options with default values.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the language attribute.
	pub fn lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = lang.into();
		self
	}

	/// Sets both the title and the heading.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		let title = title.into();
		self.heading = title.clone();
		self.title = title;
		self
	}

	/// Sets the heading only.
	pub fn heading(mut self, heading: impl Into<String>) -> Self {
		self.heading = heading.into();
		self
	}

	/// Sets the form action.
	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.action = action.into();
		self
	}

	pub fn submit_label(mut self, label: impl Into<String>) -> Self {
		self.submit_label = label.into();
		self
	}

	pub fn aria_mode(mut self, mode: AriaSyncMode) -> Self {
		self.aria_mode = mode;
		self
	}

	/// Disables the embedded bootstrap script.
	pub fn no_client_script(mut self) -> Self {
		self.include_client_script = false;
		self
	}
}

/// The checkbox list page.
///
/// # Examples
///
/// ```
/// use checklist_core::SelectionViewModel;
/// use checklist_pages::{ChecklistPage, PageOptions};
///
/// let page = ChecklistPage::new(PageOptions::new().action("/parts"));
/// let html = page.render(&[SelectionViewModel::new(1, "Headlights", false)]);
///
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// assert!(html.contains(r#"<form method="post" action="/parts">"#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChecklistPage {
	options: PageOptions,
	renderer: CheckboxRenderer,
}

impl ChecklistPage {
	pub fn new(options: PageOptions) -> Self {
		Self {
			options,
			renderer: CheckboxRenderer::new(),
		}
	}

	pub fn with_renderer(mut self, renderer: CheckboxRenderer) -> Self {
		self.renderer = renderer;
		self
	}

	pub fn options(&self) -> &PageOptions {
		&self.options
	}

	/// Builds the page body as a document.
	pub fn render_document(&self, items: &[SelectionViewModel]) -> Document {
		let form = form()
			.attr("method", "post")
			.attr("action", &self.options.action)
			.children(self.renderer.render(items))
			.child(
				button()
					.attr("type", "submit")
					.class("btn btn-primary")
					.text(&self.options.submit_label)
					.build(),
			)
			.build();

		let mut page = body().child(h1().text(&self.options.heading).build()).child(form);
		if self.options.include_client_script {
			page = page.child(script().text(&client_script(self.options.aria_mode)).build());
		}

		Document::new(page.build())
	}

	/// Renders the complete HTML document.
	pub fn render(&self, items: &[SelectionViewModel]) -> String {
		let content = self.render_document(items).body().to_html();
		self.wrap_in_html(&content)
	}

	fn wrap_in_html(&self, body: &str) -> String {
		let mut html = String::with_capacity(body.len() + 256);

		html.push_str("<!DOCTYPE html>\n");
		html.push_str(&format!("<html lang=\"{}\">\n", html_escape(&self.options.lang)));
		html.push_str("<head>\n");
		html.push_str("<meta charset=\"UTF-8\">\n");
		html.push_str(
			"<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
		);
		html.push_str(&format!(
			"<title>{}</title>\n",
			html_escape(&self.options.title)
		));
		html.push_str("</head>\n");
		html.push_str(body);
		html.push_str("\n</html>\n");

		html
	}
}
