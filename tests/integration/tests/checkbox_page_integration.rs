//! End-to-end checkbox page scenarios driven through the application handler

use checklist_core::SelectionViewModel;
use checklist_integration_tests::{
	capture_logs, default_app, form_body, form_post, items_from_document, with_checked,
};
use checklist_pages::{AriaSyncController, AriaSyncMode, ChecklistPage, PageOptions};
use checklist_server::{ChecklistApp, Handler, Request, Settings};
use hyper::{Method, StatusCode};
use rstest::{fixture, rstest};

#[fixture]
fn app() -> ChecklistApp {
	default_app()
}

#[rstest]
#[tokio::test]
async fn test_initial_page_marks_even_ids(app: ChecklistApp) {
	// Act
	let response = app.handle(Request::simple(Method::GET, "/checkboxes", "")).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::OK);
	let html = response.text();
	let expected = [
		(1, "Headlights", false),
		(2, "Brake Light Switches", true),
		(3, "Wiper Switches", false),
		(4, "Door Jamb Switches", true),
	];
	for (index, (id, name, checked)) in expected.into_iter().enumerate() {
		let checked_attr = if checked { " checked" } else { "" };
		let checkbox = format!(
			r#"<input type="checkbox" name="items[{index}].checked" value="true"{checked_attr} id="{id}" class="form-check-input" aria-checked="{checked}" aria-label="{name}" />"#
		);
		assert!(html.contains(&checkbox), "missing checkbox for item {id}:\n{html}");
		assert!(html.contains(&format!(
			r#"<input type="hidden" name="items[{index}].id" value="{id}" />"#
		)));
		assert!(html.contains(&format!(
			r#"<input type="hidden" name="items[{index}].name" value="{name}" />"#
		)));
		assert!(html.contains(&format!(
			r#"<label class="form-check-label" for="{id}">{name}</label>"#
		)));
	}
	assert!(html.contains(r#"<form method="post" action="/checkboxes">"#));
	assert!(html.contains("document.querySelectorAll(\".form-check-input\")"));
}

#[rstest]
#[tokio::test]
async fn test_unchanged_submit_logs_even_items(app: ChecklistApp) {
	// Arrange
	let (_guard, logs) = capture_logs();
	let body = form_body(&app.initial_items());

	// Act
	let response = app.handle(form_post("/checkboxes", body)).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.location(), Some("/checkboxes"));
	assert_eq!(
		logs.submit_lines(),
		vec![
			"Checked items on Checkboxes post",
			"Id: 2 Name: Brake Light Switches",
			"Id: 4 Name: Door Jamb Switches",
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_changed_submit_logs_new_selection(app: ChecklistApp) {
	// Arrange
	let (_guard, logs) = capture_logs();
	let items = with_checked(&app.initial_items(), &[false, false, true, true]);

	// Act
	let response = app.handle(form_post("/checkboxes", form_body(&items))).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(
		logs.submit_lines(),
		vec![
			"Checked items on Checkboxes post",
			"Id: 3 Name: Wiper Switches",
			"Id: 4 Name: Door Jamb Switches",
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_nothing_checked_submit(app: ChecklistApp) {
	// Arrange
	let (_guard, logs) = capture_logs();
	let items = with_checked(&app.initial_items(), &[false; 4]);

	// Act
	let response = app.handle(form_post("/checkboxes", form_body(&items))).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.location(), Some("/checkboxes"));
	assert_eq!(logs.submit_lines(), vec!["Nothing checked for Checkboxes post"]);
}

#[rstest]
#[tokio::test]
async fn test_page_after_submit_shows_defaults_again(app: ChecklistApp) {
	// Arrange
	let items = with_checked(&app.initial_items(), &[true; 4]);
	app.handle(form_post("/checkboxes", form_body(&items))).await.unwrap();

	// Act
	let response = app.handle(Request::simple(Method::GET, "/checkboxes", "")).await.unwrap();

	// Assert
	let html = response.text();
	assert!(html.contains(r#"aria-checked="false" aria-label="Headlights""#));
	assert!(html.contains(r#"aria-checked="true" aria-label="Brake Light Switches""#));
}

#[rstest]
#[tokio::test]
async fn test_clicks_flow_into_submitted_form(app: ChecklistApp) {
	// Arrange
	let (_guard, logs) = capture_logs();
	let page = ChecklistPage::new(PageOptions::new());
	let document = page.render_document(&app.initial_items());
	let registry = AriaSyncController::toggle().bootstrap(&document);
	assert_eq!(registry.len(), 4);

	// Act
	document.get_element_by_id("2").unwrap().click();
	document.get_element_by_id("3").unwrap().click();
	let posted = items_from_document(&document);
	let response = app.handle(form_post("/checkboxes", form_body(&posted))).await.unwrap();

	// Assert
	let aria: Vec<_> = document
		.elements_by_class("form-check-input")
		.iter()
		.map(|control| control.get_attribute("aria-checked").unwrap())
		.collect();
	assert_eq!(aria, vec!["false", "false", "true", "true"]);
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(
		logs.submit_lines(),
		vec![
			"Checked items on Checkboxes post",
			"Id: 3 Name: Wiper Switches",
			"Id: 4 Name: Door Jamb Switches",
		]
	);
}

#[rstest]
#[case(AriaSyncMode::Toggle, 1, "true")]
#[case(AriaSyncMode::Toggle, 2, "false")]
#[case(AriaSyncMode::Toggle, 3, "true")]
#[case(AriaSyncMode::ForceFalse, 2, "false")]
#[case(AriaSyncMode::ForceFalse, 3, "false")]
fn test_click_updates_only_clicked_control(
	#[case] mode: AriaSyncMode,
	#[case] clicked: i64,
	#[case] expected: &str,
) {
	// Arrange
	let items = default_app().initial_items();
	let document = ChecklistPage::new(PageOptions::new()).render_document(&items);
	let _registry = AriaSyncController::new(mode).bootstrap(&document);
	let before: Vec<_> = items.iter().map(SelectionViewModel::aria_checked).collect();

	// Act
	document.get_element_by_id(&clicked.to_string()).unwrap().click();

	// Assert
	for (item, initial) in items.iter().zip(before) {
		let control = document.get_element_by_id(&item.id.to_string()).unwrap();
		let aria = control.get_attribute("aria-checked").unwrap();
		if item.id == clicked {
			assert_eq!(aria, expected);
		} else {
			assert_eq!(aria, initial);
		}
	}
}

#[rstest]
#[tokio::test]
async fn test_malformed_submit_is_rejected_and_logged(app: ChecklistApp) {
	// Arrange
	let (_guard, logs) = capture_logs();

	// Act
	let response = app
		.handle(form_post("/checkboxes", "items[0].id=1&items[0].name=Headlights&items[2].id=3"))
		.await
		.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	assert!(logs.submit_lines().is_empty());
	assert_eq!(
		logs.messages(tracing::Level::WARN, "checklist_server"),
		vec!["rejected malformed submit"]
	);
}

#[rstest]
#[tokio::test]
async fn test_force_false_mode_reaches_client_script() {
	// Arrange
	let settings = Settings {
		aria_mode: AriaSyncMode::ForceFalse,
		..Settings::default()
	};
	let app = ChecklistApp::new(&settings);

	// Act
	let response = app.handle(Request::simple(Method::GET, "/checkboxes", "")).await.unwrap();

	// Assert
	let html = response.text();
	assert!(html.contains("setAriaCheckedFalse(document.querySelectorAll(\".form-check-input\"))"));
}
