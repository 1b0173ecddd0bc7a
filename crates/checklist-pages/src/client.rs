//! Client-side bootstrap
//!
//! The rendered page carries a small inline script that binds the
//! `aria-checked` click handlers once the DOM is ready. Browser builds of
//! this crate additionally export [`init_aria_sync`] through `wasm-bindgen`,
//! which binds the same handlers from Rust.

use crate::aria::{ARIA_CHECKED, AriaSyncMode, MARKER_CLASS};

/// Returns the inline bootstrap script for `mode`.
///
/// The script defines `initializeAriaChecked` and `setAriaCheckedFalse`,
/// both taking a list of controls, and calls the one matching `mode` on
/// `DOMContentLoaded` with every `.form-check-input` on the page.
pub fn client_script(mode: AriaSyncMode) -> String {
	let entry = match mode {
		AriaSyncMode::Toggle => "initializeAriaChecked",
		AriaSyncMode::ForceFalse => "setAriaCheckedFalse",
	};

	format!(
		r#"(function () {{
  "use strict";
  function initializeAriaChecked(controls) {{
    controls.forEach(function (control) {{
      control.addEventListener("click", function () {{
        var current = control.getAttribute("{attr}");
        control.setAttribute("{attr}", current === "true" ? "false" : "true");
      }});
    }});
  }}
  function setAriaCheckedFalse(controls) {{
    controls.forEach(function (control) {{
      control.addEventListener("click", function () {{
        control.setAttribute("{attr}", "false");
      }});
    }});
  }}
  document.addEventListener("DOMContentLoaded", function () {{
    {entry}(document.querySelectorAll(".{marker}"));
  }});
}})();"#,
		attr = ARIA_CHECKED,
		marker = MARKER_CLASS,
		entry = entry,
	)
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
mod wasm {
	use crate::aria::{ARIA_CHECKED, AriaSyncMode, MARKER_CLASS};
	use wasm_bindgen::JsCast;
	use wasm_bindgen::prelude::*;

	/// Binds `aria-checked` handlers to every `.form-check-input` in the
	/// current document and returns how many controls were bound.
	#[wasm_bindgen(js_name = initAriaSync)]
	pub fn init_aria_sync(mode: &str) -> Result<usize, JsValue> {
		let mode: AriaSyncMode = mode
			.parse()
			.map_err(|e: crate::aria::UnknownAriaSyncMode| JsValue::from_str(&e.to_string()))?;

		let document = web_sys::window()
			.and_then(|window| window.document())
			.ok_or_else(|| JsValue::from_str("no document available"))?;
		let controls = document.query_selector_all(&format!(".{MARKER_CLASS}"))?;

		let mut bound = 0;
		for index in 0..controls.length() {
			let Some(node) = controls.item(index) else {
				continue;
			};
			let Ok(control) = node.dyn_into::<web_sys::Element>() else {
				continue;
			};

			let target = control.clone();
			let handler = Closure::<dyn FnMut()>::new(move || {
				let current = target.get_attribute(ARIA_CHECKED);
				let next = mode.next_value(current.as_deref());
				if let Err(err) = target.set_attribute(ARIA_CHECKED, next) {
					web_sys::console::warn_2(&JsValue::from_str("failed to update aria-checked:"), &err);
				}
			});
			control.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
			// The listener lives as long as the page.
			handler.forget();
			bound += 1;
		}

		Ok(bound)
	}
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use wasm::init_aria_sync;
