//! Browser implementations of the platform capabilities (WASM only).

mod loader;
mod scheduler;
mod stage;

pub use loader::DomImageLoader;
pub use scheduler::DomScheduler;
pub use stage::DomStage;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlOptionElement, HtmlSelectElement, Window};

use crate::error::PlatformError;

pub(crate) fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or_else(|| PlatformError::Js("no window".to_string()))
}

pub(crate) fn document() -> Result<Document, PlatformError> {
    window()?
        .document()
        .ok_or_else(|| PlatformError::Js("no document".to_string()))
}

/// Viewport width in CSS pixels, falling back to the root element's client width.
pub fn viewport_width() -> Result<u32, PlatformError> {
    let inner = window()?
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .filter(|width| *width > 0.0);

    let width = match inner {
        Some(width) => width,
        None => document()?
            .document_element()
            .map(|root| root.client_width() as f64)
            .unwrap_or(0.0),
    };
    Ok(width.max(0.0) as u32)
}

/// Look up a `<select>` by id.
pub fn select_element(id: &str) -> Result<HtmlSelectElement, PlatformError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| PlatformError::missing(id))?
        .dyn_into::<HtmlSelectElement>()
        .map_err(|_| PlatformError::WrongElementKind {
            id: id.to_string(),
            expected: "select",
        })
}

/// Values of every `<option>` of a select, in document order.
pub fn option_values(select: &HtmlSelectElement) -> Vec<String> {
    let options = select.options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| option.value())
        .collect()
}
