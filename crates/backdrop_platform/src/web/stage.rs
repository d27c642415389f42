//! DOM-backed `Stage`.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::document;
use crate::error::PlatformError;
use crate::stage::{DisplayHandle, Stage};

/// Stage that maps display elements onto `<div>`s inside a container.
pub struct DomStage {
    document: Document,
    container: Element,
    loaded_class: String,
}

impl DomStage {
    /// Attach to the container element `container_id`. `loaded_class` is put
    /// on `<body>` when the page is revealed.
    pub fn new(container_id: &str, loaded_class: &str) -> Result<Self, PlatformError> {
        let document = document()?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| PlatformError::missing(container_id))?;
        Ok(Self {
            document,
            container,
            loaded_class: loaded_class.to_string(),
        })
    }

    fn element(&self, handle: &DisplayHandle) -> Option<Element> {
        self.document.get_element_by_id(handle.id())
    }

    fn html_element(&self, handle: &DisplayHandle) -> Option<HtmlElement> {
        self.element(handle)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl Stage for DomStage {
    fn find_element(&self, id: &str) -> Option<DisplayHandle> {
        self.document
            .get_element_by_id(id)
            .map(|_| DisplayHandle::new(id))
    }

    fn create_element(&mut self, id: &str) -> DisplayHandle {
        if self.document.get_element_by_id(id).is_none() {
            match self.document.create_element("div") {
                Ok(el) => {
                    el.set_id(id);
                    if let Err(e) = self.container.append_child(&el) {
                        log::error!("Failed to append #{}: {:?}", id, e);
                    }
                }
                Err(e) => log::error!("Failed to create #{}: {:?}", id, e),
            }
        }
        DisplayHandle::new(id)
    }

    fn add_state_tag(&mut self, element: &DisplayHandle, tag: &str) {
        if let Some(el) = self.element(element) {
            if let Err(e) = el.class_list().add_1(tag) {
                log::warn!("Failed to add class {} to {}: {:?}", tag, element, e);
            }
        }
    }

    fn remove_state_tag(&mut self, element: &DisplayHandle, tag: &str) {
        if let Some(el) = self.element(element) {
            if let Err(e) = el.class_list().remove_1(tag) {
                log::warn!("Failed to remove class {} from {}: {:?}", tag, element, e);
            }
        }
    }

    fn z_index(&self, element: &DisplayHandle) -> i32 {
        self.html_element(element)
            .and_then(|el| el.style().get_property_value("z-index").ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    fn set_z_index(&mut self, element: &DisplayHandle, z_index: i32) {
        if let Some(el) = self.html_element(element) {
            let _ = el.style().set_property("z-index", &z_index.to_string());
        }
    }

    fn set_opacity(&mut self, element: &DisplayHandle, opacity: f64) {
        if let Some(el) = self.html_element(element) {
            let _ = el.style().set_property("opacity", &opacity.to_string());
        }
    }

    fn register_background_style(&mut self, id: &str, url: &str) {
        let css = format!("#{id} {{\n\tbackground: url({url}) no-repeat center center fixed;\n\tbackground-size: cover;\n}}\n");
        let Ok(style) = self.document.create_element("style") else {
            log::error!("Failed to create style element for #{}", id);
            return;
        };
        style.set_text_content(Some(&css));

        let appended = match self.document.head() {
            Some(head) => head.append_child(&style),
            None => self.container.append_child(&style),
        };
        if let Err(e) = appended {
            log::error!("Failed to register style for #{}: {:?}", id, e);
        }
    }

    fn reveal_page(&mut self) {
        if let Some(body) = self.document.body() {
            body.set_class_name(&self.loaded_class);
        }
    }
}
