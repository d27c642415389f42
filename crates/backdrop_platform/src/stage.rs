//! Display elements and their presentation state.
//!
//! The carousel never renders anything itself. It acquires display elements by
//! id, toggles state tags on them, moves them in z-order and drives their
//! opacity; the `Stage` implementation maps that onto real surfaces.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Opaque reference to a renderable surface, identified by element id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayHandle {
    id: String,
}

impl DisplayHandle {
    /// Wrap an element id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The element id this handle refers to.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// Presentation surface the carousel draws onto.
pub trait Stage {
    /// Look up an existing element.
    fn find_element(&self, id: &str) -> Option<DisplayHandle>;

    /// Create a new element. Implementations return the existing element if
    /// `id` is already taken.
    fn create_element(&mut self, id: &str) -> DisplayHandle;

    /// Idempotent acquisition: the existing element, or a fresh one.
    fn get_or_create_display_element(&mut self, id: &str) -> DisplayHandle {
        match self.find_element(id) {
            Some(handle) => handle,
            None => self.create_element(id),
        }
    }

    /// Add a state tag without disturbing the other tags.
    fn add_state_tag(&mut self, element: &DisplayHandle, tag: &str);

    /// Remove a state tag without disturbing the other tags.
    fn remove_state_tag(&mut self, element: &DisplayHandle, tag: &str);

    /// Stacking priority of an element (0 if never set).
    fn z_index(&self, element: &DisplayHandle) -> i32;

    /// Set the stacking priority of an element.
    fn set_z_index(&mut self, element: &DisplayHandle, z_index: i32);

    /// Apply an opacity in `0.0..=1.0`.
    fn set_opacity(&mut self, element: &DisplayHandle, opacity: f64);

    /// Associate the element `id` with a background image resource.
    fn register_background_style(&mut self, id: &str, url: &str);

    /// Unhide the page content.
    fn reveal_page(&mut self);
}

/// Recorded state of one element of a `MemoryStage`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    /// Active state tags
    pub tags: BTreeSet<String>,
    /// Stacking priority
    pub z_index: i32,
    /// Current opacity
    pub opacity: f64,
    /// Every opacity applied, oldest first
    pub opacity_history: Vec<f64>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            tags: BTreeSet::new(),
            z_index: 0,
            opacity: 1.0,
            opacity_history: Vec::new(),
        }
    }
}

/// In-memory stage used headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryStage {
    elements: BTreeMap<String, ElementState>,
    styles: BTreeMap<String, String>,
    created: Vec<String>,
    reveals: u32,
}

impl MemoryStage {
    /// Create an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element that was part of the initial page, such as the
    /// low-fidelity placeholder. It is not counted as created.
    pub fn with_page_element(mut self, id: &str) -> Self {
        self.elements.insert(id.to_string(), ElementState::default());
        self
    }

    /// State of the element `id`.
    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    /// Whether `id` currently carries `tag`.
    pub fn has_tag(&self, id: &str, tag: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|state| state.tags.contains(tag))
    }

    /// Registered background url for `id`.
    pub fn background_of(&self, id: &str) -> Option<&str> {
        self.styles.get(id).map(String::as_str)
    }

    /// Ids created through `create_element`, in creation order.
    pub fn created_ids(&self) -> &[String] {
        &self.created
    }

    /// Whether the page has been revealed.
    pub fn is_revealed(&self) -> bool {
        self.reveals > 0
    }

    /// How many times `reveal_page` was called.
    pub fn reveal_count(&self) -> u32 {
        self.reveals
    }

    fn state_mut(&mut self, element: &DisplayHandle) -> &mut ElementState {
        self.elements.entry(element.id().to_string()).or_default()
    }
}

impl Stage for MemoryStage {
    fn find_element(&self, id: &str) -> Option<DisplayHandle> {
        self.elements.contains_key(id).then(|| DisplayHandle::new(id))
    }

    fn create_element(&mut self, id: &str) -> DisplayHandle {
        if !self.elements.contains_key(id) {
            self.elements.insert(id.to_string(), ElementState::default());
            self.created.push(id.to_string());
        }
        DisplayHandle::new(id)
    }

    fn add_state_tag(&mut self, element: &DisplayHandle, tag: &str) {
        self.state_mut(element).tags.insert(tag.to_string());
    }

    fn remove_state_tag(&mut self, element: &DisplayHandle, tag: &str) {
        self.state_mut(element).tags.remove(tag);
    }

    fn z_index(&self, element: &DisplayHandle) -> i32 {
        self.elements
            .get(element.id())
            .map_or(0, |state| state.z_index)
    }

    fn set_z_index(&mut self, element: &DisplayHandle, z_index: i32) {
        self.state_mut(element).z_index = z_index;
    }

    fn set_opacity(&mut self, element: &DisplayHandle, opacity: f64) {
        let state = self.state_mut(element);
        state.opacity = opacity;
        state.opacity_history.push(opacity);
    }

    fn register_background_style(&mut self, id: &str, url: &str) {
        self.styles.insert(id.to_string(), url.to_string());
    }

    fn reveal_page(&mut self) {
        self.reveals += 1;
    }
}
