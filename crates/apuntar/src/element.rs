//! Accessibility tree snapshot model.
//!
//! An [`ElementNode`] tree is produced by whatever snapshots the running app;
//! the engine only ever reads it. Keys follow the camelCase shape emitted by
//! the snapshot service so a saved tree deserialises directly.

use serde::{Deserialize, Serialize};

/// Element types that accept focus even when the snapshot reports them as
/// not hittable.
pub const INPUT_TYPES: &[&str] = &[
    "textField",
    "secureTextField",
    "searchField",
    "textEditor",
    "textArea",
];

/// Substrings marking an element type as a modal layer drawn above content.
pub const OVERLAY_TYPE_MARKERS: &[&str] = &["alert", "sheet", "popover", "dialog", "overlay", "modal"];

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle of an element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Frame {
    /// Create a new frame
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the unrounded center point
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside this frame, edges included
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Bounding-box area
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether either dimension is zero
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Whether this frame overlaps the rectangle `[0,0]-[width,height]` at all
    #[must_use]
    pub fn intersects_viewport(&self, width: f64, height: f64) -> bool {
        self.x + self.width > 0.0 && self.y + self.height > 0.0 && self.x < width && self.y < height
    }
}

/// Round half-way values toward positive infinity.
///
/// Scores and centres are reported as integers; `f64::round` would send
/// `-0.5` to `-1`, this sends it to `0`.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

const fn default_true() -> bool {
    true
}

/// A node in the accessibility tree snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    /// Element type name (e.g. "button", "textField")
    #[serde(rename = "type")]
    pub element_type: String,
    /// Accessibility identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Accessibility label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Current value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Accessibility hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Placeholder text for inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Screen frame
    #[serde(default)]
    pub frame: Frame,
    /// Enabled state
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    /// Selected state
    #[serde(default)]
    pub is_selected: bool,
    /// Focus state
    #[serde(default)]
    pub is_focused: bool,
    /// Whether the element still exists in the app
    #[serde(default = "default_true")]
    pub exists: bool,
    /// Hittable flag reported by the snapshot service
    #[serde(default = "default_true")]
    pub is_hittable: bool,
    /// Visibility flag reported by the snapshot service
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// Children in depth-first order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create an enabled, visible, hittable element with the given type and frame
    #[must_use]
    pub fn new(element_type: impl Into<String>, frame: Frame) -> Self {
        Self {
            element_type: element_type.into(),
            identifier: None,
            label: None,
            value: None,
            title: None,
            hint: None,
            placeholder: None,
            frame,
            is_enabled: true,
            is_selected: false,
            is_focused: false,
            exists: true,
            is_hittable: true,
            is_visible: true,
            children: Vec::new(),
        }
    }

    /// Set the identifier
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the hint
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the enabled flag
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    /// Set the visible flag
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    /// Set the hittable flag
    #[must_use]
    pub const fn with_hittable(mut self, hittable: bool) -> Self {
        self.is_hittable = hittable;
        self
    }

    /// Set the exists flag
    #[must_use]
    pub const fn with_exists(mut self, exists: bool) -> Self {
        self.exists = exists;
        self
    }

    /// Append a child
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children in order
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Rounded center of the frame, or `None` when the frame has no area
    #[must_use]
    pub fn center_point(&self) -> Option<Point> {
        if self.frame.is_empty() {
            return None;
        }
        let center = self.frame.center();
        Some(Point::new(round_half_up(center.x), round_half_up(center.y)))
    }

    /// Whether this is a text input that can take focus without being hittable
    #[must_use]
    pub fn is_input_type(&self) -> bool {
        INPUT_TYPES
            .iter()
            .any(|input| input.eq_ignore_ascii_case(&self.element_type))
    }

    /// Whether the type name marks a modal layer (alert, sheet, dialog, ...)
    #[must_use]
    pub fn is_overlay_type(&self) -> bool {
        let lowered = self.element_type.to_lowercase();
        OVERLAY_TYPE_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    }

    /// Short human-readable description, e.g. `button "Login"`
    #[must_use]
    pub fn describe(&self) -> String {
        let name = self
            .label
            .as_deref()
            .or(self.identifier.as_deref())
            .or(self.title.as_deref())
            .filter(|name| !name.is_empty());
        match name {
            Some(name) => format!("{} \"{}\"", self.element_type, name),
            None => self.element_type.clone(),
        }
    }
}

/// Rounded center of an element's frame; `None` iff width or height is zero
#[must_use]
pub fn element_center(element: &ElementNode) -> Option<Point> {
    element.center_point()
}
