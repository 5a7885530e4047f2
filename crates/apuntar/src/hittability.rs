//! Hittability checks.
//!
//! Decides whether a resolved element can actually receive a tap. Checks run
//! in a fixed order and stop at the first failure, so an element that is both
//! invisible and disabled is always reported as `not_visible`.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::config::{EngineConfig, Viewport};
use crate::element::{round_half_up, ElementNode, Frame};
use crate::tree;

/// Depth offset given to overlay elements when estimating stacking order
pub const OVERLAY_Z_BOOST: usize = 1000;

/// Why an element cannot be interacted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotHittableReason {
    /// Element is not present
    NotFound,
    /// Element is hidden
    NotVisible,
    /// Element is disabled
    NotEnabled,
    /// Element has zero width or height
    ZeroSize,
    /// An overlay covers the element
    Obscured,
    /// Element lies entirely outside the viewport
    OffScreen,
    /// Snapshot reports the element as not hittable
    NotHittable,
}

impl NotHittableReason {
    /// Wire name (`not_found`, `off_screen`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::NotVisible => "not_visible",
            Self::NotEnabled => "not_enabled",
            Self::ZeroSize => "zero_size",
            Self::Obscured => "obscured",
            Self::OffScreen => "off_screen",
            Self::NotHittable => "not_hittable",
        }
    }
}

impl fmt::Display for NotHittableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a hittability check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HittabilityResult {
    /// Whether the element can receive a tap
    pub hittable: bool,
    /// Failure reason when not hittable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<NotHittableReason>,
    /// Human-readable explanation
    pub message: String,
    /// Element frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Frame>,
    /// Remediation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl HittabilityResult {
    fn ok(element: &ElementNode, message: impl Into<String>) -> Self {
        Self {
            hittable: true,
            reason: None,
            message: message.into(),
            position: Some(element.frame),
            suggested_action: None,
        }
    }

    fn fail(
        element: &ElementNode,
        reason: NotHittableReason,
        message: impl Into<String>,
        suggested_action: impl Into<String>,
    ) -> Self {
        Self {
            hittable: false,
            reason: Some(reason),
            message: message.into(),
            position: Some(element.frame),
            suggested_action: Some(suggested_action.into()),
        }
    }
}

/// Runs the ordered hittability checks against a fixed viewport
#[derive(Debug, Clone)]
pub struct HittabilityChecker {
    viewport: Viewport,
    check_enabled: bool,
}

impl Default for HittabilityChecker {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl HittabilityChecker {
    /// Create a checker for a viewport
    #[must_use]
    pub const fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            check_enabled: true,
        }
    }

    /// Create a checker from engine configuration
    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.viewport)
    }

    /// Skip the enabled-state check (used when asserting an element is disabled)
    #[must_use]
    pub const fn with_enabled_check(mut self, check_enabled: bool) -> Self {
        self.check_enabled = check_enabled;
        self
    }

    /// Viewport in use
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Classify whether `element` can be tapped within `root`
    #[must_use]
    pub fn check(&self, element: &ElementNode, root: &ElementNode) -> HittabilityResult {
        let result = self.run_checks(element, root);
        debug!(
            element = %element.describe(),
            hittable = result.hittable,
            reason = result.reason.map(NotHittableReason::as_str),
            "hittability checked"
        );
        result
    }

    fn run_checks(&self, element: &ElementNode, root: &ElementNode) -> HittabilityResult {
        if !element.exists {
            return HittabilityResult::fail(
                element,
                NotHittableReason::NotFound,
                "Element no longer exists",
                "Re-query the UI tree; the element may have been removed",
            );
        }

        if !element.is_visible {
            return HittabilityResult::fail(
                element,
                NotHittableReason::NotVisible,
                "Element is not visible",
                "Wait for the element to appear or scroll it into view",
            );
        }

        if self.check_enabled && !element.is_enabled {
            return HittabilityResult::fail(
                element,
                NotHittableReason::NotEnabled,
                "Element is disabled",
                "Complete the prerequisite steps that enable this element",
            );
        }

        if element.frame.is_empty() {
            return HittabilityResult::fail(
                element,
                NotHittableReason::ZeroSize,
                format!(
                    "Element has zero size ({}x{})",
                    element.frame.width, element.frame.height
                ),
                "Wait for the element to finish loading or expand its container",
            );
        }

        if !element.is_hittable {
            if element.is_input_type() {
                return HittabilityResult::ok(element, "Input element can receive focus");
            }
            return HittabilityResult::fail(
                element,
                NotHittableReason::NotHittable,
                "Element is not hittable",
                "The element may be covered or disabled by the app; check for overlays or loading state",
            );
        }

        let Viewport { width, height } = self.viewport;
        if !element.frame.intersects_viewport(width, height) {
            let x = round_half_up(element.frame.x);
            let y = round_half_up(element.frame.y);
            return HittabilityResult::fail(
                element,
                NotHittableReason::OffScreen,
                format!("Element is off screen at ({x}, {y})"),
                format!("Scroll to bring the element at ({x}, {y}) into the {width}x{height} viewport"),
            );
        }

        if let Some(overlay) = find_obscuring_element(element, root) {
            let is_alert = overlay.element_type.to_lowercase().contains("alert");
            let action = if is_alert {
                "Dismiss the alert before interacting with this element".to_string()
            } else {
                format!("A {} is covering this element; dismiss it first", overlay.element_type)
            };
            return HittabilityResult::fail(
                element,
                NotHittableReason::Obscured,
                format!("Element is obscured by {}", overlay.describe()),
                action,
            );
        }

        HittabilityResult::ok(element, "Element is hittable")
    }
}

/// Find the overlay most likely drawn on top of `element`'s center.
///
/// Stacking order is approximated from tree depth: every visible overlay-typed
/// element covering the center scores `depth + OVERLAY_Z_BOOST` and the
/// highest score wins, ties going to the later element in traversal order.
/// This is a heuristic, not real compositing: an overlay that contains the
/// element still counts. Only `element` itself is excluded, by address, so it
/// should be a reference into `root`.
#[must_use]
pub fn find_obscuring_element<'a>(element: &ElementNode, root: &'a ElementNode) -> Option<&'a ElementNode> {
    let center = element.frame.center();

    tree::walk(root)
        .into_iter()
        .filter(|visit| {
            let candidate = visit.element;
            candidate.is_visible
                && candidate.is_overlay_type()
                && candidate.frame.contains(&center)
                && !std::ptr::eq(candidate, element)
        })
        .map(|visit| {
            let z_index = visit.depth + OVERLAY_Z_BOOST;
            trace!(overlay = %visit.element.describe(), z_index, "overlay covers target center");
            (z_index, visit.element)
        })
        .max_by_key(|(z_index, _)| *z_index)
        .map(|(_, overlay)| overlay)
}

/// Check hittability with the default viewport
#[must_use]
pub fn check_hittable(element: &ElementNode, root: &ElementNode) -> HittabilityResult {
    HittabilityChecker::default().check(element, root)
}
