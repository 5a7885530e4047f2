//! Validation orchestrator.
//!
//! Composes resolution, state checks, hittability and suggestion ranking
//! into one verdict per call:
//!
//! ```text
//! resolve ──► not found ──► rank suggestions ──► invalid(not_found)
//!    │
//!    ▼
//! visible? ──► enabled? ──► hittable? ──► valid
//! ```
//!
//! Which checks run depends on the action about to be performed; see
//! [`ActionType::validation_options`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::EngineConfig;
use crate::element::ElementNode;
use crate::hittability::{HittabilityChecker, HittabilityResult, NotHittableReason};
use crate::resolver;
use crate::suggestions::{self, SuggestedTarget};
use crate::target::{Address, Predicate, Target};

/// Interaction about to be performed on a target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    /// Single tap
    Tap,
    /// Double tap
    DoubleTap,
    /// Long press
    LongPress,
    /// Type text into the element
    InputText,
    /// Swipe starting on the element
    Swipe,
    /// Scroll the element
    Scroll,
    /// Wait until the element exists
    WaitForElement,
    /// Wait until the element is gone
    WaitForNotExist,
    /// Assert the element exists
    AssertExists,
    /// Assert the element does not exist
    AssertNotExists,
    /// Assert the element is visible
    AssertVisible,
    /// Assert the element is enabled
    AssertEnabled,
    /// Assert the element is disabled
    AssertDisabled,
    /// Any other action; validated with the default policy
    Other(String),
}

impl ActionType {
    /// Wire name, e.g. `waitForElement`
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tap => "tap",
            Self::DoubleTap => "doubleTap",
            Self::LongPress => "longPress",
            Self::InputText => "inputText",
            Self::Swipe => "swipe",
            Self::Scroll => "scroll",
            Self::WaitForElement => "waitForElement",
            Self::WaitForNotExist => "waitForNotExist",
            Self::AssertExists => "assertExists",
            Self::AssertNotExists => "assertNotExists",
            Self::AssertVisible => "assertVisible",
            Self::AssertEnabled => "assertEnabled",
            Self::AssertDisabled => "assertDisabled",
            Self::Other(name) => name,
        }
    }

    /// Success means the element is absent
    #[must_use]
    pub const fn expects_absence(&self) -> bool {
        matches!(self, Self::WaitForNotExist | Self::AssertNotExists)
    }

    /// Checks to run before this action
    #[must_use]
    pub const fn validation_options(&self) -> ValidationOptions {
        match self {
            Self::WaitForElement | Self::AssertExists => ValidationOptions {
                require_visible: true,
                require_enabled: false,
                check_hittable: false,
            },
            Self::AssertDisabled => ValidationOptions {
                require_visible: true,
                require_enabled: false,
                check_hittable: true,
            },
            _ => ValidationOptions::DEFAULT,
        }
    }
}

impl From<&str> for ActionType {
    fn from(name: &str) -> Self {
        match name {
            "tap" => Self::Tap,
            "doubleTap" => Self::DoubleTap,
            "longPress" => Self::LongPress,
            "inputText" => Self::InputText,
            "swipe" => Self::Swipe,
            "scroll" => Self::Scroll,
            "waitForElement" => Self::WaitForElement,
            "waitForNotExist" => Self::WaitForNotExist,
            "assertExists" => Self::AssertExists,
            "assertNotExists" => Self::AssertNotExists,
            "assertVisible" => Self::AssertVisible,
            "assertEnabled" => Self::AssertEnabled,
            "assertDisabled" => Self::AssertDisabled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ActionType> for String {
    fn from(action: ActionType) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which checks `validate_target` runs after resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Fail when the element is not visible
    pub require_visible: bool,
    /// Fail when the element is disabled
    pub require_enabled: bool,
    /// Run the full hittability checker
    pub check_hittable: bool,
}

impl ValidationOptions {
    /// Visible, enabled and hittable
    pub const DEFAULT: Self = Self {
        require_visible: true,
        require_enabled: true,
        check_hittable: true,
    };
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Verdict of one validation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the action may proceed
    pub valid: bool,
    /// Resolved element, when one was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementNode>,
    /// Failure reason; always set when `valid` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<NotHittableReason>,
    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Alternatives ranked by similarity, best first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<SuggestedTarget>>,
    /// Certainty about the element's identity (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Hittability details when the checker ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hittability: Option<HittabilityResult>,
}

impl ValidationResult {
    fn valid(element: Option<&ElementNode>, message: impl Into<String>) -> Self {
        Self {
            valid: true,
            element: element.cloned(),
            reason: None,
            message: Some(message.into()),
            suggestions: None,
            confidence: Some(100),
            hittability: None,
        }
    }

    fn invalid(element: Option<&ElementNode>, reason: NotHittableReason, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            element: element.cloned(),
            reason: Some(reason),
            message: Some(message.into()),
            suggestions: None,
            confidence: Some(100),
            hittability: None,
        }
    }
}

/// Configured entry point for target validation
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: EngineConfig,
}

impl Validator {
    /// Create a validator
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve a target
    #[must_use]
    pub fn resolve<'a>(&self, target: &Target, root: &'a ElementNode) -> Option<&'a ElementNode> {
        resolver::resolve(target, root)
    }

    /// Run the hittability checker with the configured viewport
    #[must_use]
    pub fn check_hittable(&self, element: &ElementNode, root: &ElementNode) -> HittabilityResult {
        HittabilityChecker::from_config(&self.config).check(element, root)
    }

    /// Rank alternatives with the configured limits
    #[must_use]
    pub fn suggest(&self, target: &Target, root: &ElementNode) -> Vec<SuggestedTarget> {
        suggestions::suggest_targets(target, root, &self.config.suggestions)
    }

    /// Resolve `target` and run the checks selected by `options`
    #[must_use]
    pub fn validate_target(&self, target: &Target, root: &ElementNode, options: &ValidationOptions) -> ValidationResult {
        let result = self.run_validation(target, root, options);
        debug!(
            selector = %target,
            valid = result.valid,
            reason = result.reason.map(NotHittableReason::as_str),
            "validated target"
        );
        result
    }

    fn run_validation(&self, target: &Target, root: &ElementNode, options: &ValidationOptions) -> ValidationResult {
        let predicate_error = match &target.address {
            Address::Predicate(expression) => Predicate::parse(expression).err(),
            _ => None,
        };

        let Some(element) = resolver::resolve(target, root) else {
            let suggestions = self.suggest(target, root);
            let message = match predicate_error {
                Some(err) => format!("No element matches {target}: {err}"),
                None => format!("No element matches {target}"),
            };
            let mut result = ValidationResult::invalid(None, NotHittableReason::NotFound, message);
            result.confidence = Some(suggestions.first().map_or(0, |s| s.similarity));
            result.suggestions = Some(suggestions);
            return result;
        };

        if options.require_visible && !element.is_visible {
            return ValidationResult::invalid(
                Some(element),
                NotHittableReason::NotVisible,
                format!("{} is not visible", element.describe()),
            );
        }

        if options.require_enabled && !element.is_enabled {
            return ValidationResult::invalid(
                Some(element),
                NotHittableReason::NotEnabled,
                format!("{} is disabled", element.describe()),
            );
        }

        if options.check_hittable {
            let hittability = HittabilityChecker::from_config(&self.config)
                .with_enabled_check(options.require_enabled)
                .check(element, root);
            if !hittability.hittable {
                let reason = hittability.reason.unwrap_or(NotHittableReason::NotHittable);
                let mut result = ValidationResult::invalid(Some(element), reason, hittability.message.clone());
                result.hittability = Some(hittability);
                return result;
            }
            let mut result = ValidationResult::valid(Some(element), format!("{} is ready", element.describe()));
            result.hittability = Some(hittability);
            return result;
        }

        ValidationResult::valid(Some(element), format!("{} found", element.describe()))
    }

    /// Validate `target` with the policy for `action`.
    ///
    /// For `waitForNotExist` / `assertNotExists` success means the target does
    /// not resolve. Finding it fails with reason `not_found`, read here as
    /// "still exists".
    #[must_use]
    pub fn validate_for_action(&self, target: &Target, root: &ElementNode, action: &ActionType) -> ValidationResult {
        if action.expects_absence() {
            let result = match resolver::resolve(target, root) {
                None => ValidationResult::valid(None, format!("{target} does not exist")),
                Some(element) => ValidationResult::invalid(
                    Some(element),
                    NotHittableReason::NotFound,
                    format!("{} still exists", element.describe()),
                ),
            };
            debug!(selector = %target, %action, valid = result.valid, "validated absence");
            return result;
        }

        self.validate_target(target, root, &action.validation_options())
    }
}

/// Validate with default configuration
#[must_use]
pub fn validate_target(target: &Target, root: &ElementNode, options: &ValidationOptions) -> ValidationResult {
    Validator::default().validate_target(target, root, options)
}

/// Validate for an action with default configuration
#[must_use]
pub fn validate_for_action(target: &Target, root: &ElementNode, action: &ActionType) -> ValidationResult {
    Validator::default().validate_for_action(target, root, action)
}
