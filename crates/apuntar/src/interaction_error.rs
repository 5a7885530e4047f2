//! User-facing interaction errors.
//!
//! Every failure the engine reports is translated into an [`InteractionError`]
//! carrying a code from a closed taxonomy, a fixed title and hint per code,
//! and whatever context was available (suggestions, position, screenshot).
//! Rendering lives in [`crate::report`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::element::Frame;
use crate::hittability::{HittabilityResult, NotHittableReason};
use crate::result::{ApuntarError, ApuntarResult};
use crate::suggestions::SuggestedTarget;
use crate::target::{format_target, Target};
use crate::validation::ValidationResult;

/// Suggestions named in a not-found `suggested_action`
const SUGGESTED_ACTION_TARGETS: usize = 3;

/// Closed set of user-facing failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionErrorCode {
    /// Target resolved to nothing
    ElementNotFound,
    /// Element is hidden
    ElementNotVisible,
    /// Element is disabled
    ElementNotEnabled,
    /// Element has no area
    ElementZeroSize,
    /// An overlay covers the element
    ElementObscured,
    /// Element lies outside the viewport
    ElementOffScreen,
    /// Platform reports the element as not hittable
    ElementNotHittable,
    /// The interaction did not complete in time
    InteractionTimeout,
    /// Target could not be parsed
    InvalidTarget,
    /// A required automation tool is missing
    ToolNotInstalled,
    /// A whole flow exceeded its time limit
    FlowTimeout,
    /// A flow file could not be parsed
    FlowSyntaxError,
    /// The app under test crashed
    AppCrashed,
    /// The app under test is not running
    AppNotRunning,
    /// No device or simulator is available
    DeviceNotAvailable,
    /// Anything else
    UnknownError,
}

impl InteractionErrorCode {
    /// All codes, in declaration order
    pub const ALL: [Self; 16] = [
        Self::ElementNotFound,
        Self::ElementNotVisible,
        Self::ElementNotEnabled,
        Self::ElementZeroSize,
        Self::ElementObscured,
        Self::ElementOffScreen,
        Self::ElementNotHittable,
        Self::InteractionTimeout,
        Self::InvalidTarget,
        Self::ToolNotInstalled,
        Self::FlowTimeout,
        Self::FlowSyntaxError,
        Self::AppCrashed,
        Self::AppNotRunning,
        Self::DeviceNotAvailable,
        Self::UnknownError,
    ];

    /// Wire name, e.g. `ELEMENT_NOT_FOUND`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ElementNotFound => "ELEMENT_NOT_FOUND",
            Self::ElementNotVisible => "ELEMENT_NOT_VISIBLE",
            Self::ElementNotEnabled => "ELEMENT_NOT_ENABLED",
            Self::ElementZeroSize => "ELEMENT_ZERO_SIZE",
            Self::ElementObscured => "ELEMENT_OBSCURED",
            Self::ElementOffScreen => "ELEMENT_OFF_SCREEN",
            Self::ElementNotHittable => "ELEMENT_NOT_HITTABLE",
            Self::InteractionTimeout => "INTERACTION_TIMEOUT",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::ToolNotInstalled => "TOOL_NOT_INSTALLED",
            Self::FlowTimeout => "FLOW_TIMEOUT",
            Self::FlowSyntaxError => "FLOW_SYNTAX_ERROR",
            Self::AppCrashed => "APP_CRASHED",
            Self::AppNotRunning => "APP_NOT_RUNNING",
            Self::DeviceNotAvailable => "DEVICE_NOT_AVAILABLE",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Short heading
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ElementNotFound => "Element not found",
            Self::ElementNotVisible => "Element not visible",
            Self::ElementNotEnabled => "Element disabled",
            Self::ElementZeroSize => "Element has no size",
            Self::ElementObscured => "Element obscured",
            Self::ElementOffScreen => "Element off screen",
            Self::ElementNotHittable => "Element not hittable",
            Self::InteractionTimeout => "Interaction timed out",
            Self::InvalidTarget => "Invalid target",
            Self::ToolNotInstalled => "Tool not installed",
            Self::FlowTimeout => "Flow timed out",
            Self::FlowSyntaxError => "Flow syntax error",
            Self::AppCrashed => "App crashed",
            Self::AppNotRunning => "App not running",
            Self::DeviceNotAvailable => "Device not available",
            Self::UnknownError => "Unknown error",
        }
    }

    /// Generic remediation advice
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::ElementNotFound => {
                "Check the identifier or label against the current screen, or use one of the suggested targets"
            }
            Self::ElementNotVisible => "Wait for the element to appear or navigate to the screen that shows it",
            Self::ElementNotEnabled => "Complete the required fields or wait for the element to become enabled",
            Self::ElementZeroSize => "The element is laid out with no area; wait for layout or target its container",
            Self::ElementObscured => "Dismiss the alert, sheet or overlay covering the element",
            Self::ElementOffScreen => "Scroll the element into view before interacting with it",
            Self::ElementNotHittable => "Wait for animations to finish or target a parent element",
            Self::InteractionTimeout => "Increase the timeout or check that the app is responsive",
            Self::InvalidTarget => "Use #id, \"label\", text:\"value\", predicate(...), (x,y) or type[index]",
            Self::ToolNotInstalled => "Install the missing tool and make sure it is on PATH",
            Self::FlowTimeout => "Increase the flow timeout or split the flow into smaller steps",
            Self::FlowSyntaxError => "Fix the flow file at the reported location",
            Self::AppCrashed => "Relaunch the app and inspect the device crash logs",
            Self::AppNotRunning => "Launch the app before running interactions",
            Self::DeviceNotAvailable => "Boot a simulator or connect a device",
            Self::UnknownError => "Re-run with --verbose for more detail",
        }
    }
}

impl fmt::Display for InteractionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NotHittableReason> for InteractionErrorCode {
    fn from(reason: NotHittableReason) -> Self {
        match reason {
            NotHittableReason::NotFound => Self::ElementNotFound,
            NotHittableReason::NotVisible => Self::ElementNotVisible,
            NotHittableReason::NotEnabled => Self::ElementNotEnabled,
            NotHittableReason::ZeroSize => Self::ElementZeroSize,
            NotHittableReason::Obscured => Self::ElementObscured,
            NotHittableReason::OffScreen => Self::ElementOffScreen,
            NotHittableReason::NotHittable => Self::ElementNotHittable,
        }
    }
}

/// Raw outcome reported by an action executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionStatus {
    /// Action performed
    Success,
    /// Target was not found
    NotFound,
    /// Target was not hittable
    NotHittable,
    /// Target was disabled
    NotEnabled,
    /// Action timed out
    Timeout,
    /// Action ran and failed
    Failed,
    /// Executor error
    Error,
}

impl ActionStatus {
    /// Error code for a failed status; `None` for success
    #[must_use]
    pub const fn error_code(self) -> Option<InteractionErrorCode> {
        match self {
            Self::Success => None,
            Self::NotFound => Some(InteractionErrorCode::ElementNotFound),
            Self::NotHittable => Some(InteractionErrorCode::ElementNotHittable),
            Self::NotEnabled => Some(InteractionErrorCode::ElementNotEnabled),
            Self::Timeout => Some(InteractionErrorCode::InteractionTimeout),
            Self::Failed | Self::Error => Some(InteractionErrorCode::UnknownError),
        }
    }
}

/// A failure ready to be shown to an operator or agent
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{title}: {message}")]
pub struct InteractionError {
    /// Failure category
    pub code: InteractionErrorCode,
    /// Short heading for the code
    pub title: String,
    /// What went wrong in this instance
    pub message: String,
    /// Generic advice for the code
    pub hint: String,
    /// Alternatives, best first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<SuggestedTarget>>,
    /// Concrete next step derived from context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    /// Element frame, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Frame>,
    /// Screenshot captured at failure time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<PathBuf>,
    /// Target that failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

impl InteractionError {
    /// Create an error with the catalog title and hint for `code`
    #[must_use]
    pub fn new(code: InteractionErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            title: code.title().to_string(),
            message: message.into(),
            hint: code.hint().to_string(),
            suggestions: None,
            suggested_action: None,
            position: None,
            screenshot_path: None,
            target: None,
        }
    }

    /// Attach a screenshot path
    #[must_use]
    pub fn with_screenshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshot_path = Some(path.into());
        self
    }

    /// Attach the failing target
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Attach the element frame
    #[must_use]
    pub const fn with_position(mut self, position: Frame) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach suggestions; an empty list clears them
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<SuggestedTarget>) -> Self {
        self.suggestions = (!suggestions.is_empty()).then_some(suggestions);
        self
    }

    /// Set the concrete next step
    #[must_use]
    pub fn with_suggested_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = Some(action.into());
        self
    }

    /// Best suggestion, if any
    #[must_use]
    pub fn top_suggestion(&self) -> Option<&SuggestedTarget> {
        self.suggestions.as_ref().and_then(|s| s.first())
    }
}

/// Target did not resolve; names up to three alternatives
#[must_use]
pub fn element_not_found_error(target: &Target, suggestions: Vec<SuggestedTarget>) -> InteractionError {
    let suggested_action = (!suggestions.is_empty()).then(|| {
        let names: Vec<String> = suggestions
            .iter()
            .take(SUGGESTED_ACTION_TARGETS)
            .map(|s| format_target(&s.target))
            .collect();
        format!("Try one of: {}", names.join(", "))
    });

    let mut error = InteractionError::new(
        InteractionErrorCode::ElementNotFound,
        format!("No element matches {}", format_target(target)),
    )
    .with_target(target.clone())
    .with_suggestions(suggestions);
    error.suggested_action = suggested_action;
    error
}

/// Element resolved but cannot receive the interaction
#[must_use]
pub fn element_not_hittable_error(
    target: &Target,
    reason: NotHittableReason,
    message: impl Into<String>,
) -> InteractionError {
    let shown = format_target(target);
    let action = match reason {
        NotHittableReason::NotFound => format!("Check that {shown} is on the current screen"),
        NotHittableReason::NotVisible => format!("Wait for {shown} to become visible"),
        NotHittableReason::NotEnabled => format!("Wait for {shown} to become enabled"),
        NotHittableReason::ZeroSize => format!("Wait for {shown} to finish layout"),
        NotHittableReason::Obscured => format!("Dismiss whatever covers {shown}"),
        NotHittableReason::OffScreen => format!("Scroll until {shown} is on screen"),
        NotHittableReason::NotHittable => format!("Wait for {shown} to settle, then retry"),
    };
    InteractionError::new(reason.into(), message)
        .with_target(target.clone())
        .with_suggested_action(action)
}

/// A required automation tool is missing
#[must_use]
pub fn tool_not_installed_error(tool: &str, install_command: Option<&str>) -> InteractionError {
    let action = match install_command {
        Some(cmd) => format!("Install {tool} with `{cmd}`"),
        None => format!("Install {tool} and make sure it is on PATH"),
    };
    InteractionError::new(InteractionErrorCode::ToolNotInstalled, format!("{tool} is not installed"))
        .with_suggested_action(action)
}

/// A flow exceeded its time limit; suggests twice the limit
#[must_use]
pub fn flow_timeout_error(flow: &str, timeout: Duration) -> InteractionError {
    let doubled = timeout.saturating_mul(2);
    InteractionError::new(
        InteractionErrorCode::FlowTimeout,
        format!("Flow '{flow}' did not finish within {}ms", timeout.as_millis()),
    )
    .with_suggested_action(format!("Raise the timeout to {}ms", doubled.as_millis()))
}

/// The app under test crashed
#[must_use]
pub fn app_crashed_error(app_id: &str, detail: Option<&str>) -> InteractionError {
    let message = match detail {
        Some(detail) => format!("{app_id} crashed: {detail}"),
        None => format!("{app_id} crashed"),
    };
    InteractionError::new(InteractionErrorCode::AppCrashed, message)
        .with_suggested_action(format!("Relaunch {app_id} and check the crash report"))
}

/// Translate a failed validation.
///
/// Calling this with a valid result is a caller bug and returns
/// [`ApuntarError::InvalidState`].
pub fn create_error_from_validation_result(
    result: &ValidationResult,
    target: &Target,
) -> ApuntarResult<InteractionError> {
    if result.valid {
        return Err(ApuntarError::invalid_state(
            "cannot create an interaction error from a valid result",
        ));
    }

    let message = result.message.clone().unwrap_or_default();
    let error = match (result.reason, &result.element) {
        (Some(NotHittableReason::NotFound), None) => {
            let mut error = element_not_found_error(target, result.suggestions.clone().unwrap_or_default());
            if !message.is_empty() {
                error.message = message;
            }
            error
        }
        (Some(reason), element) => {
            let mut error = element_not_hittable_error(target, reason, message);
            if let Some(hit) = &result.hittability {
                if let Some(action) = &hit.suggested_action {
                    error.suggested_action = Some(action.clone());
                }
                error.position = hit.position;
            }
            if error.position.is_none() {
                error.position = element.as_ref().map(|e| e.frame);
            }
            error
        }
        (None, _) => InteractionError::new(InteractionErrorCode::UnknownError, message).with_target(target.clone()),
    };
    Ok(error)
}

/// Translate a hittability verdict; `None` when the element is hittable
#[must_use]
pub fn create_error_from_hittability(result: &HittabilityResult, target: &Target) -> Option<InteractionError> {
    if result.hittable {
        return None;
    }
    let reason = result.reason.unwrap_or(NotHittableReason::NotHittable);
    let mut error = element_not_hittable_error(target, reason, result.message.clone());
    if let Some(action) = &result.suggested_action {
        error.suggested_action = Some(action.clone());
    }
    error.position = result.position;
    Some(error)
}

/// Translate an executor status; `None` for success
#[must_use]
pub fn create_error_from_action_status(
    status: ActionStatus,
    target: &Target,
    detail: Option<&str>,
) -> Option<InteractionError> {
    let code = status.error_code()?;
    let shown = format_target(target);
    let message = detail.map_or_else(
        || match status {
            ActionStatus::NotFound => format!("No element matches {shown}"),
            ActionStatus::NotHittable => format!("{shown} could not be tapped"),
            ActionStatus::NotEnabled => format!("{shown} is disabled"),
            ActionStatus::Timeout => format!("Interaction with {shown} timed out"),
            _ => format!("Interaction with {shown} failed"),
        },
        str::to_string,
    );
    Some(InteractionError::new(code, message).with_target(target.clone()))
}
