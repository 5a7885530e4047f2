//! Apuntar: target resolution and hittability validation for mobile UI automation
//!
//! Apuntar (Spanish: "to aim / to point at") decides whether a symbolic
//! target like `#login-button` or `"Log In"` names an element in an
//! accessibility-tree snapshot, whether that element can actually receive
//! the interaction, and what to do about it when it cannot.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      APUNTAR Pipeline                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Target + Tree ──► Resolver ──► found ──► Hittability ──► verdict │
//! │                        │                                    │    │
//! │                        └─► not found ──► Suggestions ───────┤    │
//! │                                                             ▼    │
//! │                                      InteractionError ──► report │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and pure: each call reads its own tree snapshot
//! and returns a fresh value.
//!
//! # Example
//!
//! ```
//! use apuntar::prelude::*;
//!
//! let tree = ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0)).with_child(
//!     ElementNode::new("button", Frame::new(20.0, 300.0, 390.0, 44.0)).with_identifier("login-button"),
//! );
//!
//! let target: Target = "#login".parse().unwrap();
//! let result = validate_for_action(&target, &tree, &ActionType::Tap);
//! assert!(!result.valid);
//!
//! let error = create_error_from_validation_result(&result, &target).unwrap();
//! assert_eq!(
//!     format_compact(&error),
//!     "Element not found: No element matches #login (Did you mean: #login-button?)"
//! );
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod config;
mod element;
mod hittability;
mod interaction_error;
mod report;
mod resolver;
mod result;
mod similarity;
mod suggestions;
#[allow(clippy::missing_errors_doc)]
mod target;
mod tree;
mod validation;

pub use config::{EngineConfig, Viewport, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
pub use element::{element_center, ElementNode, Frame, Point, INPUT_TYPES, OVERLAY_TYPE_MARKERS};
pub use hittability::{
    check_hittable, find_obscuring_element, HittabilityChecker, HittabilityResult,
    NotHittableReason, OVERLAY_Z_BOOST,
};
pub use interaction_error::{
    app_crashed_error, create_error_from_action_status, create_error_from_hittability,
    create_error_from_validation_result, element_not_found_error, element_not_hittable_error,
    flow_timeout_error, tool_not_installed_error, ActionStatus, InteractionError,
    InteractionErrorCode,
};
pub use report::{format_compact, format_json, format_markdown, ReportFormat};
pub use resolver::resolve;
pub use result::{ApuntarError, ApuntarResult};
pub use similarity::{calculate_string_similarity, containment_score, levenshtein};
pub use suggestions::{
    create_target_for_element, suggest_targets, SuggestedTarget, SuggestionOptions,
    DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_SIMILARITY, TYPE_MATCH_BONUS,
};
pub use target::{
    format_target, parse_coordinates, Address, Predicate, PredicateField, PredicateOp, Target,
    TargetType, WireTarget,
};
pub use tree::{elements_at_point, find_all, find_first, flatten, smallest_at_point, walk, Visit};
pub use validation::{
    validate_for_action, validate_target, ActionType, ValidationOptions, ValidationResult,
    Validator,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        check_hittable, create_error_from_validation_result, format_compact, format_json,
        format_markdown, format_target, resolve, suggest_targets, validate_for_action,
        validate_target, ActionType, ApuntarError, ApuntarResult, ElementNode, EngineConfig,
        Frame, HittabilityResult, InteractionError, InteractionErrorCode, NotHittableReason,
        Point, ReportFormat, SuggestedTarget, SuggestionOptions, Target, ValidationOptions,
        ValidationResult, Validator, Viewport,
    };
}
