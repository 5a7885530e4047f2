//! Suggestion ranking for targets that failed to resolve.
//!
//! Every interactable element is scored against the search term with several
//! strategies; the best strategy wins. Survivors are rebuilt into targets the
//! caller can retry with.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::ElementNode;
use crate::similarity::{calculate_string_similarity, containment_score};
use crate::target::{Address, Predicate, Target};
use crate::tree;

/// Default number of suggestions returned
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Default similarity floor (0-100)
pub const DEFAULT_MIN_SIMILARITY: u8 = 30;

/// Bonus applied when the element type matches the target's type hint
pub const TYPE_MATCH_BONUS: u8 = 15;

/// Limits for suggestion ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestionOptions {
    /// Maximum number of suggestions to return
    pub max_suggestions: usize,
    /// Candidates scoring below this are dropped
    pub min_similarity: u8,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

impl SuggestionOptions {
    /// Set the maximum number of suggestions
    #[must_use]
    pub const fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Set the similarity floor
    #[must_use]
    pub const fn with_min_similarity(mut self, min: u8) -> Self {
        self.min_similarity = min;
        self
    }
}

/// A ranked alternative target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTarget {
    /// Target that resolves to `element`
    pub target: Target,
    /// The candidate element
    pub element: ElementNode,
    /// Similarity to the original search (0-100)
    pub similarity: u8,
    /// Which strategy produced the match
    pub reason: String,
}

/// Best strategy result for one candidate
#[derive(Debug, Clone)]
struct Scored<'a> {
    element: &'a ElementNode,
    similarity: u8,
    reason: String,
}

/// Rank alternative elements for a target that did not resolve.
///
/// Candidates are enabled, visible, and hittable (or text inputs). The result
/// is sorted by similarity descending; equal scores keep tree traversal order.
#[must_use]
pub fn suggest_targets(target: &Target, root: &ElementNode, options: &SuggestionOptions) -> Vec<SuggestedTarget> {
    let Some(term) = search_term(target) else {
        debug!(selector = %target, "no searchable text, skipping suggestions");
        return Vec::new();
    };
    let term = term.to_lowercase();
    let type_hint = type_hint(target);

    let mut scored: Vec<Scored<'_>> = tree::flatten(root)
        .into_iter()
        .filter(|e| is_candidate(e))
        .map(|element| score_element(element, &term, type_hint))
        .filter(|s| s.similarity >= options.min_similarity)
        .collect();

    // Stable: equal similarity keeps traversal order
    scored.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    scored.truncate(options.max_suggestions);

    let suggestions: Vec<SuggestedTarget> = scored
        .into_iter()
        .filter_map(|s| {
            let target = create_target_for_element(s.element)?;
            Some(SuggestedTarget {
                target,
                element: s.element.clone(),
                similarity: s.similarity,
                reason: s.reason,
            })
        })
        .collect();

    debug!(selector = %target, count = suggestions.len(), "ranked suggestions");
    suggestions
}

/// Elements worth suggesting: enabled, visible, and tappable or a text input
fn is_candidate(element: &ElementNode) -> bool {
    element.is_enabled && element.is_visible && (element.is_hittable || element.is_input_type())
}

/// The text a failed target was looking for
fn search_term(target: &Target) -> Option<String> {
    let term = match &target.address {
        Address::Identifier(v) | Address::Label(v) | Address::Text(v) | Address::Type { name: v, .. } => {
            v.clone()
        }
        Address::Predicate(expr) => Predicate::parse(expr)
            .map(|p| p.value)
            .unwrap_or_else(|_| expr.clone()),
        Address::Coordinates(_) => return None,
    };
    (!term.is_empty()).then_some(term)
}

/// Explicit hint, or the type name itself for type addressing
fn type_hint(target: &Target) -> Option<&str> {
    target.element_type.as_deref().or(match &target.address {
        Address::Type { name, .. } => Some(name.as_str()),
        _ => None,
    })
}

fn score_element<'a>(element: &'a ElementNode, term: &str, type_hint: Option<&str>) -> Scored<'a> {
    let fields = [
        ("identifier", element.identifier.as_deref()),
        ("label", element.label.as_deref()),
        ("value", element.value.as_deref()),
        ("title", element.title.as_deref()),
    ];

    let mut best: Option<(u8, String)> = None;
    let mut consider = |score: u8, reason: String| {
        if best.as_ref().map_or(true, |(current, _)| score > *current) {
            best = Some((score, reason));
        }
    };

    for (name, field) in fields {
        if let Some(field) = field.filter(|f| !f.is_empty()) {
            let score = calculate_string_similarity(term, &field.to_lowercase());
            consider(score, format!("Similar {name}: \"{field}\""));
        }
    }
    for (name, field) in fields {
        if let Some(field) = field.filter(|f| !f.is_empty()) {
            if let Some(score) = containment_score(term, &field.to_lowercase()) {
                consider(score, format!("{name} contains \"{term}\""));
            }
        }
    }

    let (mut similarity, mut reason) = best.unwrap_or_else(|| (0, "No matching field".to_string()));

    if type_hint.is_some_and(|hint| hint == element.element_type) {
        if similarity < TYPE_MATCH_BONUS {
            reason = format!("Matching element type: {}", element.element_type);
        }
        similarity = similarity.saturating_add(TYPE_MATCH_BONUS).min(100);
    }

    Scored {
        element,
        similarity,
        reason,
    }
}

type TargetStrategy = fn(&ElementNode) -> Option<Target>;

/// Ordered strategies for rebuilding a target from an element; first hit wins
const TARGET_STRATEGIES: &[TargetStrategy] = &[
    by_identifier,
    by_label,
    by_title_text,
    by_value_text,
    by_center_point,
];

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn by_identifier(element: &ElementNode) -> Option<Target> {
    non_empty(element.identifier.as_ref()).map(Target::identifier)
}

fn by_label(element: &ElementNode) -> Option<Target> {
    non_empty(element.label.as_ref()).map(Target::label)
}

fn by_title_text(element: &ElementNode) -> Option<Target> {
    non_empty(element.title.as_ref()).map(Target::text)
}

fn by_value_text(element: &ElementNode) -> Option<Target> {
    non_empty(element.value.as_ref()).map(Target::text)
}

fn by_center_point(element: &ElementNode) -> Option<Target> {
    element
        .center_point()
        .map(|center| Target::coordinates(center.x, center.y))
}

/// Build the most stable target that addresses `element`.
///
/// Preference: identifier, label, title as text, value as text, then the
/// rounded center point. Returns `None` for an anonymous zero-size element.
#[must_use]
pub fn create_target_for_element(element: &ElementNode) -> Option<Target> {
    TARGET_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Frame;

    fn button(id: &str, label: &str, y: f64) -> ElementNode {
        ElementNode::new("button", Frame::new(20.0, y, 200.0, 44.0))
            .with_identifier(id)
            .with_label(label)
    }

    fn screen() -> ElementNode {
        ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0)).with_children([
            button("login-button", "Sign In", 100.0),
            button("signup-button", "Create Account", 200.0),
            button("forgot-password", "Forgot password?", 300.0),
            ElementNode::new("textField", Frame::new(20.0, 400.0, 390.0, 44.0))
                .with_identifier("username-field")
                .with_hittable(false),
            button("logout-hidden", "Log out", 500.0).with_visible(false),
            button("login-disabled", "Log in", 600.0).with_enabled(false),
        ])
    }

    mod ranking_tests {
        use super::*;

        #[test]
        fn test_login_suggests_login_button_first() {
            let tree = screen();
            let suggestions = suggest_targets(&Target::identifier("login"), &tree, &SuggestionOptions::default());
            assert!(!suggestions.is_empty());
            let first = &suggestions[0];
            assert_eq!(first.element.identifier.as_deref(), Some("login-button"));
            assert!(first.similarity >= 50);
            assert_eq!(first.target, Target::identifier("login-button"));
            assert!(first.reason.contains("contains"));
        }

        #[test]
        fn test_skips_hidden_and_disabled() {
            let tree = screen();
            let suggestions = suggest_targets(&Target::label("Log"), &tree, &SuggestionOptions::default());
            for s in &suggestions {
                assert!(s.element.is_visible && s.element.is_enabled);
            }
        }

        #[test]
        fn test_input_fields_are_candidates() {
            let tree = screen();
            let suggestions = suggest_targets(&Target::identifier("username"), &tree, &SuggestionOptions::default());
            assert_eq!(suggestions[0].element.identifier.as_deref(), Some("username-field"));
        }

        #[test]
        fn test_sorted_and_truncated() {
            let tree = screen();
            let options = SuggestionOptions::default().with_max_suggestions(2).with_min_similarity(0);
            let suggestions = suggest_targets(&Target::identifier("button"), &tree, &options);
            assert!(suggestions.len() <= 2);
            assert!(suggestions.windows(2).all(|w| w[0].similarity >= w[1].similarity));
        }

        #[test]
        fn test_ties_keep_traversal_order() {
            let tree = ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0)).with_children([
                button("save-a", "A", 100.0),
                button("save-b", "B", 200.0),
            ]);
            let suggestions = suggest_targets(&Target::identifier("save"), &tree, &SuggestionOptions::default());
            let ids: Vec<_> = suggestions.iter().filter_map(|s| s.element.identifier.as_deref()).collect();
            assert_eq!(ids, ["save-a", "save-b"]);
            assert_eq!(suggestions[0].similarity, suggestions[1].similarity);
        }

        #[test]
        fn test_min_similarity_floor() {
            let tree = screen();
            let options = SuggestionOptions::default().with_min_similarity(100);
            assert!(suggest_targets(&Target::identifier("zzz"), &tree, &options).is_empty());
        }

        #[test]
        fn test_zero_floor_keeps_unrelated_candidates() {
            let tree = ElementNode::new("window", Frame::new(0.0, 0.0, 0.0, 0.0))
                .with_child(button("zzz", "Zzz", 100.0));
            let options = SuggestionOptions::default().with_min_similarity(0);
            let suggestions = suggest_targets(&Target::identifier("abc"), &tree, &options);
            assert_eq!(suggestions.len(), 1);
            assert_eq!(suggestions[0].similarity, 0);
            assert!(suggestions[0].reason.starts_with("Similar identifier"));
        }

        #[test]
        fn test_coordinates_have_no_suggestions() {
            let tree = screen();
            assert!(suggest_targets(&Target::coordinates(1.0, 1.0), &tree, &SuggestionOptions::default()).is_empty());
        }

        #[test]
        fn test_predicate_uses_quoted_value() {
            let tree = screen();
            let target = Target::predicate("label CONTAINS \"forgot\"");
            let suggestions = suggest_targets(&target, &tree, &SuggestionOptions::default());
            assert_eq!(suggestions[0].element.identifier.as_deref(), Some("forgot-password"));
        }
    }

    mod type_bonus_tests {
        use super::*;

        #[test]
        fn test_type_hint_adds_bonus() {
            let tree = ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0)).with_children([
                ElementNode::new("staticText", Frame::new(0.0, 0.0, 100.0, 20.0)).with_identifier("submit-label"),
                ElementNode::new("button", Frame::new(0.0, 50.0, 100.0, 44.0)).with_identifier("submit-label"),
            ]);
            let target = Target::identifier("submit").with_element_type("button");
            let suggestions = suggest_targets(&target, &tree, &SuggestionOptions::default());
            assert_eq!(suggestions[0].element.element_type, "button");
            assert_eq!(suggestions[0].similarity, suggestions[1].similarity + TYPE_MATCH_BONUS);
        }

        #[test]
        fn test_type_only_match_sets_reason() {
            let tree = ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0))
                .with_child(ElementNode::new("switch", Frame::new(0.0, 0.0, 50.0, 30.0)).with_identifier("qq"));
            let target = Target::identifier("zz").with_element_type("switch");
            let options = SuggestionOptions::default().with_min_similarity(10);
            let suggestions = suggest_targets(&target, &tree, &options);
            assert_eq!(suggestions.len(), 1);
            assert_eq!(suggestions[0].similarity, TYPE_MATCH_BONUS);
            assert!(suggestions[0].reason.contains("element type"));
        }

        #[test]
        fn test_bonus_capped_at_100() {
            let tree = ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0))
                .with_child(ElementNode::new("button", Frame::new(0.0, 0.0, 50.0, 30.0)).with_label("Go"));
            let target = Target::label("go").with_element_type("button");
            let suggestions = suggest_targets(&target, &tree, &SuggestionOptions::default());
            assert_eq!(suggestions[0].similarity, 100);
        }
    }

    mod target_creation_tests {
        use super::*;

        #[test]
        fn test_strategy_priority() {
            let full = ElementNode::new("button", Frame::new(0.0, 0.0, 10.0, 10.0))
                .with_identifier("id")
                .with_label("Label")
                .with_title("Title")
                .with_value("Value");
            assert_eq!(create_target_for_element(&full), Some(Target::identifier("id")));

            let mut el = full.clone();
            el.identifier = None;
            assert_eq!(create_target_for_element(&el), Some(Target::label("Label")));
            el.label = Some(String::new());
            assert_eq!(create_target_for_element(&el), Some(Target::text("Title")));
            el.title = None;
            assert_eq!(create_target_for_element(&el), Some(Target::text("Value")));
            el.value = None;
            assert_eq!(create_target_for_element(&el), Some(Target::coordinates(5.0, 5.0)));
        }

        #[test]
        fn test_anonymous_zero_size_has_no_target() {
            let el = ElementNode::new("button", Frame::new(10.0, 10.0, 0.0, 10.0));
            assert_eq!(create_target_for_element(&el), None);
        }

        #[test]
        fn test_untargetable_candidate_dropped() {
            let tree = ElementNode::new("window", Frame::new(0.0, 0.0, 0.0, 0.0))
                .with_child(ElementNode::new("button", Frame::new(0.0, 0.0, 0.0, 0.0)));
            let target = Target::of_type("button");
            let suggestions = suggest_targets(&target, &tree, &SuggestionOptions::default().with_min_similarity(1));
            assert!(suggestions.is_empty());
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn tree_from(ids: &[String]) -> ElementNode {
            ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0)).with_children(
                ids.iter()
                    .enumerate()
                    .map(|(i, id)| button(id, id, i as f64 * 10.0)),
            )
        }

        proptest! {
            #[test]
            fn prop_sorted_non_increasing(
                ids in proptest::collection::vec("[a-z]{1,10}", 0..30),
                term in "[a-z]{1,6}"
            ) {
                let tree = tree_from(&ids);
                let options = SuggestionOptions::default().with_max_suggestions(30).with_min_similarity(0);
                let suggestions = suggest_targets(&Target::identifier(term), &tree, &options);
                prop_assert!(suggestions.windows(2).all(|w| w[0].similarity >= w[1].similarity));
                prop_assert!(suggestions.iter().all(|s| s.similarity <= 100));
            }
        }
    }
}
