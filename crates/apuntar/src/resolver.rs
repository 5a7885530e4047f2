//! Target resolution against a tree snapshot.
//!
//! Resolution is exact: a target either names an element or it does not.
//! "Not found" is the normal signal to go and rank suggestions, so nothing in
//! here returns an error.

use tracing::{debug, trace};

use crate::element::ElementNode;
use crate::target::{Address, Predicate, Target};
use crate::tree;

/// Resolve a target to at most one element.
#[must_use]
pub fn resolve<'a>(target: &Target, root: &'a ElementNode) -> Option<&'a ElementNode> {
    let found = match &target.address {
        Address::Identifier(id) => {
            tree::find_first(root, |e| e.identifier.as_deref() == Some(id.as_str()))
        }
        Address::Label(label) => {
            tree::find_first(root, |e| e.label.as_deref() == Some(label.as_str()))
        }
        Address::Text(text) => tree::find_first(root, |e| matches_text(e, text)),
        Address::Predicate(expression) => match Predicate::parse(expression) {
            Ok(predicate) => tree::find_first(root, |e| predicate.matches(e)),
            Err(err) => {
                debug!(%expression, error = %err, "predicate rejected");
                None
            }
        },
        Address::Coordinates(point) => tree::smallest_at_point(root, point),
        Address::Type { name, index } => {
            let matches = tree::find_all(root, |e| e.element_type.eq_ignore_ascii_case(name));
            trace!(type_name = %name, count = matches.len(), "type candidates");
            matches.get(index.unwrap_or(0)).copied()
        }
    };

    debug!(
        selector = %target,
        found = found.is_some(),
        element = found.map(ElementNode::describe).as_deref(),
        "resolved target"
    );
    found
}

/// Text addressing checks value, then label, then title
fn matches_text(element: &ElementNode, text: &str) -> bool {
    [&element.value, &element.label, &element.title]
        .into_iter()
        .any(|field| field.as_deref() == Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Frame, Point};

    fn screen() -> ElementNode {
        ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0))
            .with_child(
                ElementNode::new("navigationBar", Frame::new(0.0, 0.0, 430.0, 100.0))
                    .with_identifier("nav")
                    .with_child(
                        ElementNode::new("button", Frame::new(10.0, 50.0, 60.0, 40.0))
                            .with_identifier("back-button")
                            .with_label("Back"),
                    ),
            )
            .with_child(
                ElementNode::new("textField", Frame::new(20.0, 200.0, 390.0, 44.0))
                    .with_identifier("email")
                    .with_value("user@example.com")
                    .with_label("Email"),
            )
            .with_child(
                ElementNode::new("Button", Frame::new(20.0, 300.0, 390.0, 44.0))
                    .with_identifier("login-button")
                    .with_label("Log In")
                    .with_hint("Signs you in"),
            )
            .with_child(
                ElementNode::new("staticText", Frame::new(20.0, 400.0, 390.0, 20.0))
                    .with_title("Email")
                    .with_label("Welcome"),
            )
    }

    fn id_of(found: Option<&ElementNode>) -> Option<&str> {
        found.and_then(|e| e.identifier.as_deref())
    }

    mod identifier_tests {
        use super::*;

        #[test]
        fn test_exact_identifier() {
            let tree = screen();
            assert_eq!(id_of(resolve(&Target::identifier("login-button"), &tree)), Some("login-button"));
        }

        #[test]
        fn test_identifier_is_not_fuzzy() {
            let tree = screen();
            assert!(resolve(&Target::identifier("login"), &tree).is_none());
            assert!(resolve(&Target::identifier("Login-Button"), &tree).is_none());
        }

        #[test]
        fn test_label_exact_case_sensitive() {
            let tree = screen();
            assert_eq!(id_of(resolve(&Target::label("Log In"), &tree)), Some("login-button"));
            assert!(resolve(&Target::label("log in"), &tree).is_none());
        }
    }

    mod text_tests {
        use super::*;

        #[test]
        fn test_text_matches_value() {
            let tree = screen();
            assert_eq!(id_of(resolve(&Target::text("user@example.com"), &tree)), Some("email"));
        }

        #[test]
        fn test_text_first_in_traversal_order() {
            // "Email" is the label of the text field and the title of the static text
            let tree = screen();
            assert_eq!(id_of(resolve(&Target::text("Email"), &tree)), Some("email"));
        }

        #[test]
        fn test_text_matches_title() {
            let tree = ElementNode::new("window", Frame::new(0.0, 0.0, 10.0, 10.0))
                .with_child(ElementNode::new("header", Frame::default()).with_title("Settings"));
            let found = resolve(&Target::text("Settings"), &tree).unwrap();
            assert_eq!(found.element_type, "header");
        }
    }

    mod predicate_tests {
        use super::*;

        #[test]
        fn test_predicate_contains() {
            let tree = screen();
            let target = Target::predicate("label CONTAINS \"log\"");
            assert_eq!(id_of(resolve(&target, &tree)), Some("login-button"));
        }

        #[test]
        fn test_predicate_equals_hint() {
            let tree = screen();
            let target = Target::predicate("hint == 'signs you in'");
            assert_eq!(id_of(resolve(&target, &tree)), Some("login-button"));
        }

        #[test]
        fn test_unsupported_predicate_resolves_nothing() {
            let tree = screen();
            assert!(resolve(&Target::predicate("label LIKE \"Log*\""), &tree).is_none());
        }
    }

    mod coordinate_tests {
        use super::*;

        #[test]
        fn test_coordinates_pick_smallest_area() {
            let tree = screen();
            let found = resolve(&Target::coordinates(20.0, 60.0), &tree);
            assert_eq!(id_of(found), Some("back-button"));
        }

        #[test]
        fn test_coordinates_boundary_inclusive() {
            let tree = screen();
            let found = resolve(&Target::coordinates(70.0, 90.0), &tree);
            assert_eq!(id_of(found), Some("back-button"));
        }

        #[test]
        fn test_coordinates_outside_everything() {
            let tree = screen();
            assert!(resolve(&Target::coordinates(-5.0, -5.0), &tree).is_none());
        }

        #[test]
        fn test_coordinates_root_when_nothing_else() {
            let tree = screen();
            let found = resolve(&Target::coordinates(5.0, 900.0), &tree).unwrap();
            assert_eq!(found.element_type, "window");
            assert!(found.frame.contains(&Point::new(5.0, 900.0)));
        }
    }

    mod type_tests {
        use super::*;

        #[test]
        fn test_type_case_insensitive_and_indexed() {
            let tree = screen();
            assert_eq!(id_of(resolve(&Target::of_type("BUTTON"), &tree)), Some("back-button"));
            assert_eq!(id_of(resolve(&Target::of_type_at("button", 1), &tree)), Some("login-button"));
        }

        #[test]
        fn test_type_index_out_of_range() {
            let tree = screen();
            assert!(resolve(&Target::of_type_at("button", 2), &tree).is_none());
            assert!(resolve(&Target::of_type("switch"), &tree).is_none());
        }
    }

    mod proptest_tests {
        use super::*;
        use crate::tree;
        use proptest::prelude::*;

        /// Node `i` hangs under node `parents[i - 1] % i`, so any vector is a valid tree
        fn tree_from(parents: &[usize]) -> ElementNode {
            let mut nodes: Vec<Option<ElementNode>> = (0..=parents.len())
                .map(|i| {
                    Some(ElementNode::new("view", Frame::new(0.0, 0.0, 10.0, 10.0)).with_identifier(format!("el-{i}")))
                })
                .collect();
            for i in (1..nodes.len()).rev() {
                let child = nodes[i].take().unwrap();
                let parent = parents[i - 1] % i;
                nodes[parent] = nodes[parent].take().map(|p| p.with_child(child));
            }
            nodes[0].take().unwrap()
        }

        proptest! {
            #[test]
            fn prop_every_identifier_resolves_to_its_element(
                parents in proptest::collection::vec(any::<usize>(), 0..40)
            ) {
                let tree = tree_from(&parents);
                let elements = tree::flatten(&tree);
                prop_assert_eq!(elements.len(), parents.len() + 1);
                for element in elements {
                    let id = element.identifier.clone().unwrap();
                    let found = resolve(&Target::identifier(id), &tree).unwrap();
                    prop_assert!(std::ptr::eq(found, element));
                }
            }
        }
    }
}
