//! Tree walking over accessibility snapshots.
//!
//! Every search in the engine goes through the same pre-order traversal, so
//! "first match" means the same thing to the resolver and the ranker.

use crate::element::{ElementNode, Point};

/// An element together with its depth below the root (root = 0)
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// The element
    pub element: &'a ElementNode,
    /// Depth in the tree
    pub depth: usize,
    /// Position in pre-order traversal
    pub order: usize,
}

/// Flatten the tree in pre-order (parent before children, children in order)
#[must_use]
pub fn flatten(root: &ElementNode) -> Vec<&ElementNode> {
    walk(root).into_iter().map(|visit| visit.element).collect()
}

/// Pre-order traversal recording depth and traversal position
#[must_use]
pub fn walk(root: &ElementNode) -> Vec<Visit<'_>> {
    let mut visits = Vec::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((element, depth)) = stack.pop() {
        visits.push(Visit {
            element,
            depth,
            order: visits.len(),
        });
        for child in element.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    visits
}

/// All elements matching a predicate, in traversal order
pub fn find_all<'a, F>(root: &'a ElementNode, mut predicate: F) -> Vec<&'a ElementNode>
where
    F: FnMut(&ElementNode) -> bool,
{
    flatten(root).into_iter().filter(|e| predicate(*e)).collect()
}

/// First element matching a predicate in traversal order
pub fn find_first<'a, F>(root: &'a ElementNode, mut predicate: F) -> Option<&'a ElementNode>
where
    F: FnMut(&ElementNode) -> bool,
{
    flatten(root).into_iter().find(|e| predicate(*e))
}

/// Every element whose frame contains `point`, edges included, in traversal order
#[must_use]
pub fn elements_at_point<'a>(root: &'a ElementNode, point: &Point) -> Vec<&'a ElementNode> {
    find_all(root, |e| e.frame.contains(point))
}

/// The most specific element under `point`: smallest frame area wins,
/// equal areas fall back to traversal order.
#[must_use]
pub fn smallest_at_point<'a>(root: &'a ElementNode, point: &Point) -> Option<&'a ElementNode> {
    let mut hits = elements_at_point(root, point);
    // sort_by is stable, so equal areas keep traversal order
    hits.sort_by(|a, b| a.frame.area().total_cmp(&b.frame.area()));
    hits.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Frame;

    fn node(kind: &str, id: &str, frame: Frame) -> ElementNode {
        ElementNode::new(kind, frame).with_identifier(id)
    }

    fn sample() -> ElementNode {
        node("window", "root", Frame::new(0.0, 0.0, 400.0, 800.0))
            .with_child(
                node("view", "header", Frame::new(0.0, 0.0, 400.0, 100.0))
                    .with_child(node("button", "back", Frame::new(0.0, 0.0, 50.0, 50.0))),
            )
            .with_child(node("button", "ok", Frame::new(100.0, 200.0, 100.0, 44.0)))
    }

    fn ids(elements: &[&ElementNode]) -> Vec<String> {
        elements
            .iter()
            .map(|e| e.identifier.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_flatten_is_pre_order() {
        let tree = sample();
        assert_eq!(ids(&flatten(&tree)), ["root", "header", "back", "ok"]);
    }

    #[test]
    fn test_walk_records_depth_and_order() {
        let tree = sample();
        let visits = walk(&tree);
        let depths: Vec<usize> = visits.iter().map(|v| v.depth).collect();
        let orders: Vec<usize> = visits.iter().map(|v| v.order).collect();
        assert_eq!(depths, [0, 1, 2, 1]);
        assert_eq!(orders, [0, 1, 2, 3]);
    }

    #[test]
    fn test_elements_at_point_nested() {
        let tree = sample();
        let hits = elements_at_point(&tree, &Point::new(10.0, 10.0));
        assert_eq!(ids(&hits), ["root", "header", "back"]);
    }

    #[test]
    fn test_smallest_at_point_prefers_specific() {
        let tree = sample();
        let hit = smallest_at_point(&tree, &Point::new(10.0, 10.0)).unwrap();
        assert_eq!(hit.identifier.as_deref(), Some("back"));
        assert!(smallest_at_point(&tree, &Point::new(1000.0, 1000.0)).is_none());
    }

    #[test]
    fn test_smallest_at_point_ties_use_traversal_order() {
        let tree = node("window", "root", Frame::new(0.0, 0.0, 400.0, 800.0))
            .with_child(node("view", "first", Frame::new(0.0, 0.0, 50.0, 50.0)))
            .with_child(node("view", "second", Frame::new(0.0, 0.0, 50.0, 50.0)));
        let hit = smallest_at_point(&tree, &Point::new(25.0, 25.0)).unwrap();
        assert_eq!(hit.identifier.as_deref(), Some("first"));
    }
}
