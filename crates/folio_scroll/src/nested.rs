//! Nested scroll regions.
//!
//! A wheel or arrow key over a modal body should scroll the modal, not page
//! the document. Only when the modal is already pinned against its edge in
//! the requested direction does the input belong to the page.

use folio_ui::ScrollDirection;

use crate::tree::{NodeId, ScrollMetrics, ScrollTree};

/// Walks up from `origin` (inclusive) to the nearest element that scrolls
/// independently.
#[must_use]
pub fn nearest_scrollable<T: ScrollTree + ?Sized>(tree: &T, origin: NodeId) -> Option<NodeId> {
    let mut node = Some(origin);
    while let Some(current) = node {
        if tree.metrics(current).is_scrollable() {
            return Some(current);
        }
        node = tree.parent(current);
    }
    None
}

/// Returns true if `metrics` still has room to scroll in `direction`.
///
/// Within `tolerance` pixels of an edge counts as at the edge.
#[must_use]
pub fn can_scroll(metrics: &ScrollMetrics, direction: ScrollDirection, tolerance: f32) -> bool {
    match direction {
        ScrollDirection::Up => metrics.scroll_top > tolerance,
        ScrollDirection::Down => {
            metrics.scroll_top + metrics.client_height < metrics.scroll_height - tolerance
        }
    }
}

/// Returns true if input starting at `origin` should be left to a nested
/// scroll region.
#[must_use]
pub fn nested_consumes<T: ScrollTree + ?Sized>(
    tree: &T,
    origin: Option<NodeId>,
    direction: ScrollDirection,
    tolerance: f32,
) -> bool {
    origin
        .and_then(|node| nearest_scrollable(tree, node))
        .is_some_and(|region| can_scroll(&tree.metrics(region), direction, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Overflow, PageTree};

    fn modal_tree(scroll_top: f32) -> (PageTree, NodeId, NodeId) {
        let mut tree = PageTree::new();
        let body = tree.add_root();
        let modal = tree.add_child(body);
        let paragraph = tree.add_child(modal);
        tree.set_metrics(
            modal,
            ScrollMetrics {
                overflow: Overflow::Auto,
                scroll_top,
                scroll_height: 2_000.0,
                client_height: 600.0,
            },
        );
        (tree, modal, paragraph)
    }

    #[test]
    fn test_finds_nearest_scrollable_ancestor() {
        let (tree, modal, paragraph) = modal_tree(0.0);
        assert_eq!(nearest_scrollable(&tree, paragraph), Some(modal));
        assert_eq!(nearest_scrollable(&tree, modal), Some(modal));
    }

    #[test]
    fn test_boundaries_with_tolerance() {
        let (tree, _, paragraph) = modal_tree(0.5);
        let origin = Some(paragraph);
        // Half a pixel from the top is the top.
        assert!(!nested_consumes(&tree, origin, ScrollDirection::Up, 1.0));
        assert!(nested_consumes(&tree, origin, ScrollDirection::Down, 1.0));

        let (tree, _, paragraph) = modal_tree(1_399.5);
        let origin = Some(paragraph);
        assert!(nested_consumes(&tree, origin, ScrollDirection::Up, 1.0));
        assert!(!nested_consumes(&tree, origin, ScrollDirection::Down, 1.0));
    }

    #[test]
    fn test_no_region_or_no_origin() {
        let mut tree = PageTree::new();
        let body = tree.add_root();
        let text = tree.add_child(body);

        assert!(!nested_consumes(&tree, Some(text), ScrollDirection::Down, 1.0));
        assert!(!nested_consumes(&tree, None, ScrollDirection::Down, 1.0));
    }
}
