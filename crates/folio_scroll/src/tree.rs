//! # Page Tree
//!
//! The slice of the document the controller needs: who is whose parent,
//! which elements scroll on their own and how far, which element has focus,
//! and where the marked sections sit.
//!
//! [`ScrollTree`] is the read-only view the controller queries. [`PageTree`]
//! is an arena implementation the host fills in (or tests build by hand).

use serde::{Deserialize, Serialize};

/// Handle to a node in a [`ScrollTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index into the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Computed `overflow-y` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Content spills; the element never scrolls.
    #[default]
    Visible,
    /// Content is clipped; the element never scrolls by user input.
    Hidden,
    /// Scrolls when content overflows.
    Auto,
    /// Always scrollable.
    Scroll,
}

impl Overflow {
    /// Parses a computed `overflow-y` value. Unknown values count as
    /// `visible`.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "auto" | "overlay" => Self::Auto,
            "scroll" => Self::Scroll,
            "hidden" | "clip" => Self::Hidden,
            _ => Self::Visible,
        }
    }

    /// Returns true for `auto` and `scroll`.
    #[must_use]
    pub const fn allows_scrolling(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll)
    }
}

/// Scroll geometry of one element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// `overflow-y`.
    pub overflow: Overflow,
    /// Current scroll offset.
    pub scroll_top: f32,
    /// Total content height.
    pub scroll_height: f32,
    /// Visible height.
    pub client_height: f32,
}

impl ScrollMetrics {
    /// Returns true if this element scrolls independently: overflow allows it
    /// and the content is taller than the visible area.
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.overflow.allows_scrolling() && self.scroll_height > self.client_height
    }
}

/// Read-only view of the document for nested-scroll checks.
pub trait ScrollTree {
    /// Parent of `node`, or `None` at the root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Scroll geometry of `node`.
    fn metrics(&self, node: NodeId) -> ScrollMetrics;

    /// The element holding keyboard focus, if any.
    fn focused(&self) -> Option<NodeId>;
}

/// One element in a [`PageTree`].
#[derive(Debug, Clone, Default)]
struct Element {
    parent: Option<NodeId>,
    id: Option<String>,
    classes: Vec<String>,
    /// Offset from the document top.
    top: f32,
    height: f32,
    metrics: ScrollMetrics,
}

/// Arena-backed document model.
///
/// Nodes are kept in insertion order, which is document order for
/// section discovery.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
    elements: Vec<Element>,
    focused: Option<NodeId>,
}

impl PageTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root element (the document body).
    pub fn add_root(&mut self) -> NodeId {
        self.push(Element::default())
    }

    /// Adds a child element under `parent`.
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        self.push(Element {
            parent: Some(parent),
            ..Element::default()
        })
    }

    /// Adds a section-like element with an id, classes and layout box.
    pub fn add_block(&mut self, parent: NodeId, id: &str, classes: &[&str], top: f32, height: f32) -> NodeId {
        self.push(Element {
            parent: Some(parent),
            id: Some(id.to_owned()),
            classes: classes.iter().map(|&c| c.to_owned()).collect(),
            top,
            height,
            metrics: ScrollMetrics::default(),
        })
    }

    fn push(&mut self, element: Element) -> NodeId {
        #[allow(clippy::cast_possible_truncation)]
        let id = NodeId(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    /// Sets an element's scroll geometry.
    pub fn set_metrics(&mut self, node: NodeId, metrics: ScrollMetrics) {
        if let Some(element) = self.elements.get_mut(node.index()) {
            element.metrics = metrics;
        }
    }

    /// Moves an element's scroll offset, clamped to its scroll range.
    pub fn set_scroll_top(&mut self, node: NodeId, scroll_top: f32) {
        if let Some(element) = self.elements.get_mut(node.index()) {
            let max = (element.metrics.scroll_height - element.metrics.client_height).max(0.0);
            element.metrics.scroll_top = scroll_top.clamp(0.0, max);
        }
    }

    /// Gives `node` keyboard focus, or clears focus.
    pub fn focus(&mut self, node: Option<NodeId>) {
        self.focused = node;
    }

    /// Element id, if set.
    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.elements.get(node.index()).and_then(|e| e.id.as_deref())
    }

    /// Returns true if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements
            .get(node.index())
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Layout box as (top, height).
    #[must_use]
    pub fn layout(&self, node: NodeId) -> Option<(f32, f32)> {
        self.elements.get(node.index()).map(|e| (e.top, e.height))
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        #[allow(clippy::cast_possible_truncation)]
        let to_id = |i: usize| NodeId(i as u32);
        (0..self.elements.len()).map(to_id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ScrollTree for PageTree {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements.get(node.index()).and_then(|e| e.parent)
    }

    fn metrics(&self, node: NodeId) -> ScrollMetrics {
        self.elements
            .get(node.index())
            .map(|e| e.metrics)
            .unwrap_or_default()
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrollable_needs_overflow_and_content() {
        let tall = ScrollMetrics {
            overflow: Overflow::Auto,
            scroll_top: 0.0,
            scroll_height: 900.0,
            client_height: 400.0,
        };
        assert!(tall.is_scrollable());
        assert!(!ScrollMetrics { overflow: Overflow::Hidden, ..tall }.is_scrollable());
        assert!(!ScrollMetrics { scroll_height: 400.0, ..tall }.is_scrollable());
    }

    #[test]
    fn test_overflow_from_computed_style() {
        assert_eq!(Overflow::from_css("auto"), Overflow::Auto);
        assert_eq!(Overflow::from_css(" scroll"), Overflow::Scroll);
        assert_eq!(Overflow::from_css("clip"), Overflow::Hidden);
        assert_eq!(Overflow::from_css(""), Overflow::Visible);
        assert!(Overflow::from_css("overlay").allows_scrolling());
    }

    #[test]
    fn test_scroll_top_is_clamped() {
        let mut tree = PageTree::new();
        let root = tree.add_root();
        let modal = tree.add_child(root);
        tree.set_metrics(
            modal,
            ScrollMetrics {
                overflow: Overflow::Scroll,
                scroll_top: 0.0,
                scroll_height: 1_000.0,
                client_height: 600.0,
            },
        );

        tree.set_scroll_top(modal, 5_000.0);
        assert_eq!(tree.metrics(modal).scroll_top, 400.0);
        tree.set_scroll_top(modal, -3.0);
        assert_eq!(tree.metrics(modal).scroll_top, 0.0);
        assert_eq!(tree.parent(modal), Some(root));
        assert_eq!(tree.parent(root), None);
    }
}
