//! Snap sections and the position-to-index mapping.

use crate::tree::PageTree;

/// One snap target.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Element id, used for navigation links.
    pub id: String,
    /// Offset of the section's top edge from the document top.
    pub top: f32,
    /// Section height.
    pub height: f32,
}

impl Section {
    /// Creates a section.
    #[must_use]
    pub fn new(id: impl Into<String>, top: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Returns true if `y` falls inside this section (bottom exclusive).
    #[must_use]
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Ordered list of sections, fixed once discovered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    /// Wraps an already ordered list.
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Collects every element carrying `marker`, in document order.
    ///
    /// Elements without an id get their position as id.
    #[must_use]
    pub fn discover(tree: &PageTree, marker: &str) -> Self {
        let sections = tree
            .nodes()
            .filter(|&node| tree.has_class(node, marker))
            .filter_map(|node| {
                let (top, height) = tree.layout(node)?;
                let id = tree
                    .id(node)
                    .map_or_else(|| format!("section-{}", node.index()), str::to_owned);
                Some(Section::new(id, top, height))
            })
            .collect::<Vec<_>>();

        tracing::debug!("Discovered {} sections marked {:?}", sections.len(), marker);
        Self { sections }
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Index of the section with `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Index of the section containing the viewport's vertical midpoint,
    /// or `None` if the midpoint falls between or outside sections.
    #[must_use]
    pub fn index_at(&self, scroll_y: f32, viewport_height: f32) -> Option<usize> {
        let midpoint = scroll_y + viewport_height / 2.0;
        self.sections.iter().rposition(|s| s.contains(midpoint))
    }

    /// Iterates the sections in order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked(count: usize, height: f32) -> SectionMap {
        #[allow(clippy::cast_precision_loss)]
        let sections = (0..count)
            .map(|i| Section::new(format!("s{i}"), i as f32 * height, height))
            .collect();
        SectionMap::new(sections)
    }

    #[test]
    fn test_index_from_midpoint() {
        let map = stacked(5, 800.0);

        assert_eq!(map.index_at(0.0, 800.0), Some(0));
        // Midpoint 799 + 400 = 1199 lies in the second section.
        assert_eq!(map.index_at(799.0, 800.0), Some(1));
        assert_eq!(map.index_at(1_200.0, 800.0), Some(2));
        assert_eq!(map.index_at(10_000.0, 800.0), None);
    }

    #[test]
    fn test_discover_in_document_order() {
        let mut tree = PageTree::new();
        let body = tree.add_root();
        tree.add_block(body, "home", &["snap-section"], 0.0, 900.0);
        tree.add_block(body, "banner", &["promo"], 900.0, 100.0);
        tree.add_block(body, "projects", &["snap-section", "dark"], 1_000.0, 900.0);

        let map = SectionMap::discover(&tree, "snap-section");
        assert_eq!(map.len(), 2);
        assert_eq!(map.index_of("projects"), Some(1));
        assert_eq!(map.index_of("banner"), None);
        assert_eq!(map.get(1).map(|s| s.top), Some(1_000.0));
    }
}
