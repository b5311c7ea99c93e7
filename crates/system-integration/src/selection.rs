//! Tags the operator is currently monitoring

use shared_types::Tag;

/// Result of toggling one tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
}

/// Selected tags in the order they were picked.
///
/// Kept as a `Vec` rather than a set so polling and chart order follow the
/// operator's clicks. Selections are small; linear lookups are fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    tags: Vec<Tag>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Add `tag`; false if it was already selected
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.is_selected(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove `tag`; false if it was not selected
    pub fn remove(&mut self, tag: &Tag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn toggle(&mut self, tag: &Tag) -> Toggle {
        if self.remove(tag) {
            Toggle::Deselected
        } else {
            self.tags.push(tag.clone());
            Toggle::Selected
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Counter text, e.g. `1 tag selected` or `3 tags selected`
    pub fn summary(&self) -> String {
        let count = self.tags.len();
        let plural = if count == 1 { "" } else { "s" };
        format!("{count} tag{plural} selected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut selection = SelectionState::new();
        let tag = Tag::from("temp1");

        assert_eq!(selection.toggle(&tag), Toggle::Selected);
        assert!(selection.is_selected(&tag));
        assert_eq!(selection.toggle(&tag), Toggle::Deselected);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_keeps_selection_order() {
        let mut selection = SelectionState::new();
        for name in ["c", "a", "b"] {
            selection.insert(Tag::from(name));
        }
        assert!(!selection.insert(Tag::from("a")));
        selection.remove(&Tag::from("a"));
        assert_eq!(selection.tags(), &[Tag::from("c"), Tag::from("b")]);
    }

    #[test]
    fn test_summary_pluralizes() {
        let mut selection = SelectionState::new();
        assert_eq!(selection.summary(), "0 tags selected");
        selection.insert(Tag::from("a"));
        assert_eq!(selection.summary(), "1 tag selected");
        selection.insert(Tag::from("b"));
        assert_eq!(selection.summary(), "2 tags selected");
    }
}
