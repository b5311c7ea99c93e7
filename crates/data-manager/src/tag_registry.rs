//! Known tags and their display colours

use shared_types::{Color, Tag, PALETTE};
use std::collections::HashMap;

/// Tag list from the last successful `/tags` fetch plus the session's colour
/// assignments.
///
/// Colours are handed out in first-seen order, cycling through the palette,
/// and are never reassigned: a tag keeps its colour across refreshes and
/// across deselect/reselect for the lifetime of the registry.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    tags: Vec<Tag>,
    colors: HashMap<Tag, Color>,
    palette: Vec<Color>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_palette(PALETTE.to_vec())
    }
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            PALETTE.to_vec()
        } else {
            palette
        };
        Self {
            tags: Vec::new(),
            colors: HashMap::new(),
            palette,
        }
    }

    /// Replace the known tag list wholesale and colour any newcomers
    pub fn replace(&mut self, tags: Vec<Tag>) {
        for tag in &tags {
            self.ensure_color(tag);
        }
        log::info!("Tag registry refreshed: {} tags", tags.len());
        self.tags = tags;
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_known(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Colour already assigned to `tag`, if any
    pub fn color_of(&self, tag: &Tag) -> Option<Color> {
        self.colors.get(tag).copied()
    }

    /// Colour for `tag`, assigning the next palette entry on first sight
    pub fn ensure_color(&mut self, tag: &Tag) -> Color {
        if let Some(color) = self.colors.get(tag) {
            return *color;
        }
        let color = self.palette[self.colors.len() % self.palette.len()];
        self.colors.insert(tag.clone(), color);
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().map(|n| Tag::from(*n)).collect()
    }

    #[test]
    fn test_colors_are_stable_across_refreshes() {
        let mut registry = TagRegistry::new();
        registry.replace(tags(&["A", "B", "C"]));
        let first: Vec<Color> = registry
            .tags()
            .iter()
            .map(|t| registry.color_of(t).unwrap())
            .collect();

        registry.replace(tags(&["C", "B", "A"]));
        for (tag, color) in tags(&["A", "B", "C"]).iter().zip(first) {
            assert_eq!(registry.color_of(tag), Some(color));
        }
        assert_eq!(registry.color_of(&Tag::from("A")), Some(PALETTE[0]));
        assert_eq!(registry.color_of(&Tag::from("C")), Some(PALETTE[2]));
    }

    #[test]
    fn test_palette_wraps_around() {
        let mut registry = TagRegistry::new();
        let names: Vec<String> = (0..PALETTE.len() + 2).map(|i| format!("t{i}")).collect();
        registry.replace(names.iter().map(|n| Tag::from(n.as_str())).collect());

        assert_eq!(registry.color_of(&Tag::from("t0")), Some(PALETTE[0]));
        assert_eq!(registry.color_of(&Tag::from("t8")), Some(PALETTE[0]));
        assert_eq!(registry.color_of(&Tag::from("t9")), Some(PALETTE[1]));
    }

    #[test]
    fn test_new_tags_continue_first_seen_order() {
        let mut registry = TagRegistry::new();
        registry.replace(tags(&["A", "B"]));
        registry.replace(tags(&["B", "D"]));

        assert_eq!(registry.tags(), tags(&["B", "D"]).as_slice());
        assert!(!registry.is_known(&Tag::from("A")));
        // A keeps its colour even though it is gone from the list
        assert_eq!(registry.color_of(&Tag::from("A")), Some(PALETTE[0]));
        assert_eq!(registry.color_of(&Tag::from("D")), Some(PALETTE[2]));
    }

    #[test]
    fn test_empty_palette_falls_back_to_default() {
        let mut registry = TagRegistry::with_palette(Vec::new());
        assert_eq!(registry.ensure_color(&Tag::from("x")), PALETTE[0]);
    }
}
