use crate::model::ProjectRecord;

/// Bookmarked titles in the order they were added. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    titles: Vec<String>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the bookmark state for `title` and returns the new state.
    pub fn toggle(&mut self, title: &str) -> bool {
        if let Some(index) = self.titles.iter().position(|existing| existing == title) {
            self.titles.remove(index);
            false
        } else {
            self.titles.push(title.to_string());
            true
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|existing| existing == title)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Drops titles that no longer name a project in `projects`.
    pub fn retain_known(&mut self, projects: &[ProjectRecord]) {
        self.titles
            .retain(|title| projects.iter().any(|project| &project.title == title));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut bookmarks = BookmarkSet::new();

        assert!(bookmarks.toggle("Alpha"));
        assert!(bookmarks.contains("Alpha"));
        assert!(!bookmarks.toggle("Alpha"));
        assert!(bookmarks.is_empty());
    }

    #[test]
    fn titles_are_case_sensitive_and_keep_insertion_order() {
        let mut bookmarks = BookmarkSet::new();
        bookmarks.toggle("beta");
        bookmarks.toggle("Alpha");

        assert!(!bookmarks.contains("alpha"));
        assert_eq!(bookmarks.titles(), &["beta".to_string(), "Alpha".to_string()]);
    }

    #[test]
    fn retain_known_drops_stale_titles() {
        let mut bookmarks = BookmarkSet::new();
        bookmarks.toggle("Alpha");
        bookmarks.toggle("Removed");

        bookmarks.retain_known(&[ProjectRecord::new("Alpha", "Tools")]);

        assert_eq!(bookmarks.len(), 1);
        assert!(bookmarks.contains("Alpha"));
    }
}
