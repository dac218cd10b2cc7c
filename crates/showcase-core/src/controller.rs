use crate::bookmarks::BookmarkSet;
use crate::engine::ProjectVisibilityEngine;
use crate::model::ProjectRecord;
use crate::pagination::{DEFAULT_PAGE_SIZE, Page, paginate, total_pages};
use crate::sort::{SortOrder, sort_projects};

/// View state handed to a render layer: engine criteria plus sort order,
/// page cursor and bookmarks. Criteria changes rewind to the first page.
#[derive(Debug, Clone)]
pub struct ShowcaseState {
    engine: ProjectVisibilityEngine,
    sort_order: SortOrder,
    page: usize,
    page_size: usize,
    bookmarks: BookmarkSet,
    bookmarked_only: bool,
}

/// Owned result of [`ShowcaseState::current_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub projects: Vec<ProjectRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl From<Page<'_, ProjectRecord>> for PageView {
    fn from(page: Page<'_, ProjectRecord>) -> Self {
        Self {
            projects: page.items.to_vec(),
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        }
    }
}

impl ShowcaseState {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        Self {
            engine: ProjectVisibilityEngine::new(projects),
            sort_order: SortOrder::Default,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            bookmarks: BookmarkSet::new(),
            bookmarked_only: false,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Seeds bookmarks, dropping titles that name no loaded project.
    pub fn with_bookmarks(mut self, mut bookmarks: BookmarkSet) -> Self {
        bookmarks.retain_known(self.engine.all_projects());
        self.bookmarks = bookmarks;
        self
    }

    pub fn engine(&self) -> &ProjectVisibilityEngine {
        &self.engine
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.engine.set_search_query(text);
        self.page = 1;
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.engine.set_category(category);
        self.page = 1;
    }

    pub fn set_tech_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engine.set_tech_tags(tags);
        self.page = 1;
    }

    pub fn set_bookmarked_only(&mut self, bookmarked_only: bool) {
        self.bookmarked_only = bookmarked_only;
        self.page = 1;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Out-of-range pages are clamped when the view is computed.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Toggles a bookmark; unknown titles are ignored and report `false`.
    pub fn toggle_bookmark(&mut self, title: &str) -> bool {
        if !self
            .engine
            .all_projects()
            .iter()
            .any(|project| project.title == title)
        {
            tracing::debug!(title, "ignoring bookmark for unknown project");
            return false;
        }
        self.bookmarks.toggle(title)
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.sort_order = SortOrder::Default;
        self.bookmarked_only = false;
        self.page = 1;
    }

    /// Visible set after bookmark restriction and sorting, before paging.
    pub fn ordered_projects(&self) -> Vec<ProjectRecord> {
        let mut projects = self.engine.visible_projects();
        if self.bookmarked_only {
            projects.retain(|project| self.bookmarks.contains(&project.title));
        }
        sort_projects(&mut projects, self.sort_order);
        projects
    }

    pub fn current_page(&self) -> PageView {
        let projects = self.ordered_projects();
        paginate(&projects, self.page, self.page_size).into()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.ordered_projects().len(), self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects() -> Vec<ProjectRecord> {
        (1..=8)
            .map(|index| {
                let category = if index % 2 == 0 { "Games" } else { "Tools" };
                ProjectRecord::new(format!("Project {index}"), category)
            })
            .collect()
    }

    fn titles(view: &PageView) -> Vec<&str> {
        view.projects
            .iter()
            .map(|project| project.title.as_str())
            .collect()
    }

    #[test]
    fn state_pages_through_visible_set() {
        let mut state = ShowcaseState::new(projects()).with_page_size(3);

        let first = state.current_page();
        assert_eq!(titles(&first), vec!["Project 1", "Project 2", "Project 3"]);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous);
        assert!(first.has_next);

        state.go_to_page(3);
        let last = state.current_page();
        assert_eq!(titles(&last), vec!["Project 7", "Project 8"]);
        assert!(last.has_previous);
        assert!(!last.has_next);
    }

    #[test]
    fn seeded_bookmarks_drop_unknown_titles() {
        let mut bookmarks = BookmarkSet::new();
        bookmarks.toggle("Project 3");
        bookmarks.toggle("Gone");

        let state = ShowcaseState::new(projects()).with_bookmarks(bookmarks);

        assert_eq!(state.bookmarks().titles(), &["Project 3".to_string()]);
    }

    #[test]
    fn criteria_change_rewinds_to_first_page() {
        let mut state = ShowcaseState::new(projects()).with_page_size(2);
        state.go_to_page(3);

        state.set_category("games");
        let view = state.current_page();

        assert_eq!(view.page, 1);
        assert_eq!(titles(&view), vec!["Project 2", "Project 4"]);
        assert_eq!(view.total_items, 4);
    }

    #[test]
    fn sort_order_applies_before_paging() {
        let mut state = ShowcaseState::new(projects()).with_page_size(2);
        state.set_sort_order(SortOrder::TitleDesc);

        assert_eq!(
            titles(&state.current_page()),
            vec!["Project 8", "Project 7"]
        );
    }

    #[test]
    fn bookmarked_only_restricts_view() {
        let mut state = ShowcaseState::new(projects());
        assert!(state.toggle_bookmark("Project 5"));
        assert!(state.toggle_bookmark("Project 2"));
        assert!(!state.toggle_bookmark("Missing"));

        state.set_bookmarked_only(true);
        assert_eq!(
            titles(&state.current_page()),
            vec!["Project 2", "Project 5"],
            "bookmark view keeps source order"
        );

        state.reset();
        assert_eq!(state.current_page().total_items, 8);
        assert_eq!(state.bookmarks().len(), 2, "reset keeps bookmarks");
    }

    #[test]
    fn empty_result_still_reports_one_page() {
        let mut state = ShowcaseState::new(projects());
        state.set_search_query("nothing matches this");

        let view = state.current_page();
        assert!(view.projects.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(state.total_pages(), 1);
    }
}
