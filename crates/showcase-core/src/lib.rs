//! Project showcase domain modules.
//!
//! - `model`: project record shape as published in `projects.json`.
//! - `normalize`: shared text normalization for matching.
//! - `engine`: visibility engine (category/search/tech gates).
//! - `loader`: tolerant record-by-record collection decoding.
//! - `sort` / `pagination`: derived views over the visible set.
//! - `bookmarks`: in-memory bookmark set keyed by title.
//! - `controller`: single owner of view state for a render layer.
//! - `contributors`: contributor list fetch + parse.

pub mod bookmarks;
pub mod contributors;
pub mod controller;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pagination;
pub mod sort;

pub use bookmarks::BookmarkSet;
pub use contributors::{Contributor, fetch_contributors, parse_contributors};
pub use controller::{PageView, ShowcaseState};
pub use engine::{ALL_CATEGORIES, ProjectVisibilityEngine};
pub use error::ShowcaseError;
pub use loader::{LoadReport, load_projects_file, parse_projects};
pub use model::ProjectRecord;
pub use normalize::normalize;
pub use pagination::{DEFAULT_PAGE_SIZE, Page, paginate};
pub use sort::{SortOrder, sort_projects};
