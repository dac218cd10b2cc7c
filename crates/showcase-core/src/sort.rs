use std::cmp::Ordering;

use crate::model::ProjectRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Default,
    TitleAsc,
    TitleDesc,
    Category,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::Category => "category",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Some(Self::Default),
            "title-asc" | "title_asc" | "az" => Some(Self::TitleAsc),
            "title-desc" | "title_desc" | "za" => Some(Self::TitleDesc),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}

/// Stable sort; ties keep their incoming (source) order.
pub fn sort_projects(projects: &mut [ProjectRecord], order: SortOrder) {
    match order {
        SortOrder::Default => {}
        SortOrder::TitleAsc => projects.sort_by(compare_titles),
        SortOrder::TitleDesc => projects.sort_by(|left, right| compare_titles(right, left)),
        SortOrder::Category => projects.sort_by(|left, right| {
            left.category
                .to_lowercase()
                .cmp(&right.category.to_lowercase())
                .then_with(|| compare_titles(left, right))
        }),
    }
}

fn compare_titles(left: &ProjectRecord, right: &ProjectRecord) -> Ordering {
    left.title.to_lowercase().cmp(&right.title.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ProjectRecord> {
        vec![
            ProjectRecord::new("beta", "Tools"),
            ProjectRecord::new("Alpha", "Games"),
            ProjectRecord::new("Gamma", "games"),
            ProjectRecord::new("Delta", "Apps"),
        ]
    }

    fn titles(projects: &[ProjectRecord]) -> Vec<&str> {
        projects.iter().map(|project| project.title.as_str()).collect()
    }

    #[test]
    fn sort_default_keeps_source_order() {
        let mut projects = sample();
        sort_projects(&mut projects, SortOrder::Default);
        assert_eq!(titles(&projects), vec!["beta", "Alpha", "Gamma", "Delta"]);
    }

    #[test]
    fn sort_titles_ignore_case() {
        let mut projects = sample();
        sort_projects(&mut projects, SortOrder::TitleAsc);
        assert_eq!(titles(&projects), vec!["Alpha", "beta", "Delta", "Gamma"]);

        sort_projects(&mut projects, SortOrder::TitleDesc);
        assert_eq!(titles(&projects), vec!["Gamma", "Delta", "beta", "Alpha"]);
    }

    #[test]
    fn sort_category_groups_then_orders_by_title() {
        let mut projects = sample();
        sort_projects(&mut projects, SortOrder::Category);
        assert_eq!(titles(&projects), vec!["Delta", "Alpha", "Gamma", "beta"]);
    }

    #[test]
    fn sort_order_parse_accepts_aliases() {
        assert_eq!(SortOrder::parse("az"), Some(SortOrder::TitleAsc));
        assert_eq!(SortOrder::parse(" Title-Desc "), Some(SortOrder::TitleDesc));
        assert_eq!(SortOrder::parse(""), Some(SortOrder::Default));
        assert_eq!(SortOrder::parse("newest"), None);
    }
}
