//! Card rendering for Alfred script-filter output and plain text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use showcase_core::{BookmarkSet, Contributor, PageView, ProjectRecord};

const NO_MATCH_TITLE: &str = "No projects match";
const NO_MATCH_SUBTITLE: &str = "Try broader keywords or another category.";
const NO_CONTRIBUTORS_TITLE: &str = "No contributors found";
const BOOKMARK_MARKER: &str = "★";
const ALL_CATEGORIES_TITLE: &str = "All categories";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    pub items: Vec<Item>,
}

impl Feedback {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, String>>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            arg: None,
            valid: None,
            autocomplete: None,
            variables: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = Some(autocomplete.into());
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Card subtitle: category and tech stack, falling back to the description.
pub fn card_subtitle(project: &ProjectRecord) -> String {
    let mut parts = Vec::new();
    let category = project.category.trim();
    if !category.is_empty() {
        parts.push(category.to_string());
    }

    let tech: Vec<&str> = project
        .tech
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .collect();
    if !tech.is_empty() {
        parts.push(tech.join(", "));
    }

    if parts.is_empty() {
        return project.description.trim().to_string();
    }
    parts.join(" • ")
}

pub fn card_title(project: &ProjectRecord, bookmarks: &BookmarkSet) -> String {
    if bookmarks.contains(&project.title) {
        format!("{BOOKMARK_MARKER} {}", project.title)
    } else {
        project.title.clone()
    }
}

pub fn page_footer(view: &PageView) -> String {
    format!(
        "Page {}/{} • {} project{}",
        view.page,
        view.total_pages,
        view.total_items,
        if view.total_items == 1 { "" } else { "s" }
    )
}

fn page_hint(view: &PageView) -> Option<String> {
    if view.has_next {
        Some(format!("Use --page {} for more", view.page + 1))
    } else if view.has_previous {
        Some(format!("Use --page {} to go back", view.page - 1))
    } else {
        None
    }
}

pub fn page_to_feedback(view: &PageView, bookmarks: &BookmarkSet) -> Feedback {
    if view.projects.is_empty() {
        return single_invalid_item(NO_MATCH_TITLE, NO_MATCH_SUBTITLE);
    }

    let mut items: Vec<Item> = view
        .projects
        .iter()
        .map(|project| {
            let link = project.link.trim();
            Item::new(card_title(project, bookmarks))
                .with_subtitle(card_subtitle(project))
                .with_arg(link)
                .with_valid(!link.is_empty())
                .with_autocomplete(project.title.clone())
                .with_variable("project_title", project.title.clone())
                .with_variable("project_category", project.category.clone())
        })
        .collect();

    if view.total_pages > 1 {
        let mut footer = Item::new(page_footer(view)).with_valid(false);
        if let Some(hint) = page_hint(view) {
            footer = footer.with_subtitle(hint);
        }
        items.push(footer);
    }

    Feedback::new(items)
}

pub fn render_page_human(view: &PageView, bookmarks: &BookmarkSet) -> String {
    if view.projects.is_empty() {
        return NO_MATCH_TITLE.to_string();
    }

    let mut lines: Vec<String> = view
        .projects
        .iter()
        .map(|project| {
            let subtitle = card_subtitle(project);
            let title = card_title(project, bookmarks);
            if subtitle.is_empty() {
                title
            } else {
                format!("{title} | {subtitle}")
            }
        })
        .collect();
    lines.push(page_footer(view));
    lines.join("\n")
}

/// `(name, visible count)` pairs; the sentinel row comes first.
pub fn categories_to_feedback(total: usize, categories: &[(String, usize)]) -> Feedback {
    let mut items = vec![
        Item::new(ALL_CATEGORIES_TITLE)
            .with_subtitle(count_label(total))
            .with_arg(showcase_core::ALL_CATEGORIES)
            .with_valid(true),
    ];

    items.extend(categories.iter().map(|(name, count)| {
        Item::new(name.trim())
            .with_subtitle(count_label(*count))
            .with_arg(name.to_lowercase())
            .with_autocomplete(name.clone())
            .with_valid(true)
    }));

    Feedback::new(items)
}

pub fn render_categories_human(total: usize, categories: &[(String, usize)]) -> String {
    let mut lines = vec![format!("{ALL_CATEGORIES_TITLE} ({total})")];
    lines.extend(
        categories
            .iter()
            .map(|(name, count)| format!("{} ({count})", name.trim())),
    );
    lines.join("\n")
}

pub fn contributors_to_feedback(contributors: &[Contributor]) -> Feedback {
    if contributors.is_empty() {
        return single_invalid_item(
            NO_CONTRIBUTORS_TITLE,
            "The repository reported no contributors.",
        );
    }

    Feedback::new(
        contributors
            .iter()
            .map(|contributor| {
                Item::new(contributor.login.clone())
                    .with_subtitle(contribution_label(contributor.contributions))
                    .with_arg(contributor.html_url.clone())
                    .with_valid(!contributor.html_url.is_empty())
            })
            .collect(),
    )
}

pub fn render_contributors_human(contributors: &[Contributor]) -> String {
    if contributors.is_empty() {
        return NO_CONTRIBUTORS_TITLE.to_string();
    }

    contributors
        .iter()
        .map(|contributor| {
            format!(
                "{} | {}",
                contributor.login,
                contribution_label(contributor.contributions)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 project".to_string()
    } else {
        format!("{count} projects")
    }
}

fn contribution_label(count: u64) -> String {
    if count == 1 {
        "1 contribution".to_string()
    } else {
        format!("{count} contributions")
    }
}

fn single_invalid_item(title: &str, subtitle: &str) -> Feedback {
    Feedback::new(vec![
        Item::new(title).with_subtitle(subtitle).with_valid(false),
    ])
}
