//! Visibility engine over a fixed project collection.
//!
//! The engine holds the full collection plus the current criteria and computes
//! the visible subset on demand. Criteria are stored raw and normalized when a
//! view is computed, so case and whitespace handling lives in
//! [`crate::normalize`] only.
//!
//! Each gate is a plain predicate over one record; a record is visible when
//! every gate in [`GATES`] accepts it. New filter kinds are added as another
//! gate in that list.

use std::collections::HashSet;

use crate::model::ProjectRecord;
use crate::normalize::normalize;

/// Category sentinel meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

type Gate = fn(&ActiveCriteria, &ProjectRecord) -> bool;

/// Evaluated in order; the first rejecting gate short-circuits the rest.
const GATES: [Gate; 3] = [category_gate, search_gate, tech_gate];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVisibilityEngine {
    all_projects: Vec<ProjectRecord>,
    search_query: String,
    category: String,
    tech_tags: Vec<String>,
}

impl ProjectVisibilityEngine {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        Self {
            all_projects: projects,
            search_query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            tech_tags: Vec::new(),
        }
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
    }

    /// Unknown categories are accepted and simply match nothing.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_tech_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tech_tags = tags.into_iter().map(Into::into).collect();
    }

    pub fn reset(&mut self) {
        self.search_query.clear();
        self.category = ALL_CATEGORIES.to_string();
        self.tech_tags.clear();
    }

    pub fn all_projects(&self) -> &[ProjectRecord] {
        &self.all_projects
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tech_tags(&self) -> &[String] {
        &self.tech_tags
    }

    /// Freshly computed visible set in source order.
    pub fn visible_projects(&self) -> Vec<ProjectRecord> {
        let criteria = ActiveCriteria::from_engine(self);
        let visible: Vec<ProjectRecord> = self
            .all_projects
            .iter()
            .filter(|project| GATES.iter().all(|gate| gate(&criteria, project)))
            .cloned()
            .collect();

        tracing::debug!(
            query = %self.search_query,
            category = %self.category,
            tags = self.tech_tags.len(),
            visible = visible.len(),
            total = self.all_projects.len(),
            "computed visible projects"
        );

        visible
    }

    /// Distinct non-blank categories in first-seen order, deduplicated
    /// case-insensitively. Values are returned untrimmed so each one selects
    /// its projects when passed back to [`Self::set_category`].
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.all_projects
            .iter()
            .map(|project| project.category.as_str())
            .filter(|category| !category.trim().is_empty())
            .filter(|category| seen.insert(category.to_lowercase()))
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Criteria normalized once per evaluation. `None` means the gate is open.
#[derive(Debug)]
struct ActiveCriteria {
    category: Option<String>,
    query: Option<String>,
    tags: Vec<String>,
}

impl ActiveCriteria {
    fn from_engine(engine: &ProjectVisibilityEngine) -> Self {
        let category = engine.category.to_lowercase();
        let query = normalize(&engine.search_query);

        Self {
            category: (category != ALL_CATEGORIES).then_some(category),
            query: (!query.is_empty()).then_some(query),
            tags: engine
                .tech_tags
                .iter()
                .map(|tag| normalize(tag))
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}

fn category_gate(criteria: &ActiveCriteria, project: &ProjectRecord) -> bool {
    match &criteria.category {
        Some(category) => project.category.to_lowercase() == *category,
        None => true,
    }
}

fn search_gate(criteria: &ActiveCriteria, project: &ProjectRecord) -> bool {
    let Some(query) = &criteria.query else {
        return true;
    };

    normalize(&project.title).contains(query.as_str())
        || normalize(&project.description).contains(query.as_str())
        || project
            .tech
            .iter()
            .any(|tech| normalize(tech).contains(query.as_str()))
}

fn tech_gate(criteria: &ActiveCriteria, project: &ProjectRecord) -> bool {
    criteria.tags.iter().all(|tag| {
        project
            .tech
            .iter()
            .any(|tech| normalize(tech) == *tag)
    })
}
