use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::ShowcaseError;
use crate::model::ProjectRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub projects: Vec<ProjectRecord>,
    pub skipped: usize,
}

pub fn load_projects_file(path: &Path) -> Result<LoadReport, ShowcaseError> {
    let content = fs::read_to_string(path).map_err(|source| ShowcaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_projects(&content)
}

/// Decodes a JSON array of project objects one element at a time.
///
/// Optional fields that are null or mistyped decode as empty. Elements that
/// are not objects, lack a usable title, or repeat an earlier title are
/// dropped and counted in [`LoadReport::skipped`]; only a document that is
/// not a JSON array is an error.
pub fn parse_projects(json: &str) -> Result<LoadReport, ShowcaseError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|error| ShowcaseError::InvalidDocument(error.to_string()))?;
    let Value::Array(entries) = document else {
        return Err(ShowcaseError::InvalidDocument(
            "expected a JSON array of projects".to_string(),
        ));
    };

    let mut report = LoadReport::default();
    let mut seen_titles = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let record = match serde_json::from_value::<ProjectRecord>(entry) {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(index, %error, "skipping undecodable project record");
                report.skipped += 1;
                continue;
            }
        };

        if record.title.trim().is_empty() {
            tracing::warn!(index, "skipping project record with blank title");
            report.skipped += 1;
            continue;
        }

        // Titles are case-sensitive identity keys; first occurrence wins.
        if !seen_titles.insert(record.title.clone()) {
            tracing::warn!(index, title = %record.title, "skipping duplicate project title");
            report.skipped += 1;
            continue;
        }

        report.projects.push(record);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_keeps_valid_records_in_source_order() {
        let json = r#"[
            {"title":"Alpha","category":"Tools","tech":["X"],"description":"d"},
            {"title":"Beta","category":"Games","tech":["Y"],"description":"d"}
        ]"#;

        let report = parse_projects(json).expect("parse should succeed");
        let titles: Vec<&str> = report
            .projects
            .iter()
            .map(|project| project.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Alpha", "Beta"]);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn loader_skips_bad_records_without_failing_document() {
        let json = r#"[
            {"title":"Alpha","category":"Tools"},
            {"category":"NoTitle"},
            "not-an-object",
            {"title":"   ","category":"Blank"},
            {"title":null,"category":"NullTitle"},
            {"title":"Beta","tech":"not-a-list"},
            {"title":"Gamma"}
        ]"#;

        let report = parse_projects(json).expect("parse should succeed");
        let titles: Vec<&str> = report
            .projects
            .iter()
            .map(|project| project.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(report.skipped, 4);
        assert!(report.projects[1].tech.is_empty());
    }

    #[test]
    fn loader_keeps_records_with_null_optional_fields() {
        let json = r#"[
            {"title":"Alpha","category":"Tools","tech":null,"description":"d"},
            {"title":"Beta","category":"Games","tech":["Y"],"description":null},
            {"title":"Gamma","category":null,"icon":null,"link":null}
        ]"#;

        let report = parse_projects(json).expect("parse should succeed");
        let titles: Vec<&str> = report
            .projects
            .iter()
            .map(|project| project.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(report.skipped, 0);

        let mut engine = crate::ProjectVisibilityEngine::new(report.projects);
        engine.set_search_query("alp");
        let visible = engine.visible_projects();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Alpha");

        engine.set_search_query("y");
        let visible: Vec<String> = engine
            .visible_projects()
            .into_iter()
            .map(|project| project.title)
            .collect();
        assert_eq!(visible, vec!["Beta"]);
    }

    #[test]
    fn loader_drops_later_duplicate_titles() {
        let json = r#"[
            {"title":"Alpha","category":"Tools"},
            {"title":"alpha","category":"Tools"},
            {"title":"Alpha","category":"Games"}
        ]"#;

        let report = parse_projects(json).expect("parse should succeed");

        assert_eq!(report.projects.len(), 2, "titles compare case-sensitively");
        assert_eq!(report.projects[0].category, "Tools");
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn loader_rejects_non_array_documents() {
        let err = parse_projects(r#"{"projects":[]}"#).expect_err("object should fail");
        assert!(matches!(err, ShowcaseError::InvalidDocument(_)));

        let err = parse_projects("not json").expect_err("garbage should fail");
        assert!(matches!(err, ShowcaseError::InvalidDocument(_)));
    }

    #[test]
    fn loader_accepts_empty_array() {
        let report = parse_projects("[]").expect("empty array is valid");
        assert!(report.projects.is_empty());
    }

    #[test]
    fn loader_reads_file_and_reports_missing_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("projects.json");
        fs::write(&path, r#"[{"title":"Alpha"}]"#).expect("write fixture");

        let report = load_projects_file(&path).expect("load should succeed");
        assert_eq!(report.projects.len(), 1);

        let err = load_projects_file(&dir.path().join("missing.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ShowcaseError::Io { .. }));
    }
}
