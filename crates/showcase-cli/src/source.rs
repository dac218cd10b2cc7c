use std::path::PathBuf;
use std::time::Duration;

use showcase_core::{
    Contributor, LoadReport, ShowcaseError, fetch_contributors, load_projects_file, parse_projects,
};

const USER_AGENT: &str = "nils-showcase-cli/0.1";

/// Where the project collection comes from: a local `projects.json` or the
/// published copy served over http(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSource {
    File(PathBuf),
    Url(String),
}

impl ProjectSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub fn load(&self, timeout_secs: u64) -> Result<LoadReport, ShowcaseError> {
        let report = match self {
            Self::File(path) => load_projects_file(path)?,
            Self::Url(url) => fetch_projects(url, timeout_secs)?,
        };

        if report.skipped > 0 {
            tracing::warn!(
                skipped = report.skipped,
                kept = report.projects.len(),
                "some project records were skipped"
            );
        }
        Ok(report)
    }
}

/// Contributor lookup seam; the binary talks to GitHub, tests substitute a fake.
pub trait ContributorApi {
    fn contributors(
        &self,
        repo: &str,
        timeout_secs: u64,
    ) -> Result<Vec<Contributor>, ShowcaseError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GithubContributors;

impl ContributorApi for GithubContributors {
    fn contributors(
        &self,
        repo: &str,
        timeout_secs: u64,
    ) -> Result<Vec<Contributor>, ShowcaseError> {
        fetch_contributors(repo, timeout_secs)
    }
}

fn fetch_projects(url: &str, timeout_secs: u64) -> Result<LoadReport, ShowcaseError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(ShowcaseError::BuildClient)?;

    tracing::debug!(url, "fetching project collection");
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .map_err(|source| ShowcaseError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status().as_u16();
    if !(200..=299).contains(&status) {
        return Err(ShowcaseError::Http {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().map_err(|source| ShowcaseError::Transport {
        url: url.to_string(),
        source,
    })?;
    parse_projects(&body)
}
