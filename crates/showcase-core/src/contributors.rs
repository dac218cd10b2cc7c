use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;

const API_BASE: &str = "https://api.github.com/repos";
const USER_AGENT: &str = "nils-showcase-contributors/0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub contributions: u64,
}

impl Contributor {
    fn is_bot(&self) -> bool {
        self.login.ends_with("[bot]")
    }
}

pub fn contributors_url(repo: &str) -> Result<String, ShowcaseError> {
    let repo = repo.trim();
    let valid = repo
        .split_once('/')
        .map(|(owner, name)| {
            !owner.is_empty() && !name.is_empty() && !name.contains('/') && !repo.contains(' ')
        })
        .unwrap_or(false);

    if !valid {
        return Err(ShowcaseError::InvalidRepo(repo.to_string()));
    }

    Ok(format!("{API_BASE}/{repo}/contributors"))
}

/// Single GET, no retries.
pub fn fetch_contributors(
    repo: &str,
    timeout_secs: u64,
) -> Result<Vec<Contributor>, ShowcaseError> {
    let url = contributors_url(repo)?;
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(ShowcaseError::BuildClient)?;

    tracing::debug!(%url, "fetching contributors");
    let response = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .map_err(|source| ShowcaseError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = response.status().as_u16();
    let body = response.text().map_err(|source| ShowcaseError::Transport {
        url: url.clone(),
        source,
    })?;

    parse_contributors(status, &body).map_err(|error| match error {
        ShowcaseError::Http { status, .. } => ShowcaseError::Http { status, url },
        other => other,
    })
}

pub fn parse_contributors(status: u16, body: &str) -> Result<Vec<Contributor>, ShowcaseError> {
    if !(200..=299).contains(&status) {
        return Err(ShowcaseError::Http {
            status,
            url: String::new(),
        });
    }

    let parsed: Vec<Contributor> =
        serde_json::from_str(body).map_err(ShowcaseError::InvalidResponse)?;

    Ok(parsed
        .into_iter()
        .filter(|contributor| !contributor.login.trim().is_empty())
        .filter(|contributor| !contributor.is_bot())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributors_parse_keeps_humans_in_api_order() {
        let body = r#"[
            {"login":"octocat","html_url":"https://github.com/octocat","contributions":42},
            {"login":"dependabot[bot]","contributions":7},
            {"login":"","contributions":1},
            {"login":"hubot","contributions":3}
        ]"#;

        let contributors = parse_contributors(200, body).expect("parse should succeed");
        let logins: Vec<&str> = contributors
            .iter()
            .map(|contributor| contributor.login.as_str())
            .collect();

        assert_eq!(logins, vec!["octocat", "hubot"]);
        assert_eq!(contributors[0].contributions, 42);
        assert!(contributors[1].html_url.is_empty());
    }

    #[test]
    fn contributors_parse_rejects_non_success_status() {
        let err = parse_contributors(403, "{}").expect_err("403 should fail");
        assert!(matches!(err, ShowcaseError::Http { status: 403, .. }));
    }

    #[test]
    fn contributors_parse_rejects_invalid_json() {
        let err = parse_contributors(200, "not-json").expect_err("invalid json should fail");
        assert!(matches!(err, ShowcaseError::InvalidResponse(_)));
    }

    #[test]
    fn contributors_url_requires_owner_and_name() {
        assert_eq!(
            contributors_url(" octo/showcase ").expect("valid slug"),
            "https://api.github.com/repos/octo/showcase/contributors"
        );

        for invalid in ["", "octo", "/showcase", "octo/", "a/b/c", "octo/show case"] {
            let err = contributors_url(invalid).expect_err("invalid slug should fail");
            assert!(matches!(err, ShowcaseError::InvalidRepo(_)), "{invalid}");
        }
    }
}
