use std::collections::HashMap;

use showcase_core::DEFAULT_PAGE_SIZE;
use thiserror::Error;

pub const PROJECTS_ENV: &str = "SHOWCASE_PROJECTS";
pub const PAGE_SIZE_ENV: &str = "SHOWCASE_PAGE_SIZE";
pub const TIMEOUT_ENV: &str = "SHOWCASE_TIMEOUT_SECS";
pub const REPO_ENV: &str = "SHOWCASE_REPO";
pub const LOG_ENV: &str = "SHOWCASE_LOG";

const PAGE_SIZE_MIN: i64 = 1;
const PAGE_SIZE_MAX: i64 = 50;
const TIMEOUT_MIN: i64 = 1;
const TIMEOUT_MAX: i64 = 60;

pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub projects_source: Option<String>,
    pub page_size: usize,
    pub timeout_secs: u64,
    pub repo: Option<String>,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env_map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        Ok(Self {
            projects_source: non_empty(&env_map, PROJECTS_ENV),
            page_size: parse_clamped(
                env_map.get(PAGE_SIZE_ENV).map(String::as_str),
                DEFAULT_PAGE_SIZE as i64,
                PAGE_SIZE_MIN,
                PAGE_SIZE_MAX,
                PAGE_SIZE_ENV,
            )? as usize,
            timeout_secs: parse_clamped(
                env_map.get(TIMEOUT_ENV).map(String::as_str),
                DEFAULT_TIMEOUT_SECS as i64,
                TIMEOUT_MIN,
                TIMEOUT_MAX,
                TIMEOUT_ENV,
            )? as u64,
            repo: non_empty(&env_map, REPO_ENV),
        })
    }
}

/// Clamps a page size given on the command line into the same range as
/// `SHOWCASE_PAGE_SIZE`.
pub fn clamp_page_size(page_size: usize) -> usize {
    page_size.clamp(PAGE_SIZE_MIN as usize, PAGE_SIZE_MAX as usize)
}

fn non_empty(env_map: &HashMap<String, String>, key: &str) -> Option<String> {
    env_map
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn parse_clamped(
    raw: Option<&str>,
    default: i64,
    min: i64,
    max: i64,
    field: &'static str,
) -> Result<i64, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(default);
    };

    let parsed = value.parse::<i64>().map_err(|_| ConfigError::InvalidNumber {
        field,
        value: value.to_string(),
    })?;

    Ok(parsed.clamp(min, max))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
}
