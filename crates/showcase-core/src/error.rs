use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("failed to read project data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project document: {0}")]
    InvalidDocument(String),
    #[error("invalid repository slug (expected owner/name): {0}")]
    InvalidRepo(String),
    #[error("failed to build http client")]
    BuildClient(#[source] reqwest::Error),
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("http error ({status}) from {url}")]
    Http { status: u16, url: String },
    #[error("invalid response payload")]
    InvalidResponse(#[source] serde_json::Error),
}
