use showcase_core::ShowcaseError;

use crate::config::ConfigError;

pub const ERROR_CODE_USER_INVALID_INPUT: &str = "user.invalid_input";
pub const ERROR_CODE_USER_MISSING_PROJECTS: &str = "user.missing_projects";
pub const ERROR_CODE_USER_OUTPUT_MODE_CONFLICT: &str = "user.output_mode_conflict";
pub const ERROR_CODE_RUNTIME_LOAD: &str = "runtime.load_failed";
pub const ERROR_CODE_RUNTIME_FETCH: &str = "runtime.fetch_failed";
pub const ERROR_CODE_RUNTIME_SERIALIZE: &str = "runtime.serialize_failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    User,
    Runtime,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Runtime => "runtime",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            code,
            message: message.into(),
        }
    }

    pub fn runtime(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::user(ERROR_CODE_USER_INVALID_INPUT, value.to_string())
    }
}

impl From<ShowcaseError> for AppError {
    fn from(value: ShowcaseError) -> Self {
        let message = error_chain(&value);
        match value {
            ShowcaseError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                Self::user(ERROR_CODE_USER_INVALID_INPUT, message)
            }
            ShowcaseError::InvalidRepo(_) => Self::user(ERROR_CODE_USER_INVALID_INPUT, message),
            ShowcaseError::Io { .. } | ShowcaseError::InvalidDocument(_) => {
                Self::runtime(ERROR_CODE_RUNTIME_LOAD, message)
            }
            ShowcaseError::BuildClient(_)
            | ShowcaseError::Transport { .. }
            | ShowcaseError::Http { .. }
            | ShowcaseError::InvalidResponse(_) => Self::runtime(ERROR_CODE_RUNTIME_FETCH, message),
        }
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
