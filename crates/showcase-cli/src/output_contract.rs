use std::fmt;

use serde_json::{Value, json};

pub const ENVELOPE_SCHEMA_VERSION: &str = "v1";

const SENSITIVE_KEYS: [&str; 6] = [
    "token",
    "secret",
    "client_secret",
    "password",
    "api_key",
    "apikey",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    AlfredJson,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
            Self::AlfredJson => "alfred-json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputModeSelectionError {
    pub explicit: OutputMode,
}

impl fmt::Display for OutputModeSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conflicting output mode flags: --json requires --output json (got {})",
            self.explicit.as_str()
        )
    }
}

impl std::error::Error for OutputModeSelectionError {}

pub fn select_output_mode(
    explicit: Option<OutputMode>,
    json_flag: bool,
    default_mode: OutputMode,
) -> Result<OutputMode, OutputModeSelectionError> {
    match (explicit, json_flag) {
        (Some(mode), true) if mode != OutputMode::Json => {
            Err(OutputModeSelectionError { explicit: mode })
        }
        (Some(mode), _) => Ok(mode),
        (None, true) => Ok(OutputMode::Json),
        (None, false) => Ok(default_mode),
    }
}

pub fn success_envelope(command: &str, result: Value) -> Value {
    json!({
        "schema_version": ENVELOPE_SCHEMA_VERSION,
        "command": command,
        "ok": true,
        "result": result,
    })
}

pub fn error_envelope(
    command: &str,
    code: &str,
    message: &str,
    kind: &str,
    exit_code: i32,
) -> Value {
    json!({
        "schema_version": ENVELOPE_SCHEMA_VERSION,
        "command": command,
        "ok": false,
        "error": {
            "code": code,
            "message": redact_sensitive(message),
            "details": {
                "kind": kind,
                "exit_code": exit_code,
            },
        },
    })
}

/// Masks values following `key=`/`key:` for secret-looking keys and any
/// `Bearer` credential.
pub fn redact_sensitive(input: &str) -> String {
    let mut output = input.to_string();
    for key in SENSITIVE_KEYS {
        for separator in ['=', ':'] {
            output = redact_after(&output, &format!("{key}{separator}"));
        }
    }
    redact_after(&output, "bearer ")
}

fn redact_after(input: &str, marker: &str) -> String {
    let lower = input.to_ascii_lowercase();
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find(marker) {
        let value_start = skip_spaces(input, cursor + found + marker.len());
        let value_end = value_end(input, value_start);

        output.push_str(&input[cursor..value_start]);
        if value_start < value_end {
            let value = &input[value_start..value_end];
            // Leave already-redacted and nested bearer markers alone.
            if value == "[REDACTED]" || value.eq_ignore_ascii_case("bearer") {
                output.push_str(value);
            } else {
                output.push_str("[REDACTED]");
            }
        }
        cursor = value_end;
    }

    output.push_str(&input[cursor..]);
    output
}

fn skip_spaces(input: &str, mut index: usize) -> usize {
    let bytes = input.as_bytes();
    while index < bytes.len() && bytes[index] == b' ' {
        index += 1;
    }
    index
}

fn value_end(input: &str, mut index: usize) -> usize {
    let bytes = input.as_bytes();
    while index < bytes.len() {
        let byte = bytes[index];
        if byte.is_ascii_whitespace() || matches!(byte, b'&' | b',' | b';' | b')' | b'"') {
            break;
        }
        index += 1;
    }
    index
}
