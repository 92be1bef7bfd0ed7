use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatError>;

/// Contract violations reported by the stat core. Malformed rows are never
/// errors; they are excluded and counted instead.
#[derive(Error, Debug)]
pub enum StatError {
    /// Input was structurally not a collection of rows.
    #[error("expected an array of rows, got {0}")]
    NotACollection(&'static str),

    #[error("invalid feed json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A caller-supplied date (CLI flag, env var) did not parse.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
