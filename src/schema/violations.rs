//! Schema violations and configuration errors.

use thiserror::Error;

/// One problem found in a form configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaViolation {
    #[error("configuration must be an object or a resolver returning one, found {found}")]
    NotAnObject { found: &'static str },

    #[error("`fields` must be an object mapping field names to their validators, found {found}")]
    FieldsNotAnObject { found: &'static str },

    #[error("field `{field}` must be an object of validators, found {found}")]
    FieldNotAnObject { field: String, found: &'static str },

    #[error(
        "unsupported `showErrors` value {value}; valid values are \"always\", \"blur\" or \"submit\""
    )]
    UnsupportedShowErrors { value: String },

    #[error("rule `{rule}` on field `{field}` must be a message or an object with a string `message`")]
    MalformedRule { field: String, rule: String },

    #[error("field `{field}` uses unknown validator `{rule}`")]
    UnknownValidator { field: String, rule: String },

    #[error("rule `{rule}` on field `{field}` requires an unsigned `{param}` parameter")]
    MissingParameter {
        field: String,
        rule: String,
        param: &'static str,
    },

    #[error("rule `{rule}` on field `{field}` has unrecognized `{param}` value {value}")]
    InvalidParameter {
        field: String,
        rule: String,
        param: &'static str,
        value: String,
    },
}

/// Developer-facing configuration failure. Aborts engine setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid form configuration: {}", join(.0))]
    Schema(Vec<SchemaViolation>),

    #[error("failed to parse form configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Schema violations carried by this error; empty for parse errors.
    pub fn violations(&self) -> &[SchemaViolation] {
        match self {
            Self::Schema(violations) => violations,
            Self::Json(_) => &[],
        }
    }
}

fn join(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
