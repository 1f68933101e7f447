//! Error types for registry construction and configuration loading.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while building a registry or reading configuration.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(spindle::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(spindle::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(
        code(spindle::schema::config_error),
        help("register at least one type before building the registry")
    )]
    ConfigError { message: String },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(spindle::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// A relationship points at a model that was never registered.
    #[error("unknown type `{type_name}` in `{model}.{relation}`")]
    #[diagnostic(code(spindle::schema::unknown_type))]
    UnknownType {
        model: String,
        relation: String,
        type_name: String,
    },

    /// Invalid relationship definition.
    #[error("invalid relationship `{model}.{relation}`: {message}")]
    #[diagnostic(code(spindle::schema::invalid_relation))]
    InvalidRelation {
        model: String,
        relation: String,
        message: String,
    },
}

impl SchemaError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an unknown type error.
    pub fn unknown_type(
        model: impl Into<String>,
        relation: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            model: model.into(),
            relation: relation.into(),
            type_name: type_name.into(),
        }
    }

    /// Create an invalid relationship error.
    pub fn invalid_relation(
        model: impl Into<String>,
        relation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidRelation {
            model: model.into(),
            relation: relation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_result_type() {
        let ok_result: SchemaResult<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: SchemaResult<i32> = Err(SchemaError::config("test"));
        assert!(err_result.is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = SchemaError::config("no types registered");
        assert_eq!(err.to_string(), "configuration error: no types registered");
    }

    #[test]
    fn test_unknown_type_error() {
        let err = SchemaError::unknown_type("Post", "author", "Writer");

        match err {
            SchemaError::UnknownType {
                model,
                relation,
                type_name,
            } => {
                assert_eq!(model, "Post");
                assert_eq!(relation, "author");
                assert_eq!(type_name, "Writer");
            }
            _ => panic!("Expected UnknownType"),
        }
    }

    #[test]
    fn test_invalid_relation_display() {
        let err = SchemaError::invalid_relation("Author", "posts", "to-many relations have no foreign key");
        assert!(err.to_string().contains("Author.posts"));
    }

    #[test]
    fn test_duplicate_error() {
        let err = SchemaError::duplicate("type", "Post");
        assert_eq!(err.to_string(), "duplicate type `Post`");
    }

    #[test]
    fn test_diagnostic_code() {
        let err = SchemaError::config("empty");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("spindle::schema::config_error"));
    }
}
