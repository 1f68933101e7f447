//! Error types for document assembly with actionable messages.
//!
//! Errors carry a code for programmatic handling plus optional context and
//! suggestions for fixing the problem.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: J{category}{number}
//! - 1xxx: Resolution errors (unregistered type, unknown relationship, missing id)
//! - 3xxx: Data source errors
//! - 7xxx: Configuration errors
//!
//! ```rust
//! use spindle_document::{DocumentError, ErrorCode};
//!
//! let err = DocumentError::unregistered_type("Post");
//! assert_eq!(err.code, ErrorCode::UnregisteredType);
//! assert_eq!(err.code.code(), "J1001");
//! ```

use std::fmt;
use thiserror::Error;

use spindle_schema::SchemaError;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resolution errors (1xxx)
    /// Model is not in the registry (J1001).
    UnregisteredType = 1001,
    /// Relationship is not declared on the model (J1002).
    UnknownRelationship = 1002,
    /// Record has no id (J1003).
    MissingId = 1003,

    // Data source errors (3xxx)
    /// The data source failed to fetch (J3001).
    FetchFailed = 3001,

    // Configuration errors (7xxx)
    /// Invalid configuration (J7001).
    InvalidConfiguration = 7001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "J1001").
    pub fn code(&self) -> String {
        format!("J{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnregisteredType => "Unregistered type",
            Self::UnknownRelationship => "Unknown relationship",
            Self::MissingId => "Record has no id",
            Self::FetchFailed => "Data source fetch failed",
            Self::InvalidConfiguration => "Invalid configuration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The model involved.
    pub model: Option<String>,
    /// The relationship involved.
    pub relation: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while assembling a document.
#[derive(Error, Debug)]
pub struct DocumentError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl DocumentError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.context.model = Some(model.into());
        self
    }

    /// Set the relationship.
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.context.relation = Some(relation.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create an unregistered type error.
    pub fn unregistered_type(model: impl Into<String>) -> Self {
        let model = model.into();
        Self::new(
            ErrorCode::UnregisteredType,
            format!("Adapter is missing model {}", model),
        )
        .with_model(&model)
        .with_suggestion(format!("Register a TypeEntry for {} before building the registry", model))
    }

    /// Create an unknown relationship error.
    pub fn unknown_relationship(model: impl Into<String>, relation: impl Into<String>) -> Self {
        let model = model.into();
        let relation = relation.into();
        Self::new(
            ErrorCode::UnknownRelationship,
            format!("Model {} has no relationship named {}", model, relation),
        )
        .with_model(&model)
        .with_relation(&relation)
        .with_suggestion("Check the include path for typos")
    }

    /// Create a missing id error.
    pub fn missing_id(model: impl Into<String>) -> Self {
        let model = model.into();
        Self::new(
            ErrorCode::MissingId,
            format!("Cannot serialize {} record without an id", model),
        )
        .with_model(&model)
        .with_help("Only records fetched from the data source can be serialized")
    }

    /// Create a fetch error wrapping a data source failure.
    pub fn fetch(
        model: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let model = model.into();
        let mut err = Self::new(
            ErrorCode::FetchFailed,
            format!("Failed to fetch {}: {}", model, source),
        )
        .with_model(&model);
        err.source = Some(source);
        err
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::InvalidConfiguration,
            format!("Invalid configuration: {}", message),
        )
        .with_suggestion("Options must contain at least one registered model")
    }

    // ============== Error Checks ==============

    /// Check if this is an unregistered type error.
    pub fn is_unregistered_type(&self) -> bool {
        self.code == ErrorCode::UnregisteredType
    }

    /// Check if this is an unknown relationship error.
    pub fn is_unknown_relationship(&self) -> bool {
        self.code == ErrorCode::UnknownRelationship
    }

    /// Check if this is a missing id error.
    pub fn is_missing_id(&self) -> bool {
        self.code == ErrorCode::MissingId
    }

    /// Check if this error came from the data source.
    pub fn is_fetch_error(&self) -> bool {
        self.code == ErrorCode::FetchFailed
    }

    /// Check if this is a configuration error.
    pub fn is_configuration_error(&self) -> bool {
        self.code == ErrorCode::InvalidConfiguration
    }

    // ============== Display Functions ==============

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → While: {}\n", op));
        }
        if let Some(ref model) = self.context.model {
            output.push_str(&format!("  → Model: {}\n", model));
        }
        if let Some(ref relation) = self.context.relation {
            output.push_str(&format!("  → Relationship: {}\n", relation));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}

impl From<SchemaError> for DocumentError {
    fn from(err: SchemaError) -> Self {
        Self::configuration(err.to_string()).with_source(err)
    }
}
