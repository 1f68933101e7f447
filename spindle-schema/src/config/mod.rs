//! Configuration file parsing for `spindle.toml`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};
use crate::registry::{Cardinality, Registry, RelationshipDescriptor, TypeEntry};

/// Main configuration structure for `spindle.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpindleConfig {
    /// Document output settings.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,

    /// Registered types, keyed by model name.
    #[serde(default)]
    pub types: IndexMap<String, TypeConfig>,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentOverride>,
}

impl SpindleConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        let expanded = expand_env_vars(content);

        toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })
    }

    /// The base URL prepended to every relationship link.
    pub fn base_url(&self) -> &str {
        &self.document.base_url
    }

    /// Build a validated registry from the `[types]` tables.
    pub fn registry(&self) -> SchemaResult<Registry> {
        let entries = self.types.iter().map(|(name, ty)| ty.to_entry(name));
        Registry::builder().register_all(entries).build()
    }

    /// Apply environment-specific overrides.
    pub fn with_environment(mut self, env: &str) -> Self {
        if let Some(overrides) = self.environments.remove(env) {
            if let Some(document) = overrides.document {
                if let Some(base_url) = document.base_url {
                    self.document.base_url = base_url;
                }
            }
            if let Some(debug) = overrides.debug {
                if let Some(log_level) = debug.log_level {
                    self.debug.log_level = log_level;
                }
                if let Some(log_format) = debug.log_format {
                    self.debug.log_format = log_format;
                }
            }
        }
        self
    }
}

/// Document output configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Base URL for relationship links (supports `${ENV_VAR}` interpolation).
    /// Empty by default, which yields root-relative links.
    #[serde(default)]
    pub base_url: String,
}

/// Debug/logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format (json, pretty, compact).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "warn".to_string() }
fn default_log_format() -> String { "json".to_string() }
fn default_primary_key() -> String { "id".to_string() }

/// A `[types.<Model>]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    /// Wire type emitted in documents.
    pub wire_type: String,

    /// Primary key attribute.
    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    /// Relationships keyed by relation name.
    #[serde(default)]
    pub relationships: IndexMap<String, RelationshipConfig>,
}

impl TypeConfig {
    fn to_entry(&self, name: &str) -> TypeEntry {
        self.relationships.iter().fold(
            TypeEntry::new(name, self.wire_type.as_str()).primary_key(self.primary_key.as_str()),
            |entry, (rel_name, rel)| {
                entry.relationship(RelationshipDescriptor {
                    name: rel_name.as_str().into(),
                    cardinality: rel.cardinality,
                    related_model: rel.related.as_str().into(),
                    foreign_key: rel.foreign_key.as_deref().map(Into::into),
                })
            },
        )
    }
}

/// A `[types.<Model>.relationships.<name>]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelationshipConfig {
    /// Relationship cardinality.
    pub cardinality: Cardinality,

    /// Registry name of the related model.
    pub related: String,

    /// Foreign key attribute on the owning model (to-one only).
    pub foreign_key: Option<String>,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    /// Document overrides.
    pub document: Option<DocumentOverride>,

    /// Debug overrides.
    pub debug: Option<DebugOverride>,
}

/// Document configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentOverride {
    /// Override base_url.
    pub base_url: Option<String>,
}

/// Debug configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugOverride {
    /// Override log_level.
    pub log_level: Option<String>,

    /// Override log_format.
    pub log_format: Option<String>,
}

/// Expand environment variables in the format `${VAR_NAME}`.
fn expand_env_vars(content: &str) -> String {
    let Ok(re) = regex_lite::Regex::new(r"\$\{([^}]+)\}") else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}
