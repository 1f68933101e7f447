//! # spindle-schema
//!
//! Type registry and configuration for the Spindle JSON:API document builder.
//!
//! This crate provides:
//! - The [`Registry`] of model names, wire types and declared relationships
//! - Relationship descriptors with a closed [`Cardinality`]
//! - Configuration parser for `spindle.toml` files
//!
//! ## Example
//!
//! ```rust,ignore
//! use spindle_schema::SpindleConfig;
//!
//! let config = SpindleConfig::from_file("spindle.toml")?;
//! let registry = config.registry()?;
//! ```

pub mod config;
pub mod error;
pub mod registry;

pub use config::SpindleConfig;
pub use error::{SchemaError, SchemaResult};
pub use registry::{Cardinality, Registry, RegistryBuilder, RelationshipDescriptor, TypeEntry};
