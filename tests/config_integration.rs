//! Integration tests for `spindle.toml` parsing and registry construction.

use pretty_assertions::assert_eq;
use std::io::Write;

use spindle::schema::{Cardinality, SchemaError, SpindleConfig};
use spindle::{AdapterOptions, DocumentAssembler, LinkBuilder, Primary, Record};

const BLOG: &str = r#"
    [document]
    base_url = "https://api.example.com"

    [debug]
    log_level = "info"
    log_format = "pretty"

    [types.Post]
    wire_type = "posts"

    [types.Post.relationships.author]
    cardinality = "toOne"
    related = "Author"
    foreign_key = "author_id"

    [types.Post.relationships.tags]
    cardinality = "manyToMany"
    related = "Tag"

    [types.Author]
    wire_type = "people"

    [types.Author.relationships.posts]
    cardinality = "hasMany"
    related = "Post"

    [types.Tag]
    wire_type = "tags"
    primary_key = "slug"

    [environments.production.document]
    base_url = "https://prod.example.com"

    [environments.production.debug]
    log_level = "error"
"#;

/// Test minimal configuration
#[test]
fn test_config_minimal() {
    let config = SpindleConfig::from_str(
        r#"
        [types.Post]
        wire_type = "posts"
        "#,
    )
    .expect("Failed to parse config");

    assert_eq!(config.base_url(), "");
    assert_eq!(config.debug.log_level, "warn");
    assert_eq!(config.debug.log_format, "json");

    let registry = config.registry().expect("registry");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("Post").map(|t| t.primary_key.as_str()), Some("id"));
}

/// Test full configuration with relationships
#[test]
fn test_config_full() {
    let config = SpindleConfig::from_str(BLOG).expect("Failed to parse config");
    let registry = config.registry().expect("registry");

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.wire_type("Author"), Some("people"));

    let author = registry.relationship("Post", "author").expect("author");
    assert_eq!(author.cardinality, Cardinality::ToOne);
    assert_eq!(author.foreign_key.as_deref(), Some("author_id"));

    let tags = registry.relationship("Post", "tags").expect("tags");
    assert_eq!(tags.cardinality, Cardinality::ToMany);
    assert_eq!(tags.related_model.as_str(), "Tag");

    assert_eq!(
        registry.get("Tag").map(|t| t.primary_key.as_str()),
        Some("slug")
    );
}

/// Test environment overrides
#[test]
fn test_config_environment_override() {
    let config = SpindleConfig::from_str(BLOG)
        .expect("Failed to parse config")
        .with_environment("production");

    assert_eq!(config.base_url(), "https://prod.example.com");
    assert_eq!(config.debug.log_level, "error");
    assert_eq!(config.debug.log_format, "pretty");

    let unchanged = SpindleConfig::from_str(BLOG)
        .expect("Failed to parse config")
        .with_environment("staging");
    assert_eq!(unchanged.base_url(), "https://api.example.com");
}

/// Test environment variable expansion
#[test]
fn test_config_env_expansion() {
    // SAFETY: the variable is unique to this test
    unsafe {
        std::env::set_var("SPINDLE_IT_BASE_URL", "https://env.example.com");
    }

    let config = SpindleConfig::from_str(
        r#"
        [document]
        base_url = "${SPINDLE_IT_BASE_URL}"

        [types.Post]
        wire_type = "posts"
        "#,
    )
    .expect("Failed to parse config");
    assert_eq!(config.base_url(), "https://env.example.com");

    let unset = SpindleConfig::from_str(
        r#"
        [document]
        base_url = "${SPINDLE_IT_NEVER_SET}"
        "#,
    )
    .expect("Failed to parse config");
    assert_eq!(unset.base_url(), "${SPINDLE_IT_NEVER_SET}");
}

/// Test loading from a file on disk
#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(BLOG.as_bytes()).expect("write");

    let config = SpindleConfig::from_file(file.path()).expect("load");
    assert_eq!(config.types.len(), 3);

    let err = SpindleConfig::from_file("/nonexistent/spindle.toml").expect_err("missing file");
    assert!(matches!(err, SchemaError::IoError { .. }));
}

/// Invalid configurations are rejected
#[test]
fn test_config_invalid() {
    let err = SpindleConfig::from_str("[types.Post]\nwire_type = 3\n").expect_err("bad type");
    assert!(matches!(err, SchemaError::TomlError { .. }));

    let err = SpindleConfig::from_str("[document]\nbase = \"x\"\n").expect_err("unknown field");
    assert!(matches!(err, SchemaError::TomlError { .. }));

    let err = SpindleConfig::from_str(
        r#"
        [types.Post.relationships.author]
        cardinality = "sometimes"
        related = "Author"
        "#,
    )
    .expect_err("bad cardinality");
    assert!(matches!(err, SchemaError::TomlError { .. }));

    let empty = SpindleConfig::from_str("").expect("empty config parses");
    let err = empty.registry().expect_err("no types");
    assert!(matches!(err, SchemaError::ConfigError { .. }));

    let dangling = SpindleConfig::from_str(
        r#"
        [types.Post]
        wire_type = "posts"

        [types.Post.relationships.author]
        cardinality = "toOne"
        related = "Author"
        "#,
    )
    .expect("parses");
    assert!(matches!(
        dangling.registry().expect_err("unknown related model"),
        SchemaError::UnknownType { .. }
    ));
}

/// A configured registry drives document output
#[test]
fn test_config_drives_documents() {
    let config = SpindleConfig::from_str(BLOG).expect("Failed to parse config");
    let registry = config.registry().expect("registry");
    let links = LinkBuilder::new(AdapterOptions::from(&config).base_url);

    let post = Record::new("Post", 1)
        .attr("title", "Hello")
        .attr("author_id", 7)
        .with_unloaded("author");

    let doc = DocumentAssembler::new(&registry, &links)
        .assemble::<&str>("Post", Primary::One(&post), &[])
        .expect("assemble");
    let value = doc.to_value().expect("json");

    assert_eq!(
        value["data"]["relationships"]["author"]["links"]["related"],
        "https://api.example.com/posts/1/author"
    );
    assert_eq!(
        value["data"]["relationships"]["author"]["data"],
        serde_json::json!({"type": "people", "id": "7"})
    );
}

/// A parsed configuration survives a TOML round trip
#[test]
fn test_config_toml_round_trip() {
    let config = SpindleConfig::from_str(BLOG).expect("Failed to parse config");

    let rendered = toml::to_string(&config).expect("serialize config");
    let reparsed = SpindleConfig::from_str(&rendered).expect("reparse config");

    assert_eq!(reparsed.base_url(), config.base_url());
    assert_eq!(reparsed.debug.log_format, "pretty");
    assert_eq!(
        reparsed.types.keys().collect::<Vec<_>>(),
        vec!["Post", "Author", "Tag"]
    );
    assert!(rendered.contains("cardinality = \"toMany\""));

    let registry = reparsed.registry().expect("registry");
    assert_eq!(
        registry.relationship("Post", "author").and_then(|r| r.foreign_key.as_deref()),
        Some("author_id")
    );
}
