//! Source loading for named run configurations.
//!
//! A configuration source is named, not addressed: `load_source("voyage")`
//! reads `<config-dir>/voyage.toml`. The config directory is `config_files/`
//! under the working directory unless `CORSAIR_CONFIG_DIR` overrides it.
//!
//! A missing source is not an error at this stage: it is reported and an
//! empty [`RawSource`] is returned, so resolution either fails on its first
//! required read or is explicitly switched to the default table. A source
//! that exists but does not parse is a hard error.

use crate::config::errors::ConfigError;
use crate::config::types::RawSource;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory holding named configuration sources.
///
/// `CORSAIR_CONFIG_DIR` overrides the conventional `config_files/` location.
pub fn config_dir() -> PathBuf {
    match std::env::var("CORSAIR_CONFIG_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("config_files"),
    }
}

/// Path a source name resolves to.
pub fn source_path(name: &str) -> PathBuf {
    config_dir().join(format!("{name}.toml"))
}

/// Load the named configuration source from the conventional directory.
///
/// # Errors
///
/// Returns an error if the source exists but cannot be read or parsed.
/// A missing source is not an error: it is reported and an empty
/// [`RawSource`] is returned.
pub fn load_source(name: &str) -> Result<RawSource, ConfigError> {
    load_source_from(&config_dir(), name)
}

/// Load a named configuration source from an explicit directory.
///
/// Same contract as [`load_source`]; the directory argument replaces the
/// conventional location.
pub fn load_source_from(dir: &Path, name: &str) -> Result<RawSource, ConfigError> {
    let path = dir.join(format!("{name}.toml"));
    match read_source(&path) {
        Ok(raw) => {
            info!(
                event = "core.config.source_loaded",
                source = name,
                path = %path.display(),
                sections = raw.section_count()
            );
            Ok(raw)
        }
        Err(ConfigError::SourceNotFound { .. }) => {
            warn!(
                event = "core.config.source_missing",
                source = name,
                path = %path.display(),
                "Config source not found, continuing with an empty source"
            );
            Ok(RawSource::default())
        }
        Err(e) => Err(e),
    }
}

/// Read and parse a source file.
fn read_source(path: &Path) -> Result<RawSource, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::SourceNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    parse_source(&content).map_err(|e| match e {
        ConfigError::SourceParse { message } => ConfigError::SourceParse {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })
}

/// Parse source content into the raw section mapping.
///
/// Every top-level entry must be a table; scalar values stay untyped inside
/// their section until resolution.
///
/// # Errors
///
/// Returns an error on invalid TOML or on a top-level entry that is not a
/// section table.
pub fn parse_source(content: &str) -> Result<RawSource, ConfigError> {
    let table: toml::Table = toml::from_str(content).map_err(|e| ConfigError::SourceParse {
        message: e.to_string(),
    })?;

    let mut sections = BTreeMap::new();
    for (name, value) in table {
        match value {
            toml::Value::Table(entries) => {
                sections.insert(name, entries);
            }
            _ => return Err(ConfigError::MalformedSection { section: name }),
        }
    }

    Ok(RawSource::new(sections))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path_convention() {
        let path = source_path("voyage");
        assert!(path.to_string_lossy().ends_with("voyage.toml"));
    }

    #[test]
    fn test_missing_source_is_soft() {
        let temp_dir = tempfile::tempdir().unwrap();

        let raw = load_source_from(temp_dir.path(), "absent").unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn test_valid_source_loads_sections() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("voyage.toml"),
            r#"
[environment]
env_use_default = false
env_size = 10

[agent]
agent_batch_size = 64
"#,
        )
        .unwrap();

        let raw = load_source_from(temp_dir.path(), "voyage").unwrap();
        assert_eq!(raw.section_count(), 2);
        let environment = raw.section("environment").unwrap();
        assert_eq!(
            environment.get("env_size"),
            Some(&toml::Value::Integer(10))
        );
    }

    #[test]
    fn test_invalid_toml_is_a_hard_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "invalid toml [[[").unwrap();

        let result = load_source_from(temp_dir.path(), "broken");
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::SourceParse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_top_level_scalar_is_rejected() {
        let result = parse_source("environment = 5");
        assert!(matches!(
            result,
            Err(ConfigError::MalformedSection { section }) if section == "environment"
        ));
    }

    #[test]
    fn test_parse_source_keeps_values_untyped() {
        let raw = parse_source(
            r#"
[environment]
env_size = 10
env_epsilon_decay = 0.99
env_use_default = false
"#,
        )
        .unwrap();

        let environment = raw.section("environment").unwrap();
        assert!(environment.get("env_size").unwrap().is_integer());
        assert!(environment.get("env_epsilon_decay").unwrap().is_float());
        assert!(environment.get("env_use_default").unwrap().is_bool());
    }
}
