//! Config document formats.

use std::collections::BTreeMap;
use std::path::Path;

use crate::{ConfigError, Value};

/// A supported config document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Picks the format from the file extension: `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            None => Err(ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            }),
            Some(_) => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parses a document whose root must be a mapping. An empty (`null`)
    /// document parses as an empty mapping.
    pub fn parse(self, text: &str) -> Result<BTreeMap<String, Value>, ConfigError> {
        let root = match self {
            Format::Json => Value::from(serde_json::from_str::<serde_json::Value>(text)?),
            Format::Yaml => Value::from(serde_yaml::from_str::<serde_yaml::Value>(text)?),
        };
        match root {
            Value::Map(map) => Ok(map),
            Value::Null => Ok(BTreeMap::new()),
            other => Err(ConfigError::NotAMapping {
                found: other.kind_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path(Path::new("a/b.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("b.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("b.yaml")).unwrap(), Format::Yaml);
        assert!(matches!(
            Format::from_path(Path::new("config")),
            Err(ConfigError::UnknownFormat { .. })
        ));
        assert!(matches!(
            Format::from_path(Path::new("config.toml")),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_mapping_root() {
        let err = Format::Json.parse("[1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { found: "list" }));
        let err = Format::Yaml.parse("just a string").unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { found: "string" }));
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(Format::Yaml.parse("").unwrap(), BTreeMap::new());
        assert_eq!(Format::Json.parse("null").unwrap(), BTreeMap::new());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Format::Json.parse("{"), Err(ConfigError::Json(_))));
        assert!(matches!(Format::Yaml.parse("a: [1"), Err(ConfigError::Yaml(_))));
    }
}
