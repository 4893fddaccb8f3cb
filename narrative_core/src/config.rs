//! Story configuration - the data half of a story definition.
//!
//! Nouns, the discourse table, and an optional seed come from a TOML or JSON
//! document. Rules and the initializer are code and are attached through
//! [`crate::NarrativeBuilder`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use story_world::Noun;

use crate::error::ConfigError;

/// Nouns, templates, and seed for one story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Seed for random choices in rules and templates. Absent means entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Nouns in declaration order.
    #[serde(default)]
    pub nouns: Vec<Noun>,

    /// Verb (or helper symbol) -> template alternatives.
    #[serde(default)]
    pub discourse: BTreeMap<String, Vec<String>>,
}

impl NarrativeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a story file, choosing the parser by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_world::Value;

    #[test]
    fn test_from_toml() {
        let config = NarrativeConfig::from_toml_str(
            r##"
            seed = 42

            [[nouns]]
            name = "Chris"
            tags = ["person"]
            properties = { sleepiness = 0 }

            [[nouns]]
            name = "king-size bed"
            tags = ["bed"]
            properties = { occupied = false }

            [discourse]
            moreSleepy = ["#nounA# yawns."]
            _end = ["Good night."]
            "##,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.nouns.len(), 2);
        assert_eq!(config.nouns[0].property("sleepiness"), Some(&Value::Int(0)));
        assert_eq!(config.nouns[1].property("occupied"), Some(&Value::Bool(false)));
        assert_eq!(config.discourse["_end"], vec!["Good night.".to_string()]);
    }

    #[test]
    fn test_from_json() {
        let config = NarrativeConfig::from_json_str(
            r##"{
                "nouns": [
                    {"name": "cookie", "properties": {"tastiness": 2, "eaten": false}, "tags": ["food"]}
                ],
                "discourse": {"eat": ["#nounA# ate a #nounB#."]}
            }"##,
        )
        .unwrap();

        assert!(config.seed.is_none());
        assert!(config.nouns[0].has_tag("food"));
        assert!(config.discourse.contains_key("eat"));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            NarrativeConfig::from_json_str("{\"nouns\": 3}"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            NarrativeConfig::from_toml_str("nouns = ["),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        assert!(matches!(
            NarrativeConfig::load("story.yaml"),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            NarrativeConfig::load("does-not-exist.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
