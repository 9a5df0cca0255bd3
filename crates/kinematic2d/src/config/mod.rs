//! Configuration file support
//!
//! Any configuration type that is `Serialize + Deserialize + Default` can be
//! loaded from and saved to disk. The format is picked from the extension:
//! `.toml` or `.ron`.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check semantic constraints after parsing
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Parse configuration from a string in the format implied by `path`
    fn from_str_for_path(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let parsed: Self = match Format::of(path)? {
            Format::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            Format::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading configuration from {}", path.display());
        Self::from_str_for_path(&contents, path)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Parsed values violate a constraint
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    impl Config for Sample {
        fn validate(&self) -> Result<(), ConfigError> {
            if self.count > 100 {
                return Err(ConfigError::Invalid("count too large".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_parse_toml_and_ron() {
        let toml_sample =
            Sample::from_str_for_path("name = \"a\"\ncount = 3\n", Path::new("x.toml")).unwrap();
        let ron_sample =
            Sample::from_str_for_path("(name: \"a\", count: 3)", Path::new("x.ron")).unwrap();
        assert_eq!(toml_sample, ron_sample);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Sample::from_str_for_path("{}", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let err = Sample::from_str_for_path("(name: \"a\", count: 300)", Path::new("x.ron"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let path = std::env::temp_dir().join(format!("kinematic2d-config-{}.ron", std::process::id()));
        let sample = Sample { name: "disk".to_string(), count: 7 };
        sample.save_to_file(&path).unwrap();
        let loaded = Sample::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, sample);
    }
}
