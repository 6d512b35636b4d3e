//! Configuration of the integrating wrapper
//!
//! ```toml
//! use_cache = true
//! debug = false
//! xml_stylesheet = "xs3p.xsl"
//! platform_prefixes = ["std::", "core::", "alloc::", "chrono::"]
//! documentations_uri = "http://meeuw.org/documentations"
//! ```

use crate::collector::DEFAULT_PLATFORM_PREFIXES;
use crate::diagnostics::{EtchError, EtchResult};
use crate::resolver::DOCUMENTATIONS_URI;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Wrapper configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtchConfig {
    /// Reuse results for the same roots through the process-wide cache
    pub use_cache: bool,
    /// Ask the merge step to annotate keys into its output
    pub debug: bool,
    /// Stylesheet reference the merge step adds to its output
    pub xml_stylesheet: Option<String>,
    /// Handle prefixes that are never visited
    pub platform_prefixes: Vec<String>,
    /// Reserved URI of the documentation handoff
    pub documentations_uri: String,
}

impl Default for EtchConfig {
    fn default() -> Self {
        Self {
            use_cache: false,
            debug: false,
            xml_stylesheet: None,
            platform_prefixes: DEFAULT_PLATFORM_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            documentations_uri: DOCUMENTATIONS_URI.to_string(),
        }
    }
}

impl EtchConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(s: &str) -> EtchResult<Self> {
        let config: EtchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> EtchResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check values that would make the handoff unusable
    pub fn validate(&self) -> EtchResult<()> {
        if self.documentations_uri.trim().is_empty() {
            return Err(EtchError::config("documentations_uri cannot be empty"));
        }
        if self.platform_prefixes.iter().any(|p| p.is_empty()) {
            return Err(EtchError::config(
                "an empty platform prefix would skip every type",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EtchConfig::from_toml_str("").unwrap();
        assert_eq!(config, EtchConfig::default());
        assert_eq!(config.documentations_uri, DOCUMENTATIONS_URI);
        assert_eq!(config.platform_prefixes, vec!["std::", "core::", "alloc::"]);
    }

    #[test]
    fn test_from_toml_str() {
        let config = EtchConfig::from_toml_str(
            r#"
            use_cache = true
            debug = true
            xml_stylesheet = "xs3p.xsl"
            "#,
        )
        .unwrap();
        assert!(config.use_cache);
        assert!(config.debug);
        assert_eq!(config.xml_stylesheet.as_deref(), Some("xs3p.xsl"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            EtchConfig::from_toml_str("documentations_uri = \"\""),
            Err(EtchError::Config(_))
        ));
        assert!(matches!(
            EtchConfig::from_toml_str("debug = \"yes\""),
            Err(EtchError::Toml(_))
        ));
        assert!(EtchConfig::from_toml_str("platform_prefixes = [\"\"]").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "use_cache = true").unwrap();
        let config = EtchConfig::from_file(file.path()).unwrap();
        assert!(config.use_cache);

        assert!(matches!(
            EtchConfig::from_file("/nonexistent/etch.toml"),
            Err(EtchError::Io(_))
        ));
    }
}
