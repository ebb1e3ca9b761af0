//! Resolver configuration: API origin and payload field rules, loaded once at startup.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fields::{FieldRules, FieldSelection};
use crate::file_refs::{ApiOrigin, FileUrlResolver};

/// Configuration file searched for by [`ResolverConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "file_urls.config.json";

/// Environment variable holding the backend origin in deployed front-ends.
pub const API_ORIGIN_ENV: &str = "REACT_APP_BACKEND_URL";

/// Discoverable configuration describing where files are served from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Origin prepended to `/api/files/...` paths; empty for same-origin deployments.
    pub api_origin: String,
    /// Payload fields holding file references.
    pub fields: FieldRules,
}

impl ResolverConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing or unparsable file falls back to default values.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if !candidate.exists() {
            tracing::debug!(path = %candidate.display(), "no resolver config, using defaults");
            return Self::default();
        }

        Self::from_path(&candidate).unwrap_or_else(|err| {
            tracing::warn!("ignoring resolver config: {err:#}");
            Self::default()
        })
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Replace the origin with the value of [`API_ORIGIN_ENV`] when it is set.
    pub fn with_env_override(self) -> Self {
        self.with_origin_override(env::var(API_ORIGIN_ENV).ok())
    }

    /// Replace the origin when `origin` is present.
    pub fn with_origin_override(mut self, origin: Option<String>) -> Self {
        if let Some(origin) = origin {
            self.api_origin = origin;
        }
        self
    }

    /// Origin with surrounding whitespace and trailing slashes removed.
    pub fn origin(&self) -> ApiOrigin {
        ApiOrigin::new(self.api_origin.trim().trim_end_matches('/'))
    }

    /// Borrowing conversion into a resolver.
    pub fn resolver(&self) -> FileUrlResolver {
        FileUrlResolver::new(self.origin())
    }

    /// Field selection built from the configured rules.
    pub fn selection(&self) -> FieldSelection {
        FieldSelection::from(self.fields.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_to_same_origin() {
        let config = ResolverConfig::default();
        assert!(config.origin().is_same_origin());
        assert_eq!(
            config.resolver().canonicalize(Some("a.png")).as_deref(),
            Some("/api/files/a.png")
        );
        assert!(config.selection().is_file_field("avatar_url"));
    }

    #[test]
    fn discover_falls_back_when_file_missing() {
        let temp = tempdir().expect("failed to create temp dir");
        assert_eq!(ResolverConfig::discover(temp.path()), ResolverConfig::default());
    }

    #[test]
    fn discover_falls_back_when_file_invalid() {
        let temp = tempdir().expect("failed to create temp dir");
        fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "[1, 2").expect("write config");
        assert_eq!(ResolverConfig::discover(temp.path()), ResolverConfig::default());
    }

    #[test]
    fn discover_reads_origin_and_fields() {
        let temp = tempdir().expect("failed to create temp dir");
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{"apiOrigin": "https://api.example.com/", "fields": {"include": ["logo"]}}"#,
        )
        .expect("write config");

        let config = ResolverConfig::discover(temp.path());

        assert_eq!(config.origin(), ApiOrigin::new("https://api.example.com"));
        assert_eq!(
            config.resolver().canonicalize(Some("/uploads/a.png")).as_deref(),
            Some("https://api.example.com/api/files/a.png")
        );
        let selection = config.selection();
        assert!(selection.is_file_field("brand/logo"));
        assert!(!selection.is_file_field("avatar_url"));
    }

    #[test]
    fn from_path_reports_context() {
        let temp = tempdir().expect("failed to create temp dir");
        let path = temp.path().join("missing.json");
        let err = ResolverConfig::from_path(&path).expect_err("missing file should fail");
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn partial_config_keeps_default_fields() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{"apiOrigin": "http://localhost:8001"}"#).expect("parse");
        assert_eq!(config.fields, FieldRules::default());
    }

    #[test]
    fn origin_override_replaces_configured_origin() {
        let config = ResolverConfig {
            api_origin: "https://old.example.com".into(),
            ..ResolverConfig::default()
        };

        let unchanged = config.clone().with_origin_override(None);
        assert_eq!(unchanged.api_origin, "https://old.example.com");

        let replaced = config.with_origin_override(Some(" https://new.example.com// ".into()));
        assert_eq!(replaced.origin().as_str(), "https://new.example.com");
    }
}
