//! Selection of which JSON payload fields hold file references.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Trait describing which payload fields should be rewritten as file references.
pub trait FieldInclusion {
  /// Returns `true` when the field at `path` (keys joined with `/`) holds file references.
  fn is_file_field(&self, path: &str) -> bool;
}

/// Fields the marketplace API uses for uploaded media.
pub const DEFAULT_FILE_FIELDS: &[&str] = &[
  "avatar_url",
  "portfolio_images",
  "portfolio_videos",
  "landing_page_hero_image",
];

/// Raw include/exclude rules as they appear in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRules {
  /// Field names or slash-joined paths to rewrite.
  pub include: Vec<String>,
  /// Field names or paths to leave alone even when included.
  pub exclude: Vec<String>,
}

impl Default for FieldRules {
  fn default() -> Self {
    Self {
      include: DEFAULT_FILE_FIELDS.iter().map(|field| field.to_string()).collect(),
      exclude: Vec::new(),
    }
  }
}

/// Normalised field rules used while walking payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
  include: BTreeSet<String>,
  exclude: BTreeSet<String>,
}

/// Errors that can occur while loading a field selection file.
#[derive(Debug)]
pub enum FieldSelectionError {
  /// Failed to read the selection file from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON selection file.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl FieldSelection {
  /// Load rules from a JSON file, falling back to the default fields when it is missing.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, FieldSelectionError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        tracing::debug!(path = %path.display(), "no field selection file, using defaults");
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(FieldSelectionError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    let rules: FieldRules =
      serde_json::from_str(&contents).map_err(|err| FieldSelectionError::Parse {
        path: path.to_path_buf(),
        source: err,
      })?;
    Ok(Self::from(rules))
  }

  /// Determine whether the field at `path` holds file references.
  pub fn is_file_field(&self, path: &str) -> bool {
    if self.exclude.iter().any(|rule| scope_matches(rule, path)) {
      return false;
    }

    self.include.iter().any(|rule| scope_matches(rule, path))
  }

  /// Returns true when no field would ever be rewritten.
  pub fn is_empty(&self) -> bool {
    self.include.is_empty()
  }
}

impl Default for FieldSelection {
  fn default() -> Self {
    Self::from(FieldRules::default())
  }
}

impl FieldInclusion for FieldSelection {
  fn is_file_field(&self, path: &str) -> bool {
    FieldSelection::is_file_field(self, path)
  }
}

impl From<FieldRules> for FieldSelection {
  fn from(rules: FieldRules) -> Self {
    Self {
      include: normalise_list(rules.include),
      exclude: normalise_list(rules.exclude),
    }
  }
}

impl std::fmt::Display for FieldSelectionError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for FieldSelectionError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
    }
  }
}

/// Convert a list of raw rules into a sorted, de-duplicated set.
///
/// Values are trimmed of whitespace and surrounding slashes; empty entries are discarded.
fn normalise_list(values: impl IntoIterator<Item = String>) -> BTreeSet<String> {
  values
    .into_iter()
    .map(|value| value.trim().trim_matches('/').to_string())
    .filter(|value| !value.is_empty())
    .collect()
}

/// A rule matches a path it equals, or the trailing segments of a longer path.
fn scope_matches(rule: &str, path: &str) -> bool {
  if path == rule {
    return true;
  }

  path
    .strip_suffix(rule)
    .is_some_and(|prefix| prefix.ends_with('/'))
}
