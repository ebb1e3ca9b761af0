//! Data structures reported by the resolver and payload rewriter.

use serde::Serialize;

use crate::file_refs::{
  CanonicalRule, FileUrlResolver, MediaKind, extract_filename, is_recognized_file_reference,
};

/// Everything known about a single stored file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFile {
  /// Reference exactly as it was stored.
  pub reference: String,
  /// Canonical URL, absent for empty references.
  pub url: Option<String>,
  /// Rewrite rule that produced `url`.
  pub rule: Option<CanonicalRule>,
  /// Last path segment of the reference.
  pub filename: Option<String>,
  /// Media category derived from the filename extension.
  pub kind: Option<MediaKind>,
  /// Whether the filename carries an allowed extension.
  pub recognized: bool,
}

impl ResolvedFile {
  /// Resolve `reference` against the resolver's origin.
  pub fn new(resolver: &FileUrlResolver, reference: &str) -> Self {
    let stored = Some(reference);
    Self {
      reference: reference.to_string(),
      url: resolver.canonicalize(stored),
      rule: resolver.classify_rule(stored),
      filename: extract_filename(stored).map(str::to_string),
      kind: MediaKind::from_reference(stored),
      recognized: is_recognized_file_reference(stored),
    }
  }
}

/// Counters describing what a payload rewrite touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteSummary {
  /// Selected fields whose value was replaced.
  pub rewritten_fields: usize,
  /// Array entries removed because they had no canonical URL.
  pub dropped_entries: usize,
}

impl RewriteSummary {
  /// Returns `true` when the payload was left untouched.
  pub fn is_noop(&self) -> bool {
    self.rewritten_fields == 0
  }
}
