use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::filters::is_absolute_url;

/// Path prefix every canonical file URL uses.
pub const FILES_PREFIX: &str = "/api/files/";
/// Legacy API path prefix rewritten to [`FILES_PREFIX`].
pub const LEGACY_API_PREFIX: &str = "/api/uploads/";
/// Legacy root upload prefix stripped down to the filename.
pub const LEGACY_UPLOADS_PREFIX: &str = "/uploads/";

/// Origin prepended to root-relative canonical paths.
///
/// The empty origin describes a same-origin deployment where `/api/files/...` is fetched
/// relative to the page. The value is used verbatim; trimming happens when configuration
/// is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ApiOrigin(String);

impl ApiOrigin {
    /// Wrap an origin such as `https://api.example.com`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into())
    }

    /// Origin used when files are served by the same host as the page.
    pub fn same_origin() -> Self {
        Self::default()
    }

    /// Borrow the raw origin string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no origin is prepended.
    pub fn is_same_origin(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ApiOrigin {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiOrigin {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ApiOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The rewrite rule that produced a canonical URL, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalRule {
    /// Absolute URL still pointing at `/api/uploads/`.
    LegacyAbsolute,
    /// Absolute URL returned unchanged.
    Absolute,
    /// Reference without any `/`.
    BareFilename,
    /// Root-relative path already under `/api/files/`.
    FilesPath,
    /// Root-relative path under `/api/uploads/`.
    LegacyApiPath,
    /// Root-relative path under `/uploads/`.
    UploadsPath,
    /// Any other relative path; only its last segment is kept.
    RelativePath,
}

impl CanonicalRule {
    /// Stable identifier used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LegacyAbsolute => "legacy-absolute",
            Self::Absolute => "absolute",
            Self::BareFilename => "bare-filename",
            Self::FilesPath => "files-path",
            Self::LegacyApiPath => "legacy-api-path",
            Self::UploadsPath => "uploads-path",
            Self::RelativePath => "relative-path",
        }
    }
}

impl fmt::Display for CanonicalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns stored file references into fetchable `/api/files/<filename>` URLs.
///
/// The origin is fixed at construction and never changes afterwards, so a resolver can be
/// built once at startup and shared by every caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUrlResolver {
    origin: ApiOrigin,
}

impl FileUrlResolver {
    /// Create a resolver prepending `origin` to root-relative canonical paths.
    pub fn new(origin: ApiOrigin) -> Self {
        Self { origin }
    }

    /// The configured origin.
    pub fn origin(&self) -> &ApiOrigin {
        &self.origin
    }

    /// Canonicalize a stored reference.
    ///
    /// Absent and empty references yield `None`. Otherwise the first matching rule wins:
    ///
    /// 1. absolute URL containing `/api/uploads/`: first occurrence becomes `/api/files/`
    /// 2. any other absolute URL: unchanged
    /// 3. no `/` at all: `origin + /api/files/ + reference`
    /// 4. starts with `/api/files/`: `origin + reference`
    /// 5. starts with `/api/uploads/`: prefix swapped for `/api/files/`, origin prepended
    /// 6. starts with `/uploads/`: prefix stripped, `origin + /api/files/ + rest`
    /// 7. anything else: `origin + /api/files/ + last segment`
    pub fn canonicalize(&self, reference: Option<&str>) -> Option<String> {
        let reference = reference.filter(|value| !value.is_empty())?;
        let (rule, url) = self.resolve(reference);
        tracing::trace!(reference, rule = rule.as_str(), url = %url, "canonicalized file reference");
        Some(url)
    }

    /// Report which rule [`canonicalize`](Self::canonicalize) applies to a reference.
    pub fn classify_rule(&self, reference: Option<&str>) -> Option<CanonicalRule> {
        let reference = reference.filter(|value| !value.is_empty())?;
        Some(self.resolve(reference).0)
    }

    /// Canonicalize every reference, dropping the ones without a URL and keeping order.
    pub fn canonicalize_all<I, S>(&self, references: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        references
            .into_iter()
            .filter_map(|reference| self.canonicalize(reference.as_ref().map(AsRef::as_ref)))
            .collect()
    }

    /// Canonicalize a JSON array of references.
    ///
    /// Anything other than an array yields an empty list; non-string elements are dropped.
    pub fn canonicalize_value(&self, value: &Value) -> Vec<String> {
        match value.as_array() {
            Some(items) => self.canonicalize_all(items.iter().map(Value::as_str)),
            None => Vec::new(),
        }
    }

    fn resolve(&self, reference: &str) -> (CanonicalRule, String) {
        if is_absolute_url(reference) {
            if reference.contains(LEGACY_API_PREFIX) {
                let url = reference.replacen(LEGACY_API_PREFIX, FILES_PREFIX, 1);
                return (CanonicalRule::LegacyAbsolute, url);
            }
            return (CanonicalRule::Absolute, reference.to_string());
        }

        if !reference.contains('/') {
            return (CanonicalRule::BareFilename, self.files_url(reference));
        }

        if reference.starts_with(FILES_PREFIX) {
            return (CanonicalRule::FilesPath, format!("{}{reference}", self.origin));
        }

        if let Some(rest) = reference.strip_prefix(LEGACY_API_PREFIX) {
            return (CanonicalRule::LegacyApiPath, self.files_url(rest));
        }

        if let Some(rest) = reference.strip_prefix(LEGACY_UPLOADS_PREFIX) {
            return (CanonicalRule::UploadsPath, self.files_url(rest));
        }

        let filename = reference
            .rsplit_once('/')
            .map_or(reference, |(_, tail)| tail);
        (CanonicalRule::RelativePath, self.files_url(filename))
    }

    fn files_url(&self, path: &str) -> String {
        format!("{}{FILES_PREFIX}{path}", self.origin)
    }
}
