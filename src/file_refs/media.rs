use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::filename::extract_filename;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".avi", ".webm", ".mkv"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".txt"];
const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".tar", ".gz"];

/// Media category of a recognized file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `.jpg .jpeg .png .gif .webp .svg`
    Image,
    /// `.mp4 .mov .avi .webm .mkv`
    Video,
    /// `.pdf .doc .docx .txt`
    Document,
    /// `.zip .tar .gz`
    Archive,
}

impl MediaKind {
    /// Every kind, in the order extension groups are checked.
    pub const ALL: [MediaKind; 4] = [Self::Image, Self::Video, Self::Document, Self::Archive];

    /// Extensions (with leading dot, lowercase) belonging to this kind.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_EXTENSIONS,
            Self::Video => VIDEO_EXTENSIONS,
            Self::Document => DOCUMENT_EXTENSIONS,
            Self::Archive => ARCHIVE_EXTENSIONS,
        }
    }

    /// Classify a bare filename by case-insensitive extension suffix.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        Self::ALL.into_iter().find(|kind| {
            kind.extensions()
                .iter()
                .any(|extension| lower.ends_with(extension))
        })
    }

    /// Classify a reference by the extension of its filename.
    pub fn from_reference(reference: Option<&str>) -> Option<Self> {
        extract_filename(reference).and_then(Self::from_filename)
    }

    /// Lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` when the reference's filename ends with an allowed extension.
pub fn is_recognized_file_reference(reference: Option<&str>) -> bool {
    MediaKind::from_reference(reference).is_some()
}

/// JSON flavour of [`is_recognized_file_reference`]; non-string values are never recognized.
pub fn is_recognized_value(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|reference| is_recognized_file_reference(Some(reference)))
}

/// Returns `true` when an image extension appears anywhere in the URL.
///
/// Unlike [`is_recognized_file_reference`] this is a substring test over the whole string,
/// so `photo.png.bak` or `pic.png?size=large` both count as images.
pub fn is_image_reference(url: Option<&str>) -> bool {
    contains_extension(url, IMAGE_EXTENSIONS)
}

/// Returns `true` when a video extension appears anywhere in the URL.
pub fn is_video_reference(url: Option<&str>) -> bool {
    contains_extension(url, VIDEO_EXTENSIONS)
}

fn contains_extension(url: Option<&str>, extensions: &[&str]) -> bool {
    let Some(url) = url.filter(|value| !value.is_empty()) else {
        return false;
    };
    let lower = url.to_lowercase();
    extensions.iter().any(|extension| lower.contains(extension))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn recognizes_allowed_extensions_case_insensitively() {
        assert!(is_recognized_file_reference(Some("photo.JPG")));
        assert!(is_recognized_file_reference(Some("/api/files/report.Pdf")));
        assert!(is_recognized_file_reference(Some("backup.tar.gz")));
        assert!(is_recognized_file_reference(Some("https://h/api/files/clip.webm")));
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert!(!is_recognized_file_reference(Some("archive.rar")));
        assert!(!is_recognized_file_reference(Some("README")));
        assert!(!is_recognized_file_reference(Some("/api/files/a.png?v=1")));
    }

    #[test]
    fn rejects_absent_empty_and_directory_references() {
        assert!(!is_recognized_file_reference(None));
        assert!(!is_recognized_file_reference(Some("")));
        assert!(!is_recognized_file_reference(Some("images.png/")));
    }

    #[test]
    fn json_values_must_be_strings() {
        assert!(is_recognized_value(&json!("photo.png")));
        assert!(!is_recognized_value(&json!(42)));
        assert!(!is_recognized_value(&json!(["photo.png"])));
        assert!(!is_recognized_value(&json!(null)));
    }

    #[test]
    fn classifies_each_extension_group() {
        assert_eq!(MediaKind::from_filename("a.SVG"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_filename("a.mkv"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_filename("a.docx"), Some(MediaKind::Document));
        assert_eq!(MediaKind::from_filename("a.zip"), Some(MediaKind::Archive));
        assert_eq!(MediaKind::from_filename("a.rar"), None);
    }

    #[test]
    fn classification_agrees_with_recognition() {
        for reference in ["a.png", "b.mov", "c.txt", "d.gz", "e.rar", "f/", ""] {
            assert_eq!(
                MediaKind::from_reference(Some(reference)).is_some(),
                is_recognized_file_reference(Some(reference)),
                "{reference}"
            );
        }
    }

    #[test]
    fn image_and_video_checks_match_substrings() {
        assert!(is_image_reference(Some("https://h/api/files/PIC.PNG")));
        assert!(is_image_reference(Some("/api/files/pic.png?size=large")));
        assert!(is_video_reference(Some("clip.MOV")));
        assert!(!is_video_reference(Some("pic.png")));
        assert!(!is_image_reference(Some("clip.mp4")));
        assert!(!is_image_reference(None));
        assert!(!is_video_reference(Some("")));
    }

    #[test]
    fn substring_checks_are_looser_than_recognition() {
        // contains-match over the whole string versus suffix-match over the filename
        assert!(is_image_reference(Some("photo.png.bak")));
        assert!(!is_recognized_file_reference(Some("photo.png.bak")));

        assert!(is_video_reference(Some("/api/files/clip.mp4?download=1")));
        assert!(!is_recognized_file_reference(Some("/api/files/clip.mp4?download=1")));

        assert!(is_image_reference(Some("/gallery.jpg/readme")));
        assert!(!is_recognized_file_reference(Some("/gallery.jpg/readme")));
    }

    #[test]
    fn serializes_as_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&MediaKind::Document).expect("serialize media kind"),
            "\"document\""
        );
        assert_eq!(MediaKind::Archive.to_string(), "archive");
    }
}
