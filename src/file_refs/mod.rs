//! Canonicalization and classification of stored file references.
//!
//! Stored references come in several shapes: absolute URLs, legacy `/api/uploads/` paths,
//! `/uploads/` paths, bare filenames and arbitrary relative paths. The submodules split
//! detecting absolute URLs, extracting filenames, rewriting references into the
//! `/api/files/<filename>` convention and classifying media types so each can be tested on
//! its own.

mod canonical;
mod filename;
mod filters;
mod media;

pub use canonical::{
    ApiOrigin, CanonicalRule, FILES_PREFIX, FileUrlResolver, LEGACY_API_PREFIX,
    LEGACY_UPLOADS_PREFIX,
};
pub use filename::extract_filename;
pub use filters::is_absolute_url;
pub use media::{
    MediaKind, is_image_reference, is_recognized_file_reference, is_recognized_value,
    is_video_reference,
};
