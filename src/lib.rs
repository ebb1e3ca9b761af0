#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod fields;
pub mod file_refs;
pub mod logging;
pub mod models;
pub mod payload;

pub use config::ResolverConfig;
pub use fields::{FieldInclusion, FieldSelection};
pub use file_refs::{
    ApiOrigin, CanonicalRule, FileUrlResolver, MediaKind, extract_filename, is_image_reference,
    is_recognized_file_reference, is_video_reference,
};
pub use models::{ResolvedFile, RewriteSummary};
pub use payload::rewrite_payload;
