//! Rewriting file references embedded in backend JSON payloads.
//!
//! Profiles and campaigns carry uploaded media under fields such as `avatar_url` or
//! `portfolio_images`. The rewriter walks a payload, and for every field the selection marks
//! as a file field it replaces strings with canonical URLs and arrays with their canonical
//! URL lists. Everything else in the payload is left as it was.

use serde_json::Value;

use crate::fields::FieldInclusion;
use crate::file_refs::FileUrlResolver;
use crate::models::RewriteSummary;

/// Rewrite every selected file field of `payload` in place.
pub fn rewrite_payload<S: FieldInclusion>(
    resolver: &FileUrlResolver,
    selection: &S,
    payload: &mut Value,
) -> RewriteSummary {
    let mut rewriter = PayloadRewriter {
        resolver,
        selection,
        summary: RewriteSummary::default(),
    };
    rewriter.visit("", payload);

    tracing::debug!(
        rewritten = rewriter.summary.rewritten_fields,
        dropped = rewriter.summary.dropped_entries,
        "rewrote payload file fields"
    );
    rewriter.summary
}

struct PayloadRewriter<'a, S> {
    resolver: &'a FileUrlResolver,
    selection: &'a S,
    summary: RewriteSummary,
}

impl<S: FieldInclusion> PayloadRewriter<'_, S> {
    fn visit(&mut self, path: &str, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    let child_path = join_path(path, key);
                    if self.selection.is_file_field(&child_path) {
                        self.rewrite_field(&child_path, child);
                    } else {
                        self.visit(&child_path, child);
                    }
                }
            }
            // array elements share their parent's path
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.visit(path, item);
                }
            }
            _ => {}
        }
    }

    fn rewrite_field(&mut self, path: &str, value: &mut Value) {
        match value {
            Value::String(reference) => {
                let url = self.resolver.canonicalize(Some(reference.as_str()));
                *value = url.map_or(Value::Null, Value::String);
            }
            Value::Array(items) => {
                let urls = self
                    .resolver
                    .canonicalize_all(items.iter().map(Value::as_str));
                self.summary.dropped_entries += items.len() - urls.len();
                *items = urls.into_iter().map(Value::String).collect();
            }
            Value::Null => return,
            other => {
                tracing::debug!(path, kind = value_kind(other), "skipping non-reference file field");
                return;
            }
        }
        self.summary.rewritten_fields += 1;
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}/{key}")
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
