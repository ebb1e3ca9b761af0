/// Extract the bare filename from a URL or path.
///
/// The reference is split on `/` and the last segment is returned. References ending in
/// `/` have no filename.
pub fn extract_filename(reference: Option<&str>) -> Option<&str> {
    let reference = reference.filter(|value| !value.is_empty())?;
    let last = reference.rsplit('/').next()?;
    (!last.is_empty()).then_some(last)
}
