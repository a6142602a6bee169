use cloudant_core::SdkError;

/// Reject document IDs that would address a reserved endpoint.
///
/// IDs starting with `_` are only valid as `_design/` or `_local/` IDs;
/// anything else (`_all_docs`, `_find`, ...) names a database endpoint.
pub fn check_doc_id(doc_id: &str) -> Result<(), SdkError> {
    if doc_id.starts_with('_') && !doc_id.starts_with("_design/") && !doc_id.starts_with("_local/") {
        return Err(SdkError::Validation(format!(
            "doc_id '{doc_id}' starts with '_'; use a design or local document operation for reserved IDs"
        )));
    }
    Ok(())
}

/// Reject attachment names that start with `_`
pub fn check_attachment_name(name: &str) -> Result<(), SdkError> {
    if name.starts_with('_') {
        return Err(SdkError::Validation(format!(
            "attachment_name '{name}' must not start with '_'"
        )));
    }
    Ok(())
}
