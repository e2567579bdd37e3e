//! Request validators for the file routes.
//!
//! Every check here runs before any upstream call; a failure produces an
//! `AppError` that already carries its HTTP status and machine code.

use crate::constants::{
    DEFAULT_PAGE_SIZE, FILE_NAME_PREFIX, MAX_DISPLAY_NAME_LENGTH, MAX_PAGE_SIZE,
};
use crate::error::AppError;

/// Parse and bound the `pageSize` query parameter.
///
/// Absent means the default (50). Non-integer or out of [1, 100] fails with a
/// validation error.
pub fn parse_page_size(raw: Option<&str>) -> Result<u32, AppError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PAGE_SIZE);
    };
    let page_size: u32 = raw.trim().parse().map_err(|_| {
        AppError::InvalidInput(format!("pageSize must be a positive integer, got '{}'", raw))
    })?;
    if page_size < 1 || page_size > MAX_PAGE_SIZE {
        return Err(AppError::InvalidInput(format!(
            "pageSize must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, page_size
        )));
    }
    Ok(page_size)
}

/// Validate a file resource name used by metadata/delete calls.
///
/// Names must carry the fixed `files/` prefix with a non-empty id after it.
pub fn validate_resource_name(name: Option<&str>) -> Result<&str, AppError> {
    let name = name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing required parameter 'name'".to_string()))?;
    let id = name.strip_prefix(FILE_NAME_PREFIX).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Invalid file name '{}': must start with '{}'",
            name, FILE_NAME_PREFIX
        ))
    })?;
    if id.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Invalid file name '{}': missing id after '{}'",
            name, FILE_NAME_PREFIX
        )));
    }
    Ok(name)
}

/// Validate the `displayName` query parameter for uploads.
pub fn validate_display_name(raw: Option<&str>) -> Result<&str, AppError> {
    let display_name = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        AppError::InvalidInput("Missing required parameter 'displayName'".to_string())
    })?;
    if display_name.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "displayName exceeds {} characters",
            MAX_DISPLAY_NAME_LENGTH
        )));
    }
    Ok(display_name)
}

/// Validate the `mimeType` query parameter for uploads.
///
/// Only shape is checked (`type/subtype`); the provider decides which types
/// it actually accepts.
pub fn validate_mime_type(raw: Option<&str>) -> Result<&str, AppError> {
    let mime_type = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        AppError::InvalidInput("Missing required parameter 'mimeType'".to_string())
    })?;
    let mut parts = mime_type.splitn(2, '/');
    let main = parts.next().unwrap_or("");
    let sub = parts.next().unwrap_or("");
    if main.is_empty() || sub.is_empty() || mime_type.contains(char::is_whitespace) {
        return Err(AppError::InvalidInput(format!(
            "Invalid mimeType '{}'",
            mime_type
        )));
    }
    Ok(mime_type)
}

/// Validate the upload body size window: non-empty and under the ceiling.
pub fn validate_upload_body(len: usize, max_bytes: usize) -> Result<(), AppError> {
    if len == 0 {
        return Err(AppError::InvalidInput("Upload body is empty".to_string()));
    }
    if len > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Upload of {} bytes exceeds the {} MiB ceiling",
            len,
            max_bytes / 1024 / 1024
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_defaults_when_absent() {
        assert_eq!(parse_page_size(None).unwrap(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_rejects_out_of_range() {
        assert!(parse_page_size(Some("0")).is_err());
        assert!(parse_page_size(Some("101")).is_err());
        assert!(parse_page_size(Some("-3")).is_err());
        assert!(parse_page_size(Some("abc")).is_err());
        assert_eq!(parse_page_size(Some("1")).unwrap(), 1);
        assert_eq!(parse_page_size(Some("100")).unwrap(), 100);
    }

    #[test]
    fn resource_name_requires_prefix() {
        assert!(validate_resource_name(None).is_err());
        assert!(validate_resource_name(Some("")).is_err());
        assert!(validate_resource_name(Some("abc123")).is_err());
        assert!(validate_resource_name(Some("files/")).is_err());
        assert_eq!(
            validate_resource_name(Some("files/abc123")).unwrap(),
            "files/abc123"
        );
    }

    #[test]
    fn display_name_must_be_present_and_bounded() {
        assert!(validate_display_name(None).is_err());
        assert!(validate_display_name(Some("   ")).is_err());
        assert!(validate_display_name(Some(&"x".repeat(513))).is_err());
        assert_eq!(validate_display_name(Some("notes.pdf")).unwrap(), "notes.pdf");
    }

    #[test]
    fn mime_type_shape() {
        assert!(validate_mime_type(None).is_err());
        assert!(validate_mime_type(Some("pdf")).is_err());
        assert!(validate_mime_type(Some("application/")).is_err());
        assert!(validate_mime_type(Some("bad mime/type")).is_err());
        assert_eq!(
            validate_mime_type(Some("application/pdf")).unwrap(),
            "application/pdf"
        );
    }

    #[test]
    fn upload_body_window() {
        assert!(validate_upload_body(0, 1024).is_err());
        assert!(validate_upload_body(2048, 1024).is_err());
        assert!(validate_upload_body(512, 1024).is_ok());

        let oversized = validate_upload_body(2048, 1024).unwrap_err();
        assert!(matches!(oversized, AppError::PayloadTooLarge(_)));
    }
}
