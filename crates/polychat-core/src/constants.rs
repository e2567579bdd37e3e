//! Shared constants for the file gateway.

/// Prefix every provider file resource name carries (`files/<id>`).
pub const FILE_NAME_PREFIX: &str = "files/";

/// Page size applied to list requests when `pageSize` is absent.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest accepted `pageSize` for list requests.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Upload body ceiling: 64 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Longest accepted `displayName` for an upload.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 512;
