//! Shared storage key helpers.
//!
//! Keys are relative and `/`-separated: `{identifier}/{filename}`. An empty
//! directory segment yields the bare filename, never a leading `/`.

/// Icons are always stored re-encoded as PNG.
pub const ICON_EXTENSION: &str = ".png";

/// Join a directory segment and a filename into a storage key.
pub fn join_key(dir: &str, filename: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", dir, filename)
    }
}
