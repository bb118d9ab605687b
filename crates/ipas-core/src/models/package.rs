//! Capability a parsed upload exposes to the record layer.

use image::DynamicImage;
use serde_json::Value as JsonValue;

/// Free-form, platform-specific key/value data carried through verbatim.
pub type MetaData = serde_json::Map<String, JsonValue>;

/// A package whose binary has already been parsed.
///
/// Implemented by the format parsers (ipa, apk, ...). The record layer reads
/// these values once, at construction, and never validates them.
pub trait Package {
    /// Display name
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Reverse-DNS application identifier (e.g., "com.example.app").
    /// Used as a storage directory, so it must not contain path separators.
    fn identifier(&self) -> &str;

    fn build(&self) -> &str;

    /// Distribution channel; empty when the package has none.
    fn channel(&self) -> &str;

    fn meta_data(&self) -> MetaData;

    /// Decoded icon, if the package carries one
    fn icon(&self) -> Option<&DynamicImage>;

    /// Size of the original package in bytes
    fn size(&self) -> i64;
}
