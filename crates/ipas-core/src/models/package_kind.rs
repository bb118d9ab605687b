use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Package kind, derived from the uploaded file's extension.
///
/// Serialized as a small integer: `0` for ipa, `1` for apk and `-1` for
/// unknown. Any other integer (within `i64`) reads back as
/// [`PackageKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i64", from = "i64")]
pub enum PackageKind {
    /// iOS application archive
    Ipa,
    /// Android application package
    Apk,
    Unknown,
}

impl PackageKind {
    /// Classify a filename or path by its extension, ignoring case.
    ///
    /// Never fails: anything that is not `.ipa` or `.apk` (including a name
    /// without an extension) is [`PackageKind::Unknown`].
    pub fn from_filename(name: &str) -> Self {
        match extension(name).to_lowercase().as_str() {
            ".ipa" => PackageKind::Ipa,
            ".apk" => PackageKind::Apk,
            _ => PackageKind::Unknown,
        }
    }

    /// Suffix appended to stored package names.
    ///
    /// Unknown maps to the bare string `"unknown"`, without a leading dot.
    pub fn storage_suffix(&self) -> &'static str {
        match self {
            PackageKind::Ipa => ".ipa",
            PackageKind::Apk => ".apk",
            PackageKind::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != PackageKind::Unknown
    }
}

/// Extension of the last path element, dot included; empty when there is none.
fn extension(name: &str) -> &str {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(name);
    match base.rfind('.') {
        Some(idx) => &base[idx..],
        None => "",
    }
}

impl From<PackageKind> for i64 {
    fn from(kind: PackageKind) -> Self {
        match kind {
            PackageKind::Ipa => 0,
            PackageKind::Apk => 1,
            PackageKind::Unknown => -1,
        }
    }
}

impl From<i64> for PackageKind {
    fn from(value: i64) -> Self {
        match value {
            0 => PackageKind::Ipa,
            1 => PackageKind::Apk,
            _ => PackageKind::Unknown,
        }
    }
}

impl FromStr for PackageKind {
    type Err = anyhow::Error;

    /// Parses configuration values such as `ipa`, `.APK`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "ipa" => Ok(PackageKind::Ipa),
            "apk" => Ok(PackageKind::Apk),
            _ => Err(anyhow::anyhow!("Invalid package kind: {}", s)),
        }
    }
}

impl Display for PackageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PackageKind::Ipa => write!(f, "ipa"),
            PackageKind::Apk => write!(f, "apk"),
            PackageKind::Unknown => write!(f, "unknown"),
        }
    }
}
