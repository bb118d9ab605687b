use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::package::{MetaData, Package};
use super::package_kind::PackageKind;
use crate::error::{PackageError, PackageResult};
use crate::id::{IdGenerator, UuidV4Generator};
use crate::keys::{join_key, ICON_EXTENSION};

/// Metadata record for one uploaded package.
///
/// Created once at ingestion and not modified afterwards. `storage_name` is
/// computed at construction; records persisted before it existed deserialize
/// with an empty value and fall back to the short `{identifier}/{id}{suffix}`
/// layout in [`AppInfo::package_storage_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub id: Uuid,
    pub name: String,
    pub version: String,
    pub identifier: String,
    pub build: String,
    #[serde(default)]
    pub channel: String,
    pub date: DateTime<Utc>,
    pub size: i64,
    #[serde(default)]
    pub none_icon: bool,
    #[serde(rename = "type")]
    pub kind: PackageKind,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meta_data: MetaData,
    #[serde(default)]
    pub storage_name: String,
}

impl AppInfo {
    /// Build a record with a random id, stamped with the current time.
    pub fn new<P: Package + ?Sized>(package: &P, kind: PackageKind) -> Self {
        Self::new_with(package, kind, &UuidV4Generator, Utc::now())
    }

    /// Build a record with an injected id source and creation time.
    ///
    /// Never fails: degenerate fields (empty identifier, version, build) still
    /// yield a syntactically valid storage name.
    pub fn new_with<P: Package + ?Sized>(
        package: &P,
        kind: PackageKind,
        ids: &dyn IdGenerator,
        date: DateTime<Utc>,
    ) -> Self {
        let id = ids.generate();
        let storage_name = package_file_name(
            package.identifier(),
            package.version(),
            package.build(),
            package.channel(),
            id,
            kind,
        );

        tracing::debug!(
            id = %id,
            identifier = %package.identifier(),
            kind = %kind,
            storage_name = %storage_name,
            "Created app info record"
        );

        AppInfo {
            id,
            name: package.name().to_string(),
            version: package.version().to_string(),
            identifier: package.identifier().to_string(),
            build: package.build().to_string(),
            channel: package.channel().to_string(),
            date,
            size: package.size(),
            none_icon: package.icon().is_none(),
            kind,
            meta_data: package.meta_data(),
            storage_name,
        }
    }

    /// Like [`AppInfo::new`], but refuses packages of unknown kind instead of
    /// naming them with the bare `unknown` suffix.
    pub fn try_new<P: Package + ?Sized>(package: &P, kind: PackageKind) -> PackageResult<Self> {
        Self::try_new_with(package, kind, &UuidV4Generator, Utc::now())
    }

    /// Checked counterpart of [`AppInfo::new_with`].
    pub fn try_new_with<P: Package + ?Sized>(
        package: &P,
        kind: PackageKind,
        ids: &dyn IdGenerator,
        date: DateTime<Utc>,
    ) -> PackageResult<Self> {
        if !kind.is_known() {
            return Err(PackageError::UnsupportedKind(format!(
                "cannot create a record for {} ({})",
                package.identifier(),
                kind
            )));
        }
        Ok(Self::new_with(package, kind, ids, date))
    }

    /// Parse a persisted JSON array of records.
    pub fn list_from_json(raw: &str) -> PackageResult<Vec<AppInfo>> {
        let records: Vec<AppInfo> = serde_json::from_str(raw)?;
        Ok(records)
    }

    /// Storage key of the icon, `{identifier}/{id}.png`, or an empty string
    /// when the package has no icon.
    pub fn icon_storage_name(&self) -> String {
        if self.none_icon {
            return String::new();
        }
        join_key(&self.identifier, &format!("{}{}", self.id, ICON_EXTENSION))
    }

    /// Storage key of the package binary.
    pub fn package_storage_name(&self) -> String {
        if !self.storage_name.is_empty() {
            return self.storage_name.clone();
        }
        tracing::debug!(id = %self.id, "Record has no storage name, using legacy layout");
        join_key(
            &self.identifier,
            &format!("{}{}", self.id, self.kind.storage_suffix()),
        )
    }
}

/// `{identifier}_{version}({build})[_{channel}]_{id}{suffix}`
fn package_file_name(
    identifier: &str,
    version: &str,
    build: &str,
    channel: &str,
    id: Uuid,
    kind: PackageKind,
) -> String {
    let channel = if channel.is_empty() {
        String::new()
    } else {
        format!("_{}", channel)
    };
    format!(
        "{}_{}({}){}_{}{}",
        identifier,
        version,
        build,
        channel,
        id,
        kind.storage_suffix()
    )
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<MetaData, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MetaData>::deserialize(deserializer)?.unwrap_or_default())
}
