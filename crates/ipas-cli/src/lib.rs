use std::path::{Path, PathBuf};

use anyhow::Context;
use image::DynamicImage;
use ipas_core::{format_size, AppGroup, AppInfo, MetaData, Package};
use serde::Deserialize;

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Package fields produced by an external parser, stored as JSON.
///
/// `icon` is a path to an image file, relative to the manifest.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestPackage {
    pub name: String,
    pub version: String,
    pub identifier: String,
    pub build: String,
    #[serde(default)]
    pub channel: String,
    pub size: i64,
    #[serde(default)]
    pub meta_data: MetaData,
    #[serde(default)]
    pub icon: Option<PathBuf>,
    #[serde(skip)]
    icon_image: Option<DynamicImage>,
}

impl Package for ManifestPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn build(&self) -> &str {
        &self.build
    }

    fn channel(&self) -> &str {
        &self.channel
    }

    fn meta_data(&self) -> MetaData {
        self.meta_data.clone()
    }

    fn icon(&self) -> Option<&DynamicImage> {
        self.icon_image.as_ref()
    }

    fn size(&self) -> i64 {
        self.size
    }
}

/// Read a manifest and decode its icon, if it names one.
pub fn load_manifest(path: &Path) -> anyhow::Result<ManifestPackage> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Read manifest {}", path.display()))?;
    let mut manifest: ManifestPackage = serde_json::from_str(&raw)
        .with_context(|| format!("Parse manifest {}", path.display()))?;

    if let Some(icon) = &manifest.icon {
        let icon_path = match path.parent() {
            Some(dir) if icon.is_relative() => dir.join(icon),
            _ => icon.clone(),
        };
        let image = image::open(&icon_path)
            .with_context(|| format!("Decode icon {}", icon_path.display()))?;
        manifest.icon_image = Some(image);
    }

    tracing::debug!(
        identifier = %manifest.identifier,
        has_icon = manifest.icon_image.is_some(),
        "Loaded manifest"
    );

    Ok(manifest)
}

/// Read a JSON array of persisted records.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<AppInfo>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Read records {}", path.display()))?;
    let records = AppInfo::list_from_json(&raw)
        .with_context(|| format!("Parse records {}", path.display()))?;
    Ok(records)
}

pub fn print_records_table(records: &[AppInfo]) {
    if records.is_empty() {
        println!("No packages found.");
        return;
    }

    println!(
        "{:<36} {:<7} {:<30} {:<16} {:<10} {:>12} {:>20}",
        "ID", "Type", "Identifier", "Version", "Channel", "Size", "Uploaded At"
    );
    println!("{}", "-".repeat(137));

    for info in records {
        println!(
            "{:<36} {:<7} {:<30} {:<16} {:<10} {:>12} {:>20}",
            info.id,
            info.kind,
            truncate_string(&info.identifier, 30),
            truncate_string(&format!("{}({})", info.version, info.build), 16),
            truncate_string(&info.channel, 10),
            format_size(info.size),
            info.date.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

pub fn print_groups(groups: &[AppGroup<'_>]) {
    for group in groups {
        let kinds: Vec<String> = group.kinds().iter().map(|k| k.to_string()).collect();
        println!(
            "{} [{}] {} {}({}) - {} upload(s)",
            group.current.name,
            kinds.join(","),
            group.identifier(),
            group.current.version,
            group.current.build,
            group.history.len() + 1
        );
    }
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipas_core::PackageKind;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_manifest_without_icon() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "manifest.json",
            r#"{
                "name": "Example",
                "version": "1.2.0",
                "identifier": "com.example.app",
                "build": "42",
                "size": 2048,
                "metaData": { "minSdk": 21 }
            }"#,
        );

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.channel(), "");
        assert!(manifest.icon().is_none());
        assert_eq!(manifest.meta_data()["minSdk"], serde_json::json!(21));

        let info = AppInfo::new(&manifest, PackageKind::Apk);
        assert!(info.none_icon);
        assert_eq!(
            info.storage_name,
            format!("com.example.app_1.2.0(42)_{}.apk", info.id)
        );
    }

    #[test]
    fn load_manifest_with_icon() {
        let dir = tempfile::tempdir().unwrap();
        DynamicImage::new_rgba8(4, 4)
            .save(dir.path().join("icon.png"))
            .unwrap();
        let path = write_file(
            dir.path(),
            "manifest.json",
            r#"{
                "name": "Example",
                "version": "1.0",
                "identifier": "com.example.app",
                "build": "1",
                "channel": "beta",
                "size": 10,
                "icon": "icon.png"
            }"#,
        );

        let manifest = load_manifest(&path).unwrap();
        assert!(manifest.icon().is_some());

        let info = AppInfo::new(&manifest, PackageKind::Ipa);
        assert_eq!(
            info.icon_storage_name(),
            format!("com.example.app/{}.png", info.id)
        );
    }

    #[test]
    fn load_manifest_missing_icon_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "manifest.json",
            r#"{"name":"a","version":"1","identifier":"a","build":"1","size":1,"icon":"nope.png"}"#,
        );
        assert!(load_manifest(&path).is_err());
    }

    #[test]
    fn load_records_legacy_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "records.json",
            r#"[{
                "id": "6f1c2d3e-4a5b-4c6d-8e7f-901234567890",
                "name": "Legacy",
                "version": "0.9",
                "identifier": "com.example.legacy",
                "build": "3",
                "date": "2021-06-01T08:30:00Z",
                "size": 1024,
                "noneIcon": false,
                "type": 1
            }]"#,
        );

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].package_storage_name(),
            "com.example.legacy/6f1c2d3e-4a5b-4c6d-8e7f-901234567890.apk"
        );
    }

    #[test]
    fn truncate_string_behaviour() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("hi", 1), "...");
    }
}
