//! Presentation helpers for lists of records.

use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap};

use super::app_info::AppInfo;
use super::package_kind::PackageKind;

/// Sort records in place, most recently uploaded first.
///
/// Records with identical timestamps end up in unspecified relative order.
pub fn sort_by_recency<R: Borrow<AppInfo>>(records: &mut [R]) {
    records.sort_by(|a, b| b.borrow().date.cmp(&a.borrow().date));
}

/// All uploads sharing one application identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AppGroup<'a> {
    /// Most recent upload
    pub current: &'a AppInfo,
    /// Older uploads, most recent first
    pub history: Vec<&'a AppInfo>,
}

impl AppGroup<'_> {
    pub fn identifier(&self) -> &str {
        &self.current.identifier
    }

    /// Distinct kinds across the group, ipa before apk.
    pub fn kinds(&self) -> Vec<PackageKind> {
        std::iter::once(self.current)
            .chain(self.history.iter().copied())
            .map(|info| info.kind)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Group records by identifier. Groups are ordered by the recency of their
/// current record.
pub fn group_by_identifier<R: Borrow<AppInfo>>(records: &[R]) -> Vec<AppGroup<'_>> {
    let mut sorted: Vec<&AppInfo> = records.iter().map(|r| r.borrow()).collect();
    sort_by_recency(&mut sorted);

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<AppGroup<'_>> = Vec::new();
    for info in sorted {
        match index.get(info.identifier.as_str()) {
            Some(&pos) => groups[pos].history.push(info),
            None => {
                index.insert(info.identifier.as_str(), groups.len());
                groups.push(AppGroup {
                    current: info,
                    history: Vec::new(),
                });
            }
        }
    }
    groups
}

/// Human-readable byte count in KB, MB or GB (1024 based, two decimals).
pub fn format_size(bytes: i64) -> String {
    const K: f64 = 1024.0;
    const M: f64 = 1024.0 * K;
    const G: f64 = 1024.0 * M;

    let size = bytes as f64;
    if size > G {
        format!("{:.2} GB", size / G)
    } else if size > M {
        format!("{:.2} MB", size / M)
    } else {
        format!("{:.2} KB", size / K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn record(identifier: &str, kind: PackageKind, minute: u32) -> AppInfo {
        AppInfo {
            id: Uuid::new_v4(),
            name: identifier.to_string(),
            version: "1.0".to_string(),
            identifier: identifier.to_string(),
            build: "1".to_string(),
            channel: String::new(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 10, minute, 0).unwrap(),
            size: 0,
            none_icon: true,
            kind,
            meta_data: Default::default(),
            storage_name: String::new(),
        }
    }

    #[test]
    fn test_sort_by_recency() {
        let t1 = record("a", PackageKind::Ipa, 1);
        let t2 = record("b", PackageKind::Ipa, 2);
        let t3 = record("c", PackageKind::Ipa, 3);
        let mut list = vec![&t1, &t3, &t2];

        sort_by_recency(&mut list);

        let names: Vec<&str> = list.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_owned_records() {
        let mut list = vec![
            record("a", PackageKind::Apk, 5),
            record("b", PackageKind::Apk, 9),
            record("c", PackageKind::Apk, 0),
        ];

        sort_by_recency(&mut list);

        let names: Vec<&str> = list.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_keeps_duplicates() {
        let a = record("a", PackageKind::Ipa, 1);
        let mut list = vec![&a, &a];
        sort_by_recency(&mut list);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_group_by_identifier() {
        let records = vec![
            record("com.example.one", PackageKind::Ipa, 1),
            record("com.example.two", PackageKind::Apk, 2),
            record("com.example.one", PackageKind::Apk, 5),
            record("com.example.one", PackageKind::Ipa, 3),
        ];

        let groups = group_by_identifier(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].identifier(), "com.example.one");
        assert_eq!(groups[0].current.date, records[2].date);
        assert_eq!(groups[0].history.len(), 2);
        assert_eq!(groups[0].history[0].date, records[3].date);
        assert_eq!(groups[0].history[1].date, records[0].date);
        assert_eq!(groups[0].kinds(), vec![PackageKind::Ipa, PackageKind::Apk]);

        assert_eq!(groups[1].identifier(), "com.example.two");
        assert!(groups[1].history.is_empty());
        assert_eq!(groups[1].kinds(), vec![PackageKind::Apk]);
    }

    #[test]
    fn test_group_empty() {
        let records: Vec<AppInfo> = Vec::new();
        assert!(group_by_identifier(&records).is_empty());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "0.50 KB");
        assert_eq!(format_size(1024 * 1024), "1024.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 1), "5.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 / 2), "1.50 GB");
    }
}
