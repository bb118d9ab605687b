//! Data models for uploaded packages
//!
//! The package kind, the capability a parsed package exposes, the metadata
//! record with its storage naming, and list presentation helpers.

mod app_info;
mod app_list;
mod package;
mod package_kind;

pub use app_info::AppInfo;
pub use app_list::{format_size, group_by_identifier, sort_by_recency, AppGroup};
pub use package::{MetaData, Package};
pub use package_kind::PackageKind;
