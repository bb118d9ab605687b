//! Configuration module
//!
//! Upload acceptance settings, read from the environment (and `.env`).

use std::env;

use crate::models::PackageKind;

const MAX_PACKAGE_SIZE_MB: u64 = 1024;
const ALLOWED_PACKAGE_EXTENSIONS: &str = "ipa,apk";

/// Settings consulted by [`crate::validation::validate_package`].
#[derive(Clone, Debug)]
pub struct PackageConfig {
    pub max_package_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
    pub require_icon: bool,
}

impl Default for PackageConfig {
    fn default() -> Self {
        PackageConfig {
            max_package_size_bytes: MAX_PACKAGE_SIZE_MB * 1024 * 1024,
            allowed_extensions: split_list(ALLOWED_PACKAGE_EXTENSIONS),
            require_icon: false,
        }
    }
}

impl PackageConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let max_package_size_mb = env::var("MAX_PACKAGE_SIZE_MB")
            .unwrap_or_else(|_| MAX_PACKAGE_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_PACKAGE_SIZE_MB);

        let allowed_extensions = split_list(
            &env::var("ALLOWED_PACKAGE_EXTENSIONS")
                .unwrap_or_else(|_| ALLOWED_PACKAGE_EXTENSIONS.to_string()),
        );

        let config = PackageConfig {
            max_package_size_bytes: max_package_size_mb.saturating_mul(1024 * 1024),
            allowed_extensions,
            require_icon: env::var("REQUIRE_ICON")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_package_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_PACKAGE_SIZE_MB must be greater than zero"
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_PACKAGE_EXTENSIONS must list at least one of: ipa, apk"
            ));
        }

        for ext in &self.allowed_extensions {
            ext.parse::<PackageKind>().map_err(|_| {
                anyhow::anyhow!(
                    "ALLOWED_PACKAGE_EXTENSIONS contains unsupported extension '{}'",
                    ext
                )
            })?;
        }

        Ok(())
    }

    /// Kinds accepted for upload. Entries that do not name a kind are skipped.
    pub fn allowed_kinds(&self) -> Vec<PackageKind> {
        self.allowed_extensions
            .iter()
            .filter_map(|ext| ext.parse().ok())
            .collect()
    }

    pub fn is_kind_allowed(&self, kind: PackageKind) -> bool {
        kind.is_known() && self.allowed_kinds().contains(&kind)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
