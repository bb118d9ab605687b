//! Upload acceptance checks.
//!
//! Record construction accepts whatever a parser reports. Callers that want
//! to refuse degenerate uploads run these checks before building the record.

use crate::config::PackageConfig;
use crate::error::{PackageError, PackageResult};
use crate::models::{Package, PackageKind};

/// Check that an identifier can be used as a storage directory segment.
pub fn validate_identifier(identifier: &str) -> PackageResult<()> {
    if identifier.trim().is_empty() {
        return Err(PackageError::InvalidInput(
            "identifier must not be empty".to_string(),
        ));
    }

    if identifier.contains('/') || identifier.contains('\\') || identifier.contains("..") {
        return Err(PackageError::InvalidInput(format!(
            "identifier '{}' contains path characters",
            identifier
        )));
    }

    Ok(())
}

/// Check a parsed package against the upload settings.
pub fn validate_package<P: Package + ?Sized>(
    package: &P,
    kind: PackageKind,
    config: &PackageConfig,
) -> PackageResult<()> {
    let result = check_package(package, kind, config);
    if let Err(ref e) = result {
        tracing::warn!(
            identifier = %package.identifier(),
            kind = %kind,
            error_code = e.error_code(),
            error = %e,
            "Package rejected"
        );
    }
    result
}

fn check_package<P: Package + ?Sized>(
    package: &P,
    kind: PackageKind,
    config: &PackageConfig,
) -> PackageResult<()> {
    if !config.is_kind_allowed(kind) {
        return Err(PackageError::UnsupportedKind(kind.to_string()));
    }

    validate_identifier(package.identifier())?;

    if package.version().trim().is_empty() {
        return Err(PackageError::InvalidInput(
            "version must not be empty".to_string(),
        ));
    }

    if package.build().trim().is_empty() {
        return Err(PackageError::InvalidInput(
            "build must not be empty".to_string(),
        ));
    }

    let size = package.size();
    if size < 0 {
        return Err(PackageError::InvalidInput(format!(
            "size must not be negative, got {}",
            size
        )));
    }
    if size as u64 > config.max_package_size_bytes {
        return Err(PackageError::PayloadTooLarge {
            size,
            limit: config.max_package_size_bytes,
        });
    }

    if config.require_icon && package.icon().is_none() {
        return Err(PackageError::InvalidInput(
            "package has no icon".to_string(),
        ));
    }

    Ok(())
}
