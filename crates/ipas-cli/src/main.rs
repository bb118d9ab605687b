//! ipas CLI: classify uploads and inspect the storage names of package records.
//!
//! Upload limits are read from the environment (MAX_PACKAGE_SIZE_MB,
//! ALLOWED_PACKAGE_EXTENSIONS, REQUIRE_ICON); see `PackageConfig`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ipas_cli::{init_tracing, load_manifest, load_records, print_groups, print_records_table};
use ipas_core::{
    group_by_identifier, sort_by_recency, validate_package, AppInfo, PackageConfig, PackageKind,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "ipas", about = "Package record naming tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the package kind of each file name
    Classify {
        /// File names or paths
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Build a record from a parsed-package manifest and print its storage names
    Describe {
        /// JSON manifest with name, version, identifier, build, channel, size, metaData, icon
        #[arg(long)]
        manifest: PathBuf,
        /// Original upload file name, used to classify the package
        #[arg(long)]
        file: String,
    },
    /// Sort a JSON list of records, most recent first
    Sort {
        /// Path to a JSON array of records
        records: PathBuf,
        /// Output format: json or table
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Group a JSON list of records by application identifier
    Groups {
        /// Path to a JSON array of records
        records: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DescribeOutput<'a> {
    record: &'a AppInfo,
    package_storage_name: String,
    icon_storage_name: String,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { files } => {
            for file in files {
                println!("{}\t{}", file, PackageKind::from_filename(&file));
            }
        }
        Commands::Describe { manifest, file } => {
            let config = PackageConfig::from_env().context("Load package config")?;
            let package = load_manifest(&manifest)?;
            let kind = PackageKind::from_filename(&file);

            validate_package(&package, kind, &config)
                .with_context(|| format!("Package {} rejected", file))?;
            let info = AppInfo::try_new(&package, kind)?;

            tracing::info!(id = %info.id, kind = %info.kind, "Record created");
            print_json(&DescribeOutput {
                record: &info,
                package_storage_name: info.package_storage_name(),
                icon_storage_name: info.icon_storage_name(),
            })?;
        }
        Commands::Sort { records, format } => {
            let mut records = load_records(&records)?;
            sort_by_recency(&mut records);
            match format.as_str() {
                "json" => print_json(&records)?,
                "table" => print_records_table(&records),
                other => anyhow::bail!("Invalid format '{}'. Must be: json or table", other),
            }
        }
        Commands::Groups { records } => {
            let records = load_records(&records)?;
            let groups = group_by_identifier(&records);
            print_groups(&groups);
        }
    }

    Ok(())
}
