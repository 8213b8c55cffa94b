use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;

use build_version::config;
use build_version::version::overrides::EnvOverrideSource;
use build_version::version::semver;
use build_version::version::{IS_PRE_RELEASE, VersionProvider, VersionResource, provider};

#[derive(Parser)]
#[command(name = "build-version")]
#[command(version, about = "Build version and pre-release status for toolchain binaries")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version stamped into this binary
    Show {
        /// Emit machine-readable JSON for release tooling
        #[arg(long)]
        json: bool,
    },
    /// Validate an on-disk version stamp against the compiled pre-release flag
    Check {
        /// Path of the stamp; defaults to the one installed next to this executable
        path: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionReport<'a> {
    version: &'a str,
    pre_release: bool,
    qualifier: Option<&'a str>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => show(false),
        Some(Command::Show { json }) => show(json),
        Some(Command::Check { path }) => check(path),
    }
}

fn show(json: bool) -> anyhow::Result<()> {
    let provider = provider();
    let version = provider.version()?;
    let pre_release = provider.is_pre_release()?;

    if json {
        let report = VersionReport {
            version,
            pre_release,
            qualifier: semver::qualifier(version),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("version: {version}");
        println!("pre-release: {pre_release}");
    }
    Ok(())
}

fn check(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path
        .or_else(config::installed_stamp_path)
        .context("could not determine the installed stamp path; pass one explicitly")?;

    let provider = VersionProvider::new(
        VersionResource::File(path),
        IS_PRE_RELEASE,
        Box::new(EnvOverrideSource),
    );
    let version = provider.version()?;

    if semver::parse_descriptor(version).is_none() {
        warn!(
            "Stamp {} does not parse as major.minor.patch[-qualifier]",
            version
        );
    }

    println!("ok: {version}");
    Ok(())
}
