//! Provenance information written alongside each assessment.
use anyhow::{Result, anyhow};
use chrono::prelude::*;
use platform_info::{PlatformInfo, PlatformInfoAPI, UNameAPI};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// The output file name for metadata
const METADATA_FILE_NAME: &str = "metadata.toml";

/// Information about the program build via `built` crate
mod built_info {
    // Generated by build.rs
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Short git hash of the build, marked if the tree was dirty
fn get_git_hash() -> String {
    match (built_info::GIT_COMMIT_HASH_SHORT, built_info::GIT_DIRTY) {
        (None, _) => "unknown".into(),
        (Some(hash), Some(true)) => format!("{hash}-dirty"),
        (Some(hash), _) => hash.into(),
    }
}

#[derive(Serialize)]
struct Metadata<'a> {
    run: RunMetadata<'a>,
    program: ProgramMetadata,
    platform: PlatformMetadata,
}

/// Which project was assessed and when
#[derive(Serialize)]
struct RunMetadata<'a> {
    /// Path to the project file
    project_path: &'a Path,
    /// Name given in the project file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<&'a str>,
    /// When the assessment was run
    datetime: String,
}

#[derive(Serialize)]
struct ProgramMetadata {
    name: &'static str,
    version: &'static str,
    target: &'static str,
    is_debug: bool,
    rustc_version: &'static str,
    build_time_utc: &'static str,
    git_commit_hash: String,
}

impl ProgramMetadata {
    fn current() -> Self {
        Self {
            name: built_info::PKG_NAME,
            version: built_info::PKG_VERSION,
            target: built_info::TARGET,
            is_debug: built_info::DEBUG,
            rustc_version: built_info::RUSTC_VERSION,
            build_time_utc: built_info::BUILT_TIME_UTC,
            git_commit_hash: get_git_hash(),
        }
    }
}

/// The host, as reported by [`PlatformInfo`]
#[derive(Serialize)]
struct PlatformMetadata {
    sysname: String,
    nodename: String,
    release: String,
    version: String,
    machine: String,
    osname: String,
}

impl PlatformMetadata {
    fn current() -> Result<Self> {
        let info = PlatformInfo::new()
            .map_err(|err| anyhow!("Unable to determine platform info: {err}"))?;

        Ok(Self {
            sysname: info.sysname().to_string_lossy().into(),
            nodename: info.nodename().to_string_lossy().into(),
            release: info.release().to_string_lossy().into(),
            version: info.version().to_string_lossy().into(),
            machine: info.machine().to_string_lossy().into(),
            osname: info.osname().to_string_lossy().into(),
        })
    }
}

/// Write metadata about this run to `metadata.toml` in the output folder
///
/// # Arguments
///
/// * `output_path` - Folder where the file will be saved
/// * `project_path` - Path to the project file which was assessed
/// * `project_name` - The project's name, if it has one
pub fn write_metadata(
    output_path: &Path,
    project_path: &Path,
    project_name: Option<&str>,
) -> Result<()> {
    let metadata = Metadata {
        run: RunMetadata {
            project_path,
            project_name,
            datetime: Local::now().to_rfc2822(),
        },
        program: ProgramMetadata::current(),
        platform: PlatformMetadata::current()?,
    };
    let file_path = output_path.join(METADATA_FILE_NAME);
    fs::write(&file_path, toml::to_string(&metadata)?)?;

    Ok(())
}
