//! A complete build run: default library first, then every culture.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::build::{CultureReport, Toolchain, build_default, default_library_path, walk_cultures};
use crate::config::BuildConfig;
use crate::error::Error;

/// Everything a run produced, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Whether any default-culture sources were found and compiled.
    pub default_built: bool,
    pub default_library: Option<PathBuf>,
    pub cultures: Vec<CultureReport>,
}

/// Runs the default build followed by the culture walk.
///
/// Fails only when the output root cannot be created, a source root cannot be
/// read, or the default target is empty and `ignore_empty_default` is off.
pub fn run(config: &BuildConfig, toolchain: Toolchain<'_>) -> Result<BuildSummary, Error> {
    fs::create_dir_all(&config.resource_path)?;

    let default_built = build_default(
        toolchain,
        &config.resource_source_path,
        &config.resource_path,
        &config.root_namespace,
        config.main_at_root,
    )?;
    if !default_built {
        if !config.ignore_empty_default {
            return Err(Error::EmptyDefault {
                source_dir: config.resource_source_path.clone(),
            });
        }
        info!(
            source_dir = %config.resource_source_path.display(),
            "no default resource sources found, continuing with cultures"
        );
    }

    let cultures = walk_cultures(
        toolchain,
        &config.resource_source_path,
        &config.resource_path,
        &config.root_namespace,
    )?;

    info!("finished");
    Ok(BuildSummary {
        default_built,
        default_library: default_built.then(|| {
            default_library_path(
                &config.resource_path,
                &config.root_namespace,
                config.main_at_root,
            )
        }),
        cultures,
    })
}
