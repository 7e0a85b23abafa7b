use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::culture::{CultureDescriptor, resolve_culture};
use crate::error::Error;
use crate::resource::subdirectories;

use super::{Toolchain, build_culture_lib, satellite_library_path};

/// What happened to one immediate subdirectory of the source root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CultureReport {
    pub directory: PathBuf,
    #[serde(flatten)]
    pub outcome: CultureOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CultureOutcome {
    /// At least one satellite library was linked. Directories of this
    /// culture that could not be built are listed in `failures`.
    Built {
        culture: String,
        libraries: Vec<PathBuf>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        failures: Vec<DirectoryFailure>,
    },
    /// A valid culture without any raw resources.
    Empty { culture: String },
    /// The directory name is not a culture; it was skipped.
    InvalidName { reason: String },
    /// Nothing was linked because of filesystem trouble.
    Failed { culture: String, error: String },
}

/// A directory inside a culture that could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryFailure {
    pub directory: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
struct CultureBuild {
    libraries: Vec<PathBuf>,
    failures: Vec<DirectoryFailure>,
}

impl CultureBuild {
    fn fail(&mut self, culture: &CultureDescriptor, directory: &Path, error: Error) {
        warn!(culture = %culture, directory = %directory.display(), error = %error, "directory build failed");
        self.failures.push(DirectoryFailure {
            directory: directory.to_path_buf(),
            error: error.to_string(),
        });
    }
}

/// Builds satellite libraries for every culture directory under `source_root`.
///
/// Each directory is independent: an invalid name or a failure in one is
/// reported and the walk moves on to the next.
pub fn walk_cultures(
    toolchain: Toolchain<'_>,
    source_root: &Path,
    out_root: &Path,
    root_namespace: &str,
) -> Result<Vec<CultureReport>, Error> {
    let mut reports = Vec::new();
    for directory in subdirectories(source_root)? {
        let name = directory
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let outcome = match resolve_culture(&name) {
            Ok(culture) => culture_outcome(toolchain, &directory, out_root, root_namespace, culture),
            Err(invalid) => {
                warn!(directory = %directory.display(), "{}", invalid);
                CultureOutcome::InvalidName {
                    reason: invalid.to_string(),
                }
            }
        };
        reports.push(CultureReport { directory, outcome });
    }
    Ok(reports)
}

fn culture_outcome(
    toolchain: Toolchain<'_>,
    directory: &Path,
    out_root: &Path,
    root_namespace: &str,
    culture: CultureDescriptor,
) -> CultureOutcome {
    let build = match build_culture(toolchain, directory, out_root, root_namespace, &culture) {
        Ok(build) => build,
        Err(e) => {
            warn!(culture = %culture, error = %e, "culture build failed");
            return CultureOutcome::Failed {
                culture: culture.name,
                error: e.to_string(),
            };
        }
    };

    if !build.libraries.is_empty() {
        return CultureOutcome::Built {
            culture: culture.name,
            libraries: build.libraries,
            failures: build.failures,
        };
    }
    match build.failures.into_iter().next() {
        Some(failure) => CultureOutcome::Failed {
            culture: culture.name,
            error: failure.error,
        },
        None => {
            info!(culture = %culture, "culture had no resources");
            CultureOutcome::Empty {
                culture: culture.name,
            }
        }
    }
}

/// Builds the culture directory itself, then each of its immediate
/// subdirectories as a separately named satellite assembly.
///
/// Only a failure to create the culture's output folder is returned; every
/// other failure is recorded against its directory and the rest still build.
fn build_culture(
    toolchain: Toolchain<'_>,
    directory: &Path,
    out_root: &Path,
    root_namespace: &str,
    culture: &CultureDescriptor,
) -> Result<CultureBuild, Error> {
    let out_dir = out_root.join(&culture.name);
    fs::create_dir_all(&out_dir)?;

    let mut build = CultureBuild::default();
    match build_culture_lib(toolchain, directory, &out_dir, root_namespace, culture) {
        Ok(true) => build
            .libraries
            .push(satellite_library_path(&out_dir, root_namespace)),
        Ok(false) => {}
        Err(e) => build.fail(culture, directory, e),
    }

    let nested = match subdirectories(directory) {
        Ok(nested) => nested,
        Err(e) => {
            build.fail(culture, directory, e);
            return Ok(build);
        }
    };
    for sub in nested {
        let namespace = sub
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match build_culture_lib(toolchain, &sub, &out_dir, &namespace, culture) {
            Ok(true) => build
                .libraries
                .push(satellite_library_path(&out_dir, &namespace)),
            Ok(false) => {}
            Err(e) => build.fail(culture, &sub, e),
        }
    }
    Ok(build)
}
