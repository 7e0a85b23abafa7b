//! The build phases: the default library, culture satellites and the walk
//! over culture directories that drives them.

mod default;
mod satellite;
mod walker;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::process::ProcessRunner;
use crate::tools::ToolPaths;

pub use default::build_default;
pub use satellite::build_culture_lib;
pub use walker::{CultureOutcome, CultureReport, DirectoryFailure, walk_cultures};

/// Resolved tool paths plus the runner that invokes them.
#[derive(Clone, Copy)]
pub struct Toolchain<'a> {
    pub paths: &'a ToolPaths,
    pub runner: &'a dyn ProcessRunner,
}

impl<'a> Toolchain<'a> {
    pub fn new(paths: &'a ToolPaths, runner: &'a dyn ProcessRunner) -> Self {
        Self { paths, runner }
    }

    /// Runs a tool and reports whether it exited successfully.
    ///
    /// Failures, including failure to start, are logged and swallowed; the
    /// caller carries on with cleanup and the next step either way.
    pub(crate) fn invoke(&self, program: &Path, args: Vec<OsString>) -> bool {
        match self.runner.run(program, &args) {
            Ok(exit) => exit.is_success(),
            Err(e) => {
                warn!(program = %program.display(), error = %e, "tool invocation failed");
                false
            }
        }
    }
}

/// Where the default library lands: next to `out_dir` when `main_at_root`,
/// otherwise inside it.
pub fn default_library_path(out_dir: &Path, root_namespace: &str, main_at_root: bool) -> PathBuf {
    let file_name = format!("{}.dll", root_namespace);
    if main_at_root {
        match out_dir.parent() {
            Some(parent) => parent.join(file_name),
            None => out_dir.join(file_name),
        }
    } else {
        out_dir.join(file_name)
    }
}

/// `{out_dir}/{logical_namespace}.resources.dll`.
pub fn satellite_library_path(out_dir: &Path, logical_namespace: &str) -> PathBuf {
    out_dir.join(format!("{}.resources.dll", logical_namespace))
}
