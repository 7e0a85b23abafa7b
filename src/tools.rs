//! Locating the resource compiler, class compiler and assembly linker.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Tool};

const SDK_DOWNLOAD_URL: &str = "https://www.microsoft.com/en-us/download/details.aspx?id=8279";

/// Explicit tool locations; anything left `None` uses the default location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOverrides {
    pub sdk_dir: Option<PathBuf>,
    pub resgen: Option<PathBuf>,
    pub csc: Option<PathBuf>,
    pub al: Option<PathBuf>,
}

/// Validated locations of every external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub sdk_dir: PathBuf,
    pub resgen: PathBuf,
    pub csc: PathBuf,
    pub al: PathBuf,
}

impl ToolPaths {
    /// Where the tools are expected to live, without checking that they do.
    pub fn expected(overrides: &ToolOverrides) -> Self {
        let sdk_dir = overrides.sdk_dir.clone().unwrap_or_else(default_sdk_dir);
        Self {
            resgen: overrides
                .resgen
                .clone()
                .unwrap_or_else(|| sdk_dir.join("ResGen.exe")),
            al: overrides.al.clone().unwrap_or_else(|| sdk_dir.join("al.exe")),
            csc: overrides
                .csc
                .clone()
                .unwrap_or_else(|| default_runtime_dir().join("csc.exe")),
            sdk_dir,
        }
    }
}

/// `{ProgramFiles(x86)}\Microsoft SDKs\Windows\v8.0A\bin\NETFX 4.0 Tools`.
pub fn default_sdk_dir() -> PathBuf {
    let program_files = env::var_os("ProgramFiles(x86)")
        .or_else(|| env::var_os("ProgramFiles"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Program Files (x86)"));
    ["Microsoft SDKs", "Windows", "v8.0A", "bin", "NETFX 4.0 Tools"]
        .iter()
        .fold(program_files, |dir, part| dir.join(part))
}

/// The .NET Framework 4 runtime directory that holds `csc.exe`.
pub fn default_runtime_dir() -> PathBuf {
    let windir = env::var_os("WINDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows"));
    let framework = if cfg!(target_pointer_width = "64") {
        "Framework64"
    } else {
        "Framework"
    };
    windir
        .join("Microsoft.NET")
        .join(framework)
        .join("v4.0.30319")
}

/// Checks the SDK directory, resource compiler, class compiler and linker, in
/// that order, failing on the first one that is missing.
pub fn resolve_tools(overrides: &ToolOverrides) -> Result<ToolPaths, Error> {
    let paths = ToolPaths::expected(overrides);
    check(&paths)?;
    debug!(?paths, "resolved tools");
    Ok(paths)
}

fn check(paths: &ToolPaths) -> Result<(), Error> {
    if !paths.sdk_dir.is_dir() {
        return Err(missing(
            Tool::Sdk,
            &paths.sdk_dir,
            format!("Download from:\n{}", SDK_DOWNLOAD_URL),
        ));
    }
    let executables = [
        (Tool::ResourceCompiler, &paths.resgen, "set ResGenPath to override"),
        (Tool::ClassCompiler, &paths.csc, "set CscPath to override"),
        (Tool::AssemblyLinker, &paths.al, "set AlPath to override"),
    ];
    for (tool, path, hint) in executables {
        if !path.is_file() {
            return Err(missing(tool, path, hint.to_string()));
        }
    }
    Ok(())
}

fn missing(tool: Tool, path: &Path, hint: String) -> Error {
    Error::ToolMissing {
        tool,
        path: path.to_path_buf(),
        hint,
    }
}
