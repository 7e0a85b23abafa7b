//! Raw resource discovery and the naming rules shared by every build target.
//!
//! A raw resource file's base name doubles as its identity: `Menu.Labels.txt`
//! under root namespace `App` becomes class `Labels` in namespace `App.Menu`,
//! compiled into `App.Menu.Labels.resources`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Extensions accepted as raw resource sources, compared case-insensitively.
pub const RAW_EXTENSIONS: [&str; 3] = ["txt", "restext", "resx"];

/// Extension of compiled resource blobs.
pub const BLOB_EXTENSION: &str = "resources";

/// Extension of generated accessor sources.
pub const GENERATED_SOURCE_EXTENSION: &str = "cs";

/// A discovered, not yet compiled, resource source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResourceFile {
    pub path: PathBuf,
}

/// Namespace and symbol derived from a raw resource file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    pub namespace: String,
    pub symbol: String,
}

impl DerivedName {
    /// `{namespace}.{symbol}.resources`, the blob name for default builds.
    pub fn blob_file_name(&self) -> String {
        format!("{}.{}.{}", self.namespace, self.symbol, BLOB_EXTENSION)
    }

    /// `{symbol}.cs`, the generated accessor source name.
    pub fn source_file_name(&self) -> String {
        format!("{}.{}", self.symbol, GENERATED_SOURCE_EXTENSION)
    }
}

impl RawResourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name without its final extension.
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Derives the `(namespace, symbol)` pair for this file under `root_namespace`.
    pub fn derive(&self, root_namespace: &str) -> DerivedName {
        derive_name(&self.base_name(), root_namespace)
    }

    /// `{namespace}.{base}.{culture}.resources`, the blob name for satellite builds.
    pub fn satellite_blob_file_name(&self, logical_namespace: &str, culture: &str) -> String {
        format!(
            "{}.{}.{}.{}",
            logical_namespace,
            self.base_name(),
            culture,
            BLOB_EXTENSION
        )
    }
}

/// Splits `base_name` on `.`; all but the last segment extend `root_namespace`.
pub fn derive_name(base_name: &str, root_namespace: &str) -> DerivedName {
    match base_name.rsplit_once('.') {
        Some((prefix, symbol)) => DerivedName {
            namespace: format!("{}.{}", root_namespace, prefix),
            symbol: symbol.to_string(),
        },
        None => DerivedName {
            namespace: root_namespace.to_string(),
            symbol: base_name.to_string(),
        },
    }
}

/// Returns true if `path` carries one of the raw resource extensions.
pub fn is_raw_resource(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RAW_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Lists raw resource files in `dir`, descending into subdirectories when `recursive`.
///
/// Order follows directory enumeration and is not sorted. A directory with no
/// matches yields an empty list.
pub fn discover(dir: &Path, recursive: bool) -> Result<Vec<RawResourceFile>, Error> {
    let mut found = Vec::new();
    discover_into(dir, recursive, &mut found)?;
    Ok(found)
}

fn discover_into(dir: &Path, recursive: bool, found: &mut Vec<RawResourceFile>) -> Result<(), Error> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            if recursive {
                discover_into(&path, recursive, found)?;
            }
        } else if is_raw_resource(&path) {
            found.push(RawResourceFile::new(path));
        }
    }
    Ok(())
}

/// Immediate subdirectories of `dir`.
pub fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    Ok(dirs)
}
