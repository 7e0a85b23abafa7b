//! Typed argument lists for the three external tools.
//!
//! Every builder produces the flat argument vector handed to the process
//! runner. Paths stay paths until the last moment; nothing is joined into a
//! command line string, so no quoting is involved.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Request for the resource compiler to also emit a public accessor class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorRequest {
    pub namespace: String,
    pub class_name: String,
    pub output: PathBuf,
}

/// Arguments for the resource compiler (`ResGen.exe`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResGenArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub accessor: Option<AccessorRequest>,
}

impl ResGenArgs {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            accessor: None,
        }
    }

    pub fn with_accessor(mut self, accessor: AccessorRequest) -> Self {
        self.accessor = Some(accessor);
        self
    }

    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = vec![self.input.clone().into_os_string(), self.output.clone().into_os_string()];
        if let Some(accessor) = &self.accessor {
            let mut str_arg = OsString::from(format!(
                "/str:cs,{},{},",
                accessor.namespace, accessor.class_name
            ));
            str_arg.push(accessor.output.as_os_str());
            args.push(str_arg);
            args.push(OsString::from("/publicClass"));
        }
        args
    }
}

/// Arguments for the class compiler (`csc.exe`), always targeting a library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CscArgs {
    pub output: PathBuf,
    pub resources: Vec<PathBuf>,
    pub sources: Vec<PathBuf>,
}

impl CscArgs {
    pub fn library(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    pub fn with_resources(mut self, resources: impl IntoIterator<Item = PathBuf>) -> Self {
        self.resources.extend(resources);
        self
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = PathBuf>) -> Self {
        self.sources.extend(sources);
        self
    }

    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("/target:library"),
            prefixed("/out:", &self.output),
        ];
        args.extend(self.resources.iter().map(|r| prefixed("/res:", r)));
        args.extend(self.sources.iter().map(|s| s.clone().into_os_string()));
        args
    }
}

/// One resource embedded by the linker under a logical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub path: PathBuf,
    pub logical_name: String,
}

impl Embed {
    /// Embeds `path` under its file name with spaces replaced by underscores.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let logical_name = logical_resource_name(&path);
        Self { path, logical_name }
    }
}

/// Arguments for the assembly linker (`al.exe`), always targeting a satellite library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlArgs {
    pub culture: String,
    pub output: PathBuf,
    pub embeds: Vec<Embed>,
}

impl AlArgs {
    pub fn satellite(culture: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            culture: culture.into(),
            output: output.into(),
            embeds: Vec::new(),
        }
    }

    pub fn with_embeds(mut self, embeds: impl IntoIterator<Item = Embed>) -> Self {
        self.embeds.extend(embeds);
        self
    }

    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("/target:lib"),
            OsString::from(format!("/culture:{}", self.culture)),
            prefixed("/out:", &self.output),
        ];
        for embed in &self.embeds {
            let mut arg = prefixed("/embed:", &embed.path);
            arg.push(",");
            arg.push(&embed.logical_name);
            args.push(arg);
        }
        args
    }
}

/// File name of `path` with spaces replaced by underscores.
pub fn logical_resource_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().replace(' ', "_"))
        .unwrap_or_default()
}

fn prefixed(prefix: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(prefix);
    arg.push(path.as_os_str());
    arg
}
