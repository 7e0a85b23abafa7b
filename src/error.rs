//! All error types for the resbuild crate.
//!
//! Only a handful of conditions abort a run (missing tooling, an empty default
//! target when that is disallowed, unreadable configuration). Everything else
//! is logged and the build keeps going.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One of the external dependencies checked by the path resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Sdk,
    ResourceCompiler,
    ClassCompiler,
    AssemblyLinker,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Sdk => "Windows SDK for .NET Framework 4",
            Tool::ResourceCompiler => "ResGen.exe",
            Tool::ClassCompiler => "csc.exe",
            Tool::AssemblyLinker => "al.exe",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{tool} was not found in: {}\n{hint}", .path.display())]
    ToolMissing {
        tool: Tool,
        path: PathBuf,
        hint: String,
    },

    #[error("no default resource sources found in {}", .source_dir.display())]
    EmptyDefault { source_dir: PathBuf },

    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
