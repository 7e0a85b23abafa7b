//! Localization resource build orchestrator.
//!
//! Discovers raw `.txt`, `.restext` and `.resx` sources, compiles the
//! invariant ones into a default library with generated accessor classes, and
//! links each culture subdirectory into a culture-tagged satellite assembly.
//! The resource compiler, class compiler and assembly linker are external
//! tools driven through [`process::ProcessRunner`].

pub mod args;
pub mod build;
pub mod cleanup;
pub mod config;
pub mod culture;
pub mod error;
pub mod orchestrator;
pub mod process;
pub mod resource;
pub mod tools;

// Re-export most used types for easy consumption
pub use crate::{
    build::{
        CultureOutcome, CultureReport, DirectoryFailure, Toolchain, build_culture_lib, build_default,
        walk_cultures,
    },
    config::{BuildConfig, ConfigBuilder},
    culture::{CultureDescriptor, InvalidCultureName, resolve_culture},
    error::{Error, Tool},
    orchestrator::{BuildSummary, run},
    process::{ProcessRunner, SystemRunner, ToolExit},
    resource::{RawResourceFile, derive_name, discover},
    tools::{ToolOverrides, ToolPaths, resolve_tools},
};
