//! Build configuration.
//!
//! Settings are read once at startup from, in increasing precedence: built-in
//! defaults, a configuration file (TOML or a .NET style `App.config`), and
//! command-line overrides. A key only takes effect when its value is present,
//! non-empty and well-formed; anything else is logged and the previous value
//! is kept.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use indoc::indoc;
use lazy_static::lazy_static;
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::Error;
use crate::tools::ToolOverrides;

lazy_static! {
    static ref NAMESPACE_REGEX: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap();
}

/// Files probed in the working directory when no config file is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["resbuild.toml", "App.config"];

/// Written by `resbuild init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = indoc! {r#"
    # resbuild configuration.
    # Every key is optional; the values below are the defaults.

    # Root namespace of the default library and its generated classes.
    resource_namespace = "MyResources"

    # Output root. Culture satellites go to {resource_path}/{culture}.
    resource_path = "Resources"

    # Raw resource source root. Defaults to resource_path when empty.
    resource_source_path = ""

    # Put {resource_namespace}.dll next to resource_path instead of inside it.
    resource_main_at_root = true

    # Keep going when the default culture has no raw resources.
    ignore_empty_default = false

    # Tool locations. Leave unset to use the Windows SDK defaults.
    # sdk_path = 'C:\Program Files (x86)\Microsoft SDKs\Windows\v8.0A\bin\NETFX 4.0 Tools'
    # resgen_path = "/usr/bin/resgen"
    # csc_path = "/usr/bin/mcs"
    # al_path = "/usr/bin/al"
"#};

/// Immutable settings for one build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub root_namespace: String,
    pub resource_path: PathBuf,
    pub resource_source_path: PathBuf,
    pub main_at_root: bool,
    pub ignore_empty_default: bool,
    pub tools: ToolOverrides,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root_namespace: "MyResources".to_string(),
            resource_path: PathBuf::from("Resources"),
            resource_source_path: PathBuf::from("Resources"),
            main_at_root: true,
            ignore_empty_default: false,
            tools: ToolOverrides::default(),
        }
    }
}

/// Raw key/value settings from one configuration layer.
pub type Settings = BTreeMap<String, String>;

/// Folds configuration layers into a [`BuildConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    namespace: Option<String>,
    resource_path: Option<PathBuf>,
    source_path: Option<PathBuf>,
    main_at_root: Option<bool>,
    ignore_empty_default: Option<bool>,
    tools: ToolOverrides,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one layer of settings on top of the current state.
    pub fn apply(mut self, settings: &Settings) -> Self {
        for (key, value) in settings {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match normalize_key(key).as_str() {
                "resourcenamespace" => {
                    if NAMESPACE_REGEX.is_match(value) {
                        self.namespace = Some(value.to_string());
                    } else {
                        warn!(key = %key, value = %value, "ignoring malformed namespace");
                    }
                }
                "resourcepath" => self.resource_path = Some(PathBuf::from(value)),
                "resourcesourcepath" => self.source_path = Some(PathBuf::from(value)),
                "resourcemainatroot" => {
                    if let Some(flag) = parse_flag(key, value) {
                        self.main_at_root = Some(flag);
                    }
                }
                "ignoreemptydefault" => {
                    if let Some(flag) = parse_flag(key, value) {
                        self.ignore_empty_default = Some(flag);
                    }
                }
                "sdkpath" => self.tools.sdk_dir = Some(PathBuf::from(value)),
                "resgenpath" => self.tools.resgen = Some(PathBuf::from(value)),
                "cscpath" => self.tools.csc = Some(PathBuf::from(value)),
                "alpath" => self.tools.al = Some(PathBuf::from(value)),
                _ => debug!(key = %key, "ignoring unknown configuration key"),
            }
        }
        self
    }

    pub fn build(self) -> BuildConfig {
        let defaults = BuildConfig::default();
        let resource_path = self.resource_path.unwrap_or(defaults.resource_path);
        BuildConfig {
            root_namespace: self.namespace.unwrap_or(defaults.root_namespace),
            resource_source_path: self
                .source_path
                .unwrap_or_else(|| resource_path.clone()),
            resource_path,
            main_at_root: self.main_at_root.unwrap_or(defaults.main_at_root),
            ignore_empty_default: self
                .ignore_empty_default
                .unwrap_or(defaults.ignore_empty_default),
            tools: self.tools,
        }
    }
}

/// `ResourceNamespace`, `resource_namespace` and `resource-namespace` are one key.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => {
            warn!(key = %key, value = %value, "ignoring malformed boolean");
            None
        }
    }
}

/// Reads settings from `path`, choosing the parser by extension.
///
/// `.toml` files are TOML; anything else is treated as an XML app-settings file.
pub fn read_settings_file(path: &Path) -> Result<Settings, Error> {
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    if is_toml {
        parse_toml_settings(&content)
    } else {
        parse_app_settings(&content)
    }
}

/// Flattens top-level TOML scalars into settings.
pub fn parse_toml_settings(content: &str) -> Result<Settings, Error> {
    let table: toml::Table = content.parse()?;
    let mut settings = Settings::new();
    for (key, value) in table {
        let value = match value {
            toml::Value::String(s) => s,
            toml::Value::Boolean(b) => b.to_string(),
            toml::Value::Integer(i) => i.to_string(),
            other => {
                warn!(key = %key, kind = other.type_str(), "ignoring non-scalar setting");
                continue;
            }
        };
        settings.insert(key, value);
    }
    Ok(settings)
}

/// Collects `<add key="..." value="..."/>` entries under `<appSettings>`.
pub fn parse_app_settings(content: &str) -> Result<Settings, Error> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut settings = Settings::new();
    let mut depth_in_app_settings = 0usize;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"appSettings" => depth_in_app_settings += 1,
            Event::End(e) if e.name().as_ref() == b"appSettings" => {
                depth_in_app_settings = depth_in_app_settings.saturating_sub(1)
            }
            Event::Empty(e) | Event::Start(e)
                if depth_in_app_settings > 0 && e.name().as_ref() == b"add" =>
            {
                let mut key = None;
                let mut value = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    let text = attr.unescape_value()?.into_owned();
                    match attr.key.as_ref() {
                        b"key" => key = Some(text),
                        b"value" => value = Some(text),
                        _ => {}
                    }
                }
                if let (Some(key), Some(value)) = (key, value) {
                    settings.insert(key, value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(settings)
}

/// Loads the configuration file layer.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILES`] are
/// probed in `dir` and a missing file simply means no settings.
pub fn load_settings(path: Option<&Path>, dir: &Path) -> Result<Settings, Error> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(Error::config_error(format!(
                "config file does not exist: {}",
                path.display()
            )));
        }
        return read_settings_file(path);
    }
    for name in DEFAULT_CONFIG_FILES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "using config file");
            return read_settings_file(&candidate);
        }
    }
    Ok(Settings::new())
}
