use std::path::PathBuf;

use resbuild::config::Settings;

/// Settings given on the command line; they take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub namespace: Option<String>,
    pub resource_path: Option<PathBuf>,
    pub source_path: Option<PathBuf>,
    pub main_at_root: Option<bool>,
    pub ignore_empty_default: bool,
    pub sdk_path: Option<PathBuf>,
    pub resgen_path: Option<PathBuf>,
    pub csc_path: Option<PathBuf>,
    pub al_path: Option<PathBuf>,
}

impl CliOverrides {
    /// Converts the overrides into a settings layer using the config file's key names.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new();
        let mut set = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                settings.insert(key.to_string(), value);
            }
        };
        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.to_string_lossy().into_owned());

        set("ResourceNamespace", self.namespace.clone());
        set("ResourcePath", path(&self.resource_path));
        set("ResourceSourcePath", path(&self.source_path));
        set("ResourceMainAtRoot", self.main_at_root.map(|b| b.to_string()));
        // A bare flag can only switch the policy on.
        set(
            "IgnoreEmptyDefault",
            self.ignore_empty_default.then(|| "true".to_string()),
        );
        set("SdkPath", path(&self.sdk_path));
        set("ResGenPath", path(&self.resgen_path));
        set("CscPath", path(&self.csc_path));
        set("AlPath", path(&self.al_path));
        settings
    }
}
