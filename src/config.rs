use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::SweepError;

const ENV_PREFIX: &str = "MSWEEP";

pub fn default_config_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("mobile-sweep").join("config.toml")
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    /// Android SDK root. Empty means auto-detect.
    pub sdk_root: String,
    /// .NET installation root holding `packs/`. Empty means auto-detect.
    pub dotnet_root: String,
    pub remover: RemoverKind,
    pub build_dirs: Vec<String>,
    pub build_ignore: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sdk_root: String::new(),
            dotnet_root: String::new(),
            remover: RemoverKind::default(),
            build_dirs: vec!["bin".into(), "obj".into()],
            build_ignore: vec!["**/node_modules".into(), "**/packages".into()],
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RemoverKind {
    #[default]
    Native,
    Shell,
}

impl SweepConfig {
    pub fn load() -> Result<Self, SweepError> {
        Self::load_from(&default_config_path())
    }

    /// Reads the optional TOML file, then lets `MSWEEP_*` variables override it.
    pub fn load_from(path: &Path) -> Result<Self, SweepError> {
        Self::load_with_env(path, None)
    }

    /// `env` replaces the process environment when given.
    fn load_with_env(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self, SweepError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("build_dirs")
                    .with_list_parse_key("build_ignore")
                    .source(env),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[allow(unused)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "macos")] {
        const CURRENT_PLATFORM: Platform = Platform::MacOs;
    } else if #[cfg(windows)] {
        const CURRENT_PLATFORM: Platform = Platform::Windows;
    } else {
        const CURRENT_PLATFORM: Platform = Platform::Linux;
    }
}

impl Platform {
    pub fn current() -> Self {
        CURRENT_PLATFORM
    }

    pub fn is_macos(self) -> bool {
        self == Platform::MacOs
    }
}

/// Every root a command may touch, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub project: PathBuf,
    pub sdk_root: PathBuf,
    pub packs: PathBuf,
    pub device_support: PathBuf,
    pub simulator_assets: PathBuf,
    pub simulator_manifest: PathBuf,
}

pub const SIMULATOR_ASSETS_DIR: &str = "/System/Library/AssetsV2/com_apple_MobileAsset_iOSSimulatorRuntime";
pub const SIMULATOR_MANIFEST: &str = "com_apple_MobileAsset_iOSSimulatorRuntime.xml";

impl ToolPaths {
    pub fn resolve(config: &SweepConfig, platform: Platform, project: PathBuf) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        let sdk_root = non_empty(&config.sdk_root)
            .or_else(|| env_path("ANDROID_HOME"))
            .or_else(|| env_path("ANDROID_SDK_ROOT"))
            .unwrap_or_else(|| default_sdk_root(platform, &home));

        let dotnet_root = non_empty(&config.dotnet_root)
            .or_else(|| env_path("DOTNET_ROOT"))
            .unwrap_or_else(|| default_dotnet_root(platform));

        let simulator_assets = PathBuf::from(SIMULATOR_ASSETS_DIR);

        Self {
            project,
            sdk_root,
            packs: dotnet_root.join("packs"),
            device_support: home.join("Library/Developer/Xcode/iOS DeviceSupport"),
            simulator_manifest: simulator_assets.join(SIMULATOR_MANIFEST),
            simulator_assets,
        }
    }
}

fn non_empty(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(PathBuf::from(value)) }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key).ok().as_deref().and_then(non_empty)
}

fn default_sdk_root(platform: Platform, home: &Path) -> PathBuf {
    match platform {
        Platform::MacOs => home.join("Library/Android/sdk"),
        Platform::Windows => dirs::data_local_dir().unwrap_or_else(|| home.join("AppData/Local")).join("Android/Sdk"),
        Platform::Linux => home.join("Android/Sdk"),
    }
}

fn default_dotnet_root(platform: Platform) -> PathBuf {
    match platform {
        Platform::MacOs => PathBuf::from("/usr/local/share/dotnet"),
        Platform::Windows => PathBuf::from(r"C:\Program Files\dotnet"),
        Platform::Linux => PathBuf::from("/usr/share/dotnet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = SweepConfig::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.build_dirs, vec!["bin", "obj"]);
        assert_eq!(config.remover, RemoverKind::Native);
    }

    #[test]
    fn test_file_values_are_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "sdk_root = \"/opt/android\"\nremover = \"shell\"\nbuild_dirs = [\"out\"]\n").unwrap();

        let config = SweepConfig::load_from(&path).unwrap();
        assert_eq!(config.sdk_root, "/opt/android");
        assert_eq!(config.remover, RemoverKind::Shell);
        assert_eq!(config.build_dirs, vec!["out"]);
        assert_eq!(config.build_ignore, SweepConfig::default().build_ignore);
    }

    #[test]
    fn test_environment_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "build_dirs = [\"out\"]\nremover = \"native\"\n").unwrap();

        let mut env = config::Map::new();
        env.insert("MSWEEP_BUILD_DIRS".to_string(), "out,dist".to_string());
        env.insert("MSWEEP_BUILD_IGNORE".to_string(), "**/vendor".to_string());
        env.insert("MSWEEP_REMOVER".to_string(), "shell".to_string());
        env.insert("OTHER_BUILD_DIRS".to_string(), "ignored".to_string());

        let config = SweepConfig::load_with_env(&path, Some(env)).unwrap();
        assert_eq!(config.build_dirs, vec!["out", "dist"]);
        assert_eq!(config.build_ignore, vec!["**/vendor"]);
        assert_eq!(config.remover, RemoverKind::Shell);
    }

    #[test]
    fn test_configured_sdk_root_wins() {
        let config = SweepConfig { sdk_root: "/opt/android".into(), ..SweepConfig::default() };
        let paths = ToolPaths::resolve(&config, Platform::Linux, PathBuf::from("."));
        assert_eq!(paths.sdk_root, PathBuf::from("/opt/android"));
        assert!(paths.simulator_manifest.ends_with(SIMULATOR_MANIFEST));
    }

    #[test]
    fn test_configured_dotnet_root_holds_packs() {
        let config = SweepConfig { dotnet_root: "/opt/dotnet".into(), ..SweepConfig::default() };
        let paths = ToolPaths::resolve(&config, Platform::MacOs, PathBuf::from("."));
        assert_eq!(paths.packs, PathBuf::from("/opt/dotnet/packs"));
    }
}
