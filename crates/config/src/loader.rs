use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    error::{Context, Error, Result},
    schema::SkilldocConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "skilldoc.toml",
    "skilldoc.yaml",
    "skilldoc.yml",
    "skilldoc.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<SkilldocConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./skilldoc.{toml,yaml,yml,json}` (project-local)
/// 2. `<user config dir>/skilldoc.{toml,yaml,yml,json}` (user-global)
///
/// Returns `SkilldocConfig::default()` if no config file is found or the
/// discovered file cannot be loaded.
pub fn discover_and_load() -> SkilldocConfig {
    if let Some(path) = find_config_file(Path::new(".")) {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    SkilldocConfig::default()
}

/// Find the first config file under `project_dir`, then in the user config dir.
pub fn find_config_file(project_dir: &Path) -> Option<PathBuf> {
    let local = CONFIG_FILENAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.exists());
    if local.is_some() {
        return local;
    }

    let dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/skilldoc/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "skilldoc").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> Result<SkilldocConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => Err(Error::message(format!("unsupported config format: .{ext}"))),
    }
}
