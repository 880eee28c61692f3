use directories::ProjectDirs;
use std::{
    env,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use super::ConfigError;

/// Environment variable naming an explicit configuration file.
const CONFIG_ENV_VAR: &str = "ORRERY_CONFIG";

static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("io.github", "orrery", "orrery_demo"));
static CONFIG_PATH: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    PROJECT_DIRS
        .as_ref()
        .map(|dir| dir.config_dir().join("config.toml"))
});

pub(super) fn override_path() -> Option<PathBuf> {
    match env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => CONFIG_PATH.clone(),
    }
}

pub(super) fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}
