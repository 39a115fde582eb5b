//! Config path resolution helpers.

use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "avatar.toml";

/// Default location of the configuration file: `<config dir>/avatar/avatar.toml`.
pub fn config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("avatar").join(CONFIG_FILE_NAME))
}
