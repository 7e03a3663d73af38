use crate::{AppSettings, RawSettings};
use color_eyre::eyre::{Result, WrapErr};
use std::path::Path;

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.yaml";

/// Loads `config/settings.yaml`, overridden by `APP__`-prefixed environment
/// variables (also read from `.env`).
pub fn load_app_settings() -> Result<AppSettings> {
    load_app_settings_from(DEFAULT_SETTINGS_PATH)
}

pub fn load_app_settings_from(path: impl AsRef<Path>) -> Result<AppSettings> {
    // Load .env first so its values take part in the environment override.
    dotenv::from_path(".env").ok();
    let config_path = path
        .as_ref()
        .canonicalize()
        .wrap_err_with(|| format!("Settings file {} not found", path.as_ref().display()))?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}
