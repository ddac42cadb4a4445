use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.plate-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Entry-form field limits.
    #[serde(default)]
    pub form: FormConfig,
    /// Site-specific pass settings.
    #[serde(default)]
    pub site: SiteConfig,
}

/// Limits applied by [`crate::form::validate_form`].
#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// Minimum driver-name length in characters. Defaults to `2`.
    #[serde(default = "default_name_min_len")]
    pub name_min_len: usize,
    /// Maximum driver-name length in characters. Defaults to `20`.
    #[serde(default = "default_name_max_len")]
    pub name_max_len: usize,
    /// Required leading digits of a mobile number. Defaults to `"010"`.
    #[serde(default = "default_phone_prefix")]
    pub phone_prefix: String,
    /// Required digit count once separators are dropped. Defaults to `11`.
    #[serde(default = "default_phone_digits")]
    pub phone_digits: usize,
}

fn default_name_min_len() -> usize {
    2
}

fn default_name_max_len() -> usize {
    20
}

fn default_phone_prefix() -> String {
    "010".to_string()
}

fn default_phone_digits() -> usize {
    11
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            name_min_len: default_name_min_len(),
            name_max_len: default_name_max_len(),
            phone_prefix: default_phone_prefix(),
            phone_digits: default_phone_digits(),
        }
    }
}

/// Values written into the scan payload and pass file names.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// `type` field of the scan payload. Defaults to `"userInput"`.
    #[serde(default = "default_payload_type")]
    pub payload_type: String,
    /// Prefix of generated pass ids. Defaults to `"qr"`.
    #[serde(default = "default_pass_id_prefix")]
    pub pass_id_prefix: String,
    /// Extension used for the saved pass image. Defaults to `"png"`.
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
}

fn default_payload_type() -> String {
    "userInput".to_string()
}

fn default_pass_id_prefix() -> String {
    "qr".to_string()
}

fn default_image_extension() -> String {
    "png".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            payload_type: default_payload_type(),
            pass_id_prefix: default_pass_id_prefix(),
            image_extension: default_image_extension(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base>/.plate-checkr/config.toml`
/// 3. `~/.config/plate-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base.join(".plate-checkr").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("plate-checkr").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
