//! Runtime configuration: an optional `config/menu.toml` overridden by
//! `MENU_`-prefixed environment variables, e.g. `MENU_IMAGE_HOST__CLOUD_NAME=demo`.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config/menu";
pub const ENV_PREFIX: &str = "MENU";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreConfig,
    pub cart: CartConfig,
    pub image_host: ImageHostConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub buffer_size: usize,
    /// JSON document loaded as the initial tree.
    pub seed_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64,
            seed_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CartConfig {
    pub storage_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".menu_storage"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageHostConfig {
    pub base_url: String,
    pub cloud_name: String,
    pub upload_preset: String,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cloudinary.com".to_string(),
            cloud_name: String::new(),
            upload_preset: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Local,
    Rest,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub provider: AuthProvider,
    pub base_url: String,
    pub api_key: String,
    pub admin_email: String,
    /// Argon2 PHC string for the local provider.
    pub admin_password_hash: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProvider::Local,
            base_url: "https://identitytoolkit.googleapis.com".to_string(),
            api_key: String::new(),
            admin_email: String::new(),
            admin_password_hash: String::new(),
        }
    }
}

impl AuthConfig {
    /// True when no admin can sign in: the local provider with no password hash.
    pub fn lacks_admin_account(&self) -> bool {
        self.provider == AuthProvider::Local && self.admin_password_hash.is_empty()
    }
}

impl Settings {
    /// Reads `.env`, then the config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(File::with_name(CONFIG_FILE).required(false), Environment::with_prefix(ENV_PREFIX))
    }

    fn build(file: impl config::Source + Send + Sync + 'static, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(file)
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
