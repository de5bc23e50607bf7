//! Configuration file handling for pocketbook.
//!
//! The configuration file is stored at `$POCKETBOOK_HOME/config.json` and holds the address of
//! the finance API along with optional overrides for where secrets are kept.

use crate::db::Db;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "pocketbook";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const TOKEN_JSON: &str = "token.json";
const CONFIG_JSON: &str = "config.json";
const POCKETBOOK_SQLITE: &str = "pocketbook.sqlite";

/// Overrides `base_url` from the configuration file when set and non-empty.
pub const BASE_URL_ENV: &str = "POCKETBOOK_BASE_URL";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$POCKETBOOK_HOME` and from there it loads `$POCKETBOOK_HOME/config.json`. It
/// provides paths to the other items that live in the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    sqlite_path: PathBuf,
    db: Db,
}

impl Config {
    /// Creates the home directory, its subdirectories, an initial `config.json` pointing at
    /// `base_url`, and the snapshot database.
    ///
    /// # Errors
    /// - Returns an error if `base_url` is not a valid URL or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, base_url: &str) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid base URL '{base_url}'"))?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the pocketbook home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let secrets = root.join(SECRETS);
        utils::make_dir(&secrets).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            base_url: base_url.to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        let sqlite_path = root.join(POCKETBOOK_SQLITE);
        let db = Db::init(&sqlite_path)
            .await
            .context("Unable to create SQLite DB")?;

        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
            sqlite_path,
            db,
        })
    }

    /// Validates that the home directory and its config file exist, loads them, and opens the
    /// snapshot database.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("pocketbook home is missing, run `pocketbook init` first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let secrets = root.join(SECRETS);
        if !secrets.is_dir() {
            bail!("The secrets directory is missing '{}'", secrets.display())
        }

        let sqlite_path = root.join(POCKETBOOK_SQLITE);
        let db = Db::load(&sqlite_path)
            .await
            .context("Unable to load SQLite DB")?;

        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
            sqlite_path,
            db,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn secrets(&self) -> &Path {
        &self.secrets
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    pub(crate) fn db(&self) -> &Db {
        &self.db
    }

    /// The address of the finance API, taking `POCKETBOOK_BASE_URL` into account.
    pub fn base_url(&self) -> String {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.config_file.base_url.clone(),
        }
    }

    /// Returns the stored `token_path` if it is absolute, otherwise resolves it against the home
    /// directory.
    pub fn token_path(&self) -> PathBuf {
        let path = self.config_file.token_path();
        if path.is_absolute() {
            return path;
        }
        self.root.join(path)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "pocketbook",
///   "config_version": 1,
///   "base_url": "http://localhost:4000",
///   "token_path": ".secrets/token.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "pocketbook"
    app_name: String,

    config_version: u8,

    /// Where the finance API is served, e.g. `https://finance.example.com`
    base_url: String,

    /// Path to the session token file, relative to the home directory or absolute. Defaults to
    /// `$POCKETBOOK_HOME/.secrets/token.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            base_url: String::new(),
            token_path: None,
        }
    }
}

impl ConfigFile {
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .context("Unable to load the config file")?;
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data)
            .await
            .context("Unable to write config file")
    }

    fn token_path(&self) -> PathBuf {
        self.token_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(SECRETS).join(TOKEN_JSON))
    }
}
