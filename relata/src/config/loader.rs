//! Layered loading of scorer settings.
//!
//! Sources are merged in the order they are added, later ones overriding
//! earlier ones key by key. A host normally starts from the built-in
//! defaults, lets a `relata.toml` (or YAML/JSON) file adjust the fetcher and
//! cache settings, and finally lets `RELATA_*` environment variables win:
//!
//! ```toml
//! [fetcher]
//! top_n = 20
//! hide_out_of_stock = false
//!
//! [cache]
//! ttl = "2m"
//! ```

use super::{ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, Result, models::*, validation};
use figment::{
    Figment, Provider,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::Path;

/// File formats a configuration file may use, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    const EXTENSIONS: [&'static str; 4] = ["toml", "yaml", "yml", "json"];

    fn of(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Builds a [`RelataConfig`] from defaults, files and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Start from the built-in defaults (top 15 published items, one minute
    /// cache, out-of-stock products hidden).
    pub fn new() -> Self {
        Self {
            figment: Figment::from(Serialized::defaults(RelataConfig::default())),
        }
    }

    /// Defaults, then the first default file found, then the environment;
    /// validated.
    pub fn load() -> Result<RelataConfig> {
        Self::new().load_default_files().load_env().extract()
    }

    /// Layer a TOML, YAML or JSON file over the current settings.
    ///
    /// The format follows the extension, case-insensitively.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ConfigError::FileLoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let format = FileFormat::of(path).ok_or_else(|| {
            ConfigError::FileLoadError(format!("Unsupported file format: {}", path.display()))
        })?;

        Ok(match format {
            FileFormat::Toml => self.merge(Toml::file(path)),
            FileFormat::Yaml => self.merge(Yaml::file(path)),
            FileFormat::Json => self.merge(Json::file(path)),
        })
    }

    /// Layer the first readable file among [`DEFAULT_CONFIG_FILES`], then
    /// `config.<ext>` from the user's configuration directory.
    ///
    /// Missing files are not an error; hosts without any file keep the
    /// defaults.
    pub fn load_default_files(&mut self) -> &mut Self {
        for file in DEFAULT_CONFIG_FILES {
            let path = Path::new(file);
            if path.is_file() && self.load_file(path).is_ok() {
                break;
            }
        }

        if let Some(dirs) = directories::ProjectDirs::from("org", "relata", "relata") {
            for ext in FileFormat::EXTENSIONS {
                let path = dirs.config_dir().join(format!("config.{}", ext));
                if path.is_file() && self.load_file(&path).is_ok() {
                    break;
                }
            }
        }

        self
    }

    /// Layer `RELATA_`-prefixed environment variables.
    ///
    /// Sections are separated by a double underscore, e.g.
    /// `RELATA_FETCHER__TOP_N=20` or `RELATA_CACHE__TTL=2m`.
    pub fn load_env(&mut self) -> &mut Self {
        self.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Layer any other figment provider, such as a host's own settings.
    pub fn merge<T: Provider>(&mut self, provider: T) -> &mut Self {
        self.figment = std::mem::take(&mut self.figment).merge(provider);
        self
    }

    /// Extract the merged settings and validate them.
    pub fn extract(&self) -> Result<RelataConfig> {
        let config: RelataConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(&config)?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
