//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    env_substitution::EnvVarProcessor,
    types::LeadboardConfig,
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::Path;
use tracing::{debug, trace};

/// Environment variables with this prefix override file settings
pub const ENV_PREFIX: &str = "LEADBOARD_";

/// Loads [`LeadboardConfig`] from defaults, discovered files and the environment.
///
/// Nothing is cached; each `load` reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    extra_file: Option<ConfigFile>,
    /// Fail on `${VAR}` references with no value and no default
    strict_env: bool,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific discovery (fixed directories)
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self {
            discovery,
            ..Self::default()
        }
    }

    /// Treat unset `${VAR}` references without a default as errors
    pub fn with_strict_env(mut self) -> Self {
        self.strict_env = true;
        self
    }

    /// Merge one more file above the discovered ones
    pub fn with_file(mut self, path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(crate::ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ConfigFormat::from_extension)
            .ok_or_else(|| {
                crate::ConfigError::invalid_value(
                    "config",
                    format!("unsupported file type: {}", path.display()),
                )
            })?;
        self.extra_file = Some(ConfigFile::new(
            path.to_path_buf(),
            format,
            crate::ConfigScope::Project,
        ));
        Ok(self)
    }

    /// Load, substitute `${VAR}` references, and validate
    pub fn load(&self) -> ConfigResult<LeadboardConfig> {
        let figment = self.build_figment();
        let mut raw: serde_json::Value = figment.extract()?;

        let processor = if self.strict_env {
            EnvVarProcessor::strict()?
        } else {
            EnvVarProcessor::lenient()?
        };
        processor.substitute_value(&mut raw)?;

        let config: LeadboardConfig = serde_json::from_value(raw)?;
        config.validate()?;
        debug!(
            data_dir = %config.data_dir.display(),
            store = config.store.kind(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Sources in precedence order (later sources override earlier ones):
    /// 1. Default values
    /// 2. Configuration files, global then project
    /// 3. `LEADBOARD_*` environment variables
    fn build_figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(LeadboardConfig::default()));

        let files = self.discovery.discover_all();
        for file in files.iter().chain(self.extra_file.iter()) {
            trace!(
                "Loading config file: {} ({:?})",
                file.path.display(),
                file.format
            );
            figment = match file.format {
                ConfigFormat::Toml => figment.merge(Toml::file(&file.path)),
                ConfigFormat::Yaml => figment.merge(Yaml::file(&file.path)),
                ConfigFormat::Json => figment.merge(Json::file(&file.path)),
            };
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
