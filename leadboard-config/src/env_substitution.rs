//! Environment variable substitution in configuration values
//!
//! Supports:
//! - `${VAR_NAME}` - the variable's value; empty when unset (error in strict mode)
//! - `${VAR_NAME:-default}` - the variable's value, or `default` when unset

use crate::{ConfigError, ConfigResult};
use regex::Regex;
use serde_json::Value;
use tracing::trace;

/// Substitutes `${VAR}` references in strings
pub struct EnvVarProcessor {
    var_regex: Regex,
    strict_mode: bool,
}

impl EnvVarProcessor {
    /// Matches `${VAR_NAME}` and `${VAR_NAME:-default_value}`
    const ENV_VAR_PATTERN: &'static str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}";

    pub fn new(strict_mode: bool) -> ConfigResult<Self> {
        let var_regex = Regex::new(Self::ENV_VAR_PATTERN).map_err(|e| {
            ConfigError::validation_error(format!(
                "Failed to compile environment variable regex: {}",
                e
            ))
        })?;

        Ok(Self {
            var_regex,
            strict_mode,
        })
    }

    /// Missing variables become empty strings
    pub fn lenient() -> ConfigResult<Self> {
        Self::new(false)
    }

    /// Missing variables without a default are errors
    pub fn strict() -> ConfigResult<Self> {
        Self::new(true)
    }

    /// Substitute in every string inside `value`, recursively
    pub fn substitute_value(&self, value: &mut Value) -> ConfigResult<()> {
        match value {
            Value::String(s) => {
                if self.contains_patterns(s) {
                    *s = self.substitute_string(s)?;
                }
            }
            Value::Array(arr) => {
                for item in arr.iter_mut() {
                    self.substitute_value(item)?;
                }
            }
            Value::Object(obj) => {
                for (_, val) in obj.iter_mut() {
                    self.substitute_value(val)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn substitute_string(&self, s: &str) -> ConfigResult<String> {
        if self.strict_mode {
            for caps in self.var_regex.captures_iter(s) {
                let name = &caps[1];
                if std::env::var(name).is_err() && caps.get(2).is_none() {
                    return Err(ConfigError::EnvVarNotSet {
                        name: name.to_string(),
                    });
                }
            }
        }

        let result = self
            .var_regex
            .replace_all(s, |caps: &regex::Captures| {
                let name = &caps[1];
                match std::env::var(name) {
                    Ok(value) => {
                        trace!("Substituting environment variable {}", name);
                        value
                    }
                    Err(_) => caps
                        .get(2)
                        .map(|default| default.as_str().to_string())
                        .unwrap_or_default(),
                }
            })
            .to_string();

        Ok(result)
    }

    pub fn contains_patterns(&self, s: &str) -> bool {
        self.var_regex.is_match(s)
    }
}
