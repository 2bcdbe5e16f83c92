//! Configuration for leadboard
//!
//! Settings are layered with [figment], later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `~/.leadboard/leadboard.{toml,yaml,yml,json}`
//! 3. `./.leadboard/leadboard.{toml,yaml,yml,json}`
//! 4. `LEADBOARD_*` environment variables, nested with `__`
//!    (`LEADBOARD_STORE__KIND=rest`)
//!
//! String values may reference the environment as `${VAR}` or
//! `${VAR:-default}`, which keeps secrets such as API keys out of files.
//!
//! ```rust,no_run
//! use leadboard_config::ConfigProvider;
//!
//! let config = ConfigProvider::new().load().unwrap();
//! println!("board lives in {}", config.data_dir.display());
//! ```

pub mod discovery;
pub mod env_substitution;
mod error;
mod provider;
mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{LeadboardConfig, RetrySettings, StoreConfig, DEFAULT_DATA_DIR};
