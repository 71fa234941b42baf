//! Layered configuration for the command-line tool.
//!
//! Sources, lowest precedence first: built-in defaults, an optional YAML
//! file, then `NOTEBASE_*` environment variables. Command-line flags are
//! applied on top by the binary.

use config::{Config, Environment, File, FileFormat};
use notebase_core::prelude::*;
use std::path::Path;

/// Environment variable prefix (`NOTEBASE_LOG_LEVEL`, ...)
pub const ENV_PREFIX: &str = "NOTEBASE";

/// Load and validate engine configuration
pub fn load_config(file: Option<&Path>) -> Result<EngineConfig> {
    load_config_with(file, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
}

/// Load configuration with an explicit environment source
pub fn load_config_with(file: Option<&Path>, env: Environment) -> Result<EngineConfig> {
    let mut builder = Config::builder();
    if let Some(path) = file {
        if !path.exists() {
            return Err(Error::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
    }

    let config: EngineConfig = builder
        .add_source(env)
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| Error::config_error(e.to_string()))?;

    config.validate()?;
    log::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
