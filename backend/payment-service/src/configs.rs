use std::path::PathBuf;

use common_utils::consts;
use domain_types::types::GatewayConfig;

use crate::error::ConfigurationError;

#[derive(Clone, serde::Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, ConfigurationError> {
        Self::new_with_config_path(None)
    }

    /// Function to build the configuration by picking it from default locations
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigurationError> {
        let env = consts::Env::current_env();
        let config_path = Self::config_path(env, explicit_config_path);

        let config = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DPS")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        let config: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            tracing::error!(%error, "unable to deserialize application configuration");
            error.into_inner()
        })?;

        Ok(config)
    }

    /// Config path.
    pub fn config_path(environment: consts::Env, explicit_config_path: Option<PathBuf>) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            let config_directory: String = "config".into();
            let config_file_name = environment.config_path();

            config_path.push(workspace_path());
            config_path.push(config_directory);
            config_path.push(config_file_name);
        }
        config_path
    }
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use common_utils::consts::{DEFAULT_CURRENCY, DEFAULT_PXPAY_URL, DEFAULT_PXPOST_URL};

    use super::*;

    #[test]
    fn defaults_hold_without_any_sources() {
        let config = Config::new_with_config_path(Some(PathBuf::from(
            "this/file/does/not/exist.toml",
        )))
        .unwrap();

        assert_eq!(config.gateway.pxpay_url, DEFAULT_PXPAY_URL);
        assert_eq!(config.gateway.pxpost_url, DEFAULT_PXPOST_URL);
        assert_eq!(config.gateway.currency, DEFAULT_CURRENCY);
        assert!(config.gateway.pxpay_user_id.is_none());
        assert!(config.gateway.pxpost_password.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[gateway]\ncurrency = \"AUD\"\npxpay_user_id = \"SampleUser\""
        )
        .unwrap();

        let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.gateway.currency, "AUD");
        assert!(config.gateway.pxpay_user_id.is_some());
        // untouched values keep their defaults
        assert_eq!(config.gateway.pxpay_url, DEFAULT_PXPAY_URL);
    }
}
