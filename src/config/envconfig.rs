use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Layered loading: optional config file first, then `PREFIX_` environment
/// variables with `__` between nested keys (`APP_DATABASE__URL`).
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";
    /// Environment variable naming an optional TOML/YAML/JSON config file.
    const FILE_VAR: &'static str = "TODOS_API_CONFIG_FILE";

    fn load_dotenv() {
        // Load .env from crate root (falls back to current dir if missing)
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();

        let mut builder = config_rs::Config::builder();
        if let Ok(path) = std::env::var(Self::FILE_VAR) {
            builder = builder.add_source(config_rs::File::with_name(&path).required(true));
        }

        let settings = builder
            .add_source(
                config_rs::Environment::with_prefix(Self::PREFIX)
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration sources")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize configuration")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
