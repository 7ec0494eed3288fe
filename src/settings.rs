//! Runtime configuration, layered from defaults, an optional
//! `Segserve.toml`, and `SEGSERVE_*` environment variables

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server binds to
    pub port: u16,

    /// Path to the TorchScript weights file, re-read on every request
    pub model_path: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000_i64)?
            .set_default("model_path", "models/segmenter.pt")?
            .add_source(File::with_name("Segserve").required(false))
            .add_source(Environment::with_prefix("SEGSERVE"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: "models/segmenter.pt".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_falls_back_to_defaults() {
        let settings = Settings::load().unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.port, defaults.port);
        assert_eq!(settings.model_path, defaults.model_path);
    }
}
