use crate::error::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub artifacts_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            artifacts_dir: env::var("ARTIFACTS_DIR")
                .unwrap_or_else(|_| "artifacts".to_string())
                .into(),
        })
    }
}
