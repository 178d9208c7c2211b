use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub hf_api_token: String,
    pub inference_url: String,
    pub database_url: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let hf_api_token = require_env("HUGGINGFACE_API_TOKEN")?;
        let hf_model = require_env("HF_MODEL")?;
        let inference_url = format!("https://api-inference.huggingface.co/models/{}", hf_model);

        let database_url = require_env("DATABASE_URL")?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        Ok(Config {
            server_addr,
            hf_api_token,
            inference_url,
            database_url,
            cors_origins,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| AppError::ConfigError(format!("Set {} environment variable", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_error_names_it() {
        let err = require_env("ARTICLE_SUMMARIZER_UNSET_VAR").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Set ARTICLE_SUMMARIZER_UNSET_VAR environment variable"
        );
    }
}
