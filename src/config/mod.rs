//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Path of the persisted best-distance file
    pub high_score_path: PathBuf,

    /// Viewport width in pixels reported by the embedding host
    pub viewport_width: u32,
    /// Viewport height in pixels reported by the embedding host
    pub viewport_height: u32,

    /// Whether hitting a static obstacle also costs a life
    pub obstacle_hits_cost_life: bool,

    /// Optional fixed RNG seed for deterministic sessions
    pub rng_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // PORT is provided by most hosting platforms, fall back to SERVER_ADDR
        let server_addr = if let Ok(port) = env::var("PORT") {
            format!("0.0.0.0:{}", port)
        } else {
            env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        };

        Ok(Self {
            server_addr: server_addr
                .parse()
                .map_err(|_| ConfigError::InvalidAddress)?,

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            high_score_path: env::var("HIGH_SCORE_PATH")
                .unwrap_or_else(|_| "highscore.txt".to_string())
                .into(),

            viewport_width: parse_or("VIEWPORT_WIDTH", 800)?,
            viewport_height: parse_or("VIEWPORT_HEIGHT", 600)?,

            obstacle_hits_cost_life: env::var("OBSTACLE_HITS_COST_LIFE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),

            rng_seed: match env::var("RNG_SEED") {
                Ok(v) => Some(v.parse().map_err(|_| ConfigError::InvalidNumber("RNG_SEED"))?),
                Err(_) => None,
            },
        })
    }
}

fn parse_or(var: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(var) {
        Ok(v) => v.parse().map_err(|_| ConfigError::InvalidNumber(var)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server address format")]
    InvalidAddress,

    #[error("Invalid numeric value for {0}")]
    InvalidNumber(&'static str),
}
