//! Configuration management for TexSvg Server

use std::env;
use std::path::PathBuf;

/// Default LaTeX compilation endpoint
pub const DEFAULT_TEXLIVE_URL: &str = "https://texlive.net/cgi-bin/latexcgi";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub compiler: CompilerConfig,
    pub rasterizer: RasterizerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body in bytes
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Accepted API keys, already split and stripped of empty entries
    pub allowed_api_keys: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CompilerConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct RasterizerConfig {
    /// Path to the pdf2svg executable (default: "pdf2svg" - uses PATH)
    pub tool_path: String,
    pub timeout_secs: u64,
    /// Directory for scratch PDF/SVG files (default: system temp)
    pub scratch_dir: PathBuf,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_body_bytes: 2 * 1024 * 1024,
            },
            auth: AuthConfig::default(),
            compiler: CompilerConfig {
                endpoint: DEFAULT_TEXLIVE_URL.to_string(),
                timeout_secs: 60,
            },
            rasterizer: RasterizerConfig {
                tool_path: "pdf2svg".to_string(),
                timeout_secs: 30,
                scratch_dir: env::temp_dir(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_or(&lookup, "PORT", defaults.server.port)?,
                max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", defaults.server.max_body_bytes)?,
            },
            auth: AuthConfig {
                allowed_api_keys: parse_key_list(&lookup("ALLOWED_API_KEYS").unwrap_or_default()),
            },
            compiler: CompilerConfig {
                endpoint: lookup("TEXLIVE_URL").unwrap_or(defaults.compiler.endpoint),
                timeout_secs: parse_or(&lookup, "COMPILE_TIMEOUT_SECS", defaults.compiler.timeout_secs)?,
            },
            rasterizer: RasterizerConfig {
                tool_path: lookup("PDF2SVG_PATH").unwrap_or(defaults.rasterizer.tool_path),
                timeout_secs: parse_or(&lookup, "RASTER_TIMEOUT_SECS", defaults.rasterizer.timeout_secs)?,
                scratch_dir: lookup("SCRATCH_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.rasterizer.scratch_dir),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Split a comma-separated key list. Empty entries never become keys.
pub fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
