//! Application state management

use std::sync::Arc;

use crate::auth::ApiKeys;
use crate::compile::{RemoteCompiler, TexliveClient};
use crate::config::Config;
use crate::raster::Rasterizer;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Shared application state
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    api_keys: ApiKeys,
    compiler: Arc<dyn RemoteCompiler>,
    rasterizer: Rasterizer,
}

impl AppState {
    /// Create the production state: texlive client and pdf2svg rasterizer
    pub fn new(config: Config) -> Result<Self, StateError> {
        let compiler = Arc::new(TexliveClient::new(&config.compiler)?);
        let rasterizer = Rasterizer::from_config(&config.rasterizer);
        Ok(Self::from_parts(config, compiler, rasterizer))
    }

    /// Create state from explicit collaborators
    pub fn from_parts(
        config: Config,
        compiler: Arc<dyn RemoteCompiler>,
        rasterizer: Rasterizer,
    ) -> Self {
        let api_keys = ApiKeys::new(config.auth.allowed_api_keys.iter().cloned());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api_keys,
                compiler,
                rasterizer,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the API key allow-list
    pub fn api_keys(&self) -> &ApiKeys {
        &self.inner.api_keys
    }

    /// Get the remote compiler
    pub fn compiler(&self) -> &dyn RemoteCompiler {
        self.inner.compiler.as_ref()
    }

    /// Get the rasterizer
    pub fn rasterizer(&self) -> &Rasterizer {
        &self.inner.rasterizer
    }
}
