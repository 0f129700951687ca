use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::config::Config;
use crate::services::{TranslationBackend, TranslationPipeline};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: TranslationPipeline,
    cookie_key: Key,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let pipeline = TranslationPipeline::from_config(&config);
        Self::assemble(config, pipeline)
    }

    /// State with a caller-supplied translation backend, e.g. a test double.
    pub fn with_backend(config: Config, backend: Arc<dyn TranslationBackend>) -> Self {
        let pipeline = TranslationPipeline::with_backend(&config, backend);
        Self::assemble(config, pipeline)
    }

    fn assemble(config: Config, pipeline: TranslationPipeline) -> Self {
        let cookie_key = cookie_key(&config.secret_key);
        Self {
            config: Arc::new(config),
            pipeline,
            cookie_key,
        }
    }
}

/// Signing key for flash cookies. Any secret length is accepted; it is
/// stretched to the 64 bytes the cookie key requires.
pub fn cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
