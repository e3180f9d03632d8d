use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::corpus::{PassageSource, QuranApiClient};
use crate::genai::{LlmClient, TextGenerator};

/// Shared application state.
///
/// Both external collaborators live behind trait objects built once at
/// startup and passed into the pipeline by parameter, so every stage runs
/// unchanged against substitute providers in tests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub corpus: Arc<dyn PassageSource>,
    pub llm: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // One shared client; its timeouts are the transport-level bound every
        // external call carries, so a hung collaborator surfaces as a
        // per-item failure in the enclosing stage.
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;

        let corpus = Arc::new(QuranApiClient::new(http_client.clone(), config.corpus.clone()));
        let llm = Arc::new(LlmClient::new(http_client, config.llm.clone()));

        Ok(Self::with_providers(config, corpus, llm))
    }

    /// Assemble state over explicit providers.
    pub fn with_providers(
        config: Config,
        corpus: Arc<dyn PassageSource>,
        llm: Arc<dyn TextGenerator>,
    ) -> Self {
        Self { config, corpus, llm }
    }
}
