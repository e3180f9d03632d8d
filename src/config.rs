use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Passage corpus service configuration
    pub corpus: CorpusConfig,
    /// Generative text service configuration
    pub llm: LlmConfig,
    /// Search pipeline bounds
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Base URL of the corpus API (quran.com v4 compatible)
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama" or "openai"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for intent classification and commentary
    pub chat_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
}

/// Latency/cost bounds on the pipeline's fan-out width. Both caps limit how
/// many external calls one request may issue, not result correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Corpus search hits expanded into context windows
    pub max_corpus_hits: usize,
    /// Leading results enriched with generated commentary
    pub max_annotations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9000".to_string(),
            corpus: CorpusConfig::default(),
            llm: LlmConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.quran.com/api/v4".to_string(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            chat_model: "llama3.2".to_string(),
            api_key: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_corpus_hits: 5,
            max_annotations: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("VERSE_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("CORPUS_BASE_URL") {
            config.corpus.base_url = url;
        }
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(val) = std::env::var("VERSE_SEARCH_MAX_CORPUS_HITS") {
            if let Ok(v) = val.parse() {
                config.search.max_corpus_hits = v;
            }
        }
        if let Ok(val) = std::env::var("VERSE_SEARCH_MAX_ANNOTATIONS") {
            if let Ok(v) = val.parse() {
                config.search.max_annotations = v;
            }
        }

        config
    }
}
