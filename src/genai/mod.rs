//! Generative text service: intent classification and passage commentary.
//!
//! Both capabilities ride on one [`TextGenerator`] seam so the pipeline can
//! run against a substitute generator in tests. The service may be slow,
//! return malformed output, or fail outright; nothing in this module lets
//! that escape to the request level.

pub mod annotate;
pub mod client;
pub mod intent;

use anyhow::Result;
use async_trait::async_trait;

pub use client::LlmClient;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt, return the model's full text reply.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
