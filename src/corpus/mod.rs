//! Read-only access to the passage corpus service.
//!
//! The corpus is an unreliable external collaborator: the pipeline treats a
//! failed or not-found fetch for a single citation as a per-item absence,
//! never as a request-level failure. [`PassageSource`] is the seam: stages
//! take it by parameter, so tests substitute an in-memory source.

pub mod http;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ChapterSummary, Passage, SearchHit, VerseReference};

pub use http::QuranApiClient;

#[async_trait]
pub trait PassageSource: Send + Sync {
    /// Fetch one passage by citation. `Ok(None)` means the corpus cannot
    /// resolve the reference (past chapter end, unknown chapter); `Err` is a
    /// transport-level failure. Callers treat both as item absence.
    async fn verse(&self, reference: VerseReference) -> Result<Option<Passage>>;

    /// Keyword/topic search returning citation hits in corpus ranking order.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    /// Chapter metadata for browse views.
    async fn chapters(&self) -> Result<Vec<ChapterSummary>>;

    /// Every passage of one chapter, in verse order.
    async fn chapter_verses(&self, chapter: u32) -> Result<Vec<Passage>>;
}
