//! # verse-search
//!
//! A Rust web service that answers free-text questions about the Quran with
//! an ordered, deduplicated list of passages, the leading ones annotated
//! with generated commentary.
//!
//! ## Architecture
//!
//! One request flows through a fan-out/fan-in pipeline:
//!
//! ```text
//!                        ┌──────────────┐
//!                        │  User Query   │
//!                        └──────┬───────┘
//!                               │
//!                               ▼
//!                   ┌───────────────────────┐
//!                   │  Intent Classification │
//!                   │ (LLM → keyword fallback)│
//!                   └───────────┬───────────┘
//!              verse_key        │        topic / keyword
//!            ┌──────────────────┴──────────────────┐
//!            ▼                                     ▼
//!   ┌─────────────────┐              ┌─────────────────────────┐
//!   │ Context Window  │              │   Hybrid Retrieval      │
//!   │  (±1 verse,     │              │ recommended ∥ corpus    │
//!   │   concurrent)   │              │ search (top 5, ±1 each) │
//!   └────────┬────────┘              └────────────┬────────────┘
//!            │                                    ▼
//!            │                       ┌─────────────────────────┐
//!            │                       │  Merge + Dedupe by id   │
//!            │                       │   (recommended first)   │
//!            │                       └────────────┬────────────┘
//!            │                                    ▼
//!            │                       ┌─────────────────────────┐
//!            │                       │  Commentary (top 5,     │
//!            │                       │  concurrent, optional)  │
//!            │                       └────────────┬────────────┘
//!            └──────────────────┬─────────────────┘
//!                               ▼
//!                   ┌───────────────────────┐
//!                   │  {intent, results}    │
//!                   └───────────────────────┘
//! ```
//!
//! Every fan-out joins all branches and tolerates individual failure: an
//! unresolvable citation, a failed hit expansion, or a failed commentary
//! call drops that one item and nothing else. Only malformed input (400)
//! and genuinely unexpected failures (500) reach the caller.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server, corpus, LLM, and pipeline bounds
//! - [`models`] - Shared data types: `VerseReference`, `SearchIntent`, `Passage`, request/response types
//! - [`corpus`] - The passage corpus seam and its quran.com v4 HTTP client
//! - [`genai`] - The generative text seam: intent classification and passage commentary
//! - [`search::context`] - Concurrent context-window expansion around a citation
//! - [`search::retrieve`] - Hybrid recommended + corpus-search retrieval
//! - [`search::merge`] - Order-preserving merge and deduplication
//! - [`api`] - Axum HTTP handlers for search and chapter browsing
//! - [`state`] - Shared application state holding config and provider handles

pub mod api;
pub mod config;
pub mod corpus;
pub mod genai;
pub mod models;
pub mod search;
pub mod state;
