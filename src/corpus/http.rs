use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::CorpusConfig;
use crate::models::{ChapterSummary, Passage, SearchHit, VerseReference};

use super::PassageSource;

/// Translation editions requested with every verse fetch:
/// Yusuf Ali (22), Pickthall (19), Saheeh International (20),
/// transliteration (57).
const TRANSLATION_EDITIONS: &str = "22,19,20,57";

/// Raw hits requested per corpus search. The pipeline caps how many are
/// expanded separately; this just keeps the search response small.
const SEARCH_SIZE: usize = 10;

/// Verses per page when walking a whole chapter.
const CHAPTER_PAGE_SIZE: usize = 50;

/// HTTP client for a quran.com v4 compatible corpus API.
#[derive(Clone)]
pub struct QuranApiClient {
    client: reqwest::Client,
    config: CorpusConfig,
}

impl QuranApiClient {
    pub fn new(client: reqwest::Client, config: CorpusConfig) -> Self {
        Self { client, config }
    }

    fn verse_params(&self) -> String {
        format!(
            "language=en&translations={TRANSLATION_EDITIONS}&fields=text_uthmani"
        )
    }

    async fn chapter_page(&self, chapter: u32, page: usize) -> Result<ChapterPageEnvelope> {
        let url = format!(
            "{}/verses/by_chapter/{chapter}?{}&per_page={CHAPTER_PAGE_SIZE}&page={page}",
            self.config.base_url,
            self.verse_params(),
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch chapter {chapter} page {page}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("Corpus chapter fetch returned {status} for chapter {chapter}");
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to parse chapter {chapter} page {page}"))
    }
}

#[async_trait]
impl PassageSource for QuranApiClient {
    async fn verse(&self, reference: VerseReference) -> Result<Option<Passage>> {
        let url = format!(
            "{}/verses/by_key/{reference}?{}",
            self.config.base_url,
            self.verse_params(),
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch verse {reference}"))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("Corpus verse fetch returned {status} for {reference}");
        }

        let body: VerseEnvelope = resp
            .json()
            .await
            .with_context(|| format!("Failed to parse verse {reference}"))?;

        passage_from_wire(body.verse).map(Some)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.config.base_url);
        let size = SEARCH_SIZE.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[("q", query), ("size", size.as_str()), ("language", "en")])
            .send()
            .await
            .context("Failed to call corpus search")?;

        // The corpus answers odd queries with non-success statuses; treat
        // that as zero hits rather than a failed request.
        if !resp.status().is_success() {
            tracing::warn!("Corpus search returned {} for {query:?}", resp.status());
            return Ok(Vec::new());
        }

        let body: SearchEnvelope = resp.json().await.context("Failed to parse corpus search")?;
        Ok(hits_from_wire(body.search.results))
    }

    async fn chapters(&self) -> Result<Vec<ChapterSummary>> {
        let url = format!("{}/chapters", self.config.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch chapter list")?;

        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("Corpus chapter list returned {status}");
        }

        let body: ChaptersEnvelope = resp.json().await.context("Failed to parse chapter list")?;
        Ok(body
            .chapters
            .into_iter()
            .map(|c| ChapterSummary {
                id: c.id,
                name: c.name_simple,
                arabic_name: c.name_arabic,
                verse_count: c.verses_count,
            })
            .collect())
    }

    async fn chapter_verses(&self, chapter: u32) -> Result<Vec<Passage>> {
        let first = self.chapter_page(chapter, 1).await?;
        let total_pages = first.pagination.map(|p| p.total_pages).unwrap_or(1);

        let mut verses = first.verses;

        if total_pages > 1 {
            let rest = join_all((2..=total_pages).map(|page| self.chapter_page(chapter, page)));
            for page in rest.await {
                verses.extend(page?.verses);
            }
        }

        verses.into_iter().map(passage_from_wire).collect()
    }
}

// ─── Wire types ──────────────────────────────────────────

#[derive(Deserialize)]
struct VerseEnvelope {
    verse: WireVerse,
}

#[derive(Deserialize)]
struct WireVerse {
    id: u64,
    verse_key: String,
    #[serde(default)]
    text_uthmani: Option<String>,
    #[serde(default)]
    translations: Vec<WireTranslation>,
}

#[derive(Deserialize)]
struct WireTranslation {
    resource_id: u32,
    text: String,
    #[serde(default)]
    resource_name: Option<String>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    search: SearchBody,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default)]
    results: Vec<WireSearchResult>,
}

#[derive(Deserialize)]
struct WireSearchResult {
    verse_key: String,
}

#[derive(Deserialize)]
struct ChaptersEnvelope {
    chapters: Vec<WireChapter>,
}

#[derive(Deserialize)]
struct WireChapter {
    id: u32,
    name_simple: String,
    name_arabic: String,
    verses_count: u32,
}

#[derive(Deserialize)]
struct ChapterPageEnvelope {
    verses: Vec<WireVerse>,
    #[serde(default)]
    pagination: Option<WirePagination>,
}

#[derive(Deserialize)]
struct WirePagination {
    total_pages: usize,
}

fn passage_from_wire(verse: WireVerse) -> Result<Passage> {
    let reference: VerseReference = verse
        .verse_key
        .parse()
        .with_context(|| format!("Corpus returned malformed verse key '{}'", verse.verse_key))?;

    let translations = verse
        .translations
        .into_iter()
        .map(|t| {
            let edition = t
                .resource_name
                .unwrap_or_else(|| format!("edition-{}", t.resource_id));
            (edition, t.text)
        })
        .collect();

    Ok(Passage {
        id: verse.id,
        reference,
        original_text: verse.text_uthmani.unwrap_or_default(),
        translations,
        annotation: None,
    })
}

/// Narrow raw search results to citation-only hits, dropping any entry whose
/// verse key does not parse.
fn hits_from_wire(results: Vec<WireSearchResult>) -> Vec<SearchHit> {
    results
        .into_iter()
        .filter_map(|r| match r.verse_key.parse() {
            Ok(reference) => Some(SearchHit { reference }),
            Err(e) => {
                tracing::warn!("Dropping corpus search hit: {e}");
                None
            }
        })
        .collect()
}
