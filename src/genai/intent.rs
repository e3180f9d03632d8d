use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::SearchIntent;

use super::TextGenerator;

/// Classify a raw user query into a [`SearchIntent`].
///
/// Never fails: an unreachable classifier or a structurally invalid reply
/// degrades to `Keyword` over the raw query, so the orchestrator always
/// receives a usable intent.
pub async fn resolve_intent(generator: &dyn TextGenerator, raw_query: &str) -> SearchIntent {
    let prompt = build_classification_prompt(raw_query);

    let reply = match generator.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Intent classification failed: {e:#}");
            return keyword_fallback(raw_query);
        }
    };

    match parse_intent(&reply) {
        Ok(intent) => intent,
        Err(e) => {
            tracing::warn!("Unusable intent payload: {e}. Raw: {reply}");
            keyword_fallback(raw_query)
        }
    }
}

fn keyword_fallback(raw_query: &str) -> SearchIntent {
    SearchIntent::Keyword {
        query: raw_query.to_string(),
    }
}

fn build_classification_prompt(raw_query: &str) -> String {
    format!(
        "You are an expert Quran search assistant. Analyze the user's query and determine \
         the best way to search the Quran.\n\n\
         Query: \"{raw_query}\"\n\n\
         Output JSON only:\n\
         {{\n\
           \"type\": \"keyword\" | \"verse_key\" | \"topic\",\n\
           \"query\": \"optimized search keywords or topic\",\n\
           \"verseKey\": \"chapter:verse\" (only if a specific verse is requested, e.g. \"2:255\"),\n\
           \"recommendedVerses\": [\"chapter:verse\", ...] (well-known verses on the topic, most relevant first)\n\
         }}\n\n\
         Examples:\n\
         \"verses about patience\" -> {{\"type\": \"topic\", \"query\": \"patience\", \"recommendedVerses\": [\"2:153\", \"3:200\"]}}\n\
         \"surah baqarah verse 255\" -> {{\"type\": \"verse_key\", \"query\": \"Ayatul Kursi\", \"verseKey\": \"2:255\"}}\n\
         \"tell me about moses\" -> {{\"type\": \"keyword\", \"query\": \"Moses Musa\"}}"
    )
}

/// The classifier's loosely-typed reply shape. Every field is validated
/// before use; nothing from the wire reaches the pipeline unchecked.
#[derive(Deserialize)]
struct RawIntent {
    #[serde(rename = "type")]
    kind: String,
    query: Option<String>,
    #[serde(rename = "verseKey")]
    verse_key: Option<String>,
    #[serde(rename = "recommendedVerses", default)]
    recommended_verses: Vec<String>,
}

fn parse_intent(content: &str) -> Result<SearchIntent> {
    // Models wrap JSON in code fences or prose; salvage the outermost object.
    let json_str = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    };

    let raw: RawIntent =
        serde_json::from_str(json_str).context("reply is not the expected JSON shape")?;

    let query = raw
        .query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    match raw.kind.as_str() {
        "verse_key" => {
            let key = raw.verse_key.context("verse_key intent without verseKey")?;
            let reference = key
                .parse()
                .with_context(|| format!("verseKey '{key}' is not a citation"))?;
            Ok(SearchIntent::VerseKey { reference })
        }
        "topic" => {
            let query = query.context("topic intent without query")?;
            // Individually malformed recommendations are dropped, never fatal.
            let recommended = raw
                .recommended_verses
                .iter()
                .filter_map(|key| match key.parse() {
                    Ok(reference) => Some(reference),
                    Err(_) => {
                        tracing::warn!("Dropping malformed recommended verse '{key}'");
                        None
                    }
                })
                .collect();
            Ok(SearchIntent::Topic { query, recommended })
        }
        "keyword" => {
            let query = query.context("keyword intent without query")?;
            Ok(SearchIntent::Keyword { query })
        }
        other => anyhow::bail!("unknown intent type '{other}'"),
    }
}
