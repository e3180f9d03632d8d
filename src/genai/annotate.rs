use futures_util::future::join_all;

use crate::models::Passage;

use super::TextGenerator;

/// Translation shown to the model alongside the original text.
const PREFERRED_EDITION: &str = "Saheeh International";

/// Enrich the first `limit` passages with generated commentary, concurrently.
///
/// Annotation is purely additive: ordering is unchanged, records past the
/// limit pass through untouched, and a failed generation leaves that one
/// record without commentary rather than affecting its siblings.
pub async fn annotate(
    generator: &dyn TextGenerator,
    mut results: Vec<Passage>,
    limit: usize,
) -> Vec<Passage> {
    let n = results.len().min(limit);
    if n == 0 {
        return results;
    }

    let annotations = join_all(results[..n].iter().map(|passage| {
        let prompt = build_commentary_prompt(passage);
        let reference = passage.reference;
        async move {
            match generator.generate(&prompt).await {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        None
                    } else {
                        Some(text.to_string())
                    }
                }
                Err(e) => {
                    tracing::warn!("Commentary generation failed for {reference}: {e:#}");
                    None
                }
            }
        }
    }))
    .await;

    for (passage, annotation) in results.iter_mut().zip(annotations) {
        passage.annotation = annotation;
    }

    results
}

fn build_commentary_prompt(passage: &Passage) -> String {
    let translation = passage
        .translations
        .get(PREFERRED_EDITION)
        .map(String::as_str)
        .or_else(|| passage.translations.values().next().map(String::as_str))
        .unwrap_or_default();

    format!(
        "Write a short reflective commentary (2-3 sentences) on this Quran verse. \
         Focus on its meaning and significance. Respond with the commentary only, \
         no preamble.\n\n\
         Verse {}:\n\
         Arabic: {}\n\
         Translation: {}",
        passage.reference, passage.original_text, translation
    )
}
