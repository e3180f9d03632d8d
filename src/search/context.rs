use futures_util::future::join_all;

use crate::corpus::PassageSource;
use crate::models::{Passage, VerseReference};

/// Expand one citation into its surrounding context window.
///
/// Fetches every reference in `[max(1, verse - window), verse + window]`
/// concurrently and keeps the ones the corpus resolves, in ascending verse
/// order. References past the chapter's end (or failing individually) are
/// dropped without affecting their siblings; the call itself never fails.
/// `window = 0` fetches exactly the citation itself.
pub async fn expand(
    source: &dyn PassageSource,
    reference: VerseReference,
    window: u32,
) -> Vec<Passage> {
    let start = reference.verse.saturating_sub(window).max(1);
    let end = reference.verse.saturating_add(window);

    let fetched = join_all((start..=end).map(|verse| {
        let target = VerseReference {
            chapter: reference.chapter,
            verse,
        };
        async move {
            match source.verse(target).await {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!("Dropping unresolvable verse {target}: {e:#}");
                    None
                }
            }
        }
    }))
    .await;

    fetched.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use anyhow::Result;
    use async_trait::async_trait;

    use super::*;
    use crate::models::{ChapterSummary, SearchHit};

    /// Corpus fake backed by chapter lengths; records every requested key.
    struct FakeCorpus {
        /// chapter → verse count
        chapters: BTreeMap<u32, u32>,
        requested: Mutex<Vec<VerseReference>>,
    }

    impl FakeCorpus {
        fn new(chapters: &[(u32, u32)]) -> Self {
            Self {
                chapters: chapters.iter().copied().collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<VerseReference> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PassageSource for FakeCorpus {
        async fn verse(&self, reference: VerseReference) -> Result<Option<Passage>> {
            self.requested.lock().unwrap().push(reference);
            let resolvable = self
                .chapters
                .get(&reference.chapter)
                .is_some_and(|&count| reference.verse <= count);
            Ok(resolvable.then(|| Passage {
                id: u64::from(reference.chapter) * 1000 + u64::from(reference.verse),
                reference,
                original_text: format!("text {reference}"),
                translations: BTreeMap::new(),
                annotation: None,
            }))
        }

        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
            Ok(Vec::new())
        }

        async fn chapters(&self) -> Result<Vec<ChapterSummary>> {
            Ok(Vec::new())
        }

        async fn chapter_verses(&self, _chapter: u32) -> Result<Vec<Passage>> {
            Ok(Vec::new())
        }
    }

    fn reference(s: &str) -> VerseReference {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_window_floors_at_verse_one() {
        let corpus = FakeCorpus::new(&[(2, 286)]);
        let passages = expand(&corpus, reference("2:1"), 2).await;

        // Never requests 2:0 or below, fetches 2:1..=2:3
        assert_eq!(
            corpus.requested(),
            vec![reference("2:1"), reference("2:2"), reference("2:3")]
        );
        assert_eq!(passages.len(), 3);
    }

    #[tokio::test]
    async fn test_window_is_symmetric_in_the_middle() {
        let corpus = FakeCorpus::new(&[(2, 286)]);
        let passages = expand(&corpus, reference("2:255"), 1).await;

        let keys: Vec<String> = passages.iter().map(|p| p.reference.to_string()).collect();
        assert_eq!(keys, vec!["2:254", "2:255", "2:256"]);
    }

    #[tokio::test]
    async fn test_references_past_chapter_end_are_dropped() {
        // Chapter 114 has 6 verses; window around the last one
        let corpus = FakeCorpus::new(&[(114, 6)]);
        let passages = expand(&corpus, reference("114:6"), 2).await;

        let keys: Vec<String> = passages.iter().map(|p| p.reference.to_string()).collect();
        assert_eq!(keys, vec!["114:4", "114:5", "114:6"]);
    }

    #[tokio::test]
    async fn test_zero_window_fetches_only_the_citation() {
        let corpus = FakeCorpus::new(&[(1, 7)]);
        let passages = expand(&corpus, reference("1:5"), 0).await;

        assert_eq!(corpus.requested(), vec![reference("1:5")]);
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].reference, reference("1:5"));
    }

    #[tokio::test]
    async fn test_unresolvable_citation_yields_empty() {
        let corpus = FakeCorpus::new(&[(2, 286)]);
        let passages = expand(&corpus, reference("999:999"), 0).await;
        assert!(passages.is_empty());
    }
}
