use anyhow::Result;
use futures_util::future::join_all;

use crate::corpus::PassageSource;
use crate::models::{Passage, VerseReference};
use crate::search::context;

/// Recommended citations are shown bare; corpus hits get one verse of
/// context either side.
const RECOMMENDED_WINDOW: u32 = 0;
const HIT_CONTEXT_WINDOW: u32 = 1;

/// The two retrieval groups, kept separate for the merge stage. Recommended
/// passages take priority over corpus-search passages.
#[derive(Debug, Default)]
pub struct RetrievedGroups {
    pub recommended: Vec<Passage>,
    pub corpus: Vec<Passage>,
}

/// Gather passages for a topic/keyword intent.
///
/// Both groups run concurrently: the classifier's recommended citations are
/// expanded with `window = 0`, and the first `max_hits` corpus search hits
/// with `window = 1`. A citation that fails to resolve contributes nothing
/// and never disturbs its siblings. Only a transport-level failure of the
/// search call itself escapes, as that leaves the corpus group undefined.
pub async fn retrieve(
    source: &dyn PassageSource,
    query: &str,
    recommended: &[VerseReference],
    max_hits: usize,
) -> Result<RetrievedGroups> {
    let recommended_group = async {
        let nested = join_all(
            recommended
                .iter()
                .map(|&r| context::expand(source, r, RECOMMENDED_WINDOW)),
        )
        .await;
        nested.into_iter().flatten().collect::<Vec<_>>()
    };

    let corpus_group = async {
        let hits = source.search(query).await?;
        if hits.len() > max_hits {
            tracing::debug!(
                "Expanding {max_hits} of {} corpus hits for {query:?}",
                hits.len()
            );
        }
        let nested = join_all(
            hits.into_iter()
                .take(max_hits)
                .map(|hit| context::expand(source, hit.reference, HIT_CONTEXT_WINDOW)),
        )
        .await;
        Ok::<_, anyhow::Error>(nested.into_iter().flatten().collect::<Vec<_>>())
    };

    let (recommended, corpus) = tokio::join!(recommended_group, corpus_group);

    Ok(RetrievedGroups {
        recommended,
        corpus: corpus?,
    })
}
