use std::collections::HashSet;

use crate::models::Passage;

/// Merge the recommended and corpus groups into one result set.
///
/// Concatenates recommended-first, then keeps the first occurrence of each
/// passage id. Duplicates arise when a recommended citation's window
/// overlaps a corpus hit's window; the recommended copy wins. Pure and
/// idempotent: merging a merged set with nothing changes nothing.
pub fn merge(recommended: Vec<Passage>, corpus: Vec<Passage>) -> Vec<Passage> {
    dedupe(recommended.into_iter().chain(corpus).collect())
}

/// Keep the first occurrence of each passage id, preserving order.
pub fn dedupe(results: Vec<Passage>) -> Vec<Passage> {
    let mut seen = HashSet::new();
    results.into_iter().filter(|p| seen.insert(p.id)).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::VerseReference;

    fn passage(key: &str, id: u64, text: &str) -> Passage {
        Passage {
            id,
            reference: key.parse::<VerseReference>().unwrap(),
            original_text: text.to_string(),
            translations: BTreeMap::new(),
            annotation: None,
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge(vec![], vec![]).is_empty());
        assert!(merge(vec![], vec![passage("1:1", 1, "a")]).len() == 1);
    }

    #[test]
    fn test_recommended_precede_corpus() {
        let merged = merge(
            vec![passage("2:255", 262, "rec")],
            vec![passage("24:35", 2826, "hit")],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, 262);
        assert_eq!(merged[1].id, 2826);
    }

    #[test]
    fn test_duplicate_keeps_recommended_copy() {
        // Same passage id surfaced by both groups, with different text so we
        // can tell which copy survived.
        let merged = merge(
            vec![passage("2:255", 262, "from recommended")],
            vec![passage("2:255", 262, "from corpus"), passage("2:256", 263, "b")],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].original_text, "from recommended");
    }

    #[test]
    fn test_overlapping_windows_deduplicate() {
        // Windows around 2:255 and 2:256 share 2:255 and 2:256
        let a = vec![
            passage("2:254", 261, "a"),
            passage("2:255", 262, "a"),
            passage("2:256", 263, "a"),
        ];
        let b = vec![
            passage("2:255", 262, "b"),
            passage("2:256", 263, "b"),
            passage("2:257", 264, "b"),
        ];

        let merged = merge(a, b);
        let ids: Vec<u64> = merged.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![261, 262, 263, 264]);
    }

    #[test]
    fn test_no_two_results_share_an_id() {
        let merged = merge(
            vec![passage("1:1", 1, "a"), passage("1:1", 1, "dup")],
            vec![passage("1:2", 2, "b"), passage("1:1", 1, "dup")],
        );
        let mut ids: Vec<u64> = merged.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), merged.len());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = vec![passage("2:255", 262, "a"), passage("2:256", 263, "a")];
        let b = vec![passage("2:256", 263, "b"), passage("24:35", 2826, "b")];

        let once = merge(a, b);
        let twice = merge(once.clone(), vec![]);

        let once_ids: Vec<u64> = once.iter().map(|p| p.id).collect();
        let twice_ids: Vec<u64> = twice.iter().map(|p| p.id).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let input = vec![
            passage("1:1", 1, "a"),
            passage("1:2", 2, "a"),
            passage("1:1", 1, "dup"),
        ];
        let once = dedupe(input);
        let twice = dedupe(once.clone());
        assert_eq!(once.len(), twice.len());
    }
}
