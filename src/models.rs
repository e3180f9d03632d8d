use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `chapter:verse` citation, e.g. `2:255`.
///
/// Both components are 1-based; a reference never holds a zero component.
/// On the wire it is always the `"chapter:verse"` string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerseReference {
    pub chapter: u32,
    pub verse: u32,
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid verse reference '{0}': expected chapter:verse with positive integers")]
pub struct ParseVerseReferenceError(pub String);

impl VerseReference {
    pub fn new(chapter: u32, verse: u32) -> Option<Self> {
        if chapter >= 1 && verse >= 1 {
            Some(Self { chapter, verse })
        } else {
            None
        }
    }
}

impl FromStr for VerseReference {
    type Err = ParseVerseReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVerseReferenceError(s.to_string());
        let (chapter, verse) = s.split_once(':').ok_or_else(err)?;
        let chapter: u32 = chapter.trim().parse().map_err(|_| err())?;
        let verse: u32 = verse.trim().parse().map_err(|_| err())?;
        VerseReference::new(chapter, verse).ok_or_else(err)
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

impl Serialize for VerseReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VerseReference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// The classified interpretation of a raw query.
///
/// Produced once per request by the intent resolver and immutable afterwards.
/// Tag values match the classifier's wire vocabulary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchIntent {
    /// A specific verse was requested; answered by context expansion alone.
    VerseKey { reference: VerseReference },
    /// A thematic question, optionally with classifier-recommended citations.
    Topic {
        query: String,
        recommended: Vec<VerseReference>,
    },
    /// Plain keyword search over the corpus.
    Keyword { query: String },
}

/// One scripture passage as returned to the caller.
///
/// `id` is the corpus's canonical identifier and the deduplication key: two
/// records with the same `id` are the same passage however they were
/// retrieved. All passages are request-scoped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub id: u64,
    pub reference: VerseReference,
    /// Original-script text (Uthmani).
    pub original_text: String,
    /// Edition name → translated text.
    pub translations: BTreeMap<String, String>,
    /// Generated commentary, present only for the annotated result prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// A corpus search hit, narrowed at the boundary to just its citation.
/// External response shapes never travel deeper into the pipeline than this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub reference: VerseReference,
}

/// Query parameters for GET /search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Response body for GET /search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// The resolved intent, returned for caller-side observability.
    pub intent: SearchIntent,
    pub results: Vec<Passage>,
}

/// One chapter's metadata, consumed by the browse endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: u32,
    pub name: String,
    pub arabic_name: String,
    pub verse_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_reference() {
        let r: VerseReference = "2:255".parse().unwrap();
        assert_eq!(r, VerseReference { chapter: 2, verse: 255 });
    }

    #[test]
    fn test_parse_rejects_missing_colon() {
        assert!("2255".parse::<VerseReference>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!("two:255".parse::<VerseReference>().is_err());
        assert!("2:two55".parse::<VerseReference>().is_err());
    }

    #[test]
    fn test_parse_rejects_zero_components() {
        assert!("0:1".parse::<VerseReference>().is_err());
        assert!("1:0".parse::<VerseReference>().is_err());
    }

    #[test]
    fn test_parse_rejects_negative_components() {
        assert!("-2:255".parse::<VerseReference>().is_err());
        assert!("2:-1".parse::<VerseReference>().is_err());
    }

    #[test]
    fn test_parse_rejects_extra_segments() {
        // "2:255:1" leaves a non-numeric tail after the first split
        assert!("2:255:1".parse::<VerseReference>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let r: VerseReference = "114:6".parse().unwrap();
        assert_eq!(r.to_string(), "114:6");
        assert_eq!(r.to_string().parse::<VerseReference>().unwrap(), r);
    }

    #[test]
    fn test_reference_serializes_as_string() {
        let r = VerseReference { chapter: 2, verse: 255 };
        assert_eq!(serde_json::to_value(r).unwrap(), serde_json::json!("2:255"));
    }

    #[test]
    fn test_intent_tag_names_match_wire_vocabulary() {
        let intent = SearchIntent::VerseKey {
            reference: "2:255".parse().unwrap(),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["type"], "verse_key");
        assert_eq!(json["reference"], "2:255");

        let intent = SearchIntent::Keyword {
            query: "patience".to_string(),
        };
        assert_eq!(serde_json::to_value(&intent).unwrap()["type"], "keyword");
    }

    #[test]
    fn test_passage_omits_absent_annotation() {
        let p = Passage {
            id: 262,
            reference: "2:255".parse().unwrap(),
            original_text: "text".to_string(),
            translations: BTreeMap::new(),
            annotation: None,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("annotation").is_none());
    }
}
