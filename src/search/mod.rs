mod index;

pub use index::{fold_tokens, Accessor, Bm25, Index, QueryResult, Scorer, Token, Tokenizer};

use std::cmp::{max, min};
use std::fmt::Display;
use std::time::Duration;

#[allow(unused_imports)]
use log::{debug, info, trace, warn};
use regex::RegexBuilder;
use substring::Substring;
use unidecode::unidecode;

use crate::store::TranscriptStore;
use crate::transcript::{Segment, Transcript};

const HINT_RADIUS: usize = 50;

/// One ranked answer of a store-wide query: the show and the start of its
/// best-matching segment.
#[derive(Debug)]
pub struct SearchHit {
    pub id: String,
    pub start: Duration,
}

/// One regex match inside a single transcript, with surrounding text.
#[derive(Debug)]
pub struct OffsetMatch {
    pub start: Duration,
    pub hint: String,
}

#[derive(Clone)]
struct TranscriptDoc {
    id: String,
    content: String,
}

fn doc_content(doc: &TranscriptDoc) -> String {
    doc.content.clone()
}

fn segment_text(segment: &Segment) -> String {
    segment.text.clone()
}

fn content(transcript: &Transcript) -> String {
    transcript
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rank every stored transcript against the query, then locate the best
/// scoring segment inside each hit. Transcripts whose segments all miss the
/// query are skipped.
pub fn search_all(store: &TranscriptStore, query: &str) -> Result<Vec<SearchHit>, SearchError> {
    let docs = store
        .iter()
        .map(|(id, t)| TranscriptDoc {
            id: id.to_owned(),
            content: content(t),
        })
        .collect::<Vec<_>>();
    let index = Index::from(docs, fold_tokens, doc_content);

    let mut hits = vec![];
    for result in index.query(query, Bm25::new()) {
        let doc = index.document(result.id);
        let transcript = match store.get(&doc.id) {
            Some(t) => t,
            None => continue,
        };
        let segment_index = Index::from(transcript.clone(), fold_tokens, segment_text);
        let top_segments = segment_index.query(query, Bm25::new());
        let top = match top_segments.first() {
            Some(s) => s,
            None => continue,
        };
        debug!("hit {} with score {}", doc.id, result.score);
        hits.push(SearchHit {
            id: doc.id.clone(),
            start: transcript[top.id].start,
        });
    }
    if hits.is_empty() {
        return Err(SearchError::NoResults);
    }
    Ok(hits)
}

/// Case-insensitive regex scan of one transcript. Every match is reported
/// with the start time of its segment and a fixed-radius context hint.
pub fn search_one(
    store: &TranscriptStore,
    id: &str,
    pattern: &str,
) -> Result<Vec<OffsetMatch>, SearchError> {
    let transcript = store
        .get(id)
        .ok_or_else(|| SearchError::VideoNotFound(id.to_owned()))?;
    let r = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(SearchError::Regex)?;
    if transcript.is_empty() {
        return Err(SearchError::NoResults);
    }

    // Concatenate the ascii-folded segment texts, remembering where each
    // segment starts so match offsets map back to timestamps.
    let mut offsets = Vec::with_capacity(transcript.len());
    let mut data = String::new();
    for segment in transcript {
        offsets.push((data.len(), segment.start));
        data.push_str(&unidecode(&segment.text));
        data.push(' ');
    }

    let mut matches = vec![];
    for m in r.find_iter(&data) {
        let pos = m.start();
        let segment = offsets.partition_point(|(offset, _)| *offset <= pos) - 1;
        let hint = data
            .substring(
                max(0, pos as isize - HINT_RADIUS as isize) as usize,
                min(data.len(), m.end() + HINT_RADIUS),
            )
            .trim()
            .to_string();
        matches.push(OffsetMatch {
            start: offsets[segment].1,
            hint,
        });
    }
    if matches.is_empty() {
        return Err(SearchError::NoResults);
    }
    Ok(matches)
}

#[derive(Debug)]
pub enum SearchError {
    VideoNotFound(String),
    Regex(regex::Error),
    NoResults,
}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        SearchError::Regex(e)
    }
}

impl Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::VideoNotFound(id) => write!(f, "no transcript stored for {}", id),
            SearchError::Regex(e) => write!(f, "invalid query: {}", e),
            SearchError::NoResults => write!(f, "no results found"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: u64) -> Segment {
        Segment {
            text: text.to_owned(),
            start: Duration::from_secs(start),
            duration: Duration::from_secs(4),
        }
    }

    fn store() -> TranscriptStore {
        let mut store = TranscriptStore::new();
        store.insert(
            "cooking".to_owned(),
            vec![
                segment("today we make a tornado potato", 0),
                segment("now peel the potato skin carefully", 12),
            ],
        );
        store.insert(
            "hiking".to_owned(),
            vec![
                segment("the trail starts at the old bridge", 0),
                segment("remember to bring enough water", 30),
            ],
        );
        store
    }

    #[test]
    fn search_all_finds_the_right_show() {
        let hits = search_all(&store(), "tornado").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "cooking");
        assert_eq!(hits[0].start, Duration::from_secs(0));
    }

    #[test]
    fn search_all_without_hits_is_an_error() {
        assert!(matches!(
            search_all(&store(), "spaceship"),
            Err(SearchError::NoResults)
        ));
    }

    #[test]
    fn search_one_reports_every_match_with_hints() {
        let matches = search_one(&store(), "cooking", "potato").unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].start, Duration::from_secs(0));
        assert_eq!(matches[1].start, Duration::from_secs(12));
        assert!(matches[0].hint.contains("tornado potato"));
        assert!(matches[1].hint.contains("peel the potato"));
    }

    #[test]
    fn search_one_unknown_id() {
        assert!(matches!(
            search_one(&store(), "missing", "potato"),
            Err(SearchError::VideoNotFound(_))
        ));
    }

    #[test]
    fn search_one_bad_pattern() {
        assert!(matches!(
            search_one(&store(), "cooking", "pot[ato"),
            Err(SearchError::Regex(_))
        ));
    }
}
