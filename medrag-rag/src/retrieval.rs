//! Keyword-overlap retrieval.
//!
//! Every document is scored against the query with fixed weights and the
//! best `top_k` are returned. Scoring is purely lexical and
//! case-insensitive:
//!
//! | Signal | Weight |
//! |--------|--------|
//! | keyword occurs in the query | +10 per keyword |
//! | query term and keyword overlap (either contains the other) | +5 per (keyword, term) pair |
//! | query term occurs in the title | +8 per term |
//! | query term longer than 3 chars occurs in the content | +2 per term |
//!
//! The overlap rule counts every pair, so very short terms such as `a`
//! inflate scores of any keyword containing that letter. The weights are
//! kept as they are for compatibility with existing rankings.

use tracing::debug;

use crate::document::Document;

/// Added when a whole keyword occurs in the query.
pub const KEYWORD_IN_QUERY_WEIGHT: u64 = 10;
/// Added per (keyword, term) pair where one contains the other.
pub const KEYWORD_TERM_OVERLAP_WEIGHT: u64 = 5;
/// Added per query term found in the title.
pub const TITLE_TERM_WEIGHT: u64 = 8;
/// Added per query term found in the content.
pub const CONTENT_TERM_WEIGHT: u64 = 2;
/// Content matches only count for terms longer than this many characters.
pub const CONTENT_TERM_MIN_CHARS: usize = 3;
/// Default number of documents returned by [`score_and_rank`].
pub const DEFAULT_TOP_K: usize = 5;

/// A document paired with its relevance score for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDocument<'a> {
    /// The computed score (higher is more relevant).
    pub score: u64,
    /// The scored document, borrowed from the corpus.
    pub document: &'a Document,
}

/// A query normalised for scoring.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    lowered: String,
    terms: Vec<String>,
}

impl ParsedQuery {
    /// Lowercase the query and split it on whitespace.
    pub fn new(query: &str) -> Self {
        let lowered = query.to_lowercase();
        let terms = lowered.split_whitespace().map(str::to_string).collect();
        Self { lowered, terms }
    }

    /// Whether the query has no terms at all (empty or whitespace only).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The lowercased whitespace-separated terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Score one document against this query.
    ///
    /// An empty query scores zero against everything; otherwise an empty
    /// keyword would be "contained" in any query. Scores saturate at
    /// `u64::MAX` instead of wrapping.
    pub fn score(&self, document: &Document) -> u64 {
        if self.is_empty() {
            return 0;
        }

        let title = document.title.to_lowercase();
        let content = document.content.to_lowercase();
        let mut score: u64 = 0;

        for keyword in document.keywords.iter().map(|k| k.to_lowercase()) {
            if self.lowered.contains(keyword.as_str()) {
                score = score.saturating_add(KEYWORD_IN_QUERY_WEIGHT);
            }
            for term in &self.terms {
                if keyword.contains(term.as_str()) || term.contains(keyword.as_str()) {
                    score = score.saturating_add(KEYWORD_TERM_OVERLAP_WEIGHT);
                }
            }
        }

        for term in &self.terms {
            if title.contains(term.as_str()) {
                score = score.saturating_add(TITLE_TERM_WEIGHT);
            }
        }

        for term in &self.terms {
            if term.chars().count() > CONTENT_TERM_MIN_CHARS && content.contains(term.as_str()) {
                score = score.saturating_add(CONTENT_TERM_WEIGHT);
            }
        }

        score
    }
}

/// Score every document and return the non-zero ones, best first.
///
/// Ties keep corpus order.
pub fn score_all<'a>(query: &str, documents: &'a [Document]) -> Vec<ScoredDocument<'a>> {
    let parsed = ParsedQuery::new(query);
    if parsed.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredDocument<'a>> = documents
        .iter()
        .map(|document| ScoredDocument { score: parsed.score(document), document })
        .filter(|s| s.score > 0)
        .collect();

    // `sort_by` is stable, which is what keeps ties in corpus order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Return up to `top_k` documents relevant to `query`, best first.
///
/// Documents scoring zero are never returned.
pub fn score_and_rank<'a>(
    query: &str,
    documents: &'a [Document],
    top_k: usize,
) -> Vec<&'a Document> {
    let scored = score_all(query, documents);
    debug!(
        term_count = query.split_whitespace().count(),
        matched = scored.len(),
        top_k,
        "scored corpus"
    );
    scored.into_iter().take(top_k).map(|s| s.document).collect()
}
