//! Case-insensitive substring search across collections.
//!
//! Matching is literal containment of the lower-cased query in the
//! lower-cased field text; there is no tokenizing, ranking, or fuzziness.
//!
//! # Ordering
//!
//! Hits come back grouped by collection in a fixed order (capabilities,
//! case studies, RFP answers, glossary) and, within a collection, in
//! collection order. [`best_match`] applies a different priority,
//! RFP answer > capability > case study, which is what the assistant uses.
//!
//! # Empty query
//!
//! The empty string is contained in every string, so an empty query
//! matches every record in scope. The query is not trimmed.

use serde::Serialize;

use crate::knowledge_base::{KnowledgeBase, RecordRef};
use crate::schema::{Collection, Record};

/// Collection priority used by [`best_match`].
pub const ANSWER_PRIORITY: [Collection; 3] = [
    Collection::RfpAnswers,
    Collection::Capabilities,
    Collection::CaseStudies,
];

/// A matched record with its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    /// Collection the record came from.
    pub collection: Collection,
    /// Primary key of the record.
    pub key: &'a str,
    /// Display title of the record.
    pub title: &'a str,
    /// First searchable field whose text contained the query.
    pub matched_field: &'static str,
    /// The record itself.
    pub record: RecordRef<'a>,
}

/// Returns the first searchable field of `record` containing `needle`.
///
/// `needle` must already be lower-cased.
fn matched_field<R: Record>(record: &R, needle: &str) -> Option<&'static str> {
    record
        .searchable_text()
        .into_iter()
        .find(|(_, text)| text.to_lowercase().contains(needle))
        .map(|(field, _)| field)
}

fn search_collection<'a, R, F>(
    records: &'a [R],
    needle: &str,
    wrap: F,
    hits: &mut Vec<SearchHit<'a>>,
) where
    R: Record,
    F: Fn(&'a R) -> RecordRef<'a>,
{
    for record in records {
        if let Some(field) = matched_field(record, needle) {
            hits.push(SearchHit {
                collection: R::COLLECTION,
                key: record.key(),
                title: record.title(),
                matched_field: field,
                record: wrap(record),
            });
        }
    }
}

/// Searches every collection, or only `scope` when given.
pub fn search_text<'a>(
    kb: &'a KnowledgeBase,
    query: &str,
    scope: Option<Collection>,
) -> Vec<SearchHit<'a>> {
    let needle = query.to_lowercase();
    let mut hits = Vec::new();

    for collection in Collection::ALL {
        if scope.is_some_and(|s| s != collection) {
            continue;
        }
        match collection {
            Collection::Capabilities => {
                search_collection(kb.capabilities(), &needle, RecordRef::Capability, &mut hits)
            }
            Collection::CaseStudies => {
                search_collection(kb.case_studies(), &needle, RecordRef::CaseStudy, &mut hits)
            }
            Collection::RfpAnswers => {
                search_collection(kb.rfp_answers(), &needle, RecordRef::RfpAnswer, &mut hits)
            }
            Collection::Glossary => {
                search_collection(kb.glossary(), &needle, RecordRef::GlossaryTerm, &mut hits)
            }
        }
    }

    hits
}

/// Hits that may serve as an answer: capabilities, case studies, and RFP
/// answers whose question or answer text matched. An RFP answer matched
/// only through its tags is left out, as are glossary terms.
pub fn answer_candidates<'a>(kb: &'a KnowledgeBase, query: &str) -> Vec<SearchHit<'a>> {
    search_text(kb, query, None)
        .into_iter()
        .filter(|h| ANSWER_PRIORITY.contains(&h.collection))
        .filter(|h| !(h.collection == Collection::RfpAnswers && h.matched_field == "tags"))
        .collect()
}

/// Picks the single best answer candidate: the first RFP answer, else the
/// first capability, else the first case study.
pub fn best_match<'a>(kb: &'a KnowledgeBase, query: &str) -> Option<SearchHit<'a>> {
    let candidates = answer_candidates(kb, query);
    ANSWER_PRIORITY
        .iter()
        .find_map(|c| candidates.iter().find(|h| h.collection == *c).cloned())
}
