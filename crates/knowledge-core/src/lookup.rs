//! Point and range queries over a single collection.
//!
//! Every function here is a linear scan over a slice of records. Results
//! keep the slice's order; nothing is sorted or deduplicated unless the
//! operation says so. Absence is an empty result, never an error; the only
//! error is naming a field outside the collection's schema.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::error::KnowledgeError;
use crate::schema::Record;

/// Number of records carrying a given field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCount {
    pub value: String,
    pub count: usize,
}

/// Exact, case-sensitive primary-key lookup.
pub fn get_by_id<'a, R: Record>(records: &'a [R], id: &str) -> Option<&'a R> {
    records.iter().find(|r| r.key() == id)
}

/// Records whose field equals `value` (scalar) or contains it (list).
pub fn filter_by_field<'a, R: Record>(
    records: &'a [R],
    field: &str,
    value: &str,
) -> Result<Vec<&'a R>, KnowledgeError> {
    R::COLLECTION.field(field)?;
    Ok(records
        .iter()
        .filter(|r| r.field(field).is_some_and(|v| v.matches(value)))
        .collect())
}

/// Distinct values of a field in first-seen order.
pub fn distinct_values<R: Record>(
    records: &[R],
    field: &str,
) -> Result<Vec<String>, KnowledgeError> {
    Ok(count_by_field(records, field)?
        .into_iter()
        .map(|fc| fc.value)
        .collect())
}

/// Per-value record counts in first-seen order.
///
/// For scalar fields the counts sum to the number of records with a value.
/// List fields can count one record under several values, but never twice
/// under the same one.
pub fn count_by_field<R: Record>(
    records: &[R],
    field: &str,
) -> Result<Vec<FieldCount>, KnowledgeError> {
    R::COLLECTION.field(field)?;

    let mut counts: Vec<FieldCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let Some(value) = record.field(field) else {
            continue;
        };
        let mut seen_in_record = HashSet::new();
        for v in value.values() {
            if !seen_in_record.insert(v) {
                continue;
            }
            match index.get(v) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(v, counts.len());
                    counts.push(FieldCount {
                        value: v.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    Ok(counts)
}

/// Resolves foreign keys, silently dropping ids that match nothing.
pub fn resolve<'a, R: Record, S: AsRef<str>>(records: &'a [R], ids: &[S]) -> Vec<&'a R> {
    ids.iter()
        .filter_map(|id| get_by_id(records, id.as_ref()))
        .collect()
}
