//! Dashboard counts over the knowledge base.

use serde::Serialize;

use crate::error::KnowledgeError;
use crate::knowledge_base::KnowledgeBase;
use crate::lookup::{self, FieldCount};
use crate::schema::Collection;

/// Record count for one collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionCount {
    pub collection: Collection,
    pub count: usize,
}

/// Summary shown on the internal dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub collections: Vec<CollectionCount>,
    pub pillars: Vec<FieldCount>,
    pub case_study_categories: Vec<FieldCount>,
    pub glossary_categories: Vec<FieldCount>,
}

impl Stats {
    pub fn compute(kb: &KnowledgeBase) -> Result<Self, KnowledgeError> {
        let collections = Collection::ALL
            .iter()
            .map(|&c| CollectionCount {
                collection: c,
                count: kb.len(c),
            })
            .collect();

        Ok(Self {
            collections,
            pillars: lookup::count_by_field(kb.capabilities(), "pillar")?,
            case_study_categories: lookup::count_by_field(kb.case_studies(), "category")?,
            glossary_categories: lookup::count_by_field(kb.glossary(), "category")?,
        })
    }

    pub fn total_records(&self) -> usize {
        self.collections.iter().map(|c| c.count).sum()
    }
}
