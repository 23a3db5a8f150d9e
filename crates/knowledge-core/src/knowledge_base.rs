//! The constructed, immutable knowledge base.
//!
//! A [`KnowledgeBase`] owns every collection and is built once, either
//! from the dataset compiled into this crate ([`KnowledgeBase::embedded`])
//! or from caller-supplied JSON or records (fixtures, alternate datasets).
//! Consumers only ever borrow from it.
//!
//! Loading rejects duplicate primary keys. Foreign keys are not checked
//! here; see [`integrity`](crate::integrity).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::KnowledgeError;
use crate::lookup::{self, FieldCount};
use crate::models::{Capability, CaseStudy, GlossaryTerm, RfpAnswer};
use crate::schema::{Collection, Record};

/// The dataset compiled into the crate.
pub const EMBEDDED_DATASET: &str = include_str!("../data/knowledge.json");

/// All record collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    capabilities: Vec<Capability>,
    case_studies: Vec<CaseStudy>,
    rfp_answers: Vec<RfpAnswer>,
    #[serde(default)]
    glossary: Vec<GlossaryTerm>,
}

/// A borrowed record from any collection.
///
/// Serializes as the bare record; pair it with [`RecordRef::collection`]
/// when provenance matters.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum RecordRef<'a> {
    Capability(&'a Capability),
    CaseStudy(&'a CaseStudy),
    RfpAnswer(&'a RfpAnswer),
    GlossaryTerm(&'a GlossaryTerm),
}

impl<'a> RecordRef<'a> {
    pub fn collection(&self) -> Collection {
        match self {
            RecordRef::Capability(_) => Collection::Capabilities,
            RecordRef::CaseStudy(_) => Collection::CaseStudies,
            RecordRef::RfpAnswer(_) => Collection::RfpAnswers,
            RecordRef::GlossaryTerm(_) => Collection::Glossary,
        }
    }

    pub fn key(&self) -> &'a str {
        match *self {
            RecordRef::Capability(r) => r.key(),
            RecordRef::CaseStudy(r) => r.key(),
            RecordRef::RfpAnswer(r) => r.key(),
            RecordRef::GlossaryTerm(r) => r.key(),
        }
    }

    pub fn title(&self) -> &'a str {
        match *self {
            RecordRef::Capability(r) => r.title(),
            RecordRef::CaseStudy(r) => r.title(),
            RecordRef::RfpAnswer(r) => r.title(),
            RecordRef::GlossaryTerm(r) => r.title(),
        }
    }
}

fn ensure_unique<R: Record>(records: &[R]) -> Result<(), KnowledgeError> {
    let mut seen = HashSet::new();
    for r in records {
        if !seen.insert(r.key()) {
            return Err(KnowledgeError::DuplicateKey {
                collection: R::COLLECTION,
                key: r.key().to_string(),
            });
        }
    }
    Ok(())
}

fn wrap<'a, R, F>(records: Vec<&'a R>, f: F) -> Vec<RecordRef<'a>>
where
    F: Fn(&'a R) -> RecordRef<'a>,
{
    records.into_iter().map(f).collect()
}

impl KnowledgeBase {
    /// Builds a knowledge base from records, rejecting duplicate keys.
    pub fn new(
        capabilities: Vec<Capability>,
        case_studies: Vec<CaseStudy>,
        rfp_answers: Vec<RfpAnswer>,
        glossary: Vec<GlossaryTerm>,
    ) -> Result<Self, KnowledgeError> {
        let kb = Self {
            capabilities,
            case_studies,
            rfp_answers,
            glossary,
        };
        kb.ensure_unique_keys()?;
        Ok(kb)
    }

    /// Parses the dataset compiled into this crate.
    pub fn embedded() -> Result<Self, KnowledgeError> {
        Self::from_json_str(EMBEDDED_DATASET)
    }

    /// Parses a dataset in the same JSON shape as the embedded one.
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeError> {
        let kb: KnowledgeBase = serde_json::from_str(json)?;
        kb.ensure_unique_keys()?;
        Ok(kb)
    }

    fn ensure_unique_keys(&self) -> Result<(), KnowledgeError> {
        ensure_unique(&self.capabilities)?;
        ensure_unique(&self.case_studies)?;
        ensure_unique(&self.rfp_answers)?;
        ensure_unique(&self.glossary)
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn case_studies(&self) -> &[CaseStudy] {
        &self.case_studies
    }

    pub fn rfp_answers(&self) -> &[RfpAnswer] {
        &self.rfp_answers
    }

    pub fn glossary(&self) -> &[GlossaryTerm] {
        &self.glossary
    }

    /// Number of records in a collection.
    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Capabilities => self.capabilities.len(),
            Collection::CaseStudies => self.case_studies.len(),
            Collection::RfpAnswers => self.rfp_answers.len(),
            Collection::Glossary => self.glossary.len(),
        }
    }

    pub fn capability(&self, id: &str) -> Option<&Capability> {
        lookup::get_by_id(&self.capabilities, id)
    }

    pub fn case_study(&self, id: &str) -> Option<&CaseStudy> {
        lookup::get_by_id(&self.case_studies, id)
    }

    pub fn rfp_answer(&self, question: &str) -> Option<&RfpAnswer> {
        lookup::get_by_id(&self.rfp_answers, question)
    }

    pub fn glossary_term(&self, term: &str) -> Option<&GlossaryTerm> {
        lookup::get_by_id(&self.glossary, term)
    }

    // ============ Collection-generic access ============

    /// Every record in a collection, in order.
    pub fn records(&self, collection: Collection) -> Vec<RecordRef<'_>> {
        match collection {
            Collection::Capabilities => {
                self.capabilities.iter().map(RecordRef::Capability).collect()
            }
            Collection::CaseStudies => {
                self.case_studies.iter().map(RecordRef::CaseStudy).collect()
            }
            Collection::RfpAnswers => self.rfp_answers.iter().map(RecordRef::RfpAnswer).collect(),
            Collection::Glossary => self.glossary.iter().map(RecordRef::GlossaryTerm).collect(),
        }
    }

    /// Primary-key lookup in any collection.
    pub fn get(&self, collection: Collection, id: &str) -> Option<RecordRef<'_>> {
        match collection {
            Collection::Capabilities => self.capability(id).map(RecordRef::Capability),
            Collection::CaseStudies => self.case_study(id).map(RecordRef::CaseStudy),
            Collection::RfpAnswers => self.rfp_answer(id).map(RecordRef::RfpAnswer),
            Collection::Glossary => self.glossary_term(id).map(RecordRef::GlossaryTerm),
        }
    }

    /// [`lookup::filter_by_field`] on any collection.
    pub fn filter(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<RecordRef<'_>>, KnowledgeError> {
        Ok(match collection {
            Collection::Capabilities => wrap(
                lookup::filter_by_field(&self.capabilities, field, value)?,
                RecordRef::Capability,
            ),
            Collection::CaseStudies => wrap(
                lookup::filter_by_field(&self.case_studies, field, value)?,
                RecordRef::CaseStudy,
            ),
            Collection::RfpAnswers => wrap(
                lookup::filter_by_field(&self.rfp_answers, field, value)?,
                RecordRef::RfpAnswer,
            ),
            Collection::Glossary => wrap(
                lookup::filter_by_field(&self.glossary, field, value)?,
                RecordRef::GlossaryTerm,
            ),
        })
    }

    /// [`lookup::distinct_values`] on any collection.
    pub fn distinct_values(
        &self,
        collection: Collection,
        field: &str,
    ) -> Result<Vec<String>, KnowledgeError> {
        match collection {
            Collection::Capabilities => lookup::distinct_values(&self.capabilities, field),
            Collection::CaseStudies => lookup::distinct_values(&self.case_studies, field),
            Collection::RfpAnswers => lookup::distinct_values(&self.rfp_answers, field),
            Collection::Glossary => lookup::distinct_values(&self.glossary, field),
        }
    }

    /// [`lookup::count_by_field`] on any collection.
    pub fn count_by_field(
        &self,
        collection: Collection,
        field: &str,
    ) -> Result<Vec<FieldCount>, KnowledgeError> {
        match collection {
            Collection::Capabilities => lookup::count_by_field(&self.capabilities, field),
            Collection::CaseStudies => lookup::count_by_field(&self.case_studies, field),
            Collection::RfpAnswers => lookup::count_by_field(&self.rfp_answers, field),
            Collection::Glossary => lookup::count_by_field(&self.glossary, field),
        }
    }

    // ============ Related records ============

    /// Case studies a capability links to. Dangling ids are dropped.
    pub fn related_case_studies(&self, capability: &Capability) -> Vec<&CaseStudy> {
        lookup::resolve(&self.case_studies, &capability.related_case_study_ids)
    }

    /// Capabilities a case study links to. Dangling ids are dropped.
    pub fn related_capabilities(&self, case_study: &CaseStudy) -> Vec<&Capability> {
        lookup::resolve(&self.capabilities, &case_study.related_capability_ids)
    }

    /// The capability an RFP answer points at, if it resolves.
    pub fn rfp_capability(&self, answer: &RfpAnswer) -> Option<&Capability> {
        answer
            .related_capability_id
            .as_deref()
            .and_then(|id| self.capability(id))
    }

    /// Case studies that list `capability_id` among their capabilities.
    pub fn case_studies_for_capability(&self, capability_id: &str) -> Vec<&CaseStudy> {
        self.case_studies
            .iter()
            .filter(|cs| cs.related_capability_ids.iter().any(|id| id == capability_id))
            .collect()
    }

    /// Related records of any record, resolved the same way.
    pub fn related(&self, record: RecordRef<'_>) -> Vec<RecordRef<'_>> {
        match record {
            RecordRef::Capability(c) => {
                wrap(self.related_case_studies(c), RecordRef::CaseStudy)
            }
            RecordRef::CaseStudy(cs) => {
                wrap(self.related_capabilities(cs), RecordRef::Capability)
            }
            RecordRef::RfpAnswer(a) => self
                .rfp_capability(a)
                .map(RecordRef::Capability)
                .into_iter()
                .collect(),
            RecordRef::GlossaryTerm(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Kpi, ResultMetric};

    fn fulfillment() -> Capability {
        Capability {
            id: "fulfillment-excellence".into(),
            title: "Fulfillment & Operations".into(),
            category: "Operational Excellence".into(),
            pillar: "Operations & Supply Chain".into(),
            description: "High-volume precision with operational flexibility".into(),
            key_points: vec!["Quality control: <0.01% defect rate".into()],
            kpis: vec![Kpi {
                metric: "Peak Velocity".into(),
                value: "48K units/hour".into(),
                description: "Influencer spice launch".into(),
            }],
            related_case_study_ids: vec!["influencer-spice-launch".into(), "ghost-study".into()],
        }
    }

    fn spice() -> CaseStudy {
        CaseStudy {
            id: "influencer-spice-launch".into(),
            brand: "Confidential Influencer Brand".into(),
            category: "Fulfillment & Operational Excellence".into(),
            challenge: "Coordinate massive product launch".into(),
            execution: vec!["Sold 48,000 units in under 1 hour".into()],
            results: vec![ResultMetric {
                label: "Units Shipped".into(),
                value: "48,000".into(),
            }],
            related_capability_ids: vec!["fulfillment-excellence".into()],
        }
    }

    #[test]
    fn test_embedded_dataset_loads() {
        let kb = KnowledgeBase::embedded().unwrap();
        assert_eq!(kb.capabilities().len(), 12);
        assert_eq!(kb.case_studies().len(), 17);
        assert_eq!(kb.rfp_answers().len(), 20);
        assert_eq!(kb.glossary().len(), 28);
    }

    #[test]
    fn test_roundtrip_every_record() {
        let kb = KnowledgeBase::embedded().unwrap();
        for c in Collection::ALL {
            for r in kb.records(c) {
                let found = kb.get(c, r.key()).unwrap();
                assert_eq!(found.key(), r.key());
                assert_eq!(found.collection(), c);
            }
            assert!(kb.get(c, "nonexistent-id").is_none());
        }
        let cap = &kb.capabilities()[3];
        assert_eq!(kb.capability(&cap.id), Some(cap));
    }

    #[test]
    fn test_example_capability() {
        let kb = KnowledgeBase::embedded().unwrap();
        let cap = kb.capability("fulfillment-excellence").unwrap();
        assert_eq!(cap.title, "Fulfillment & Operations");
        assert_eq!(cap.kpis[0].value, "48K units/hour");
        let hits = kb
            .filter(Collection::Capabilities, "pillar", "Operations & Supply Chain")
            .unwrap();
        assert!(hits.iter().any(|r| r.key() == "fulfillment-excellence"));
    }

    #[test]
    fn test_pillar_counts_sum_to_len() {
        let kb = KnowledgeBase::embedded().unwrap();
        let counts = kb.count_by_field(Collection::Capabilities, "pillar").unwrap();
        assert_eq!(counts.len(), 5);
        assert_eq!(
            counts.iter().map(|c| c.count).sum::<usize>(),
            kb.capabilities().len()
        );
        let distinct = kb.distinct_values(Collection::Capabilities, "pillar").unwrap();
        let keys: Vec<String> = counts.into_iter().map(|c| c.value).collect();
        assert_eq!(distinct, keys);
    }

    #[test]
    fn test_tag_counts_exceed_len() {
        let kb = KnowledgeBase::embedded().unwrap();
        let counts = kb.count_by_field(Collection::RfpAnswers, "tags").unwrap();
        assert!(counts.iter().map(|c| c.count).sum::<usize>() > kb.rfp_answers().len());
    }

    #[test]
    fn test_related_drops_dangling() {
        let kb = KnowledgeBase::new(vec![fulfillment()], vec![spice()], vec![], vec![]).unwrap();
        let cap = kb.capability("fulfillment-excellence").unwrap();
        let related = kb.related_case_studies(cap);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, "influencer-spice-launch");

        let generic = kb.related(RecordRef::Capability(cap));
        assert_eq!(generic.len(), 1);
        assert_eq!(generic[0].collection(), Collection::CaseStudies);
    }

    #[test]
    fn test_case_studies_for_capability() {
        let kb = KnowledgeBase::embedded().unwrap();
        let studies = kb.case_studies_for_capability("media-framework");
        assert!(!studies.is_empty());
        assert!(studies
            .iter()
            .all(|cs| cs.related_capability_ids.contains(&"media-framework".to_string())));
        assert!(kb.case_studies_for_capability("nope").is_empty());
    }

    #[test]
    fn test_rfp_capability() {
        let kb = KnowledgeBase::embedded().unwrap();
        let answer = kb.rfp_answer("What is your defect rate?").unwrap();
        assert_eq!(
            kb.rfp_capability(answer).map(|c| c.id.as_str()),
            Some("fulfillment-excellence")
        );
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = KnowledgeBase::new(vec![fulfillment(), fulfillment()], vec![], vec![], vec![])
            .unwrap_err();
        assert!(matches!(
            err,
            KnowledgeError::DuplicateKey {
                collection: Collection::Capabilities,
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            KnowledgeBase::from_json_str("not json"),
            Err(KnowledgeError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_glossary_optional() {
        let kb = KnowledgeBase::from_json_str(
            r#"{"capabilities":[],"case_studies":[],"rfp_answers":[]}"#,
        )
        .unwrap();
        assert_eq!(kb.len(Collection::Glossary), 0);
    }
}
