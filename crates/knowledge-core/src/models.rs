//! Record types held by the knowledge base.
//!
//! All records are plain data deserialized from the embedded dataset and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::schema::{Collection, FieldValue, Record};

/// The five top-level groupings capabilities are organized under.
pub const PILLARS: [&str; 5] = [
    "Operations & Supply Chain",
    "Growth Strategy & Planning",
    "Marketplace Operations",
    "Retail Media & Performance Marketing",
    "Direct-to-Consumer & Owned Channels",
];

/// A named, valued, described performance metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub metric: String,
    pub value: String,
    pub description: String,
}

/// A service offering with supporting key points and KPIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub id: String,
    pub title: String,
    pub category: String,
    pub pillar: String,
    pub description: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    #[serde(default)]
    pub related_case_study_ids: Vec<String>,
}

/// One labelled outcome of a case study, e.g. `ROAS` → `7-8x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetric {
    pub label: String,
    pub value: String,
}

/// A client engagement with quantified results.
///
/// `results` is a list rather than a map so the authored order survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub id: String,
    pub brand: String,
    pub category: String,
    pub challenge: String,
    #[serde(default)]
    pub execution: Vec<String>,
    #[serde(default)]
    pub results: Vec<ResultMetric>,
    #[serde(default)]
    pub related_capability_ids: Vec<String>,
}

/// A pre-written answer to a common proposal question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfpAnswer {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub related_capability_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A commerce term with its definition and how the company applies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
    pub category: String,
    #[serde(default)]
    pub context: String,
}

impl Record for Capability {
    const COLLECTION: Collection = Collection::Capabilities;

    fn key(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::Scalar(Some(&self.category))),
            "pillar" => Some(FieldValue::Scalar(Some(&self.pillar))),
            _ => None,
        }
    }

    // KPI text is not searchable.
    fn searchable_text(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
        ];
        fields.extend(self.key_points.iter().map(|kp| ("key_points", kp.as_str())));
        fields
    }
}

impl Record for CaseStudy {
    const COLLECTION: Collection = Collection::CaseStudies;

    fn key(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.brand
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::Scalar(Some(&self.category))),
            _ => None,
        }
    }

    fn searchable_text(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("brand", self.brand.as_str()),
            ("challenge", self.challenge.as_str()),
        ]
    }
}

impl Record for RfpAnswer {
    const COLLECTION: Collection = Collection::RfpAnswers;

    fn key(&self) -> &str {
        &self.question
    }

    fn title(&self) -> &str {
        &self.question
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "tags" => Some(FieldValue::List(&self.tags)),
            "related_capability_id" => {
                Some(FieldValue::Scalar(self.related_capability_id.as_deref()))
            }
            _ => None,
        }
    }

    fn searchable_text(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("question", self.question.as_str()),
            ("answer", self.answer.as_str()),
        ];
        fields.extend(self.tags.iter().map(|t| ("tags", t.as_str())));
        fields
    }
}

impl Record for GlossaryTerm {
    const COLLECTION: Collection = Collection::Glossary;

    fn key(&self) -> &str {
        &self.term
    }

    fn title(&self) -> &str {
        &self.term
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::Scalar(Some(&self.category))),
            _ => None,
        }
    }

    fn searchable_text(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("term", self.term.as_str()),
            ("definition", self.definition.as_str()),
        ]
    }
}
