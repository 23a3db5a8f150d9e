//! Collection names and the field schema each collection exposes.
//!
//! Filtering and faceting are defined once against this schema instead of
//! per consumer. A field is either scalar (matched by equality) or a list
//! (matched by containment).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::KnowledgeError;

/// One of the record collections held by a [`KnowledgeBase`](crate::KnowledgeBase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Capabilities,
    CaseStudies,
    RfpAnswers,
    Glossary,
}

/// How a field's value is compared against a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single optional string, matched by equality.
    Scalar,
    /// List of strings, matched when any element equals the value.
    List,
}

/// A filterable field declared by a collection.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const CAPABILITY_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "category",
        kind: FieldKind::Scalar,
    },
    FieldSpec {
        name: "pillar",
        kind: FieldKind::Scalar,
    },
];

const CASE_STUDY_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "category",
    kind: FieldKind::Scalar,
}];

const RFP_ANSWER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "tags",
        kind: FieldKind::List,
    },
    FieldSpec {
        name: "related_capability_id",
        kind: FieldKind::Scalar,
    },
];

const GLOSSARY_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "category",
    kind: FieldKind::Scalar,
}];

impl Collection {
    /// All collections, in search order.
    pub const ALL: [Collection; 4] = [
        Collection::Capabilities,
        Collection::CaseStudies,
        Collection::RfpAnswers,
        Collection::Glossary,
    ];

    /// Canonical kebab-case name, as used in URLs and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Capabilities => "capabilities",
            Collection::CaseStudies => "case-studies",
            Collection::RfpAnswers => "rfp-answers",
            Collection::Glossary => "glossary",
        }
    }

    /// Human label used when citing a record as a source.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Capabilities => "Capability",
            Collection::CaseStudies => "Case Study",
            Collection::RfpAnswers => "RFP",
            Collection::Glossary => "Glossary",
        }
    }

    /// Fields that may be passed to filter and facet operations.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Collection::Capabilities => CAPABILITY_FIELDS,
            Collection::CaseStudies => CASE_STUDY_FIELDS,
            Collection::RfpAnswers => RFP_ANSWER_FIELDS,
            Collection::Glossary => GLOSSARY_FIELDS,
        }
    }

    /// Looks up a field, failing with [`KnowledgeError::InvalidField`].
    pub fn field(self, name: &str) -> Result<&'static FieldSpec, KnowledgeError> {
        self.fields()
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| KnowledgeError::InvalidField {
                collection: self,
                field: name.to_string(),
            })
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = KnowledgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('_', "-").as_str() {
            "capabilities" => Ok(Collection::Capabilities),
            "case-studies" => Ok(Collection::CaseStudies),
            "rfp-answers" => Ok(Collection::RfpAnswers),
            "glossary" => Ok(Collection::Glossary),
            _ => Err(KnowledgeError::UnknownCollection(s.to_string())),
        }
    }
}

/// A borrowed field value read from a record.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Scalar(Option<&'a str>),
    List(&'a [String]),
}

impl<'a> FieldValue<'a> {
    /// Every string this value contributes to facets, in order.
    pub fn values(self) -> Vec<&'a str> {
        match self {
            FieldValue::Scalar(Some(v)) => vec![v],
            FieldValue::Scalar(None) => Vec::new(),
            FieldValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Equality for scalars, containment for lists. An absent scalar never matches.
    pub fn matches(self, value: &str) -> bool {
        match self {
            FieldValue::Scalar(v) => v == Some(value),
            FieldValue::List(items) => items.iter().any(|i| i == value),
        }
    }
}

/// A record held in one collection.
///
/// Implemented by every model type so the lookup and search operations
/// can be written once.
pub trait Record {
    /// The collection this record type lives in.
    const COLLECTION: Collection;

    /// Primary key: slug for capabilities and case studies, the question
    /// for RFP answers, the term for glossary entries.
    fn key(&self) -> &str;

    /// Short display title.
    fn title(&self) -> &str;

    /// Reads a schema field. Returns `None` for names outside the schema.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// The text fields substring search looks at, as `(field, text)` pairs
    /// in the order they are tested.
    fn searchable_text(&self) -> Vec<(&'static str, &str)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_parse() {
        assert_eq!(
            "capabilities".parse::<Collection>().unwrap(),
            Collection::Capabilities
        );
        assert_eq!(
            "case_studies".parse::<Collection>().unwrap(),
            Collection::CaseStudies
        );
        assert_eq!(
            "rfp-answers".parse::<Collection>().unwrap(),
            Collection::RfpAnswers
        );
        assert!(matches!(
            "widgets".parse::<Collection>(),
            Err(KnowledgeError::UnknownCollection(_))
        ));
    }

    #[test]
    fn test_collection_display_roundtrip() {
        for c in Collection::ALL {
            assert_eq!(c.to_string().parse::<Collection>().unwrap(), c);
        }
    }

    #[test]
    fn test_field_lookup() {
        let spec = Collection::RfpAnswers.field("tags").unwrap();
        assert_eq!(spec.kind, FieldKind::List);
        assert!(Collection::CaseStudies.field("pillar").is_err());
    }

    #[test]
    fn test_field_value_matching() {
        let tags = vec!["media".to_string(), "roas".to_string()];
        assert!(FieldValue::List(&tags).matches("roas"));
        assert!(!FieldValue::List(&tags).matches("ROAS"));
        assert!(FieldValue::Scalar(Some("Media")).matches("Media"));
        assert!(!FieldValue::Scalar(None).matches(""));
    }
}
