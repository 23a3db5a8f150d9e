//! Error types for the lookup layer.
//!
//! A missing record is never an error: lookups return `Option` or an empty
//! `Vec`. The variants here are programming or data errors.

use crate::schema::Collection;

/// Errors raised while loading or querying a [`KnowledgeBase`](crate::KnowledgeBase).
#[derive(thiserror::Error, Debug)]
pub enum KnowledgeError {
    /// A filter or facet named a field the collection does not define.
    #[error("invalid field '{field}' for collection '{collection}'")]
    InvalidField {
        collection: Collection,
        field: String,
    },

    /// A collection name did not parse.
    #[error("unknown collection: '{0}'. Use capabilities, case-studies, rfp-answers, or glossary.")]
    UnknownCollection(String),

    /// Two records in one collection share a primary key.
    #[error("duplicate key '{key}' in collection '{collection}'")]
    DuplicateKey { collection: Collection, key: String },

    /// The assistant was asked an empty question.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The dataset JSON did not parse.
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_display() {
        let err = KnowledgeError::InvalidField {
            collection: Collection::Capabilities,
            field: "colour".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid field 'colour' for collection 'capabilities'"
        );
    }

    #[test]
    fn test_duplicate_key_display() {
        let err = KnowledgeError::DuplicateKey {
            collection: Collection::RfpAnswers,
            key: "What is your defect rate?".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate key 'What is your defect rate?' in collection 'rfp-answers'"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: KnowledgeError = json_err.into();
        assert!(matches!(err, KnowledgeError::Parse(_)));
        assert!(err.to_string().starts_with("invalid dataset"));
    }
}
