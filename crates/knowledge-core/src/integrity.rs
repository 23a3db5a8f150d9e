//! Referential integrity report.
//!
//! Loading a [`KnowledgeBase`] does not enforce foreign keys or pillar
//! membership; related-record lookups tolerate dangling ids by dropping
//! them. This module reports those problems so a dataset can be checked
//! before it ships.

use serde::Serialize;
use std::fmt;

use crate::knowledge_base::KnowledgeBase;
use crate::models::PILLARS;
use crate::schema::Collection;

/// One integrity problem found in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// A foreign key that resolves to no record.
    DanglingReference {
        from: Collection,
        key: String,
        to: Collection,
        missing: String,
    },
    /// A capability assigned to a pillar outside the fixed five.
    UnknownPillar { capability: String, pillar: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DanglingReference {
                from,
                key,
                to,
                missing,
            } => write!(f, "{from} '{key}' references missing {to} '{missing}'"),
            IntegrityIssue::UnknownPillar { capability, pillar } => {
                write!(f, "capability '{capability}' has unknown pillar '{pillar}'")
            }
        }
    }
}

/// All integrity issues in a knowledge base.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

fn dangling(from: Collection, key: &str, to: Collection, missing: &str) -> IntegrityIssue {
    IntegrityIssue::DanglingReference {
        from,
        key: key.to_string(),
        to,
        missing: missing.to_string(),
    }
}

impl KnowledgeBase {
    /// Checks every foreign key and pillar assignment.
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut issues = Vec::new();

        for cap in self.capabilities() {
            if !PILLARS.contains(&cap.pillar.as_str()) {
                issues.push(IntegrityIssue::UnknownPillar {
                    capability: cap.id.clone(),
                    pillar: cap.pillar.clone(),
                });
            }
            for id in &cap.related_case_study_ids {
                if self.case_study(id).is_none() {
                    issues.push(dangling(
                        Collection::Capabilities,
                        &cap.id,
                        Collection::CaseStudies,
                        id,
                    ));
                }
            }
        }

        for cs in self.case_studies() {
            for id in &cs.related_capability_ids {
                if self.capability(id).is_none() {
                    issues.push(dangling(
                        Collection::CaseStudies,
                        &cs.id,
                        Collection::Capabilities,
                        id,
                    ));
                }
            }
        }

        for answer in self.rfp_answers() {
            if let Some(id) = answer.related_capability_id.as_deref() {
                if self.capability(id).is_none() {
                    issues.push(dangling(
                        Collection::RfpAnswers,
                        &answer.question,
                        Collection::Capabilities,
                        id,
                    ));
                }
            }
        }

        IntegrityReport { issues }
    }
}
