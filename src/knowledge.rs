//! Loads the knowledge base the application serves.
//!
//! Uses the dataset compiled into `knowledge-core` unless `[data].path`
//! names a JSON file. Integrity problems are logged, not fatal.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use knowledge_core::KnowledgeBase;

use crate::config::Config;

/// A loaded knowledge base and when it was loaded.
#[derive(Debug)]
pub struct LoadedKnowledge {
    pub kb: KnowledgeBase,
    pub loaded_at: DateTime<Utc>,
    /// `"embedded"` or the dataset file path.
    pub origin: String,
}

pub fn load_knowledge(config: &Config) -> Result<LoadedKnowledge> {
    let (kb, origin) = match &config.data.path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
            let kb = KnowledgeBase::from_json_str(&json)
                .with_context(|| format!("Failed to load dataset: {}", path.display()))?;
            (kb, path.display().to_string())
        }
        None => (
            KnowledgeBase::embedded().context("Failed to load embedded dataset")?,
            "embedded".to_string(),
        ),
    };

    let report = kb.integrity_report();
    for issue in &report.issues {
        tracing::warn!(%issue, "dataset integrity");
    }

    tracing::info!(
        origin = %origin,
        capabilities = kb.capabilities().len(),
        case_studies = kb.case_studies().len(),
        rfp_answers = kb.rfp_answers().len(),
        glossary = kb.glossary().len(),
        "knowledge base loaded"
    );

    Ok(LoadedKnowledge {
        kb,
        loaded_at: Utc::now(),
        origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_by_default() {
        let loaded = load_knowledge(&Config::minimal()).unwrap();
        assert_eq!(loaded.origin, "embedded");
        assert_eq!(loaded.kb.capabilities().len(), 12);
    }

    #[test]
    fn test_dataset_file_override() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kb.json");
        fs::write(
            &path,
            r#"{"capabilities":[],"case_studies":[],"rfp_answers":[{"question":"Q?","answer":"A","tags":["x"]}]}"#,
        )
        .unwrap();

        let mut cfg = Config::minimal();
        cfg.data.path = Some(path.clone());
        let loaded = load_knowledge(&cfg).unwrap();
        assert_eq!(loaded.origin, path.display().to_string());
        assert_eq!(loaded.kb.rfp_answers().len(), 1);
    }

    #[test]
    fn test_missing_dataset_file_errors() {
        let mut cfg = Config::minimal();
        cfg.data.path = Some("/no/such/kb.json".into());
        let err = load_knowledge(&cfg).unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset"));
    }
}
