//! Canned question answering over the search layer.
//!
//! There is no language understanding here: the question is run through
//! [`best_match`] and the winning record is formatted as a reply. The
//! order of preference is RFP answer, then capability, then case study.

use serde::Serialize;

use crate::error::KnowledgeError;
use crate::knowledge_base::{KnowledgeBase, RecordRef};
use crate::models::{Capability, CaseStudy, RfpAnswer};
use crate::search::{answer_candidates, best_match};

/// Starter questions offered to users of the assistant.
pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What is our defect rate?",
    "Tell me about the SOLA case study",
    "What ROAS do we typically achieve?",
    "How do we handle brand protection?",
    "What are our fulfillment capabilities?",
];

/// Greeting shown before the first question.
pub const GREETING: &str = "Hi! I'm your Knowledge Base assistant. Ask me anything about our \
capabilities, case studies, or RFP answers. I can help you find specific information or \
generate responses for proposals.";

/// A formatted answer and the records it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub content: String,
    /// Citations such as `RFP: What is your defect rate?`.
    pub sources: Vec<String>,
}

/// Answers a free-text question from the knowledge base.
pub fn reply(kb: &KnowledgeBase, question: &str) -> Result<Reply, KnowledgeError> {
    if question.trim().is_empty() {
        return Err(KnowledgeError::EmptyQuestion);
    }

    let Some(hit) = best_match(kb, question) else {
        let found = answer_candidates(kb, question).len();
        return Ok(Reply {
            content: format!(
                "I found {found} results in the knowledge base. Could you be more specific \
                 about what you're looking for?"
            ),
            sources: Vec::new(),
        });
    };

    let source = format!("{}: {}", hit.collection.label(), hit.title);
    let content = match hit.record {
        RecordRef::RfpAnswer(a) => format_rfp_answer(a),
        RecordRef::Capability(c) => format_capability(c),
        RecordRef::CaseStudy(cs) => format_case_study(cs),
        // best_match never returns glossary hits
        RecordRef::GlossaryTerm(g) => g.definition.clone(),
    };

    Ok(Reply {
        content,
        sources: vec![source],
    })
}

fn format_rfp_answer(answer: &RfpAnswer) -> String {
    answer.answer.clone()
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_capability(cap: &Capability) -> String {
    let kpis = cap
        .kpis
        .iter()
        .map(|k| format!("• {}: {} - {}", k.metric, k.value, k.description))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{}\n\nKey Points:\n{}\n\nKPIs:\n{}",
        cap.description,
        numbered(&cap.key_points),
        kpis
    )
}

fn format_case_study(cs: &CaseStudy) -> String {
    let results = cs
        .results
        .iter()
        .map(|r| format!("• {}: {}", r.label, r.value))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "**{}** ({})\n\n**Challenge:** {}\n\n**Execution:**\n{}\n\n**Results:**\n{}",
        cs.brand,
        cs.category,
        cs.challenge,
        numbered(&cs.execution),
        results
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::embedded().unwrap()
    }

    #[test]
    fn test_empty_question_rejected() {
        assert!(matches!(
            reply(&kb(), "   "),
            Err(KnowledgeError::EmptyQuestion)
        ));
    }

    #[test]
    fn test_rfp_answer_wins() {
        let r = reply(&kb(), "defect rate").unwrap();
        assert_eq!(r.sources, vec!["RFP: What is your defect rate?"]);
        assert!(r.content.contains("<0.01% defect rate"));
    }

    #[test]
    fn test_capability_reply_format() {
        let kb = kb();
        // Appears in a capability key point but in no RFP question, answer, or tag.
        let r = reply(&kb, "Eliminates friction").unwrap();
        assert_eq!(r.sources, vec!["Capability: Integrated Operations"]);
        assert!(r.content.contains("Key Points:\n1. "));
        assert!(r.content.contains("KPIs:\n• System Integration: 100%"));
    }

    #[test]
    fn test_case_study_reply_format() {
        let kb = kb();
        let r = reply(&kb, "Leading Mason Jar").unwrap();
        assert_eq!(r.sources, vec!["Case Study: Leading Mason Jar Manufacturer"]);
        assert!(r.content.starts_with("**Leading Mason Jar Manufacturer**"));
        assert!(r.content.contains("• Sellers Removed: 56"));
    }

    #[test]
    fn test_tag_only_rfp_match_does_not_win() {
        let kb = kb();
        let r = reply(&kb, "flexibility").unwrap();
        assert_eq!(r.sources, vec!["Capability: Financial Flexibility"]);
        let r = reply(&kb, "omnichannel").unwrap();
        assert_eq!(r.sources, vec!["Capability: Omnichannel Orchestration"]);
    }

    #[test]
    fn test_glossary_only_question_falls_back() {
        let r = reply(&kb(), "Prime Badge").unwrap();
        assert!(r.sources.is_empty());
        assert!(r.content.starts_with("I found 0 results"));
    }

    #[test]
    fn test_fallback_has_no_sources() {
        let r = reply(&kb(), "xyzzy plugh").unwrap();
        assert!(r.sources.is_empty());
        assert!(r.content.starts_with("I found 0 results"));
    }
}
