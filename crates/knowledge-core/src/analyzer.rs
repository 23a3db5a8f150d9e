//! Mock RFP analysis.
//!
//! The analyzer does not read the submitted document. It always returns
//! the same five questions, each with a fixed suggested response and a
//! link to the stored RFP answer whose question contains a fixed phrase.

use serde::Serialize;

use crate::knowledge_base::KnowledgeBase;
use crate::models::RfpAnswer;

/// How closely a stored answer covers an extracted question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// One question "found" in an RFP with the response to give.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedQuestion<'a> {
    pub question: &'static str,
    pub matched_answer: Option<&'a RfpAnswer>,
    pub confidence: Confidence,
    pub suggested_response: &'static str,
}

struct MockQuestion {
    question: &'static str,
    /// Case-sensitive phrase looked up in stored RFP questions.
    needle: &'static str,
    confidence: Confidence,
    response: &'static str,
}

const MOCK_QUESTIONS: [MockQuestion; 5] = [
    MockQuestion {
        question: "What is your fulfillment capacity and defect rate?",
        needle: "defect rate",
        confidence: Confidence::High,
        response: "We maintain peak velocity of 48,000 units/hour with <0.01% defect rates. \
Our quality control protocols include automated weight verification, visual inspection, and \
SIOC compliance checks at every stage.",
    },
    MockQuestion {
        question: "Describe your typical ROAS for advertising campaigns",
        needle: "ROAS",
        confidence: Confidence::High,
        response: "We consistently deliver 5-8x ROAS through data-driven media strategies. \
Recent examples include SOLA (7-8x ROAS, scaled to $800K/month) and Bob's Red Mill (5.53x ROAS \
with 29% new-to-brand customers).",
    },
    MockQuestion {
        question: "How do you handle brand protection and unauthorized sellers?",
        needle: "unauthorized",
        confidence: Confidence::High,
        response: "We use a multi-layered approach: Amazon Brand Registry enrollment, \
Transparency program implementation, systematic IP violation reporting, test buy programs, and \
MAP enforcement. In one campaign, we removed 56 unauthorized sellers and recovered $526K in \
monthly revenue.",
    },
    MockQuestion {
        question: "What marketplaces do you support beyond Amazon?",
        needle: "marketplace",
        confidence: Confidence::Medium,
        response: "We manage Amazon 3P, Amazon 1P, Walmart, TikTok Shop, and 10+ DTC sites \
through unified operations. Recent results include scaling a household brand from <$50K to $1M \
monthly in 18 months.",
    },
    MockQuestion {
        question: "Describe your onboarding process and timeline",
        needle: "onboarding",
        confidence: Confidence::High,
        response: "Comprehensive marketplace audit: 5-10 days. Initial catalog cleanup and \
compliance: 2-4 weeks. Full operational integration: 30-60 days. We can begin generating \
revenue within 30-60 days through orphan ASIN takeover strategies.",
    },
];

/// Returns the fixed analysis, linked to the stored answers in `kb`.
pub fn analyze(kb: &KnowledgeBase) -> Vec<AnalyzedQuestion<'_>> {
    MOCK_QUESTIONS
        .iter()
        .map(|m| AnalyzedQuestion {
            question: m.question,
            matched_answer: kb.rfp_answers().iter().find(|a| a.question.contains(m.needle)),
            confidence: m.confidence,
            suggested_response: m.response,
        })
        .collect()
}

/// Renders the analysis as the plain-text export handed to proposal writers.
pub fn render_export(questions: &[AnalyzedQuestion<'_>]) -> String {
    let rule = "-".repeat(80);
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            format!(
                "Question {}: {}\n\nResponse:\n{}\n\n{}\n\n",
                i + 1,
                q.question,
                q.suggested_response,
                rule
            )
        })
        .collect()
}
