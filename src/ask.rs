//! `kb ask` and `kb analyze-rfp`.
//!
//! Both print canned output from `knowledge-core`: the assistant's reply to
//! a question, and the fixed mock RFP analysis with an optional text export.

use anyhow::{Context, Result};
use knowledge_core::analyzer::{analyze, render_export};
use knowledge_core::assistant;
use knowledge_core::KnowledgeBase;
use std::path::Path;

pub fn run_ask(kb: &KnowledgeBase, question: &str) -> Result<()> {
    let reply = assistant::reply(kb, question)?;

    println!("{}", reply.content);
    if !reply.sources.is_empty() {
        println!();
        println!("Sources:");
        for s in &reply.sources {
            println!("  - {}", s);
        }
    }

    Ok(())
}

pub fn run_analyze_rfp(kb: &KnowledgeBase, export: Option<&Path>) -> Result<()> {
    let questions = analyze(kb);

    for (i, q) in questions.iter().enumerate() {
        println!("{}. {}", i + 1, q.question);
        println!("   confidence: {}", q.confidence.as_str());
        match q.matched_answer {
            Some(a) => println!("   matched:    {}", a.question),
            None => println!("   matched:    (none)"),
        }
        println!();
    }

    if let Some(path) = export {
        std::fs::write(path, render_export(&questions))
            .with_context(|| format!("Failed to write export: {}", path.display()))?;
        println!("Exported {} responses to {}", questions.len(), path.display());
    }

    Ok(())
}
