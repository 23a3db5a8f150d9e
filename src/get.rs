//! Record retrieval by primary key.
//!
//! Used by the `kb get` CLI command. Prints the full record followed by the
//! records it links to; dangling links are skipped.

use anyhow::{bail, Result};
use knowledge_core::models::{Capability, CaseStudy, GlossaryTerm, RfpAnswer};
use knowledge_core::{Collection, KnowledgeBase, RecordRef};

/// CLI entry point: look up one record and print it.
pub fn run_get(kb: &KnowledgeBase, collection: Collection, id: &str) -> Result<()> {
    let record = match kb.get(collection, id) {
        Some(r) => r,
        None => bail!("{} not found: {}", collection.label().to_lowercase(), id),
    };

    match record {
        RecordRef::Capability(c) => print_capability(c),
        RecordRef::CaseStudy(cs) => print_case_study(cs),
        RecordRef::RfpAnswer(a) => print_rfp_answer(a),
        RecordRef::GlossaryTerm(g) => print_glossary_term(g),
    }

    let related = kb.related(record);
    if !related.is_empty() {
        println!();
        println!("--- Related ({}) ---", related.len());
        for r in &related {
            println!("  [{}] {} ({})", r.collection(), r.title(), r.key());
        }
    }

    if let RecordRef::Capability(c) = record {
        let citing = kb.case_studies_for_capability(&c.id);
        if !citing.is_empty() {
            println!();
            println!("--- Cited by ({}) ---", citing.len());
            for cs in citing {
                println!("  [case-studies] {} ({})", cs.brand, cs.id);
            }
        }
    }

    Ok(())
}

fn print_capability(c: &Capability) {
    println!("--- Capability ---");
    println!("id:        {}", c.id);
    println!("title:     {}", c.title);
    println!("category:  {}", c.category);
    println!("pillar:    {}", c.pillar);
    println!();
    println!("{}", c.description);
    println!();
    println!("--- Key Points ({}) ---", c.key_points.len());
    for (i, kp) in c.key_points.iter().enumerate() {
        println!("{}. {}", i + 1, kp);
    }
    println!();
    println!("--- KPIs ({}) ---", c.kpis.len());
    for k in &c.kpis {
        println!("{:<24} {:<20} {}", k.metric, k.value, k.description);
    }
}

fn print_case_study(cs: &CaseStudy) {
    println!("--- Case Study ---");
    println!("id:        {}", cs.id);
    println!("brand:     {}", cs.brand);
    println!("category:  {}", cs.category);
    println!();
    println!("Challenge: {}", cs.challenge);
    println!();
    println!("--- Execution ({}) ---", cs.execution.len());
    for (i, step) in cs.execution.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    println!();
    println!("--- Results ({}) ---", cs.results.len());
    for r in &cs.results {
        println!("{:<24} {}", r.label, r.value);
    }
}

fn print_rfp_answer(a: &RfpAnswer) {
    println!("--- RFP Answer ---");
    println!("question:  {}", a.question);
    println!("tags:      {}", a.tags.join(", "));
    if let Some(ref id) = a.related_capability_id {
        println!("capability: {}", id);
    }
    println!();
    println!("{}", a.answer);
}

fn print_glossary_term(g: &GlossaryTerm) {
    println!("--- Glossary ---");
    println!("term:      {}", g.term);
    println!("category:  {}", g.category);
    println!();
    println!("{}", g.definition);
    if !g.context.is_empty() {
        println!();
        println!("In practice: {}", g.context);
    }
}
