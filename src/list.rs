//! Collection listing, field filters and facets.
//!
//! Backs the `kb list` and `kb facets` commands.

use anyhow::{bail, Result};
use knowledge_core::{Collection, KnowledgeBase, RecordRef};

/// Lists a collection, optionally filtered by `field == value`.
pub fn run_list(
    kb: &KnowledgeBase,
    collection: Collection,
    field: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    let records = match (field, value) {
        (Some(f), Some(v)) => kb.filter(collection, f, v)?,
        (None, None) => kb.records(collection),
        _ => bail!("--field and --value must be given together"),
    };

    if records.is_empty() {
        println!("No records.");
        return Ok(());
    }

    for r in &records {
        println!("{:<32} {}", r.key(), summary(r));
    }
    println!();
    println!("{} of {} {}", records.len(), kb.len(collection), collection);

    Ok(())
}

fn summary(record: &RecordRef<'_>) -> String {
    match record {
        RecordRef::Capability(c) => format!("{} [{}]", c.title, c.pillar),
        RecordRef::CaseStudy(cs) => format!("{} [{}]", cs.brand, cs.category),
        RecordRef::RfpAnswer(a) => format!("[{}]", a.tags.join(", ")),
        RecordRef::GlossaryTerm(g) => format!("[{}]", g.category),
    }
}

/// Prints the distinct values of a field with their record counts.
pub fn run_facets(kb: &KnowledgeBase, collection: Collection, field: &str) -> Result<()> {
    let counts = kb.count_by_field(collection, field)?;

    println!("{:<48} {:>6}", field.to_uppercase(), "COUNT");
    println!("{}", "-".repeat(55));
    for fc in &counts {
        println!("{:<48} {:>6}", fc.value, fc.count);
    }
    println!();
    println!(
        "{} distinct values across {} {}",
        counts.len(),
        kb.len(collection),
        collection
    );

    Ok(())
}
