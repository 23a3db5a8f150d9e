//! Knowledge base summary.
//!
//! Prints what the dashboard shows: record counts per collection and the
//! per-pillar and per-category breakdowns. Used by `kb stats`.

use anyhow::Result;
use knowledge_core::lookup::FieldCount;
use knowledge_core::stats::Stats;

use crate::knowledge::LoadedKnowledge;

/// Run the stats command: compute the summary and print it.
pub fn run_stats(loaded: &LoadedKnowledge) -> Result<()> {
    let stats = Stats::compute(&loaded.kb)?;

    println!("Knowledge Hub — Stats");
    println!("=====================");
    println!();
    println!("  Dataset:     {}", loaded.origin);
    println!(
        "  Loaded:      {}",
        loaded.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
    for c in &stats.collections {
        println!("  {:<13}{}", format!("{}:", c.collection.label()), c.count);
    }
    println!("  {:<13}{}", "Total:", stats.total_records());

    print_breakdown("By pillar:", "PILLAR", &stats.pillars);
    print_breakdown("Case studies by category:", "CATEGORY", &stats.case_study_categories);
    print_breakdown("Glossary by category:", "CATEGORY", &stats.glossary_categories);

    println!();
    Ok(())
}

fn print_breakdown(heading: &str, column: &str, counts: &[FieldCount]) {
    if counts.is_empty() {
        return;
    }
    println!();
    println!("  {}", heading);
    println!("  {:<48} {:>6}", column, "COUNT");
    println!("  {}", "-".repeat(55));
    for fc in counts {
        println!("  {:<48} {:>6}", fc.value, fc.count);
    }
}
