//! Dataset integrity check.
//!
//! Backs `kb check`: prints record counts and every dangling reference or
//! unknown pillar, and exits non-zero when any is found.

use anyhow::{bail, Result};
use knowledge_core::Collection;

use crate::knowledge::LoadedKnowledge;

/// Prints the dataset's integrity report; fails if any issue exists.
pub fn run_check(loaded: &LoadedKnowledge) -> Result<()> {
    let kb = &loaded.kb;
    let report = kb.integrity_report();

    println!("{:<16} {:>8}", "COLLECTION", "RECORDS");
    for c in Collection::ALL {
        println!("{:<16} {:>8}", c.as_str(), kb.len(c));
    }
    println!();

    if report.is_clean() {
        println!("OK: {} has no integrity issues", loaded.origin);
        return Ok(());
    }

    for issue in &report.issues {
        println!("  {}", issue);
    }
    println!();
    bail!(
        "{} integrity issue(s) found in {}",
        report.issues.len(),
        loaded.origin
    )
}
