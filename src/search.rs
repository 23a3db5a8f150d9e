//! `kb search`: substring search across the knowledge base.
//!
//! Thin wrapper over [`knowledge_core::search::search_text`]; results are
//! printed in the order the core returns them, truncated to the limit.

use anyhow::{bail, Result};
use knowledge_core::search::search_text;
use knowledge_core::{Collection, KnowledgeBase};

use crate::config::Config;

pub fn run_search(
    config: &Config,
    kb: &KnowledgeBase,
    query: &str,
    scope: Option<Collection>,
    limit: Option<usize>,
) -> Result<()> {
    let limit = limit.unwrap_or(config.search.max_results);
    if limit == 0 {
        bail!("--limit must be >= 1");
    }
    let hits = search_text(kb, query, scope);
    let total = hits.len();

    tracing::debug!(query, total, limit, "search");

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, hit) in hits.iter().take(limit).enumerate() {
        println!("{}. [{}] {}", i + 1, hit.collection, hit.title);
        println!("    key: {}    matched: {}", hit.key, hit.matched_field);
    }

    if total > limit {
        println!();
        println!("Showing {} of {} results.", limit, total);
    }

    Ok(())
}
