//! # Knowledge Hub Core
//!
//! Shared, WASM-safe logic for Knowledge Hub: the record model, the
//! embedded dataset, and every query the application answers from it.
//!
//! This crate contains no tokio, filesystem I/O, or other native-only
//! dependencies. Every operation is a synchronous function of a
//! [`KnowledgeBase`] value, which callers construct once and pass around
//! explicitly.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Capability, case study, RFP answer and glossary records |
//! | [`schema`] | Collection names and their filterable fields |
//! | [`lookup`] | Get-by-id, filter, distinct values, counts, FK resolution |
//! | [`search`] | Case-insensitive substring search with provenance |
//! | [`knowledge_base`] | The constructed, immutable dataset |
//! | [`integrity`] | Referential integrity report |
//! | [`assistant`] | Canned question answering over the search layer |
//! | [`analyzer`] | Mock RFP analysis output |
//! | [`stats`] | Dashboard counts |

pub mod analyzer;
pub mod assistant;
pub mod error;
pub mod integrity;
pub mod knowledge_base;
pub mod lookup;
pub mod models;
pub mod schema;
pub mod search;
pub mod stats;

pub use error::KnowledgeError;
pub use knowledge_base::{KnowledgeBase, RecordRef};
pub use schema::Collection;
