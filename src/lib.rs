//! # Knowledge Hub
//!
//! An internal knowledge base of company capabilities, client case studies,
//! pre-written RFP answers and a commerce glossary, served read-only.
//!
//! The data and every lookup live in `knowledge-core`. This crate adds the
//! outer surfaces: TOML configuration, dataset loading, the `kb` CLI and a
//! JSON HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────────────┐
//! │ knowledge.json   │──▶│ KnowledgeBase             │
//! │ (embedded/file)  │   │ lookup · search · related │
//! └──────────────────┘   └────────────┬─────────────┘
//!                                     │
//!                      ┌──────────────┤
//!                      ▼              ▼
//!                 ┌──────────┐  ┌──────────┐
//!                 │   CLI    │  │   HTTP   │
//!                 │  (kb)    │  │  (axum)  │
//!                 └──────────┘  └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! kb list capabilities --field pillar --value "Marketplace Operations"
//! kb search "defect rate"
//! kb ask "What ROAS do we typically achieve?"
//! kb serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`knowledge`] | Dataset loading |
//! | [`list`] | `kb list` and `kb facets` |
//! | [`get`] | `kb get` |
//! | [`search`] | `kb search` |
//! | [`ask`] | `kb ask` and `kb analyze-rfp` |
//! | [`check`] | `kb check` |
//! | [`stats`] | `kb stats` |
//! | [`server`] | HTTP API |

pub mod ask;
pub mod check;
pub mod config;
pub mod get;
pub mod knowledge;
pub mod list;
pub mod search;
pub mod server;
pub mod stats;
