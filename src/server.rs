//! JSON HTTP API over the knowledge base.
//!
//! Every handler is a thin adapter: it parses the request, calls the
//! lookup layer in `knowledge-core`, and serializes what comes back. The
//! knowledge base is loaded once and shared read-only behind an `Arc`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Status, version and load time |
//! | `GET`  | `/capabilities` | Capabilities, optional `?pillar=` / `?category=` |
//! | `GET`  | `/capabilities/{id}` | One capability with related case studies |
//! | `GET`  | `/case-studies` | Case studies, optional `?category=` |
//! | `GET`  | `/case-studies/{id}` | One case study with related capabilities |
//! | `GET`  | `/rfp-answers` | RFP answers, optional `?tag=` |
//! | `GET`  | `/glossary` | Glossary terms, optional `?category=` |
//! | `GET`  | `/glossary/{term}` | One glossary term |
//! | `GET`  | `/facets/{collection}/{field}` | Distinct values with counts |
//! | `GET`  | `/search?q=` | Substring search, optional `&collection=` / `&limit=` |
//! | `GET`  | `/assistant` | Greeting and suggested questions |
//! | `POST` | `/assistant` | Canned answer to `{"question": "..."}` |
//! | `GET`  | `/rfp-analyzer` | Mock RFP analysis; `?format=text` for the export |
//! | `GET`  | `/stats` | Dashboard counts |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "invalid_field", "message": "invalid field 'color' for collection 'capabilities'" } }
//! ```
//!
//! Error codes: `bad_request` (400), `invalid_field` (400), `not_found` (404),
//! `internal` (500).

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use knowledge_core::analyzer::{analyze, render_export};
use knowledge_core::assistant::{self, GREETING, SUGGESTED_QUESTIONS};
use knowledge_core::search::search_text;
use knowledge_core::stats::Stats;
use knowledge_core::{Collection, KnowledgeBase, KnowledgeError, RecordRef};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::knowledge::LoadedKnowledge;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    kb: Arc<KnowledgeBase>,
    config: Arc<Config>,
    loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: &Config, loaded: LoadedKnowledge) -> Self {
        Self {
            kb: Arc::new(loaded.kb),
            config: Arc::new(config.clone()),
            loaded_at: loaded.loaded_at,
        }
    }
}

/// Builds the router with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/capabilities", get(handle_capabilities))
        .route("/capabilities/{id}", get(handle_capability))
        .route("/case-studies", get(handle_case_studies))
        .route("/case-studies/{id}", get(handle_case_study))
        .route("/rfp-answers", get(handle_rfp_answers))
        .route("/glossary", get(handle_glossary))
        .route("/glossary/{term}", get(handle_glossary_term))
        .route("/facets/{collection}/{field}", get(handle_facets))
        .route("/search", get(handle_search))
        .route("/assistant", get(handle_assistant_intro).post(handle_assistant))
        .route("/rfp-analyzer", get(handle_rfp_analyzer))
        .route("/stats", get(handle_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server on `[server].bind` and runs until terminated.
pub async fn run_server(config: &Config, loaded: LoadedKnowledge) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(AppState::new(config, loaded));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(bind = %bind_addr, "server started");
    println!("Knowledge Hub API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"not_found"`).
    code: String,
    message: String,
}

/// Error type that converts into a JSON error response.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found",
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal",
        message: message.into(),
    }
}

impl From<KnowledgeError> for AppError {
    fn from(err: KnowledgeError) -> Self {
        match err {
            KnowledgeError::InvalidField { .. } => AppError {
                status: StatusCode::BAD_REQUEST,
                code: "invalid_field",
                message: err.to_string(),
            },
            KnowledgeError::UnknownCollection(_) | KnowledgeError::EmptyQuestion => {
                bad_request(err.to_string())
            }
            KnowledgeError::DuplicateKey { .. } | KnowledgeError::Parse(_) => {
                tracing::error!(error = %err, "unexpected knowledge error");
                internal(err.to_string())
            }
        }
    }
}

// ============ GET /health ============

async fn handle_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "loaded_at": state.loaded_at.to_rfc3339(),
    }))
}

// ============ Collections ============

/// Optional filters accepted by the list endpoints. Each endpoint reads
/// only the parameters its collection defines.
#[derive(Debug, Default, Deserialize)]
struct FilterQuery {
    pillar: Option<String>,
    category: Option<String>,
    tag: Option<String>,
}

/// Lists `collection`, keeping records that satisfy every given filter.
fn list(
    kb: &KnowledgeBase,
    collection: Collection,
    filters: &[(&str, Option<&str>)],
) -> Result<Json<Value>, AppError> {
    let mut records = kb.records(collection);
    for &(field, value) in filters {
        if let Some(value) = value {
            let keep: Vec<&str> = kb
                .filter(collection, field, value)?
                .iter()
                .map(|r| r.key())
                .collect();
            records.retain(|r| keep.contains(&r.key()));
        }
    }

    Ok(Json(json!({
        "collection": collection,
        "count": records.len(),
        "records": records,
    })))
}

/// One record with the records it links to.
fn detail(kb: &KnowledgeBase, collection: Collection, key: &str) -> Result<Json<Value>, AppError> {
    let record = kb.get(collection, key).ok_or_else(|| {
        not_found(format!(
            "{} not found: {}",
            collection.label().to_lowercase(),
            key
        ))
    })?;

    let mut body = json!({
        "collection": collection,
        "record": record,
        "related": kb.related(record),
    });
    if let RecordRef::Capability(c) = record {
        body["cited_by"] = json!(kb.case_studies_for_capability(&c.id));
    }

    Ok(Json(body))
}

async fn handle_capabilities(
    State(state): State<AppState>,
    Query(q): Query<FilterQuery>,
) -> Result<Json<Value>, AppError> {
    list(
        &state.kb,
        Collection::Capabilities,
        &[
            ("pillar", q.pillar.as_deref()),
            ("category", q.category.as_deref()),
        ],
    )
}

async fn handle_capability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    detail(&state.kb, Collection::Capabilities, &id)
}

async fn handle_case_studies(
    State(state): State<AppState>,
    Query(q): Query<FilterQuery>,
) -> Result<Json<Value>, AppError> {
    list(
        &state.kb,
        Collection::CaseStudies,
        &[("category", q.category.as_deref())],
    )
}

async fn handle_case_study(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    detail(&state.kb, Collection::CaseStudies, &id)
}

async fn handle_rfp_answers(
    State(state): State<AppState>,
    Query(q): Query<FilterQuery>,
) -> Result<Json<Value>, AppError> {
    list(
        &state.kb,
        Collection::RfpAnswers,
        &[("tags", q.tag.as_deref())],
    )
}

async fn handle_glossary(
    State(state): State<AppState>,
    Query(q): Query<FilterQuery>,
) -> Result<Json<Value>, AppError> {
    list(
        &state.kb,
        Collection::Glossary,
        &[("category", q.category.as_deref())],
    )
}

async fn handle_glossary_term(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<Json<Value>, AppError> {
    detail(&state.kb, Collection::Glossary, &term)
}

// ============ GET /facets/{collection}/{field} ============

async fn handle_facets(
    State(state): State<AppState>,
    Path((collection, field)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let collection: Collection = collection
        .parse()
        .map_err(|e: KnowledgeError| not_found(e.to_string()))?;
    let values = state.kb.count_by_field(collection, &field)?;

    Ok(Json(json!({
        "collection": collection,
        "field": field,
        "values": values,
    })))
}

// ============ GET /search ============

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    collection: Option<String>,
    limit: Option<usize>,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let scope = params
        .collection
        .as_deref()
        .map(str::parse::<Collection>)
        .transpose()?;

    let limit = params.limit.unwrap_or(state.config.search.max_results);
    if limit == 0 {
        return Err(bad_request("limit must be >= 1"));
    }

    let hits = search_text(&state.kb, &params.q, scope);
    let total = hits.len();
    let hits: Vec<_> = hits.into_iter().take(limit).collect();

    Ok(Json(json!({
        "query": params.q,
        "total": total,
        "hits": hits,
    })))
}

// ============ /assistant ============

async fn handle_assistant_intro() -> Json<Value> {
    Json(json!({
        "greeting": GREETING,
        "suggested_questions": SUGGESTED_QUESTIONS,
    }))
}

#[derive(Debug, Deserialize)]
struct AssistantRequest {
    question: String,
}

async fn handle_assistant(
    State(state): State<AppState>,
    Json(req): Json<AssistantRequest>,
) -> Result<Json<assistant::Reply>, AppError> {
    let reply = assistant::reply(&state.kb, &req.question)?;

    let delay = state.config.assistant.reply_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    Ok(Json(reply))
}

// ============ GET /rfp-analyzer ============

#[derive(Debug, Deserialize)]
struct AnalyzerQuery {
    format: Option<String>,
}

async fn handle_rfp_analyzer(
    State(state): State<AppState>,
    Query(q): Query<AnalyzerQuery>,
) -> Result<Response, AppError> {
    let questions = analyze(&state.kb);

    match q.format.as_deref() {
        None | Some("json") => Ok(Json(json!({ "questions": questions })).into_response()),
        Some("text") => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_export(&questions),
        )
            .into_response()),
        Some(other) => Err(bad_request(format!(
            "unknown format: '{}'. Use json or text.",
            other
        ))),
    }
}

// ============ GET /stats ============

async fn handle_stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let stats = Stats::compute(&state.kb)?;
    Ok(Json(json!({
        "total_records": stats.total_records(),
        "stats": stats,
    })))
}
