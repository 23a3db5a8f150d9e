//! HTTP API tests.
//!
//! Each test starts the server in-process on a free port and talks to it
//! with `reqwest`.

use knowledge_hub::config::{parse_config, Config};
use knowledge_hub::knowledge::load_knowledge;
use knowledge_hub::server::run_server;
use serde_json::{json, Value};

// ─── Helpers ────────────────────────────────────────────────────────

fn test_config_with_port(port: u16) -> Config {
    let config_content = format!(
        r#"
[server]
bind = "127.0.0.1:{}"

[search]
max_results = 5
"#,
        port
    );
    parse_config(&config_content).unwrap()
}

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn wait_for_server(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

/// Starts a server on a fresh port and returns its base URL.
async fn start_server() -> String {
    let port = find_free_port();
    let cfg = test_config_with_port(port);
    let loaded = load_knowledge(&cfg).unwrap();

    tokio::spawn(async move {
        run_server(&cfg, loaded).await.ok();
    });

    wait_for_server(port).await;
    format!("http://127.0.0.1:{}", port)
}

async fn get_json(url: &str) -> (u16, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    let body: Value = resp.json().await.unwrap();
    (status, body)
}

// ─── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/health", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert!(body["loaded_at"].is_string());
}

#[tokio::test]
async fn test_capabilities_filtered_by_pillar() {
    let base = start_server().await;
    let (status, body) = get_json(&format!(
        "{}/capabilities?pillar=Marketplace%20Operations",
        base
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 4);
    let records = body["records"].as_array().unwrap();
    assert!(records
        .iter()
        .all(|r| r["pillar"] == "Marketplace Operations"));
}

#[tokio::test]
async fn test_capability_detail_with_related() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/capabilities/fulfillment-excellence", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["collection"], "capabilities");
    assert_eq!(body["record"]["title"], "Fulfillment & Operations");
    let related: Vec<&str> = body["related"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        related,
        vec![
            "influencer-spice-launch",
            "household-cleaning-backstop",
            "sku-launch-program"
        ]
    );
    assert_eq!(body["cited_by"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_missing_record_is_404() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/case-studies/nonexistent-id", base)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_rfp_answers_by_tag() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/rfp-answers?tag=operations", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn test_glossary_term() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/glossary/ROAS", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["record"]["category"], "Media");
}

#[tokio::test]
async fn test_facets() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/facets/capabilities/pillar", base)).await;
    assert_eq!(status, 200);
    let values = body["values"].as_array().unwrap();
    assert_eq!(values.len(), 5);
    let total: u64 = values.iter().map(|v| v["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 12);

    let (status, body) = get_json(&format!("{}/facets/rfp-answers/tags", base)).await;
    assert_eq!(status, 200);
    let total: u64 = body["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["count"].as_u64().unwrap())
        .sum();
    assert!(total > 20, "tag counts should exceed the RFP count");
}

#[tokio::test]
async fn test_facets_invalid_field_is_400() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/facets/capabilities/color", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "invalid_field");

    let (status, body) = get_json(&format!("{}/facets/widgets/color", base)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_search_provenance_and_limit() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/search?q=defect%20rate", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 3);
    let hits = body["hits"].as_array().unwrap();
    assert_eq!(hits[0]["collection"], "capabilities");
    assert_eq!(hits[0]["key"], "fulfillment-excellence");
    assert_eq!(hits[1]["collection"], "rfp-answers");

    let (_, body) = get_json(&format!("{}/search?q=", base)).await;
    assert_eq!(body["total"], 77);
    assert_eq!(body["hits"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_search_scope_and_bad_collection() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/search?q=roas&collection=glossary", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 1);
    assert_eq!(body["hits"][0]["key"], "ROAS");

    let (status, body) = get_json(&format!("{}/search?q=roas&collection=widgets", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_assistant_reply() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/assistant", base))
        .json(&json!({"question": "48,000"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["sources"], json!(["RFP: What is your defect rate?"]));

    let resp = client
        .post(format!("{}/assistant", base))
        .json(&json!({"question": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let (status, body) = get_json(&format!("{}/assistant", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["suggested_questions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_rfp_analyzer_formats() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/rfp-analyzer", base)).await;
    assert_eq!(status, 200);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[3]["confidence"], "medium");

    let resp = reqwest::get(format!("{}/rfp-analyzer?format=text", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let text = resp.text().await.unwrap();
    assert!(text.starts_with("Question 1: "));

    let (status, _) = get_json(&format!("{}/rfp-analyzer?format=pdf", base)).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_stats() {
    let base = start_server().await;
    let (status, body) = get_json(&format!("{}/stats", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["total_records"], 77);
    assert_eq!(body["stats"]["pillars"].as_array().unwrap().len(), 5);
}
