use super::*;
use crate::state::test_helpers;

/// Serve `app` on an ephemeral port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve `state` behind the API router and CORS.
async fn spawn_with(state: AppState) -> String {
    serve(with_cors(api_routes(state))).await
}

/// Serve the API backed by an unreachable database and no coin settings.
async fn spawn_api() -> String {
    spawn_with(test_helpers::test_app_state()).await
}

fn assert_cors_headers(headers: &reqwest::header::HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    for method in ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }
    let allowed = headers["access-control-allow-headers"].to_str().unwrap().to_ascii_lowercase();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("authorization"));
}

#[tokio::test]
async fn healthz_is_ok() {
    let base = spawn_api().await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn preflight_returns_ok_with_cors_headers() {
    let base = spawn_api().await;
    let resp = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/api/go/users"))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_cors_headers(resp.headers());
}

#[tokio::test]
async fn plain_responses_carry_cors_headers() {
    let base = spawn_api().await;
    let ok = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_cors_headers(ok.headers());

    let rejected = reqwest::Client::new()
        .get(format!("{base}/api/go/users/abc"))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_cors_headers(rejected.headers());
}

#[tokio::test]
async fn non_integer_id_is_rejected_before_touching_the_database() {
    let base = spawn_api().await;
    let resp = reqwest::get(format!("{base}/api/go/users/abc")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "invalid id format — must be an integer");
}

#[tokio::test]
async fn create_with_missing_email_is_rejected() {
    let base = spawn_api().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/go/users"))
        .header("Content-Type", "application/json")
        .body(r#"{"name":"Alice"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Email is Required");
}

#[tokio::test]
async fn create_with_malformed_json_is_rejected() {
    let base = spawn_api().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/go/users"))
        .body("{")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().starts_with("invalid JSON: "));
}

#[tokio::test]
async fn list_failure_answers_not_found() {
    let base = spawn_api().await;
    let resp = reqwest::get(format!("{base}/api/go/users")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_valid_body_but_no_database_fails_cleanly() {
    let base = spawn_api().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/go/users"))
        .body(r#"{"name":"Alice","email":"alice@example.com"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text().await.unwrap(), "failed to create user");
}

#[tokio::test]
async fn coin_without_symbol_is_rejected_first() {
    let base = spawn_api().await;
    for url in [format!("{base}/api/go/coin"), format!("{base}/api/go/coin?symbol=")] {
        let resp = reqwest::get(url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(resp.text().await.unwrap(), "Missing Query Param: symbol");
    }
}

#[tokio::test]
async fn coin_without_configuration_is_rejected() {
    let base = spawn_api().await;
    let resp = reqwest::get(format!("{base}/api/go/coin?symbol=BTC")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Server Not Configured. Missing X-CMC_PRO_API_KEY");
}

#[tokio::test]
async fn coin_relays_upstream_quote() {
    let upstream = serve(Router::new().route(
        "/v1/quotes",
        get(|| async { axum::Json(serde_json::json!({"data": {"BTC": {"symbol": "BTC"}}})) }),
    ))
    .await;
    let base = spawn_with(test_helpers::test_app_state_with_coin(coin_settings(&upstream))).await;

    let resp = reqwest::get(format!("{base}/api/go/coin?symbol=BTC")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["BTC"]["symbol"], "BTC");
}

#[tokio::test]
async fn coin_upstream_failure_is_bad_gateway() {
    let base = spawn_with(test_helpers::test_app_state_with_coin(coin_settings("http://127.0.0.1:1"))).await;
    let resp = reqwest::get(format!("{base}/api/go/coin?symbol=BTC")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_GATEWAY);
    assert!(!resp.text().await.unwrap().is_empty());
}

fn coin_settings(base_url: &str) -> crate::config::CoinSettings {
    crate::config::CoinSettings {
        api_key: Some("cmc-test-key".to_owned()),
        base_url: Some(base_url.to_owned()),
        quotes_path: Some("/v1/quotes".to_owned()),
    }
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn live_create_then_list_over_http() {
    let base = spawn_with(test_helpers::live_app_state().await).await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("{base}/api/go/users"))
        .body(r#"{"name":"Http Alice","email":"http@example.com"}"#)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();
    assert!(created["createTimestamp"].is_string());

    let fetched: serde_json::Value = client
        .get(format!("{base}/api/go/users/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["name"], "Http Alice");

    let list: Vec<serde_json::Value> = client
        .get(format!("{base}/api/go/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.iter().any(|u| u["id"].as_i64() == Some(id)));
}
