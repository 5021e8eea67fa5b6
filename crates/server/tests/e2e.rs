use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use server::routes::{self, AppState};
use service::ShotStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn shots(&self) -> String {
        format!("{}/api/shots", self.base_url)
    }

    fn shot(&self, id: impl std::fmt::Display) -> String {
        format!("{}/api/shots/{}", self.base_url, id)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Each test gets its own store and port
    let frontend_dir = format!("target/test-data/{}/frontend", uuid::Uuid::new_v4());
    let app = routes::build_router(AppState::new(ShotStore::new()), CorsLayer::very_permissive(), &frontend_dir);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn list(c: &reqwest::Client, app: &TestApp) -> anyhow::Result<Value> {
    let res = c.get(app.shots()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_then_list() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(app.shots()).json(&json!({"club": "driver"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?, json!({"club": "driver"}));

    assert_eq!(list(&c, &app).await?, json!([{"club": "driver"}]));
    Ok(())
}

#[tokio::test]
async fn e2e_list_preserves_creation_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let shots: Vec<Value> = (0..5).map(|i| json!({"hole": i, "club": "iron"})).collect();
    for s in &shots {
        let res = c.post(app.shots()).json(s).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }
    assert_eq!(list(&c, &app).await?, Value::Array(shots));
    Ok(())
}

#[tokio::test]
async fn e2e_delete_first_shifts_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    c.post(app.shots()).json(&json!({"club": "driver"})).send().await?;
    c.post(app.shots()).json(&json!({"club": "putter"})).send().await?;

    let res = c.delete(app.shot(0)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    assert_eq!(list(&c, &app).await?, json!([{"club": "putter"}]));

    // the putter is now addressable at 0
    let res = c.put(app.shot(0)).json(&json!({"club": "putter", "putts": 2})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(list(&c, &app).await?, json!([{"club": "putter", "putts": 2}]));

    let res = c.delete(app.shot(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_update_on_empty_store_is_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.put(app.shot(0)).json(&json!({"club": "driver"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Shot not found"}));
    assert_eq!(list(&c, &app).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_negative_id_is_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    c.post(app.shots()).json(&json!({"club": "driver"})).send().await?;

    let res = c.put(app.shot(-1)).json(&json!({"club": "wedge"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Shot not found"}));

    let res = c.delete(app.shot(-1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    assert_eq!(list(&c, &app).await?, json!([{"club": "driver"}]));
    Ok(())
}

#[tokio::test]
async fn e2e_cors_allows_any_origin() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .request(reqwest::Method::OPTIONS, app.shots())
        .header("Origin", "http://example.test")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await?;
    assert!(res.status().is_success());
    let allow = res
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(allow.as_deref(), Some("http://example.test"));

    let res = c.get(app.shots()).header("Origin", "http://other.test").send().await?;
    assert!(res.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
