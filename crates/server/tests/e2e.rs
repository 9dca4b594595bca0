use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server(seed: bool) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.directory.seed = seed;
    let app = server::startup::build_app(&cfg);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("reqwest client")
}

#[tokio::test]
async fn e2e_crud_over_http() -> anyhow::Result<()> {
    let app = start_server(true).await?;
    let c = client();

    let res = c.post(format!("{}/students/3", app.base_url))
        .json(&json!({"name": "tommy", "age": 18, "course": "basic"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"name": "tommy", "age": 18, "course": "basic"}));

    let res = c.get(format!("{}/students/", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["3"]["name"], "tommy");
    assert_eq!(body.as_object().map(|m| m.len()), Some(3));

    let res = c.put(format!("{}/students/1", app.base_url))
        .json(&json!({"course": "graduate"}))
        .send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"name": "john", "age": 17, "course": "graduate"}));

    let res = c.delete(format!("{}/delete_student/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"Message": "Student deleted successfully"}));

    let res = c.get(format!("{}/students/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?["detail"], "Student not found");
    Ok(())
}

#[tokio::test]
async fn e2e_unseeded_directory_starts_empty() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();

    let res = c.get(format!("{}/students/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({}));

    let res = c.get(format!("{}/get_by_name", app.base_url))
        .query(&[("name", "john")])
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"Data": "Not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_updates_are_not_lost() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();

    let mut tasks = Vec::new();
    for i in 1..=20i64 {
        let c = c.clone();
        let url = format!("{}/students/{}", app.base_url, i);
        tasks.push(tokio::spawn(async move {
            c.post(url).json(&json!({"name": format!("s{i}"), "age": i, "course": "c"})).send().await
        }));
    }
    for t in tasks {
        let res = t.await??;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }

    let res = c.get(format!("{}/students/", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_object().map(|m| m.len()), Some(20));
    Ok(())
}

#[tokio::test]
async fn e2e_admin_server_serves_metrics() -> anyhow::Result<()> {
    let app = start_server(true).await?;
    let (admin_addr, handle) =
        common::admin_http::spawn_admin_server("127.0.0.1:0", service::metrics::encode_metrics).await?;
    let c = client();

    let res = c.get(format!("{}/students/2", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("http://{}/healthz", admin_addr)).send().await?;
    assert_eq!(res.text().await?, "OK");

    let res = c.get(format!("http://{}/metrics", admin_addr)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let text = res.text().await?;
    assert!(text.contains("student_directory_operations_total"));
    assert!(text.contains("student_directory_records"));

    handle.abort();
    Ok(())
}
