//! End-to-end tests against a running service with the shipped templates.

use std::net::SocketAddr;

use axum::http::StatusCode;
use etcd_bootstrap::TemplateStore;

mod common;

#[tokio::test]
async fn test_usage_page() {
    let addr: SocketAddr = "127.0.0.1:28381".parse().unwrap();
    let shutdown = common::start_service(addr).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .header("x-forwarded-proto", "https")
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/html");
    let length: usize = res.headers()["content-length"].to_str().unwrap().parse().unwrap();
    let body = res.text().await.unwrap();
    assert_eq!(body.len(), length);
    assert!(body.contains("<form"));

    shutdown.trigger();
}

#[cfg(unix)]
#[tokio::test]
async fn test_script_round_trip() {
    let addr: SocketAddr = "127.0.0.1:28382".parse().unwrap();
    let shutdown = common::start_service(addr).await;

    let fields = [
        ("i1", "10.0.0.1", "ETCD_IP1"),
        ("i2", "10.0.0.2", "ETCD_IP2"),
        ("i3", "10.0.0.3", "ETCD_IP3"),
        ("e", "1", "ETCD_ENCRYPTION"),
        ("t", "it's a token", "ETCD_TOKEN"),
        ("r", "px$HOME", "ETCD_PREFIX"),
        ("c", "12379", "ETCD_CLIENT_PORT"),
        ("p", "12380; echo peer", "ETCD_PEER_PORT"),
        ("d", "/data/etcd\nsecond line", "ETCD_DIR"),
        ("u", "O'Brien $(id) `id`", "ETCD_USER"),
        ("v", "3.4.13", "ETCD_VERSION"),
    ];
    let form: Vec<(&str, &str)> = fields.iter().map(|(k, v, _)| (*k, *v)).collect();

    let res = common::client()
        .post(format!("http://{}/", addr))
        .form(&form)
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let length: usize = res.headers()["content-length"].to_str().unwrap().parse().unwrap();
    let script = res.text().await.unwrap();
    assert_eq!(script.len(), length);
    assert!(script.starts_with("#!/bin/sh"));

    for (_, value, var) in fields {
        assert_eq!(common::script_var(&script, var).as_deref(), Some(value), "{}", var);
    }
    assert_eq!(
        common::script_banner(&script),
        Some(format!("Bootstrapping etcd from http://{}/\n", addr))
    );

    shutdown.trigger();
}

#[cfg(unix)]
#[tokio::test]
async fn test_field_cannot_run_commands() {
    let addr: SocketAddr = "127.0.0.1:28386".parse().unwrap();
    let shutdown = common::start_service(addr).await;

    let dir = tempfile::tempdir().unwrap();
    let quoted = dir.path().join("quoted");
    let substituted = dir.path().join("substituted");
    let directory = format!("/data';touch {};'", quoted.display());
    let username = format!("$(touch {})", substituted.display());

    let res = common::client()
        .get(format!("http://{}/", addr))
        .query(&[("i1", "10.0.0.1"), ("d", directory.as_str()), ("u", username.as_str())])
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let script = res.text().await.unwrap();
    assert_eq!(common::script_var(&script, "ETCD_DIR"), Some(directory));
    assert_eq!(common::script_var(&script, "ETCD_USER"), Some(username));
    assert!(common::script_banner(&script).is_some());
    assert!(!quoted.exists());
    assert!(!substituted.exists());

    shutdown.trigger();
}

#[cfg(unix)]
#[tokio::test]
async fn test_origin_escaping_and_scheme() {
    let addr: SocketAddr = "127.0.0.1:28383".parse().unwrap();
    let shutdown = common::start_service(addr).await;

    let res = common::client()
        .get(format!("http://{}/?i1=10.0.0.1&d=%2Fvar%2Fetcd", addr))
        .header("x-forwarded-proto", "https")
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let script = res.text().await.unwrap();
    assert!(script.contains(&format!("'https://{}/?i1=10.0.0.1&d=%%2Fvar%%2Fetcd'", addr)));
    assert_eq!(
        common::script_banner(&script),
        Some(format!(
            "Bootstrapping etcd from https://{}/?i1=10.0.0.1&d=%2Fvar%2Fetcd\n",
            addr
        ))
    );
    assert_eq!(common::script_var(&script, "ETCD_DIR").as_deref(), Some("/var/etcd"));

    shutdown.trigger();
}

#[cfg(unix)]
#[tokio::test]
async fn test_quote_in_path_stays_in_banner() {
    let addr: SocketAddr = "127.0.0.1:28387".parse().unwrap();
    let shutdown = common::start_service(addr).await;

    let res = common::client()
        .get(format!("http://{}/it's/here?i1=10.0.0.1", addr))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let script = res.text().await.unwrap();
    assert_eq!(
        common::script_banner(&script),
        Some(format!("Bootstrapping etcd from http://{}/it's/here?i1=10.0.0.1\n", addr))
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_form_is_rejected() {
    let addr: SocketAddr = "127.0.0.1:28384".parse().unwrap();
    let shutdown = common::start_service(addr).await;

    let res = common::client()
        .post(format!("http://{}/", addr))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("i1=%G1")
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("Could not parse form: "));
    assert!(!body.contains("#!/bin/sh"));

    shutdown.trigger();
}

#[cfg(unix)]
#[tokio::test]
async fn test_unknown_keys_are_accepted() {
    let addr: SocketAddr = "127.0.0.1:28385".parse().unwrap();
    let shutdown = common::start_service(addr).await;

    let res = common::client()
        .get(format!("http://{}/?i1=10.0.0.9&color=blue", addr))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let script = res.text().await.unwrap();
    assert_eq!(common::script_var(&script, "ETCD_IP1").as_deref(), Some("10.0.0.9"));
    assert_eq!(common::script_var(&script, "ETCD_IP2").as_deref(), Some(""));

    shutdown.trigger();
}

#[test]
fn test_shipped_templates_load() {
    let store = TemplateStore::load(&common::shipped_templates()).unwrap();
    assert!(store.require(&["usage.html.tera", "bootstrap.sh.tera"]).is_ok());
}
