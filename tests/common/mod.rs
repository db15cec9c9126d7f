//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use etcd_bootstrap::config::ServiceConfig;
use etcd_bootstrap::lifecycle::Shutdown;
use etcd_bootstrap::{HttpServer, TemplateStore};

/// Glob matching the templates shipped with the crate.
pub fn shipped_templates() -> String {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates");
    format!("{}/*.tera", dir.display())
}

/// Start the service on `addr` with the shipped templates.
///
/// The returned coordinator stops the server when triggered.
pub async fn start_service(addr: SocketAddr) -> Shutdown {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = addr.to_string();
    config.templates.glob = shipped_templates();

    let templates = TemplateStore::load(&config.templates.glob).unwrap();
    templates
        .require(&[config.templates.usage.as_str(), config.templates.bootstrap.as_str()])
        .unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(templates));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown
}

/// Client that never reuses connections or honours proxy env vars.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Assignments at the head of a rendered script, up to the origin banner.
#[allow(dead_code)]
#[cfg(unix)]
fn assignments(script: &str) -> &str {
    script
        .find("\nprintf ")
        .map_or(script, |end| &script[..end])
}

/// Run `body` with `sh`; stdout on success.
#[allow(dead_code)]
#[cfg(unix)]
fn run_sh(body: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .arg("-c")
        .arg(body)
        .output()
        .expect("sh not available");
    output
        .status
        .success()
        .then(|| String::from_utf8(output.stdout).unwrap())
}

/// Value `sh` assigns to `name` when evaluating the script's variable block.
#[allow(dead_code)]
#[cfg(unix)]
pub fn script_var(script: &str, name: &str) -> Option<String> {
    run_sh(&format!(
        "{}\n[ \"${{{name}+set}}\" = set ] || exit 3\nprintf '%s' \"${name}\"",
        assignments(script)
    ))
}

/// What the script prints as its origin banner.
#[allow(dead_code)]
#[cfg(unix)]
pub fn script_banner(script: &str) -> Option<String> {
    let start = script.find("\nprintf ")? + 1;
    let end = script[start..].find('\n').map_or(script.len(), |n| start + n);
    run_sh(&format!("{}\n{}", assignments(script), &script[start..end]))
}
