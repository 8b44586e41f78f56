//! Serving over a real socket: config reload and graceful shutdown.

use std::time::Duration;

use tokio::sync::mpsc;

use device_portal::config::{NotFoundPolicy, PortalConfig};
use device_portal::lifecycle::Shutdown;

mod common;

#[tokio::test]
async fn test_reload_and_shutdown() {
    let mut config = PortalConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates_tx, config_updates) = mpsc::unbounded_channel();
    let server = common::server(config.clone());
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        server.run(listener, config_updates, server_shutdown).await
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .get(format!("http://{addr}/device/42"))
        .send()
        .await
        .expect("Portal unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("42"));

    let res = client
        .get(format!("http://{addr}/nonexistent"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert!(!res.text().await.unwrap().contains("not-found"));

    // Switch the not-found policy live
    config.routing.not_found = NotFoundPolicy::View;
    updates_tx.send(config).unwrap();

    let mut reloaded = false;
    for _ in 0..50 {
        let body = client
            .get(format!("http://{addr}/nonexistent"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        if body.contains(r#"data-view="not-found""#) {
            reloaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(reloaded, "Routing settings should reload");

    drop(client);
    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Server should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}
