//! Integration tests for the static site branch.

use std::fs;

use download_proxy::config::ProxyConfig;

mod common;

const INDEX: &str = "<!doctype html><title>Haiku Books</title>";
const CATALOG: &str = r#"[{"title": "Frost at Dawn", "author": "Basho"}]"#;

fn site_config(root: &std::path::Path) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.site.root = root.to_path_buf();
    config
}

#[tokio::test]
async fn test_root_serves_the_index() {
    let site = tempfile::tempdir().unwrap();
    fs::write(site.path().join("index.html"), INDEX).unwrap();

    let proxy = common::spawn_proxy(site_config(site.path())).await;

    let res = common::client()
        .get(format!("http://{}/", proxy.addr))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), INDEX);

    proxy.shutdown.trigger();
}

#[tokio::test]
async fn test_site_files_are_served_verbatim() {
    let site = tempfile::tempdir().unwrap();
    fs::write(site.path().join("catalog.json"), CATALOG).unwrap();

    let proxy = common::spawn_proxy(site_config(site.path())).await;

    let res = common::client()
        .get(format!("http://{}/catalog.json", proxy.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    // The site branch rewrites nothing: no download headers appear.
    assert!(res.headers().get("content-disposition").is_none());
    assert_eq!(res.text().await.unwrap(), CATALOG);

    proxy.shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_site_path_is_404() {
    let site = tempfile::tempdir().unwrap();

    let proxy = common::spawn_proxy(site_config(site.path())).await;

    let res = common::client()
        .get(format!("http://{}/no-such-page", proxy.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);

    proxy.shutdown.trigger();
}
