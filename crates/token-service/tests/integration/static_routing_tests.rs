//! Integration tests for static assets and the index redirect.

use reqwest::{redirect::Policy, StatusCode};
use token_service::config::Config;
use token_test_utils::{test_config, TestTokenServer};

fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn test_unmatched_get_redirects_to_index() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestTokenServer::spawn_default().await?;

    // Act
    let response = no_redirect_client()
        .get(format!("{}/some/page", server.url()))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/index.html")
    );

    Ok(())
}

#[tokio::test]
async fn test_static_dirs_are_searched_in_order() -> Result<(), anyhow::Error> {
    let js = tempfile::tempdir()?;
    let html = tempfile::tempdir()?;
    std::fs::write(js.path().join("app.js"), "console.log('js');")?;
    std::fs::write(html.path().join("index.html"), "<html>demo</html>")?;
    std::fs::write(html.path().join("app.js"), "shadowed")?;

    let server = TestTokenServer::spawn(Config {
        static_dirs: vec![js.path().to_path_buf(), html.path().to_path_buf()],
        ..test_config()
    })
    .await?;
    let client = no_redirect_client();

    let response = client.get(format!("{}/app.js", server.url())).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "console.log('js');");

    let response = client
        .get(format!("{}/index.html", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "<html>demo</html>");

    let response = client
        .get(format!("{}/missing.css", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::FOUND);

    Ok(())
}

#[tokio::test]
async fn test_token_route_is_not_shadowed_by_static_files() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("token"), "static")?;

    let server = TestTokenServer::spawn(Config {
        static_dirs: vec![dir.path().to_path_buf()],
        ..test_config()
    })
    .await?;

    let body = reqwest::get(format!("{}/token?identity=alice&env=dev", server.url()))
        .await?
        .text()
        .await?;
    assert_ne!(body, "static");

    Ok(())
}
