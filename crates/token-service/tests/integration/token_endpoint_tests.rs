//! Integration tests for `GET /token`.

use reqwest::StatusCode;
use token_service::config::Config;
use token_test_utils::{
    test_config, TestTokenServer, TokenAssertions, DEV_SIGNING_KEY_SECRET,
    NO_PROFILES_ENVIRONMENT, PROD_SIGNING_KEY_SECRET,
};

async fn get_token(server: &TestTokenServer, query: &str) -> reqwest::Result<reqwest::Response> {
    reqwest::get(format!("{}/token?{}", server.url(), query)).await
}

#[tokio::test]
async fn test_token_for_identity_and_environment() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestTokenServer::spawn_default().await?;

    // Act
    let response = get_token(&server, "identity=alice&environment=dev").await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));

    let token = response.text().await?;
    token
        .assert_valid_jwt()
        .assert_identity("alice")
        .assert_configuration_profile("VP1")
        .assert_lifetime(3600)
        .assert_verifies_with(DEV_SIGNING_KEY_SECRET);

    Ok(())
}

#[tokio::test]
async fn test_default_environment_is_used() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_default().await?;

    let token = get_token(&server, "identity=alice").await?.text().await?;

    token
        .assert_configuration_profile("VP-prod")
        .assert_verifies_with(PROD_SIGNING_KEY_SECRET);

    Ok(())
}

#[tokio::test]
async fn test_query_aliases() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_default().await?;

    let token = get_token(&server, "address=bob&realm=dev").await?.text().await?;
    token
        .assert_identity("bob")
        .assert_verifies_with(DEV_SIGNING_KEY_SECRET);

    let token = get_token(&server, "name=carol&env=dev&environment=prod")
        .await?
        .text()
        .await?;
    token
        .assert_identity("carol")
        .assert_verifies_with(DEV_SIGNING_KEY_SECRET);

    Ok(())
}

#[tokio::test]
async fn test_ttl_and_profile_overrides() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_default().await?;

    let token = get_token(&server, "identity=alice&env=dev&ttl=45&configurationProfileSid=VP2")
        .await?
        .text()
        .await?;
    token
        .assert_lifetime(45)
        .assert_configuration_profile("VP2");

    let token = get_token(&server, "identity=alice&env=dev&ttl=abc")
        .await?
        .text()
        .await?;
    token.assert_lifetime(3600);

    Ok(())
}

#[tokio::test]
async fn test_unknown_query_parameters_are_ignored() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_default().await?;

    let response = get_token(&server, "identity=alice&env=dev&color=blue").await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_unknown_environment_returns_400() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_default().await?;

    let response = get_token(&server, "identity=alice&env=qa").await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "UNKNOWN_ENVIRONMENT");

    Ok(())
}

#[tokio::test]
async fn test_environment_without_profile_returns_500() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_default().await?;

    let response = get_token(&server, &format!("identity=alice&env={NO_PROFILES_ENVIRONMENT}")).await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "NO_CONFIGURATION_PROFILE");

    Ok(())
}

#[tokio::test]
async fn test_missing_identity_yields_anonymous_token() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_default().await?;

    let token = get_token(&server, "env=dev").await?.text().await?;
    token.assert_valid_jwt().assert_anonymous();

    Ok(())
}

#[tokio::test]
async fn test_missing_identity_rejected_when_anonymous_disabled() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(Config {
        allow_anonymous_identity: false,
        ..test_config()
    })
    .await?;

    let response = get_token(&server, "env=dev").await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "MISSING_IDENTITY");

    Ok(())
}
