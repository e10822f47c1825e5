//! Content fetcher edge cases against a mocked contents API.

use github_context::{GitHubClient, GitHubConfig, RepoRef};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::from_config(GitHubConfig {
        base_api: server.uri(),
        token: "test-token".into(),
    })
    .expect("client should build")
}

fn repo() -> RepoRef {
    RepoRef::new("octo", "hello")
}

async fn respond(server: &MockServer, file: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/octo/hello/contents/{file}")))
        .and(query_param("ref", "abc123"))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn decodes_base64_file_and_sends_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/contents/src/a.js"))
        .and(query_param("ref", "abc123"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "base64",
            "content": "Y29uc29sZS5sb2coMSk7\n"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .fetch_file_content(&repo(), "src/a.js", "abc123")
        .await;

    assert_eq!(text.as_deref(), Some("console.log(1);"));
}

#[tokio::test]
async fn missing_encoding_defaults_to_base64() {
    let server = MockServer::start().await;
    respond(
        &server,
        "notes.txt",
        ResponseTemplate::new(200).set_body_json(json!({ "content": "aGk=" })),
    )
    .await;

    let text = client(&server)
        .fetch_file_content(&repo(), "notes.txt", "abc123")
        .await;

    assert_eq!(text.as_deref(), Some("hi"));
}

#[tokio::test]
async fn directory_listing_yields_none() {
    let server = MockServer::start().await;
    respond(
        &server,
        "src",
        ResponseTemplate::new(200).set_body_json(json!([
            { "type": "file", "name": "a.rs", "path": "src/a.rs" },
            { "type": "file", "name": "b.rs", "path": "src/b.rs" }
        ])),
    )
    .await;

    let text = client(&server)
        .fetch_file_content(&repo(), "src", "abc123")
        .await;

    assert_eq!(text, None);
}

#[tokio::test]
async fn entry_without_content_yields_none() {
    let server = MockServer::start().await;
    respond(
        &server,
        "vendor",
        ResponseTemplate::new(200).set_body_json(json!({
            "type": "submodule",
            "submodule_git_url": "https://github.com/octo/vendor.git"
        })),
    )
    .await;

    let text = client(&server)
        .fetch_file_content(&repo(), "vendor", "abc123")
        .await;

    assert_eq!(text, None);
}

#[tokio::test]
async fn binary_content_yields_none() {
    let server = MockServer::start().await;
    respond(
        &server,
        "logo.png",
        ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "base64",
            "content": "iVBORw0KGgr/AA=="
        })),
    )
    .await;

    let text = client(&server)
        .fetch_file_content(&repo(), "logo.png", "abc123")
        .await;

    assert_eq!(text, None);
}

#[tokio::test]
async fn oversized_file_without_encoding_support_yields_none() {
    let server = MockServer::start().await;
    respond(
        &server,
        "big.sql",
        ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "none",
            "content": ""
        })),
    )
    .await;

    let text = client(&server)
        .fetch_file_content(&repo(), "big.sql", "abc123")
        .await;

    assert_eq!(text, None);
}

#[tokio::test]
async fn not_found_yields_none() {
    let server = MockServer::start().await;
    respond(&server, "missing.rs", ResponseTemplate::new(404)).await;

    let text = client(&server)
        .fetch_file_content(&repo(), "missing.rs", "abc123")
        .await;

    assert_eq!(text, None);
}

#[tokio::test]
async fn try_variant_reports_not_found() {
    let server = MockServer::start().await;
    respond(&server, "missing.rs", ResponseTemplate::new(404)).await;

    let result = client(&server)
        .try_fetch_file_content(&repo(), "missing.rs", "abc123")
        .await;

    assert!(result.is_err());
}
