//! HTTP surface: signature checks, acknowledgements and background dispatch.

use std::{future::Future, sync::Arc, time::Duration};

use analysis_backend::{BackendConfig, BackendNotifier};
use api::core::{app_state::AppState, signature::sign};
use api::error_handler::AppResult;
use github_context::{GitHubClient, GitHubConfig};
use review_router::ReviewRouter;
use rstest::rstest;
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "hook-secret";

struct TestServer {
    base: String,
    github: MockServer,
    backend: MockServer,
    http: reqwest::Client,
}

impl TestServer {
    async fn start(secret: Option<&str>) -> Self {
        Self::start_until(secret, std::future::pending()).await.0
    }

    /// Runs the server until `signal` resolves; the handle completes once
    /// the server has fully stopped.
    async fn start_until<F>(secret: Option<&str>, signal: F) -> (Self, JoinHandle<AppResult<()>>)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let github = MockServer::start().await;
        let backend = MockServer::start().await;

        let client = GitHubClient::from_config(GitHubConfig {
            base_api: github.uri(),
            token: "test-token".into(),
        })
        .expect("github client");
        let notifier = BackendNotifier::new(BackendConfig::with_endpoint(format!(
            "{}/analyze",
            backend.uri()
        )))
        .expect("notifier");
        let state = AppState::new(
            ReviewRouter::new(client, notifier),
            secret.map(str::to_string),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(api::serve_with_shutdown(listener, Arc::new(state), signal));

        let server = Self {
            base: format!("http://{addr}"),
            github,
            backend,
            http: reqwest::Client::new(),
        };
        (server, handle)
    }

    async fn github_posts(&self) -> usize {
        self.github
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == "POST")
            .count()
    }

    async fn deliver(
        &self,
        event: Option<&str>,
        body: &[u8],
        signature: Option<&str>,
    ) -> reqwest::Response {
        let mut req = self
            .http
            .post(format!("{}/api/github/webhooks", self.base))
            .header("Content-Type", "application/json")
            .header("X-GitHub-Delivery", "test-delivery")
            .header("Connection", "close")
            .body(body.to_vec());
        if let Some(event) = event {
            req = req.header("X-GitHub-Event", event);
        }
        if let Some(signature) = signature {
            req = req.header("X-Hub-Signature-256", signature);
        }
        req.send().await.expect("request")
    }
}

fn review_delivery() -> Vec<u8> {
    json!({
        "action": "submitted",
        "review": { "id": 1, "body": "Please check the loop", "state": "commented", "user": { "login": "bob" } },
        "pull_request": {
            "number": 7,
            "title": "Add greeting",
            "body": null,
            "user": { "login": "alice" },
            "base": { "ref": "main", "sha": "base-sha" },
            "head": { "ref": "feature", "sha": "head-sha" }
        },
        "repository": { "name": "hello", "full_name": "octo/hello", "owner": { "login": "octo" } },
        "sender": { "login": "bob", "type": "User" }
    })
    .to_string()
    .into_bytes()
}

#[tokio::test]
async fn signed_review_is_acknowledged_and_answered() {
    let server = TestServer::start(Some(SECRET)).await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/pulls/7/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server.github)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comment": "Looks fine" })))
        .mount(&server.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/issues/7/comments"))
        .and(body_json(json!({ "body": "Looks fine" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9001 })))
        .expect(1)
        .mount(&server.github)
        .await;

    let body = review_delivery();
    let signature = sign(SECRET.as_bytes(), &body).expect("sign");
    let res = server
        .deliver(Some("pull_request_review"), &body, Some(&signature))
        .await;

    assert_eq!(res.status(), 200);
    let ack: Value = res.json().await.expect("json");
    assert_eq!(
        ack,
        json!({
            "success": true,
            "data": { "event": "pull_request_review.submitted", "accepted": true }
        })
    );

    // Handling runs after the acknowledgement; wait for the comment to land.
    let mut posted = false;
    for _ in 0..50 {
        if server.github_posts().await > 0 {
            posted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(posted, "comment was never posted");
}

#[tokio::test]
async fn shutdown_waits_for_events_still_in_flight() {
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let (server, handle) = TestServer::start_until(None, async move {
        let _ = stop_rx.await;
    })
    .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/pulls/7/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server.github)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "comment": "Slow but sure" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/issues/7/comments"))
        .and(body_json(json!({ "body": "Slow but sure" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9002 })))
        .expect(1)
        .mount(&server.github)
        .await;

    let res = server
        .deliver(Some("pull_request_review"), &review_delivery(), None)
        .await;
    assert_eq!(res.status(), 200);

    // Stop while the backend is still answering.
    stop_tx.send(()).expect("server is running");
    tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("server stops")
        .expect("server task joins")
        .expect("server exits cleanly");

    assert_eq!(server.github_posts().await, 1);
}

#[rstest]
#[case(None)]
#[case(Some("sha256=00ff"))]
#[case(Some("not-a-signature"))]
#[tokio::test]
async fn bad_signatures_are_rejected(#[case] signature: Option<&str>) {
    let server = TestServer::start(Some(SECRET)).await;

    let res = server
        .deliver(Some("pull_request_review"), &review_delivery(), signature)
        .await;

    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("UNAUTHORIZED"));

    tokio::time::sleep(Duration::from_millis(100)).await;
    let calls = server.backend.received_requests().await.unwrap_or_default();
    assert!(calls.is_empty());
}

#[tokio::test]
async fn unsigned_deliveries_pass_without_secret() {
    let server = TestServer::start(None).await;

    let res = server
        .deliver(Some("ping"), br#"{"zen":"Keep it logically awesome."}"#, None)
        .await;

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["data"]["accepted"], json!(false));
}

#[tokio::test]
async fn missing_event_header_is_bad_request() {
    let server = TestServer::start(None).await;

    let res = server.deliver(None, &review_delivery(), None).await;

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let server = TestServer::start(None).await;

    let res = server
        .deliver(Some("pull_request_review"), b"{not json", None)
        .await;

    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn health_reports_ok() {
    let server = TestServer::start(None).await;

    let res = server
        .http
        .get(format!("{}/health", server.base))
        .send()
        .await
        .expect("request");

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body, json!({ "success": true, "data": { "status": "ok" } }));
}
