use std::sync::Arc;
use std::time::Duration;

use ghostwrite::core::{Key, Session, SuggestionState};
use ghostwrite::inference::providers::autocomplete::DEFAULT_TIMEOUT;
use ghostwrite::inference::{
    AutocompleteProvider, ProviderError, SuggestionClient, SuggestionProvider, SuggestionRequest,
};
use ghostwrite::runtime::{KeyPress, SessionDriver};
use ghostwrite::surface::SurfaceHandles;
use ghostwrite::surface::memory::{MemoryField, MemoryOverlay, MemorySurface};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

type MemorySession = Session<MemorySurface, MemoryField, MemoryOverlay>;

// ============================================================================
// Helper Functions
// ============================================================================

/// A running driver plus the host-side handles a page would hold.
struct Harness {
    host: MemorySurface,
    overlay: MemoryOverlay,
    keys: mpsc::UnboundedSender<KeyPress>,
    handle: JoinHandle<MemorySession>,
}

impl Harness {
    fn start(service_url: &str, timeout: Duration) -> Self {
        let host = MemorySurface::new("");
        let overlay = MemoryOverlay::new();
        let session = Session::new(
            SurfaceHandles {
                body: host.clone(),
                subject: MemoryField::new("Meeting"),
            },
            overlay.clone(),
        );
        let provider = AutocompleteProvider::new(Some(service_url.to_string()), timeout).unwrap();
        let client = SuggestionClient::new(Arc::new(provider));
        let driver = SessionDriver::new(session, client, Duration::from_secs(60));

        let (keys, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(driver.run(rx));
        Self {
            host,
            overlay,
            keys,
            handle,
        }
    }

    /// Type into the surface and report each key to the session, like a browser would.
    fn type_str(&self, text: &str) {
        for c in text.chars() {
            self.host.type_char(c);
            self.keys.send(KeyPress::new(Key::Char(c))).unwrap();
        }
    }

    /// Send a key and wait until the driver says whether it was consumed.
    async fn press(&self, key: Key) -> bool {
        let (press, reply) = KeyPress::with_reply(key);
        self.keys.send(press).unwrap();
        reply.await.unwrap()
    }

    async fn finish(self) -> MemorySession {
        drop(self.keys);
        self.handle.await.unwrap()
    }
}

/// Poll `condition` every 5ms for up to two seconds.
async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..400 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

async fn mount_suggestion(server: &MockServer, text_so_far: &str, suggestion: &str) {
    Mock::given(method("POST"))
        .and(path("/autocomplete"))
        .and(body_json(json!({"subject": "Meeting", "text_so_far": text_so_far})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"suggestion": suggestion})))
        .mount(server)
        .await;
}

// ============================================================================
// Lifecycle Scenarios
// ============================================================================

#[tokio::test]
async fn test_space_fetches_and_shows_ghost_text() {
    let server = MockServer::start().await;
    mount_suggestion(&server, "Hello ", "there").await;

    let harness = Harness::start(&server.uri(), DEFAULT_TIMEOUT);
    harness.type_str("Hello ");

    let overlay = harness.overlay.clone();
    assert!(wait_until(|| overlay.visible_text().as_deref() == Some("there")).await);
    assert_eq!(harness.overlay.node_count(), 1);
    assert_eq!(harness.host.text(), "Hello ");

    let session = harness.finish().await;
    assert_eq!(
        session.state(),
        &SuggestionState::Active {
            suggestion: "there".to_string()
        }
    );
}

#[tokio::test]
async fn test_tab_accepts_suggestion_into_surface() {
    let server = MockServer::start().await;
    mount_suggestion(&server, "Hello ", "there").await;

    let harness = Harness::start(&server.uri(), DEFAULT_TIMEOUT);
    harness.type_str("Hello ");
    let overlay = harness.overlay.clone();
    assert!(wait_until(|| overlay.visible_text().is_some()).await);

    assert!(harness.press(Key::Tab).await);
    assert_eq!(harness.host.text(), "Hello there ");
    assert_eq!(harness.overlay.node_count(), 0);

    // A second Tab has nothing to accept and keeps its default action
    assert!(!harness.press(Key::Tab).await);

    let session = harness.finish().await;
    assert_eq!(session.tracked_text(), "Hello there ");
    assert!(!session.state().is_active());
}

#[tokio::test]
async fn test_typing_discards_late_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"suggestion": "there"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::start(&server.uri(), DEFAULT_TIMEOUT);
    harness.type_str("Hello ");
    harness.type_str("x");

    // Past the delay, the response has landed and been dropped.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(harness.overlay.node_count(), 0);

    let session = harness.finish().await;
    assert!(!session.state().is_active());
    assert_eq!(session.pending_fetch(), None);
    assert_eq!(session.tracked_text(), "Hello x");
}

#[tokio::test]
async fn test_newer_fetch_supersedes_older() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/autocomplete"))
        .and(body_json(json!({"subject": "Meeting", "text_so_far": "Hi "})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"suggestion": "stale"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    mount_suggestion(&server, "Hi  ", "fresh").await;

    let harness = Harness::start(&server.uri(), DEFAULT_TIMEOUT);
    harness.type_str("Hi  ");

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(harness.overlay.visible_text().as_deref(), Some("fresh"));

    harness.finish().await;
}

#[tokio::test]
async fn test_server_error_shows_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/autocomplete"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::start(&server.uri(), DEFAULT_TIMEOUT);
    harness.type_str("Hello ");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(harness.overlay.node_count(), 0);
    assert!(!harness.press(Key::Tab).await);

    let session = harness.finish().await;
    assert!(!session.state().is_active());
    assert_eq!(session.body().text(), "Hello ");
}

#[tokio::test]
async fn test_unreachable_service_shows_nothing() {
    let harness = Harness::start("http://127.0.0.1:1", Duration::from_millis(500));
    harness.type_str("Hello ");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(harness.overlay.node_count(), 0);

    let session = harness.finish().await;
    assert!(!session.state().is_active());
}

#[tokio::test]
async fn test_whitespace_suggestion_shows_nothing() {
    let server = MockServer::start().await;
    mount_suggestion(&server, "Hello ", "  \n").await;

    let harness = Harness::start(&server.uri(), DEFAULT_TIMEOUT);
    harness.type_str("Hello ");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(harness.overlay.node_count(), 0);

    let session = harness.finish().await;
    assert_eq!(session.pending_fetch(), None);
    assert!(!session.state().is_active());
}

// ============================================================================
// Provider Responses
// ============================================================================

#[tokio::test]
async fn test_provider_missing_field_is_empty_suggestion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let provider = AutocompleteProvider::new(Some(server.uri()), DEFAULT_TIMEOUT).unwrap();
    let result = provider
        .suggest(&SuggestionRequest::new("Meeting", "Hello "))
        .await;

    assert_eq!(result.unwrap(), "");
}

#[tokio::test]
async fn test_provider_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = AutocompleteProvider::new(Some(server.uri()), DEFAULT_TIMEOUT).unwrap();
    let result = provider
        .suggest(&SuggestionRequest::new("Meeting", "Hello "))
        .await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_provider_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/autocomplete"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .mount(&server)
        .await;

    let provider = AutocompleteProvider::new(Some(server.uri()), DEFAULT_TIMEOUT).unwrap();
    let result = provider
        .suggest(&SuggestionRequest::new("Meeting", "Hello "))
        .await;

    match result {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "warming up");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_provider_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"suggestion": "late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let provider = AutocompleteProvider::new(Some(server.uri()), Duration::from_millis(50)).unwrap();
    let result = provider
        .suggest(&SuggestionRequest::new("Meeting", "Hello "))
        .await;

    assert!(matches!(result, Err(ProviderError::Network(_))));
}
