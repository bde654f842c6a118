//! The reqwest client against the bundled axum server on an ephemeral port.

use deepo::api::{HttpTranslationService, TranslationRequest, TranslationService};
use deepo::config::Debounce;
use deepo::controller::{ControllerOptions, TranslationController};
use deepo::error::ApiError;
use deepo::languages::Selection;
use deepo::{lorem, server};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

struct TestServer {
    base_url: String,
    stop: Option<oneshot::Sender<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

async fn start_server() -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(server::serve(listener, async move {
        let _ = rx.await;
    }));
    TestServer { base_url: format!("http://{}", addr), stop: Some(tx) }
}

fn client(base_url: &str) -> HttpTranslationService {
    HttpTranslationService::new(base_url, Duration::from_secs(5)).unwrap()
}

fn request(text: &str) -> TranslationRequest {
    TranslationRequest::new(text, &Selection::default(), "lorem").unwrap()
}

#[tokio::test]
async fn test_health_and_languages() {
    let srv = start_server().await;
    let api = client(&srv.base_url);

    assert!(api.health().await);
    let dir = api.languages().await.unwrap();
    assert_eq!(dir.source.first().map(String::as_str), Some("auto"));
    assert!(dir.target.contains(&"fr".to_string()));
    assert_eq!(dir.defaults.source.as_deref(), Some("auto"));
    assert_eq!(dir.defaults.target.as_deref(), Some("fr"));
}

#[tokio::test]
async fn test_translate_round_trip() {
    let srv = start_server().await;
    let api = client(&format!("{}/", srv.base_url));

    let res = api.translate(&request("Hello world")).await.unwrap();
    assert_eq!(res.translated_text, lorem::from_text("Hello world"));
    assert!(res.elapsed_ms >= 0.0);
}

#[tokio::test]
async fn test_rejection_detail_reaches_client() {
    let srv = start_server().await;
    let api = client(&srv.base_url);

    let mut req = request("Hello");
    req.text = "   ".to_string();
    match api.translate(&req).await {
        Err(ApiError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Empty text");
        }
        other => panic!("expected rejection, got {:?}", other.map(|r| r.translated_text)),
    }

    let mut req = request("Hello");
    req.mode = "neural".to_string();
    match api.translate(&req).await {
        Err(ApiError::Rejected { status, message }) => {
            assert_eq!(status, 422);
            assert!(message.contains("mode"));
        }
        other => panic!("expected rejection, got {:?}", other.map(|r| r.translated_text)),
    }
}

#[tokio::test]
async fn test_unreachable_service_is_a_network_error() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}", addr));
    assert!(!api.health().await);
    assert!(matches!(api.languages().await, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_controller_against_live_server() {
    let srv = start_server().await;
    let service: Arc<dyn TranslationService> = Arc::new(client(&srv.base_url));
    let options = ControllerOptions {
        debounce: Debounce {
            input: Duration::from_millis(20),
            selection: Duration::from_millis(10),
            demo: Duration::from_millis(10),
        },
        mode: "lorem".to_string(),
        discard_stale: true,
    };
    let mut ctl = TranslationController::new(service, tokio::runtime::Handle::current(), options);

    ctl.on_input_changed("Bonjour");
    for _ in 0..100 {
        if !ctl.snapshot().output.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    let state = ctl.snapshot();
    assert_eq!(state.output, lorem::from_text("Bonjour"));
    assert!(state.status.to_string().starts_with("OK "));
}
