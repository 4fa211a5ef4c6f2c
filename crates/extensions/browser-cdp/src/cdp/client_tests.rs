use super::*;

#[test]
fn test_new_page_url() {
    assert_eq!(
        new_page_url("http://localhost:9222", Some("https://example.com")),
        "http://localhost:9222/json/new?https://example.com"
    );
    assert_eq!(new_page_url("http://localhost:9222", None), "http://localhost:9222/json/new");
}

#[tokio::test]
async fn test_route_response_to_pending_request() {
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let handlers: EventHandlers = Arc::new(RwLock::new(HashMap::new()));
    let (tx, rx) = oneshot::channel();
    pending.lock().insert(7, PendingRequest { tx });

    let resp: CdpResponse = serde_json::from_str(r#"{"id": 7, "result": {"frameId": "f1"}}"#).unwrap();
    CdpClient::route(resp, &pending, &handlers).await;

    let value = rx.await.unwrap().unwrap();
    assert_eq!(value["frameId"], "f1");
    assert!(pending.lock().is_empty());
}

#[tokio::test]
async fn test_route_protocol_error() {
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let handlers: EventHandlers = Arc::new(RwLock::new(HashMap::new()));
    let (tx, rx) = oneshot::channel();
    pending.lock().insert(3, PendingRequest { tx });

    let resp: CdpResponse =
        serde_json::from_str(r#"{"id": 3, "error": {"code": -32000, "message": "No node"}}"#).unwrap();
    CdpClient::route(resp, &pending, &handlers).await;

    match rx.await.unwrap() {
        Err(CdpError::Protocol { code, message }) => {
            assert_eq!(code, -32000);
            assert_eq!(message, "No node");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_route_event_to_session() {
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let handlers: EventHandlers = Arc::new(RwLock::new(HashMap::new()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    handlers.write().await.insert("s1".to_string(), tx);

    let resp: CdpResponse =
        serde_json::from_str(r#"{"method": "Page.loadEventFired", "sessionId": "s1", "params": {}}"#).unwrap();
    CdpClient::route(resp, &pending, &handlers).await;

    let event = rx.recv().await.unwrap();
    assert_eq!(event.method.as_deref(), Some("Page.loadEventFired"));
}
