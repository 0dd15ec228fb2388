use medrag_model::{GeminiConfig, GeminiModel, GenerativeModel, ModelError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one HTTP response on a local port and return its base URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        // Read headers plus the declared body before answering.
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }

        let response = format!(
            "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}/v1beta/")
}

#[tokio::test]
async fn test_gemini_model_creation() {
    let config = GeminiConfig::new("test-api-key").unwrap().with_model("gemini-2.5-flash-lite");
    let model = GeminiModel::new(config).unwrap();

    assert_eq!(model.name(), "gemini-2.5-flash-lite");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_request_error() {
    // Nothing listens on the discard port locally; the connect is refused.
    let config =
        GeminiConfig::new("test-api-key").unwrap().with_base_url("http://127.0.0.1:9/").unwrap();
    let model = GeminiModel::new(config).unwrap();

    let err = model.generate("What is flu?").await.unwrap_err();
    assert!(matches!(err, ModelError::Request { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn test_error_status_maps_to_api_error() {
    let base_url = serve_once(
        "HTTP/1.1 429 Too Many Requests",
        r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
    )
    .await;
    let config = GeminiConfig::new("test-api-key").unwrap().with_base_url(&base_url).unwrap();
    let model = GeminiModel::new(config).unwrap();

    match model.generate("What is flu?").await.unwrap_err() {
        ModelError::Api { status, message, .. } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Resource has been exhausted");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_success_returns_candidate_text() {
    let base_url = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Flu is viral."}]},"finishReason":"STOP"}]}"#,
    )
    .await;
    let config = GeminiConfig::new("test-api-key").unwrap().with_base_url(&base_url).unwrap();
    let model = GeminiModel::new(config).unwrap();

    assert_eq!(model.generate("What is flu?").await.unwrap(), "Flu is viral.");
}
