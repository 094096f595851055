//! HTTP解析サービスのテスト
//!
//! ローカルに使い捨てのHTTPサーバーを立てて検証する

use nutrivision::analyzer::HttpAnalysisService;
use nutrivision_common::{AnalysisService, AnalyzeRequest, Error, ServiceConfig, ServiceReply};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 1リクエストだけ応答し、受信したリクエスト全体を返す
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/functions/v1/analyze-food", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
            if request_complete(&received) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        String::from_utf8_lossy(&received).to_string()
    });

    (url, handle)
}

fn request_complete(data: &[u8]) -> bool {
    let text = String::from_utf8_lossy(data);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    data.len() >= header_end + 4 + content_length
}

fn request() -> AnalyzeRequest {
    AnalyzeRequest { image_data: "data:image/png;base64,iVBORw==".into() }
}

#[tokio::test]
async fn posts_image_data_and_parses_result() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"items":[{"name":"Apple","servingSize":"1 medium (182g)","calories":95,"protein":0.5,"carbs":25,"fat":0.3,"confidence":92}],"totalCalories":95}"#,
    )
    .await;

    let service = HttpAnalysisService::new(ServiceConfig::new(url, Some("anon-key".into())).unwrap()).unwrap();
    let reply = service.analyze(&request()).await.unwrap();

    let ServiceReply::Analysis(result) = reply else {
        panic!("expected analysis");
    };
    assert_eq!(result.items[0].name.as_deref(), Some("Apple"));
    assert_eq!(result.total_calories, 95.0);

    let received = server.await.unwrap();
    let lower = received.to_lowercase();
    assert!(received.starts_with("POST /functions/v1/analyze-food "));
    assert!(lower.contains("authorization: bearer anon-key"));
    assert!(lower.contains("apikey: anon-key"));
    assert!(received.contains(r#"{"imageData":"data:image/png;base64,iVBORw=="}"#));
}

#[tokio::test]
async fn application_error_is_rejected_reply() {
    let (url, server) = serve_once("200 OK", r#"{"error":"No food detected"}"#).await;

    let service = HttpAnalysisService::new(ServiceConfig::new(url, None).unwrap()).unwrap();
    let reply = service.analyze(&request()).await.unwrap();

    assert_eq!(reply, ServiceReply::Rejected("No food detected".into()));
    let received = server.await.unwrap();
    assert!(!received.to_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn error_status_is_transport_failure() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let service = HttpAnalysisService::new(ServiceConfig::new(url, None).unwrap()).unwrap();
    let err = service.analyze(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(ref m) if m.contains("500")));
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_service_is_transport_failure() {
    // 空きポートを取得してすぐ閉じる
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ServiceConfig::new(format!("http://{}/analyze-food", addr), None).unwrap();
    let service = HttpAnalysisService::new(config).unwrap();
    let err = service.analyze(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}
