//! Integration tests for the transport layer against a local HTTP stub and files

use cafe_finder::app::services::transport::{SheetSource, Transport};
use cafe_finder::cli::commands::ingest;
use cafe_finder::{CafeError, FieldKey, FinderConfig};
use std::io::Write;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const BODY: &str = "Cafe Name,City,Wifi Quality\r\nBean There,Springfield,5\r\nMug Life,Shelbyville,2\r\n";

/// Serve one canned HTTP response and return the URL to fetch
async fn serve_once(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request head before answering
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }

        socket.write_all(&response).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}/export.csv", addr)
}

fn ok_response(body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
    .into_bytes()
}

fn transport() -> Transport {
    Transport::new(&FinderConfig::default().with_request_timeout_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_and_ingest() {
    let url = serve_once(ok_response(BODY)).await;

    let result = ingest(&transport(), &SheetSource::Url(url), false)
        .await
        .unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(
        result.records.records()[1].get(FieldKey::Name),
        Some("Mug Life")
    );
    assert_eq!(result.stats.bytes_consumed, BODY.len());
}

#[tokio::test]
async fn test_non_success_status_is_transport_failure() {
    let url = serve_once(
        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
    )
    .await;

    let err = ingest(&transport(), &SheetSource::Url(url), false)
        .await
        .unwrap_err();

    assert!(matches!(err, CafeError::HttpStatus { status: 404, .. }));
    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn test_empty_body_is_distinct_error() {
    let url = serve_once(
        b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
    )
    .await;

    let err = ingest(&transport(), &SheetSource::Url(url), false)
        .await
        .unwrap_err();

    assert!(err.is_empty_body());
    assert!(!err.is_transport_failure());
}

#[tokio::test]
async fn test_truncated_body_fails_instead_of_partial_records() {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        BODY.len() + 500
    )
    .into_bytes();
    response.extend_from_slice(BODY.as_bytes());

    let url = serve_once(response).await;
    let err = ingest(&transport(), &SheetSource::Url(url), false)
        .await
        .unwrap_err();

    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    // Bind then drop to get a port nobody listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let err = transport()
        .fetch_url(&format!("http://{}/export.csv", addr))
        .await
        .err()
        .unwrap();

    assert!(matches!(err, CafeError::Transport { .. }));
}

#[tokio::test]
async fn test_local_file_in_small_chunks() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(BODY.as_bytes()).unwrap();

    let transport =
        Transport::new(&FinderConfig::default().with_read_chunk_size(3)).unwrap();
    let result = ingest(
        &transport,
        &SheetSource::File(file.path().to_path_buf()),
        false,
    )
    .await
    .unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(
        result.records.records()[0].get(FieldKey::Wifi),
        Some("5")
    );
}

#[tokio::test]
async fn test_empty_and_missing_files() {
    let empty = NamedTempFile::new().unwrap();
    let err = ingest(
        &transport(),
        &SheetSource::File(empty.path().to_path_buf()),
        false,
    )
    .await
    .unwrap_err();
    assert!(err.is_empty_body());

    let dir = tempfile::tempdir().unwrap();
    let err = ingest(
        &transport(),
        &SheetSource::File(dir.path().join("missing.csv")),
        false,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CafeError::Io(_)));
    assert!(err.is_transport_failure());
}
