//! HTTP source against a throwaway local server.

use gasmon_source::{HttpStatusSource, SourceError};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

/// Serve exactly one request with `response`, after an optional delay.
fn serve_once(response: String, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 2048];
            let _ = stream.read(&mut buf);
            std::thread::sleep(delay);
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/api")
}

fn http_response(code: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {code}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

#[test]
fn fetches_status() {
    let url = serve_once(
        http_response(
            "200 OK",
            r#"{"weightKg":22.4,"gasSwapCount":3,"lastUpdate":1718000000}"#,
        ),
        Duration::ZERO,
    );
    let src = HttpStatusSource::new(&url, Duration::from_secs(5)).unwrap();
    assert!(src.status_url().ends_with("/api/status"));
    let s = src.get_status(Duration::from_secs(5)).unwrap();
    assert_eq!(s.weight_kg, 22.4);
    assert_eq!(s.gas_swap_count, 3);
}

#[test]
fn non_success_status_is_an_error() {
    let url = serve_once(http_response("503 Service Unavailable", "{}"), Duration::ZERO);
    let src = HttpStatusSource::new(&url, Duration::from_secs(5)).unwrap();
    let err = src.get_status(Duration::from_secs(5)).unwrap_err();
    assert!(matches!(err, SourceError::Status(503)), "got {err:?}");
}

#[test]
fn malformed_body_is_an_error() {
    let url = serve_once(
        http_response("200 OK", r#"{"weightKg":1.0}"#),
        Duration::ZERO,
    );
    let src = HttpStatusSource::new(&url, Duration::from_secs(5)).unwrap();
    let err = src.get_status(Duration::from_secs(5)).unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)), "got {err:?}");
}

#[test]
fn slow_server_times_out() {
    let url = serve_once(
        http_response("200 OK", r#"{"weightKg":1.0,"gasSwapCount":0,"lastUpdate":0}"#),
        Duration::from_secs(3),
    );
    let src = HttpStatusSource::new(&url, Duration::from_secs(5)).unwrap();
    let err = src.get_status(Duration::from_millis(200)).unwrap_err();
    assert!(matches!(err, SourceError::Timeout), "got {err:?}");
}

#[test]
fn unreachable_endpoint_is_an_error() {
    // Bind then drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let src =
        HttpStatusSource::new(&format!("http://127.0.0.1:{port}"), Duration::from_secs(1))
            .unwrap();
    assert!(src.get_status(Duration::from_secs(1)).is_err());
}
