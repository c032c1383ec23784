use super::Source;
use crate::error::ViewerError;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::tempdir;

/// Serves a single request on a local port with a canned `response`.
fn serve_once(response: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/grammer.md", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf);
        stream.write_all(response.as_bytes()).unwrap();
    });
    (url, handle)
}

#[test]
fn test_parse_distinguishes_urls_from_paths() {
    assert_eq!(
        Source::parse("grammer.md"),
        Source::File("grammer.md".to_string())
    );
    assert_eq!(
        Source::parse("https://example.org/grammer.md"),
        Source::Url("https://example.org/grammer.md".to_string())
    );
    assert_eq!(Source::parse("http://localhost/x.md").location(), "http://localhost/x.md");
}

#[test]
fn test_load_splits_file_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grammer.md");
    fs::write(&path, "intro\n# は\ntopic marker\n# が\nsubject marker\n").unwrap();

    let document = Source::File(path.to_string_lossy().to_string()).load().unwrap();

    let titles: Vec<&str> = document.sections().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["は", "が"]);
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.md");

    let err = Source::File(path.to_string_lossy().to_string())
        .load()
        .err()
        .unwrap();

    assert!(matches!(err, ViewerError::Io { .. }));
    assert!(err.to_string().contains("absent.md"));
}

#[test]
fn test_url_load_splits_response_body() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Length: 13\r\nConnection: close\r\n\r\n# Verbs\nEat.\n",
    );

    let document = Source::Url(url).load().unwrap();
    server.join().unwrap();

    assert_eq!(document.len(), 1);
    assert_eq!(document.sections()[0].body, "# Verbs\nEat.\n");
}

#[test]
fn test_non_success_status_is_a_load_error() {
    let (url, server) = serve_once(
        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    );

    let err = Source::Url(url.clone()).load().err().unwrap();
    server.join().unwrap();

    match &err {
        ViewerError::Status { url: failed, status } => {
            assert_eq!(*status, 404);
            assert_eq!(failed, &url);
        }
        other => panic!("expected a status error, got {other:?}"),
    }
    assert!(err.to_string().contains("status: 404"));
}

#[test]
fn test_unreachable_server_is_a_load_error() {
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/grammer.md", listener.local_addr().unwrap())
    };

    let err = Source::Url(url).load().err().unwrap();

    assert!(matches!(err, ViewerError::Http { .. }));
    assert!(err.to_string().contains("request to http://127.0.0.1:"));
}
