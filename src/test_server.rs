//! A one-shot HTTP server answering a single request with a canned response.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub struct TestServer {
    port: u16,
    handle: JoinHandle<RecordedRequest>,
}

pub struct RecordedRequest {
    /// Request line and headers.
    pub head: String,
    pub body: String,
}

impl TestServer {
    pub async fn respond(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("couldn't bind a test listener");
        let port = listener.local_addr().expect("no local address").port();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("no incoming connection");
            let request = read_request(&mut stream).await;
            stream.write_all(response.as_bytes()).await.expect("couldn't write the response");
            stream.shutdown().await.expect("couldn't close the connection");
            request
        });
        Self { port, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub async fn request(self) -> RecordedRequest {
        self.handle.await.expect("the test server panicked")
    }
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines()
            .skip(1)
            .filter_map(|line| line.split_once(':'))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim().to_owned())
    }
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = find_head_end(&buf) {
            break pos
        }
        let n = stream.read(&mut chunk).await.expect("couldn't read the request");
        assert!(n > 0, "the connection was closed before the headers ended");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut request = RecordedRequest { head, body: String::new() };
    let content_length = request.header("content-length")
        .and_then(|len| len.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.expect("couldn't read the request body");
        assert!(n > 0, "the connection was closed before the body ended");
        buf.extend_from_slice(&chunk[..n]);
    }
    request.body = String::from_utf8_lossy(&buf[body_start..body_start + content_length]).into_owned();
    request
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}
