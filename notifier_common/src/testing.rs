//! One-shot HTTP responder for tests.
//!
//! Binds `127.0.0.1:0`, answers each incoming connection with the next canned
//! response (`Connection: close`), and records what the client sent.
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// A request as seen on the wire.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// HTTP method, e.g. `POST`.
    pub method: String,
    /// Request target (path and query, as sent).
    pub target: String,
    /// Headers with lowercase names.
    pub headers: Vec<(String, String)>,
    /// Body decoded as UTF-8 (lossy).
    pub body: String,
}

impl CapturedRequest {
    /// First header value named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Canned response served to one connection.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    /// Status code.
    pub status: u16,
    /// `Content-Type` header.
    pub content_type: &'static str,
    /// Body.
    pub body: String,
}

impl CannedResponse {
    /// `200 OK` with an XML body.
    pub fn xml(body: &str) -> Self {
        Self { status: 200, content_type: "application/xml", body: body.to_string() }
    }

    /// `200 OK` with a JSON body.
    pub fn json(body: &str) -> Self {
        Self { status: 200, content_type: "application/json", body: body.to_string() }
    }

    /// Empty body with the given status.
    pub fn status(status: u16) -> Self {
        Self { status, content_type: "text/plain", body: String::new() }
    }
}

/// Background responder serving a fixed sequence of responses.
pub struct MockServer {
    addr: SocketAddr,
    handle: JoinHandle<io::Result<Vec<CapturedRequest>>>,
}

impl MockServer {
    /// Starts serving `responses`, one per connection, in order.
    pub fn serve(responses: Vec<CannedResponse>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let handle = thread::spawn(move || {
            let mut captured = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept()?;
                captured.push(read_request(&mut stream)?);
                write_response(&mut stream, &response)?;
            }
            Ok(captured)
        });
        Ok(Self { addr, handle })
    }

    /// Base URL of the responder, without trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Waits until every canned response was served and returns the requests.
    pub fn finish(self) -> Vec<CapturedRequest> {
        self.handle
            .join()
            .expect("mock server thread panicked")
            .expect("mock server I/O failed")
    }
}

fn read_request(stream: &mut TcpStream) -> io::Result<CapturedRequest> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body)?;

    Ok(CapturedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn write_response(stream: &mut TcpStream, response: &CannedResponse) -> io::Result<()> {
    let head = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.content_type,
        response.body.len()
    );
    stream.write_all(head.as_bytes())?;
    stream.write_all(response.body.as_bytes())?;
    stream.flush()
}
