use std::{
    io::{BufRead, BufReader, Read, Write},
    net::{SocketAddr, TcpListener},
    sync::mpsc::{self, Receiver},
    thread,
    time::Duration,
};

/// One canned HTTP reply.
pub struct CannedReply {
    pub status_line: &'static str,
    pub body: String,
}

impl CannedReply {
    pub fn ok(body: &str) -> Self {
        Self {
            status_line: "200 OK",
            body: body.to_string(),
        }
    }

    pub fn status(status_line: &'static str, body: &str) -> Self {
        Self {
            status_line,
            body: body.to_string(),
        }
    }
}

/// Collaborator stand-in that answers requests in order and records their bodies.
pub struct StubServer {
    addr: SocketAddr,
    received: Receiver<serde_json::Value>,
}

impl StubServer {
    pub fn start(replies: Vec<CannedReply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let (tx, received) = mpsc::channel();
        thread::spawn(move || {
            for reply in replies {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let body = read_request_body(&stream);
                if let Ok(value) = serde_json::from_slice(&body) {
                    let _ = tx.send(value);
                }
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.status_line,
                    reply.body.len(),
                    reply.body
                );
                let mut stream = stream;
                let _ = stream.write_all(response.as_bytes());
            }
        });
        Self { addr, received }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Next request body, waiting up to two seconds.
    pub fn next_request(&self) -> Option<serde_json::Value> {
        self.received.recv_timeout(Duration::from_secs(2)).ok()
    }
}

fn read_request_body(stream: &std::net::TcpStream) -> Vec<u8> {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);
    body
}
