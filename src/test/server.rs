//! Local HTTP listener that records requests and answers with a canned
//! response, for checking what the REST services put on the wire.

use std::sync::Arc;

use serde_json::Value;
use tokio::{
    io::{self, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    sync::Mutex,
    task::JoinHandle,
};

use crate::http::{ApiClient, ApiConfig, ApiError};

/// One request as the server received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub(crate) method: String,

    /// Path plus query string.
    pub(crate) target: String,

    pub(crate) body: String,
}

impl RecordedRequest {
    /// The body decoded as JSON, `Null` when empty.
    pub(crate) fn json(&self) -> serde_json::Result<Value> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&self.body)
    }
}

#[derive(Debug)]
pub(crate) struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Answer every request with `status` and the JSON `body`.
    pub(crate) async fn respond_with(status: u16, body: &'static str) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let task = tokio::spawn(serve(listener, status, body, Arc::clone(&requests)));

        Ok(Self {
            base_url,
            requests,
            task,
        })
    }

    pub(crate) fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(&ApiConfig::new(self.base_url.clone()))
    }

    /// Requests received so far, oldest first.
    pub(crate) async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(
    listener: TcpListener,
    status: u16,
    body: &'static str,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    while let Ok((stream, _addr)) = listener.accept().await {
        if answer(stream, status, body, &requests).await.is_err() {
            return;
        }
    }
}

async fn answer(
    stream: TcpStream,
    status: u16,
    body: &str,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let target = parts.next().unwrap_or_default().to_owned();

    let mut content_length = 0;

    loop {
        let mut header = String::new();
        reader.read_line(&mut header).await?;

        let header = header.trim_end();

        if header.is_empty() {
            break;
        }

        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or_default();
        }
    }

    let mut payload = vec![0; content_length];
    reader.read_exact(&mut payload).await?;

    requests.lock().await.push(RecordedRequest {
        method,
        target,
        body: String::from_utf8_lossy(&payload).into_owned(),
    });

    let response = format!(
        "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let mut stream = reader.into_inner();

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
