use reqwest::Client;
use thiserror::Error;

/// Why an attachment could not be downloaded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),
    /// DNS, connection, TLS or body read failure.
    #[error("{0}")]
    Network(String),
}

/// Retrieves the full body of an attachment URL.
///
/// [`HttpFetcher`] is the production implementation; tests plug in fakes.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Plain HTTP GET via reqwest. No retries and no per-request timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::with_client(Client::new())
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        log::debug!("Downloaded {} bytes from {url}", body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a local port.
    async fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(&response).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/photo.jpg")
    }

    #[tokio::test]
    async fn fetch_success_returns_body() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello".to_vec(),
        )
        .await;

        let body = HttpFetcher::default().fetch(&url).await.unwrap();
        assert_eq!(body, b"hello");
    }

    #[tokio::test]
    async fn fetch_not_found_carries_status() {
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
        )
        .await;

        let err = HttpFetcher::default().fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::Status(404));
    }

    #[tokio::test]
    async fn fetch_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpFetcher::default()
            .fetch(&format!("http://{addr}/gone.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(ref msg) if !msg.is_empty()));
    }

    #[test]
    fn builder_accepts_user_agent() {
        assert!(HttpFetcher::new("exif-report/test").is_ok());
    }
}
