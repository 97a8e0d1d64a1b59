use crate::error::{Error, Result};
use crate::share::Credentials;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{Stream, TryStreamExt};
use log::debug;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method};
use std::pin::Pin;
use url::Url;

/// Chunked file contents, read lazily while the request is sent
pub type BodyStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send + Sync>>;

/// Body of an upload request.
pub enum RequestBody {
    /// Whole file read into memory.
    Bytes(Bytes),
    /// File streamed in bounded chunks; `len` is the total size in bytes.
    Stream { stream: BodyStream, len: u64 },
}

impl RequestBody {
    /// Consume the body into contiguous bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading a streamed chunk fails.
    pub async fn bytes(self) -> std::io::Result<Bytes> {
        match self {
            RequestBody::Bytes(bs) => Ok(bs),
            RequestBody::Stream { stream, len } => {
                let capacity = usize::try_from(len).unwrap_or_default();
                let buf = stream
                    .try_fold(BytesMut::with_capacity(capacity), |mut buf, chunk| async move {
                        buf.extend_from_slice(&chunk);
                        Ok(buf)
                    })
                    .await?;
                Ok(buf.freeze())
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        match self {
            RequestBody::Bytes(bs) => bs.len() as u64,
            RequestBody::Stream { len, .. } => *len,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<RequestBody> for reqwest::Body {
    fn from(v: RequestBody) -> Self {
        match v {
            RequestBody::Bytes(bs) => reqwest::Body::from(bs),
            RequestBody::Stream { stream, .. } => reqwest::Body::wrap_stream(stream),
        }
    }
}

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl TransportResponse {
    async fn from_reqwest(response: reqwest::Response) -> Self {
        let status = response.status();
        Self {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body: response.text().await.unwrap_or_default(),
        }
    }
}

/// HTTP requests a share client needs. A reachable server answering with
/// any status is `Ok`; only network-level failures are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Store `body` at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransportError`] if no response was received.
    async fn put(
        &self,
        url: &Url,
        credentials: &Credentials,
        body: RequestBody,
    ) -> Result<TransportResponse>;

    /// Query properties of the collection at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransportError`] if no response was received.
    async fn propfind(&self, url: &Url, credentials: &Credentials) -> Result<TransportResponse>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Clone, Default)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_client(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn put(
        &self,
        url: &Url,
        credentials: &Credentials,
        body: RequestBody,
    ) -> Result<TransportResponse> {
        debug!("PUT {url} ({} bytes)", body.len());

        let mut request = self
            .http
            .put(url.clone())
            .basic_auth(credentials.username(), Some(credentials.password()))
            .header(CONTENT_TYPE, "application/octet-stream");

        if let RequestBody::Stream { len, .. } = &body {
            request = request.header(CONTENT_LENGTH, *len);
        }

        let response = request.body(body).send().await?;
        Ok(TransportResponse::from_reqwest(response).await)
    }

    async fn propfind(&self, url: &Url, credentials: &Credentials) -> Result<TransportResponse> {
        debug!("PROPFIND {url}");

        let method = Method::from_bytes(b"PROPFIND")
            .map_err(|e| Error::TransportError(Box::new(e)))?;

        let response = self
            .http
            .request(method, url.clone())
            .basic_auth(credentials.username(), Some(credentials.password()))
            .send()
            .await?;

        Ok(TransportResponse::from_reqwest(response).await)
    }
}
