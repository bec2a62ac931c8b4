//! Backend API client.
//!
//! Talks to the book chat backend over HTTP: the plain `/chat` endpoint, the
//! streaming `/chat/stream` endpoint, `/books/search`, and `/health`.

use std::pin::Pin;

use futures_util::stream::{self, Stream, StreamExt};
use tracing::{debug, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{classify_http_error, BookChatError, BookChatResult, NetworkError, StreamError};
use crate::models::{
    BookSearchParams, BookSearchResponse, ChatRequest, ChatResponse, DetailKind, ErrorBody,
};
use crate::sse::{decode_stream, event_stream, StreamEvent, StreamSummary};
use crate::traits::{BodyStream, Headers, HttpClient, HttpError, Response};

pub const CHAT_PATH: &str = "/chat";
pub const CHAT_STREAM_PATH: &str = "/chat/stream";
pub const SEARCH_PATH: &str = "/books/search";
pub const HEALTH_PATH: &str = "/health";

/// Decoded events of one streaming chat call.
///
/// Dropping it stops reading and releases the response body.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, StreamError>> + Send>>;

/// Client for the book chat backend.
#[derive(Debug)]
pub struct BackendClient<C: HttpClient = ReqwestHttpClient> {
    config: ClientConfig,
    http: C,
}

impl BackendClient<ReqwestHttpClient> {
    /// Client for the default base URL (`http://localhost:8000`).
    pub fn new() -> Self {
        Self::with_http_client(ReqwestHttpClient::new(), ClientConfig::default())
    }

    /// Client for a custom base URL.
    pub fn with_base_url(base_url: impl AsRef<str>) -> BookChatResult<Self> {
        Self::from_config(ClientConfig::default().with_base_url(base_url)?)
    }

    pub fn from_config(config: ClientConfig) -> BookChatResult<Self> {
        let http = ReqwestHttpClient::from_config(&config)
            .map_err(|e| classify_http_error(&e, &config.base_url))?;
        Ok(Self::with_http_client(http, config))
    }

    /// Client configured from `BOOKCHAT_*` environment variables.
    pub fn from_env() -> BookChatResult<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }
}

impl Default for BackendClient<ReqwestHttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> BackendClient<C> {
    /// Client over any transport, e.g. a mock in tests.
    pub fn with_http_client(http: C, config: ClientConfig) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send one message to the non-streaming endpoint and wait for the answer.
    pub async fn send_message(&self, request: &ChatRequest) -> BookChatResult<ChatResponse> {
        let url = self.config.endpoint(CHAT_PATH);
        let body = encode_body(request)?;

        info!(history = request.history.len(), "sending chat request");
        let response = self
            .http
            .post(&url, &body, &json_headers())
            .await
            .map_err(|e| classify_http_error(&e, &url))?;

        if !response.is_success() {
            warn!(status = response.status, "chat request rejected");
            return Err(status_error(&response).into());
        }

        let answer: ChatResponse = response.json()?;
        debug!(books = answer.books().len(), "chat response received");
        Ok(answer)
    }

    /// Search the catalog directly, without going through the chat model.
    ///
    /// Error responses carrying a structured `detail` keep its type and
    /// message in [`NetworkError::HttpStatus`].
    pub async fn search_books(&self, params: &BookSearchParams) -> BookChatResult<BookSearchResponse> {
        let url = self.config.endpoint(SEARCH_PATH);
        let body = encode_body(params)?;

        info!(count = params.count, "searching books");
        let response = self
            .http
            .post(&url, &body, &json_headers())
            .await
            .map_err(|e| classify_http_error(&e, &url))?;

        if !response.is_success() {
            warn!(status = response.status, "book search rejected");
            return Err(status_error(&response).into());
        }

        let result: BookSearchResponse = response.json()?;
        debug!(total = result.total, returned = result.books.len(), "book search finished");
        Ok(result)
    }

    /// Open the streaming endpoint and return its decoded events.
    ///
    /// A non-2xx status fails with [`NetworkError::HttpStatus`]; any other
    /// failure to obtain a body fails with
    /// [`StreamError::TransportUnavailable`].
    pub async fn stream_message(&self, request: &ChatRequest) -> BookChatResult<EventStream> {
        let span = stream_span();
        let body = self.open_stream(request).instrument(span.clone()).await?;

        let events = Box::pin(event_stream(body));
        let instrumented = stream::unfold((events, span), |(mut events, span)| async move {
            let item = events.next().instrument(span.clone()).await?;
            Some((item, (events, span)))
        });
        Ok(Box::pin(instrumented))
    }

    /// Stream one message, invoking `on_event` for every event in order.
    ///
    /// Returns once the body has ended. A mid-stream read failure is returned
    /// as [`StreamError::ReadFailed`] after the events before it were
    /// delivered.
    pub async fn stream_message_with<F>(
        &self,
        request: &ChatRequest,
        on_event: F,
    ) -> BookChatResult<StreamSummary>
    where
        F: FnMut(StreamEvent),
    {
        let span = stream_span();
        async {
            let body = self.open_stream(request).await?;
            let summary = decode_stream(body, on_event).await?;
            if !summary.saw_terminal {
                warn!(delivered = summary.delivered, "stream ended without done or error");
            }
            Ok::<_, BookChatError>(summary)
        }
        .instrument(span)
        .await
    }

    /// Whether the backend answers `/health` with a 2xx status.
    pub async fn health_check(&self) -> BookChatResult<bool> {
        let url = self.config.endpoint(HEALTH_PATH);
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| classify_http_error(&e, &url))?;
        debug!(status = response.status, "health check");
        Ok(response.is_success())
    }

    async fn open_stream(&self, request: &ChatRequest) -> BookChatResult<BodyStream> {
        let url = self.config.endpoint(CHAT_STREAM_PATH);
        let body = encode_body(request)?;
        let mut headers = json_headers();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        info!(history = request.history.len(), "opening chat stream");
        match self.http.post_stream(&url, &body, &headers).await {
            Ok(body) => Ok(body),
            Err(HttpError::ServerError { status, message }) => {
                warn!(status, "chat stream rejected");
                Err(NetworkError::HttpStatus { status, message }.into())
            }
            Err(e) => {
                warn!(error = %e, "chat stream unavailable");
                Err(StreamError::TransportUnavailable {
                    message: e.to_string(),
                }
                .into())
            }
        }
    }
}

fn stream_span() -> Span {
    info_span!("chat_stream", stream_id = %Uuid::new_v4())
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

/// Build a [`NetworkError::HttpStatus`] from a non-2xx response.
///
/// A `{"detail": {"error_type", "message", ...}}` body becomes
/// `"<error_type>: <message>"`, a string detail is used as is, and any other
/// body is kept verbatim.
fn status_error(response: &Response) -> NetworkError {
    let message = match response.json::<ErrorBody>() {
        Ok(ErrorBody {
            detail: DetailKind::Structured(detail),
        }) => {
            debug!(
                error_type = %detail.error_type,
                retryable = detail.retryable,
                "backend error detail"
            );
            format!("{}: {}", detail.error_type, detail.message)
        }
        Ok(ErrorBody {
            detail: DetailKind::Text(text),
        }) => text,
        _ => response.text_lossy(),
    };
    NetworkError::HttpStatus {
        status: response.status,
        message,
    }
}

fn encode_body<T: serde::Serialize>(body: &T) -> BookChatResult<String> {
    serde_json::to_string(body).map_err(|e| {
        NetworkError::Other {
            message: format!("could not encode request: {}", e),
        }
        .into()
    })
}
