//! Connect protocol client for a sandbox's process daemon.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use sbxctl_common::RemoteError;
use sbxctl_config::ApiConfig;

use super::envelope::{self, ConnectError, Envelope, EnvelopeDecoder};
use super::events::ProcessEvent;
use crate::http;

const CONNECT_PROTOCOL_VERSION: &str = "1";
const STREAM_CONTENT_TYPE: &str = "application/connect+json";

/// Seconds between keepalive events requested from the daemon on streams.
const KEEPALIVE_PING_SECS: u64 = 50;

/// A running `process.Process/Start` response stream.
pub struct ProcessStream {
    body: BoxStream<'static, Result<Vec<u8>, RemoteError>>,
    decoder: EnvelopeDecoder,
    pending: VecDeque<Envelope>,
    finished: bool,
}

impl ProcessStream {
    fn new(response: reqwest::Response) -> Self {
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map(|b| b.to_vec()).map_err(http::network_error))
            .boxed();
        Self {
            body,
            decoder: EnvelopeDecoder::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_frames(frames: Vec<Vec<u8>>) -> Self {
        let chunks: Vec<Result<Vec<u8>, RemoteError>> = frames.into_iter().map(Ok).collect();
        Self {
            body: futures_util::stream::iter(chunks).boxed(),
            decoder: EnvelopeDecoder::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Next event, or `None` once the stream ended cleanly.
    pub async fn next_event(&mut self) -> Result<Option<ProcessEvent>, RemoteError> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                if frame.is_end_stream() {
                    self.finished = true;
                    self.pending.clear();
                    return match frame.end_stream_error()? {
                        Some(err) => Err(err),
                        None => Ok(None),
                    };
                }
                match ProcessEvent::parse(&frame.payload)? {
                    Some(event) => return Ok(Some(event)),
                    None => continue,
                }
            }

            if self.finished {
                return Ok(None);
            }

            match self.body.next().await {
                Some(Ok(chunk)) => self.pending.extend(self.decoder.push(&chunk)?),
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(e);
                }
                None => {
                    self.finished = true;
                    if !self.decoder.is_empty() {
                        return Err(RemoteError::Protocol("stream ended mid-frame".into()));
                    }
                    return Ok(None);
                }
            }
        }
    }
}

/// Client for one sandbox's process daemon.
pub struct EnvdClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    access_token: Option<String>,
    pub(crate) user: String,
    pub(crate) request_timeout: Duration,
    /// Start streams of PTYs created but not yet being streamed, by pid.
    pub(crate) streams: Mutex<HashMap<u32, ProcessStream>>,
}

impl EnvdClient {
    /// `user` is the sandbox account processes run as and files are owned by.
    pub fn new(
        config: &ApiConfig,
        sandbox_id: &str,
        access_token: Option<String>,
        user: &str,
    ) -> Result<Self, RemoteError> {
        // Streams must not be cut off by a whole-request timeout; unary calls
        // set their own.
        let http = http::build_client(config, &[http::envd_host(config, sandbox_id)], None)?;
        Ok(Self {
            http,
            base_url: format!("https://{}", config.envd_host(sandbox_id)),
            access_token,
            user: user.to_string(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            streams: Mutex::new(HashMap::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let auth = STANDARD.encode(format!("{}:", self.user));
        let mut builder = self
            .http
            .request(method, url)
            .header("Authorization", format!("Basic {auth}"));
        if let Some(token) = &self.access_token {
            builder = builder.header("X-Access-Token", token);
        }
        builder
    }

    /// Open a server-streaming RPC. `timeout` bounds the whole stream on the
    /// daemon side; `None` leaves it unbounded.
    pub(crate) async fn open_stream(
        &self,
        procedure: &str,
        body: &serde_json::Value,
        timeout: Option<Duration>,
    ) -> Result<ProcessStream, RemoteError> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| RemoteError::Protocol(format!("failed to encode request: {e}")))?;

        let mut builder = self
            .request(reqwest::Method::POST, procedure)
            .header("Content-Type", STREAM_CONTENT_TYPE)
            .header("Connect-Protocol-Version", CONNECT_PROTOCOL_VERSION)
            .header("Keepalive-Ping-Interval", KEEPALIVE_PING_SECS.to_string())
            .body(envelope::encode(0, &payload));
        if let Some(timeout) = timeout.filter(|t| !t.is_zero()) {
            builder = builder.header("Connect-Timeout-Ms", timeout.as_millis().to_string());
        }

        let response = builder.send().await.map_err(http::network_error)?;
        let response = http::check_status(response).await?;
        Ok(ProcessStream::new(response))
    }

    /// Call a unary RPC with a JSON body, discarding the (empty) response.
    pub(crate) async fn unary(
        &self,
        procedure: &str,
        body: &serde_json::Value,
    ) -> Result<(), RemoteError> {
        let response = self
            .request(reqwest::Method::POST, procedure)
            .header("Connect-Protocol-Version", CONNECT_PROTOCOL_VERSION)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(http::network_error)?;

        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ConnectError>(&text) {
            Ok(err) if !err.code.is_empty() => Err(err.into_remote()),
            _ => Err(RemoteError::from_status(status, text)),
        }
    }

    /// Start `cmd args...` and wait for its start event.
    ///
    /// Returns the pid and the stream positioned after the start event.
    pub(crate) async fn start_process(
        &self,
        body: &serde_json::Value,
        timeout: Option<Duration>,
    ) -> Result<(u32, ProcessStream), RemoteError> {
        let mut stream = self
            .open_stream("/process.Process/Start", body, timeout)
            .await?;
        loop {
            match stream.next_event().await? {
                Some(ProcessEvent::Start { pid }) => return Ok((pid, stream)),
                Some(ProcessEvent::Keepalive) => continue,
                Some(other) => {
                    return Err(RemoteError::Protocol(format!(
                        "expected start event, got {other:?}"
                    )))
                }
                None => {
                    return Err(RemoteError::Protocol(
                        "process stream ended before start".into(),
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(frames: Vec<Vec<u8>>) -> ProcessStream {
        ProcessStream::from_frames(frames)
    }

    #[tokio::test]
    async fn stream_yields_events_then_none() {
        let mut wire = envelope::encode(0, br#"{"event":{"start":{"pid":3}}}"#);
        wire.extend(envelope::encode(0, br#"{"event":{"data":{"pty":"aGk="}}}"#));
        let tail = envelope::encode(envelope::FLAG_END_STREAM, b"{}");
        let mut stream = stream_of(vec![wire, tail]);

        assert_eq!(
            stream.next_event().await.unwrap(),
            Some(ProcessEvent::Start { pid: 3 })
        );
        assert_eq!(
            stream.next_event().await.unwrap(),
            Some(ProcessEvent::Pty(b"hi".to_vec()))
        );
        assert_eq!(stream.next_event().await.unwrap(), None);
        assert_eq!(stream.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn truncated_stream_is_an_error() {
        let wire = envelope::encode(0, br#"{"event":{"start":{"pid":3}}}"#);
        let mut stream = stream_of(vec![wire[..7].to_vec()]);
        assert!(matches!(
            stream.next_event().await,
            Err(RemoteError::Protocol(_))
        ));
    }

    #[tokio::test]
    async fn end_stream_error_fails_the_stream() {
        let tail = envelope::encode(
            envelope::FLAG_END_STREAM,
            br#"{"error":{"code":"unavailable","message":"sandbox stopped"}}"#,
        );
        let mut stream = stream_of(vec![tail]);
        let err = stream.next_event().await.unwrap_err();
        assert!(err.to_string().contains("sandbox stopped"));
    }

    #[test]
    fn base_url_uses_envd_port() {
        let config = ApiConfig::default();
        let client = EnvdClient::new(&config, "iq3c9f0u2", None, "user").unwrap();
        assert_eq!(client.base_url(), "https://49983-iq3c9f0u2.e2b.app");
    }
}
