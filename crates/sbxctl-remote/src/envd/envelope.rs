//! Connect protocol streaming envelopes.
//!
//! Every message in a streaming body is framed as one flag byte, a 4-byte
//! big-endian length, and the payload. The final frame of a response carries
//! [`FLAG_END_STREAM`] and a JSON object with an optional `error`.

use sbxctl_common::RemoteError;
use serde::Deserialize;

pub const FLAG_COMPRESSED: u8 = 0x01;
pub const FLAG_END_STREAM: u8 = 0x02;

const HEADER_LEN: usize = 5;

/// Payloads above this are treated as a corrupt stream.
const MAX_PAYLOAD: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub flags: u8,
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn is_end_stream(&self) -> bool {
        self.flags & FLAG_END_STREAM != 0
    }

    /// Error carried by an end-of-stream frame, if any.
    pub fn end_stream_error(&self) -> Result<Option<RemoteError>, RemoteError> {
        #[derive(Deserialize)]
        struct EndStream {
            error: Option<ConnectError>,
        }

        if self.payload.is_empty() {
            return Ok(None);
        }
        let end: EndStream = serde_json::from_slice(&self.payload)
            .map_err(|e| RemoteError::Protocol(format!("invalid end-of-stream frame: {e}")))?;
        Ok(end.error.map(ConnectError::into_remote))
    }
}

/// Error object used by the Connect protocol for both unary and streaming calls.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ConnectError {
    pub fn into_remote(self) -> RemoteError {
        let text = if self.message.is_empty() {
            self.code.clone()
        } else {
            format!("{}: {}", self.code, self.message)
        };
        match self.code.as_str() {
            "unauthenticated" | "permission_denied" => RemoteError::Unauthorized,
            "not_found" => RemoteError::NotFound(text),
            _ => RemoteError::Process(text),
        }
    }
}

/// Frame one uncompressed message.
pub fn encode(flags: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.push(flags);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Incremental decoder for a chunked streaming body.
#[derive(Debug, Default)]
pub struct EnvelopeDecoder {
    buf: Vec<u8>,
}

impl EnvelopeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw body bytes and return every frame completed by them.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Envelope>, RemoteError> {
        self.buf.extend_from_slice(data);

        let mut frames = Vec::new();
        let mut consumed = 0;

        while self.buf.len() - consumed >= HEADER_LEN {
            let header = &self.buf[consumed..consumed + HEADER_LEN];
            let flags = header[0];
            let len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;

            if flags & FLAG_COMPRESSED != 0 {
                return Err(RemoteError::Protocol(
                    "compressed frames are not supported".into(),
                ));
            }
            if len > MAX_PAYLOAD {
                return Err(RemoteError::Protocol(format!("frame too large: {len} bytes")));
            }

            let start = consumed + HEADER_LEN;
            if self.buf.len() < start + len {
                break;
            }
            frames.push(Envelope {
                flags,
                payload: self.buf[start..start + len].to_vec(),
            });
            consumed = start + len;
        }

        self.buf.drain(..consumed);
        Ok(frames)
    }

    /// No partial frame is buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        assert_eq!(encode(0, b"{}"), vec![0, 0, 0, 0, 2, b'{', b'}']);
    }

    #[test]
    fn decodes_frames_split_across_chunks() {
        let mut wire = encode(0, br#"{"event":{"start":{"pid":1}}}"#);
        wire.extend(encode(FLAG_END_STREAM, b"{}"));

        let mut decoder = EnvelopeDecoder::new();
        let mut frames = Vec::new();
        for chunk in wire.chunks(3) {
            frames.extend(decoder.push(chunk).unwrap());
        }

        assert_eq!(frames.len(), 2);
        assert!(!frames[0].is_end_stream());
        assert!(frames[1].is_end_stream());
        assert!(frames[1].end_stream_error().unwrap().is_none());
        assert!(decoder.is_empty());
    }

    #[test]
    fn partial_header_waits_for_more() {
        let mut decoder = EnvelopeDecoder::new();
        assert!(decoder.push(&[0, 0, 0]).unwrap().is_empty());
        assert!(!decoder.is_empty());
    }

    #[test]
    fn end_stream_error_is_surfaced() {
        let frame = Envelope {
            flags: FLAG_END_STREAM,
            payload: br#"{"error":{"code":"deadline_exceeded","message":"timeout"}}"#.to_vec(),
        };
        let err = frame.end_stream_error().unwrap().unwrap();
        assert_eq!(err.to_string(), "process error: deadline_exceeded: timeout");
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err = ConnectError {
            code: "not_found".into(),
            message: "process with pid 9 not found".into(),
        }
        .into_remote();
        assert!(matches!(err, RemoteError::NotFound(_)));
    }

    #[test]
    fn compressed_frames_are_rejected() {
        let mut decoder = EnvelopeDecoder::new();
        let err = decoder.push(&encode(FLAG_COMPRESSED, b"x")).unwrap_err();
        assert!(err.to_string().contains("compressed"));
    }
}
