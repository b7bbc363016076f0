//! Line framing for the IRC byte stream.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::config::MAX_IRC_LINE_LEN;
use crate::error::ProtocolError;

/// Splits the inbound stream on LF and terminates outbound lines with CRLF.
///
/// Inbound bytes are decoded as UTF-8, replacing invalid sequences, since
/// older clients still send Latin-1. Lines containing NUL are dropped.
#[derive(Clone, Debug)]
pub struct LineCodec {
    max_line_len: usize,
}

impl LineCodec {
    pub fn new() -> Self {
        Self::with_max_len(MAX_IRC_LINE_LEN)
    }

    pub fn with_max_len(max_line_len: usize) -> Self {
        Self { max_line_len }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        loop {
            let Some(pos) = src.iter().position(|&b| b == b'\n') else {
                if src.len() > self.max_line_len {
                    return Err(ProtocolError::MessageTooLong(src.len()));
                }
                return Ok(None);
            };

            if pos > self.max_line_len {
                return Err(ProtocolError::MessageTooLong(pos));
            }

            let raw = src.split_to(pos + 1);
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\r', '\n']);

            if line.contains('\0') {
                warn!("dropping inbound line containing NUL");
                continue;
            }

            return Ok(Some(line.to_owned()));
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        if let Some(bad) = line.chars().find(|c| matches!(c, '\r' | '\n' | '\0')) {
            return Err(ProtocolError::IllegalControlChar(bad));
        }
        if line.len() + 2 > self.max_line_len {
            return Err(ProtocolError::MessageTooLong(line.len() + 2));
        }

        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
