// Newline-delimited message framing for the stdio transport

use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

/// Longest accepted inbound line, in bytes
pub const MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

/// One inbound line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Message(String),
    /// A line that could not be read as a message; the stream carries on
    /// with the next line
    Malformed(String),
}

/// `LinesCodec` that reports undecodable and oversized lines as frames
/// instead of ending the stream. Only real I/O failures are errors.
#[derive(Debug)]
pub struct MessageCodec {
    lines: LinesCodec,
}

impl MessageCodec {
    pub fn new() -> Self {
        Self::with_max_length(MAX_MESSAGE_BYTES)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_length),
        }
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(result: Result<Option<String>, LinesCodecError>) -> Result<Option<Inbound>, LinesCodecError> {
    match result {
        Ok(line) => Ok(line.map(Inbound::Message)),
        Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Inbound::Malformed(
            "line exceeds maximum message length".to_string(),
        ))),
        Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
            Ok(Some(Inbound::Malformed(e.to_string())))
        }
        Err(e) => Err(e),
    }
}

impl Decoder for MessageCodec {
    type Item = Inbound;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Inbound>, LinesCodecError> {
        classify(self.lines.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Inbound>, LinesCodecError> {
        classify(self.lines.decode_eof(buf))
    }
}

impl Encoder<String> for MessageCodec {
    type Error = LinesCodecError;

    fn encode(&mut self, line: String, buf: &mut BytesMut) -> Result<(), LinesCodecError> {
        self.lines.encode(line, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio_util::codec::FramedRead;

    async fn decode_all(input: &[u8], codec: MessageCodec) -> Vec<Inbound> {
        FramedRead::new(input, codec)
            .map(|frame| frame.unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_lines_become_messages() {
        let frames = decode_all(b"first\r\nsecond\nlast", MessageCodec::new()).await;

        assert_eq!(
            frames,
            vec![
                Inbound::Message("first".to_string()),
                Inbound::Message("second".to_string()),
                Inbound::Message("last".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped_over() {
        let frames = decode_all(b"\xff\xfe\nafter\n", MessageCodec::new()).await;

        assert_eq!(frames.len(), 2);
        assert!(matches!(frames[0], Inbound::Malformed(_)));
        assert_eq!(frames[1], Inbound::Message("after".to_string()));
    }

    #[tokio::test]
    async fn test_oversized_line_is_discarded() {
        let frames = decode_all(
            b"0123456789012345678901234567890123456789\nshort\n",
            MessageCodec::with_max_length(16),
        )
        .await;

        assert_eq!(frames[0], Inbound::Malformed("line exceeds maximum message length".to_string()));
        assert_eq!(frames.last(), Some(&Inbound::Message("short".to_string())));
    }
}
