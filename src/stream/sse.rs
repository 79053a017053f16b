//! Incremental SSE (Server-Sent Events) framing.
//!
//! Bytes arrive in arbitrary chunks; the decoder buffers partial lines and
//! emits one frame per dispatched event. Handles:
//! - `data: {...}` (standard, with space) and `data:{...}` (compact)
//! - multi-line `data:` fields, joined with `\n`
//! - `event:`, `id:`, `retry:` and `:` comment lines (ignored)
//! - CRLF line endings
//! - the `[DONE]` sentinel

/// One dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// The event's `data` payload.
    Data(String),
    /// The `[DONE]` sentinel: the server ended the stream on purpose.
    Done,
}

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Default)]
pub struct SseDecoder {
    line: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and collect every event it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        for &byte in chunk {
            if byte == b'\n' {
                let line = std::mem::take(&mut self.line);
                self.process_line(&line, &mut frames);
            } else {
                self.line.push(byte);
            }
        }
        frames
    }

    /// Flush a trailing event that was not followed by a blank line.
    pub fn finish(&mut self) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        if !self.line.is_empty() {
            let line = std::mem::take(&mut self.line);
            self.process_line(&line, &mut frames);
        }
        self.dispatch(&mut frames);
        frames
    }

    fn process_line(&mut self, raw: &[u8], frames: &mut Vec<SseFrame>) {
        let text = String::from_utf8_lossy(raw);
        let line = text.strip_suffix('\r').unwrap_or(&text);

        if line.is_empty() {
            self.dispatch(frames);
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
    }

    fn dispatch(&mut self, frames: &mut Vec<SseFrame>) {
        if self.data.is_empty() {
            return;
        }
        let payload = std::mem::take(&mut self.data).join("\n");
        if payload.trim() == DONE_MARKER {
            frames.push(SseFrame::Done);
        } else {
            frames.push(SseFrame::Data(payload));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<SseFrame> {
        let mut decoder = SseDecoder::new();
        let mut frames = decoder.push(bytes);
        frames.extend(decoder.finish());
        frames
    }

    #[test]
    fn parses_standard_format() {
        let frames = decode_all(b"data: {\"a\": 1}\n\n");
        assert_eq!(frames, vec![SseFrame::Data("{\"a\": 1}".into())]);
    }

    #[test]
    fn parses_compact_format() {
        let frames = decode_all(b"data:{\"a\":1}\n\n");
        assert_eq!(frames, vec![SseFrame::Data("{\"a\":1}".into())]);
    }

    #[test]
    fn recognizes_done_marker() {
        let frames = decode_all(b"data: {}\n\ndata: [DONE]\n\n");
        assert_eq!(frames, vec![SseFrame::Data("{}".into()), SseFrame::Done]);
    }

    #[test]
    fn skips_non_data_lines() {
        let frames = decode_all(b"event: message\nid: 7\n: comment\ndata: x\n\n");
        assert_eq!(frames, vec![SseFrame::Data("x".into())]);
    }

    #[test]
    fn joins_multi_line_data() {
        let frames = decode_all(b"data: {\ndata: \"a\": 1}\n\n");
        assert_eq!(frames, vec![SseFrame::Data("{\n\"a\": 1}".into())]);
    }

    #[test]
    fn handles_crlf() {
        let frames = decode_all(b"data: one\r\n\r\ndata: two\r\n\r\n");
        assert_eq!(
            frames,
            vec![SseFrame::Data("one".into()), SseFrame::Data("two".into())]
        );
    }

    #[test]
    fn reassembles_events_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"da").is_empty());
        assert!(decoder.push(b"ta: hel").is_empty());
        assert!(decoder.push(b"lo\n").is_empty());
        assert_eq!(decoder.push(b"\n"), vec![SseFrame::Data("hello".into())]);
    }

    #[test]
    fn keeps_utf8_split_across_chunks() {
        let bytes = "data: héllo\n\n".as_bytes();
        let mut decoder = SseDecoder::new();
        let mut frames = decoder.push(&bytes[..8]);
        frames.extend(decoder.push(&bytes[8..]));
        assert_eq!(frames, vec![SseFrame::Data("héllo".into())]);
    }

    #[test]
    fn finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: tail").is_empty());
        assert_eq!(decoder.finish(), vec![SseFrame::Data("tail".into())]);
    }

    #[test]
    fn empty_stream() {
        assert!(decode_all(b"").is_empty());
        assert!(decode_all(b"\n\n\n").is_empty());
    }
}
