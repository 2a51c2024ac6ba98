/// A dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// `message` when the service sent no `event:` field.
    pub event: String,
    pub data: String,
    pub id: Option<String>,
}

/// Incremental `text/event-stream` parser. Feed it body chunks as they
/// arrive; complete frames come out on each blank line.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Option<String>,
    last_event_id: Option<String>,
    retry: Option<u64>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(frame) = self.process_line(&line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Drops any partial frame. The last event id and retry hint survive
    /// so a reconnect can resume from them.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.event = None;
        self.data = None;
    }

    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    /// Reconnect delay requested by the service, in milliseconds.
    pub fn retry_hint(&self) -> Option<u64> {
        self.retry
    }

    fn process_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => match self.data.as_mut() {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => self.data = Some(value.to_string()),
            },
            "id" if !value.contains('\0') => {
                self.last_event_id = Some(value.to_string()).filter(|id| !id.is_empty());
            }
            "retry" => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.retry = Some(ms);
                }
            }
            _ => {}
        }
        None
    }

    // a named event with no data lines is still dispatched: the service
    // sends `events-cleared` without a payload
    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        let data = self.data.take();
        if event.is_none() && data.is_none() {
            return None;
        }
        Some(SseFrame {
            event: event
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "message".to_string()),
            data: data.unwrap_or_default(),
            id: self.last_event_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_events_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"event:event-created\ndata:{\"id\":").is_empty());
        let frames = decoder.push(b"7}\n\nevent: events-cleared\ndata: null\n\n");

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].event, "event-created");
        assert_eq!(frames[0].data, "{\"id\":7}");
        assert_eq!(frames[1].event, "events-cleared");
        assert_eq!(frames[1].data, "null");
    }

    #[test]
    fn joins_multi_line_data_and_handles_crlf() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: first\r\ndata:second\r\n\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "message");
        assert_eq!(frames[0].data, "first\nsecond");
    }

    #[test]
    fn ignores_comments_and_unknown_fields() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b": keep-alive\n\nfoo: bar\n\n");
        assert!(frames.is_empty());
    }

    #[test]
    fn tracks_id_and_retry() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"retry: 1500\nid: 41\nevent: event-updated\ndata: {}\n\n");
        assert_eq!(frames[0].id.as_deref(), Some("41"));
        assert_eq!(decoder.last_event_id(), Some("41"));
        assert_eq!(decoder.retry_hint(), Some(1500));

        decoder.push(b"retry: soon\n\n");
        assert_eq!(decoder.retry_hint(), Some(1500));
    }

    #[test]
    fn named_event_without_data_is_dispatched() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event:events-cleared\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "");
    }

    #[test]
    fn reset_discards_partial_frames() {
        let mut decoder = SseDecoder::new();
        decoder.push(b"id: 9\n\nevent: event-created\ndata: {\"id\"");
        decoder.reset();
        assert!(decoder.push(b"\n\n").is_empty());
        assert_eq!(decoder.last_event_id(), Some("9"));
    }
}
