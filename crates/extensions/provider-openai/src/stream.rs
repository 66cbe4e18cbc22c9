//! Server-sent event buffering for streamed completions.

use voxnav_protocols::ProviderError;

use crate::api::StreamChunk;

const DONE_MARKER: &str = "[DONE]";

/// Reassembles SSE lines split across byte chunks and concatenates the
/// content deltas of the first choice.
#[derive(Debug, Default)]
pub(crate) struct SseAccumulator {
    pending: Vec<u8>,
    text: String,
    done: bool,
}

impl SseAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` marker has been seen.
    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    pub(crate) fn feed(&mut self, bytes: &[u8]) -> Result<(), ProviderError> {
        self.pending.extend_from_slice(bytes);
        while let Some(end) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            self.handle_line(&String::from_utf8_lossy(&line))?;
        }
        Ok(())
    }

    /// Flush any unterminated last line and return the trimmed text.
    pub(crate) fn finish(mut self) -> Result<String, ProviderError> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.handle_line(&String::from_utf8_lossy(&rest))?;
        }

        let text = self.text.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    fn handle_line(&mut self, line: &str) -> Result<(), ProviderError> {
        if self.done {
            return Ok(());
        }
        let Some(data) = line.trim_end_matches(['\r', '\n']).strip_prefix("data:") else {
            return Ok(());
        };
        let data = data.trim();
        if data.is_empty() {
            return Ok(());
        }
        if data == DONE_MARKER {
            self.done = true;
            return Ok(());
        }

        let chunk: StreamChunk = serde_json::from_str(data)
            .map_err(|e| ProviderError::StreamError(format!("invalid chunk: {}", e)))?;
        if let Some(content) = chunk.choices.into_iter().next().and_then(|c| c.delta.content) {
            self.text.push_str(&content);
        }
        Ok(())
    }
}
