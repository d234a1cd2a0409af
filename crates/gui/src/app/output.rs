use mutator_shell_core::relay::OutputLine;

/// Text shown in the output panel.
///
/// A progress line replaces the previous progress line instead of being
/// appended; the next normal line removes it.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    text: String,
    progress_start: Option<usize>,
}

impl OutputBuffer {
    pub fn push(&mut self, line: &OutputLine) {
        self.drop_progress();

        match line {
            OutputLine::Progress(raw) => {
                self.progress_start = Some(self.text.len());
                self.text.push_str(raw.trim_start_matches('\r'));
            }
            OutputLine::Normal(text) => self.text.push_str(text),
        }
    }

    pub fn push_text(&mut self, text: &str) {
        self.drop_progress();
        self.text.push_str(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.progress_start = None;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn drop_progress(&mut self) {
        if let Some(start) = self.progress_start.take() {
            self.text.truncate(start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutator_shell_core::relay::split_chunk;

    fn buffer_for(chunks: &[&str]) -> OutputBuffer {
        let mut buffer = OutputBuffer::default();
        for chunk in chunks {
            for line in split_chunk(chunk) {
                buffer.push(&line);
            }
        }
        buffer
    }

    #[test]
    fn test_spinner_redraws_in_place() {
        let buffer = buffer_for(&["Mutating Foo.java", "\r|", "\r/", "\r-"]);
        assert_eq!(buffer.as_str(), "Mutating Foo.java\n-");
    }

    #[test]
    fn test_normal_line_replaces_spinner() {
        let buffer = buffer_for(&["\r|", "  Saved Foo.java  "]);
        assert_eq!(buffer.as_str(), "Saved Foo.java\n");
    }

    #[test]
    fn test_trailing_empty_segment_is_kept() {
        let buffer = buffer_for(&["one\n"]);
        assert_eq!(buffer.as_str(), "one\n\n");
    }

    #[test]
    fn test_clear_resets_progress() {
        let mut buffer = buffer_for(&["\r|"]);
        buffer.clear();
        buffer.push_text("fresh");
        assert_eq!(buffer.as_str(), "fresh");
        assert!(!buffer.is_empty());
    }
}
