/// Single-line text editing state for a terminal form field.
///
/// `cursor_pos` is a byte offset, always on a char boundary.
#[derive(Debug, Default, Clone)]
pub struct LineEditor {
    pub cursor_pos: usize,
}

/// What a key did to the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Text changed; carries the new value
    Changed(String),
    /// Only the cursor moved
    Moved,
    Ignored,
}

impl LineEditor {
    /// Place the cursor at the end of `text`
    pub fn at_end(text: &str) -> Self {
        Self {
            cursor_pos: text.len(),
        }
    }

    /// Keep the cursor valid after the text was replaced from outside
    pub fn clamp(&mut self, text: &str) {
        if self.cursor_pos > text.len() || !text.is_char_boundary(self.cursor_pos) {
            self.cursor_pos = text.len();
        }
    }

    pub fn insert(&mut self, text: &str, c: char) -> Edit {
        self.clamp(text);
        let mut next = text.to_string();
        next.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        Edit::Changed(next)
    }

    pub fn backspace(&mut self, text: &str) -> Edit {
        self.clamp(text);
        if self.cursor_pos == 0 {
            return Edit::Ignored;
        }
        // Find the previous character boundary
        let prev = text[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut next = text.to_string();
        next.remove(prev);
        self.cursor_pos = prev;
        Edit::Changed(next)
    }

    pub fn delete(&mut self, text: &str) -> Edit {
        self.clamp(text);
        if self.cursor_pos >= text.len() {
            return Edit::Ignored;
        }
        let mut next = text.to_string();
        next.remove(self.cursor_pos);
        Edit::Changed(next)
    }

    pub fn left(&mut self, text: &str) -> Edit {
        self.clamp(text);
        if self.cursor_pos == 0 {
            return Edit::Ignored;
        }
        self.cursor_pos = text[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        Edit::Moved
    }

    pub fn right(&mut self, text: &str) -> Edit {
        self.clamp(text);
        if self.cursor_pos >= text.len() {
            return Edit::Ignored;
        }
        self.cursor_pos = text[self.cursor_pos..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor_pos + i)
            .unwrap_or(text.len());
        Edit::Moved
    }

    pub fn home(&mut self) -> Edit {
        self.cursor_pos = 0;
        Edit::Moved
    }

    pub fn end(&mut self, text: &str) -> Edit {
        self.cursor_pos = text.len();
        Edit::Moved
    }

    /// Display column of the cursor
    pub fn column(&self, text: &str) -> u16 {
        let end = self.cursor_pos.min(text.len());
        let prefix = text.get(..end).unwrap_or(text);
        unicode_width::UnicodeWidthStr::width(prefix) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_inserts_at_cursor() {
        let mut ed = LineEditor::at_end("Acme");
        ed.left("Acme");
        assert_eq!(ed.insert("Acme", 'X'), Edit::Changed("AcmXe".into()));
        assert_eq!(ed.cursor_pos, 4);
    }

    #[test]
    fn backspace_respects_multibyte_chars() {
        let text = "Café";
        let mut ed = LineEditor::at_end(text);
        assert_eq!(ed.backspace(text), Edit::Changed("Caf".into()));
        assert_eq!(ed.cursor_pos, 3);
    }

    #[test]
    fn edges_are_ignored() {
        let mut ed = LineEditor::default();
        assert_eq!(ed.backspace("abc"), Edit::Ignored);
        assert_eq!(ed.left("abc"), Edit::Ignored);
        ed.end("abc");
        assert_eq!(ed.delete("abc"), Edit::Ignored);
        assert_eq!(ed.right("abc"), Edit::Ignored);
    }

    #[test]
    fn clamp_after_external_reset() {
        let mut ed = LineEditor::at_end("Globex");
        ed.clamp("");
        assert_eq!(ed.cursor_pos, 0);
        assert_eq!(ed.column(""), 0);
    }

    #[test]
    fn column_counts_display_width() {
        let ed = LineEditor::at_end("日本");
        assert_eq!(ed.column("日本"), 4);
    }
}
