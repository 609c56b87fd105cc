use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Minimal multi-line text buffer for the compose screen. Cursor position is
/// a char index into the whole buffer (0 = before the first char); lines are
/// only a rendering concern.
pub struct TextEditor {
    text: String,
    cursor: usize,
}

impl TextEditor {
    pub fn new(text: &str) -> Self {
        let cursor = text.chars().count();
        Self {
            text: text.to_string(),
            cursor,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// (line, column) of the cursor, both 0-based, for rendering.
    pub fn cursor_position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    pub fn handle(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right => {
                if self.cursor < self.text.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Up => self.move_vertically(-1),
            KeyCode::Down => self.move_vertically(1),
            KeyCode::Home => self.cursor = self.line_start(self.cursor),
            KeyCode::End => self.cursor = self.line_end(self.cursor),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let byte_offset = self.char_to_byte(self.cursor - 1);
                    let ch = self.text[byte_offset..].chars().next().unwrap();
                    self.text
                        .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.chars().count() {
                    let byte_offset = self.char_to_byte(self.cursor);
                    let ch = self.text[byte_offset..].chars().next().unwrap();
                    self.text
                        .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
                }
            }
            KeyCode::Enter => self.insert('\n'),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(ch);
            }
            _ => {}
        }
    }

    fn insert(&mut self, ch: char) {
        let byte_offset = self.char_to_byte(self.cursor);
        self.text.insert(byte_offset, ch);
        self.cursor += 1;
    }

    fn line_start(&self, from: usize) -> usize {
        let mut start = 0;
        for (i, ch) in self.text.chars().take(from).enumerate() {
            if ch == '\n' {
                start = i + 1;
            }
        }
        start
    }

    fn line_end(&self, from: usize) -> usize {
        let total = self.text.chars().count();
        for (i, ch) in self.text.chars().enumerate().skip(from) {
            if ch == '\n' {
                return i;
            }
        }
        total
    }

    fn move_vertically(&mut self, delta: isize) {
        let (line, col) = self.cursor_position();
        let target_line = if delta < 0 {
            match line.checked_sub(delta.unsigned_abs()) {
                Some(l) => l,
                None => return,
            }
        } else {
            line + delta as usize
        };

        let mut current_line = 0;
        let mut line_start_idx = 0;
        for (i, ch) in self.text.chars().enumerate() {
            if current_line == target_line {
                break;
            }
            if ch == '\n' {
                current_line += 1;
                line_start_idx = i + 1;
            }
        }
        if current_line != target_line {
            return;
        }

        let line_len = self.line_end(line_start_idx) - line_start_idx;
        self.cursor = line_start_idx + col.min(line_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut editor = TextEditor::new("");
        for ch in "abc".chars() {
            editor.handle(key(KeyCode::Char(ch)));
        }
        editor.handle(key(KeyCode::Left));
        editor.handle(key(KeyCode::Char('X')));
        assert_eq!(editor.value(), "abXc");
    }

    #[test]
    fn test_enter_inserts_newline() {
        let mut editor = TextEditor::new("ab");
        editor.handle(key(KeyCode::Enter));
        assert_eq!(editor.value(), "ab\n");
    }

    #[test]
    fn test_backspace_handles_multibyte() {
        let mut editor = TextEditor::new("Füße");
        editor.handle(key(KeyCode::Backspace));
        editor.handle(key(KeyCode::Backspace));
        assert_eq!(editor.value(), "Fü");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut editor = TextEditor::new("longer line\nab");
        // Cursor at end of "ab" (col 2); moving up keeps col 2
        editor.handle(key(KeyCode::Up));
        editor.handle(key(KeyCode::Char('X')));
        assert_eq!(editor.value(), "loXnger line\nab");
    }

    #[test]
    fn test_cursor_position_tracks_lines() {
        let editor = TextEditor::new("ab\ncd");
        assert_eq!(editor.cursor_position(), (1, 2));
    }
}
