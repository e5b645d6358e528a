//! Input field handling for the terminal user interface.

/// A single-line text input with a cursor.
///
/// The cursor counts characters, not bytes, so editing stays on char
/// boundaries and the cursor column maps directly onto the rendered cell.
#[derive(Clone)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        let i = self.byte_index();
        self.value.insert(i, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let i = self.byte_index();
            self.value.remove(i);
        }
    }

    /// Delete the character at the cursor position.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let i = self.byte_index();
            self.value.remove(i);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Empty the field and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Replace the field contents, cursor at the end.
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = value.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::InputField;

    #[test]
    fn editing_keeps_char_boundaries() {
        let mut field = InputField::new();
        for c in "café".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "café");
        assert_eq!(field.cursor, 4);

        field.backspace();
        assert_eq!(field.value, "caf");

        field.move_left();
        field.move_left();
        field.insert_char('x');
        assert_eq!(field.value, "cxaf");

        field.delete();
        assert_eq!(field.value, "cxf");
    }

    #[test]
    fn set_and_clear_position_the_cursor() {
        let mut field = InputField::new();
        field.set("2024-05-01");
        assert_eq!(field.cursor, 10);
        field.clear();
        assert_eq!(field.value, "");
        assert_eq!(field.cursor, 0);
    }
}
