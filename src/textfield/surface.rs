//! The editable text surface.
//!
//! The raw text-entry collaborator behind the decorated chrome. The field
//! composes it behind a narrow interface (text get/set, cursor movement,
//! and its own sub-state for persistence) rather than inheriting from a
//! platform widget.

/// The surface's own persistable sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceState {
    /// Cursor position as a character index.
    pub cursor: u32,
    /// Horizontal scroll offset of the visible window.
    pub offset: u32,
}

/// A single editable text buffer with a cursor and a horizontal viewport.
#[derive(Debug, Default)]
pub struct EditSurface {
    value: Vec<char>,
    pos: usize,
    width: i32,
    offset: usize,
    offset_right: usize,
}

impl EditSurface {
    /// Creates an empty surface with no viewport limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the displayed text.
    pub fn text(&self) -> String {
        self.value.iter().collect()
    }

    /// Returns the text length in characters.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Reports whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the displayed text.
    ///
    /// The cursor moves to the end when it would otherwise fall outside the
    /// new text.
    pub fn set_text(&mut self, text: &str) {
        let was_empty = self.value.is_empty();
        self.value = text.chars().collect();
        if (self.pos == 0 && was_empty) || self.pos > self.value.len() {
            self.pos = self.value.len();
        }
        self.handle_overflow();
    }

    /// Inserts text at the cursor, advancing the cursor past it.
    pub fn insert_at_cursor(&mut self, text: &str) {
        for ch in text.chars() {
            self.value.insert(self.pos, ch);
            self.pos += 1;
        }
        self.handle_overflow();
    }

    /// Deletes the character before the cursor, if any.
    pub fn delete_backward(&mut self) {
        if !self.value.is_empty() && self.pos > 0 {
            self.value.remove(self.pos - 1);
            self.pos -= 1;
            self.handle_overflow();
        }
    }

    /// Deletes the character under the cursor, if any.
    pub fn delete_forward(&mut self) {
        if self.pos < self.value.len() {
            self.value.remove(self.pos);
            self.handle_overflow();
        }
    }

    /// Returns the cursor position as a character index.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamping to the text length.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
        self.handle_overflow();
    }

    /// Moves the cursor to the beginning of the text.
    pub fn cursor_start(&mut self) {
        self.set_cursor(0);
    }

    /// Moves the cursor to the end of the text.
    pub fn cursor_end(&mut self) {
        self.set_cursor(self.value.len());
    }

    /// Moves the cursor one character left.
    pub fn move_left(&mut self) {
        if self.pos > 0 {
            self.set_cursor(self.pos - 1);
        }
    }

    /// Moves the cursor one character right.
    pub fn move_right(&mut self) {
        if self.pos < self.value.len() {
            self.set_cursor(self.pos + 1);
        }
    }

    /// Sets the viewport width in characters. Zero means unbounded.
    pub fn set_width(&mut self, width: i32) {
        self.width = width;
        self.handle_overflow();
    }

    /// Returns the viewport width in characters.
    pub fn viewport_width(&self) -> i32 {
        self.width
    }

    /// Returns the visible slice of the text and the cursor position within
    /// it, for rendering.
    pub(super) fn visible(&self) -> (String, usize) {
        let end = self.offset_right.min(self.value.len());
        let slice: String = self.value[self.offset..end.max(self.offset)].iter().collect();
        (slice, self.pos.saturating_sub(self.offset))
    }

    /// Captures the surface's own sub-state.
    pub fn state(&self) -> SurfaceState {
        SurfaceState {
            cursor: self.pos as u32,
            offset: self.offset as u32,
        }
    }

    /// Restores a previously captured sub-state, clamped to the current text.
    pub fn restore_state(&mut self, state: SurfaceState) {
        self.pos = (state.cursor as usize).min(self.value.len());
        self.offset = (state.offset as usize).min(self.value.len());
        self.handle_overflow();
    }

    /// Keeps the cursor inside the visible window when a viewport width is
    /// set, scrolling the window as needed.
    fn handle_overflow(&mut self) {
        if self.width <= 0 || self.value.len() <= self.width as usize {
            self.offset = 0;
            self.offset_right = self.value.len();
            return;
        }

        self.offset_right = self.offset_right.min(self.value.len());

        if self.pos < self.offset {
            self.offset = self.pos;
            self.offset_right = (self.offset + self.width as usize).min(self.value.len());
        } else if self.pos >= self.offset_right {
            self.offset_right = self.pos;
            self.offset = self.offset_right.saturating_sub(self.width as usize);
        }
    }
}
