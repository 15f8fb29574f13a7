//! View rendering for the decorated field.

use super::model::Model;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

impl Model {
    /// Renders the field in its current state: floating hint row, decorated
    /// input row, then error and counter rows as applicable.
    pub fn view(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(4);

        if self.chrome.hint_floating {
            if let Some(hint) = self.chrome.render_hint(&self.hint_text) {
                rows.push(hint);
            }
        }

        rows.push(
            self.chrome
                .render_input_row(&self.content_view(), &self.suffix_text),
        );

        if let Some(error) = self.chrome.render_error(&self.error_text) {
            rows.push(error);
        }
        if let Some(counter) = self
            .chrome
            .render_counter(self.value.chars().count(), self.max_characters)
        {
            rows.push(counter);
        }

        rows.join("\n")
    }

    /// Renders the editable content: the visible text window with a cursor
    /// block while focused, or the hint as an inline placeholder while the
    /// field is empty.
    fn content_view(&self) -> String {
        if self.value.is_empty() && !self.chrome.hint_floating && !self.hint_text.is_empty() {
            return Style::new()
                .foreground(Color::from("240"))
                .render(&self.hint_text);
        }

        let (visible, pos) = self.surface.visible();
        let chars: Vec<char> = visible.chars().collect();
        let mut out = String::new();

        if !self.focused {
            out.push_str(&visible);
        } else {
            let cursor_style = Style::new().reverse(true);
            let before: String = chars.iter().take(pos).collect();
            out.push_str(&before);
            if pos < chars.len() {
                out.push_str(&cursor_style.render(&chars[pos].to_string()));
                let after: String = chars.iter().skip(pos + 1).collect();
                out.push_str(&after);
            } else {
                out.push_str(&cursor_style.render(" "));
            }
        }

        let width = self.surface.viewport_width();
        if width > 0 {
            let rendered = visible.width() + usize::from(self.focused && pos >= chars.len());
            if rendered < width as usize {
                out.push_str(&" ".repeat(width as usize - rendered));
            }
        }
        out
    }
}
