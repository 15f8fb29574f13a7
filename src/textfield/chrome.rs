//! The decorated wrapper around the editable surface.
//!
//! Owns the visual chrome of the field (hint label, icons, suffix, error
//! row, character counter, box stroke) and the lipgloss styles that render
//! them. The field updates chrome properties through its setters and the
//! chrome rebuilds the affected styles immediately, so the next `view()`
//! pass reflects the change.

use super::types::Variant;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Sub-state keys written into the snapshot's keyed chrome map.
const KEY_ERROR_ROW: &str = "error_row";
const KEY_HINT_FLOATING: &str = "hint_floating";

/// Visual chrome state and styles for the decorated field.
pub struct Chrome {
    pub(super) start_icon: Option<String>,
    pub(super) end_icon: Option<String>,
    pub(super) start_icon_color: Option<String>,
    pub(super) end_icon_color: Option<String>,
    pub(super) box_stroke_color: Option<String>,
    pub(super) box_stroke_width: u32,
    pub(super) background_color: Option<String>,
    pub(super) end_icon_visible: bool,
    pub(super) character_counter_enabled: bool,
    /// Whether the error row is currently shown. Driven by `validate()`.
    pub(super) error_row_visible: bool,
    /// Whether the hint label is floating above the input row (non-empty
    /// value or focused field), material style.
    pub(super) hint_floating: bool,
    /// Mirrors the field's enabled state; a disabled chrome renders faint.
    pub(super) enabled: bool,

    hint_style: Style,
    error_style: Style,
    suffix_style: Style,
    counter_style: Style,
    start_icon_style: Style,
    end_icon_style: Style,
    input_style: Style,
}

impl Default for Chrome {
    fn default() -> Self {
        let mut chrome = Self {
            start_icon: None,
            end_icon: None,
            start_icon_color: None,
            end_icon_color: None,
            box_stroke_color: None,
            box_stroke_width: 1,
            background_color: None,
            end_icon_visible: true,
            character_counter_enabled: false,
            error_row_visible: false,
            hint_floating: false,
            enabled: true,
            hint_style: Style::new(),
            error_style: Style::new(),
            suffix_style: Style::new(),
            counter_style: Style::new(),
            start_icon_style: Style::new(),
            end_icon_style: Style::new(),
            input_style: Style::new(),
        };
        chrome.refresh_styles(Variant::Boxed);
        chrome
    }
}

impl Chrome {
    /// Creates chrome with default decoration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every style from the current decoration properties.
    ///
    /// Equivalent to the construction-time layout initialization; also
    /// re-run after a snapshot restore.
    pub(super) fn refresh_styles(&mut self, variant: Variant) {
        self.hint_style = Style::new().foreground(Color::from("245")).italic(true);
        self.error_style = Style::new().foreground(Color::from("1"));
        self.suffix_style = Style::new().foreground(Color::from("245"));
        self.counter_style = Style::new().foreground(Color::from("240"));

        self.start_icon_style = match &self.start_icon_color {
            Some(color) => Style::new().foreground(Color::from(color.as_str())),
            None => Style::new(),
        };
        self.end_icon_style = match &self.end_icon_color {
            Some(color) => Style::new().foreground(Color::from(color.as_str())),
            None => Style::new(),
        };

        let mut input = Style::new();
        match variant {
            Variant::Boxed => {
                if let Some(bg) = &self.background_color {
                    input = input.background(Color::from(bg.as_str()));
                }
            }
            Variant::Outlined => {
                if self.box_stroke_width > 0 {
                    input = input.border_style(lipgloss::normal_border());
                    if let Some(stroke) = &self.box_stroke_color {
                        input = input.border_foreground(Color::from(stroke.as_str()));
                    }
                }
            }
        }
        if !self.enabled {
            input = input.faint(true);
        }
        self.input_style = input;
    }

    /// Renders the hint row, or nothing for an empty hint.
    pub(super) fn render_hint(&self, hint: &str) -> Option<String> {
        if hint.is_empty() {
            return None;
        }
        Some(self.hint_style.render(hint))
    }

    /// Renders the error row shown under the input when validation failed.
    /// The row renders even for an empty message; visibility is a display
    /// toggle independent of message content.
    pub(super) fn render_error(&self, message: &str) -> Option<String> {
        if !self.error_row_visible {
            return None;
        }
        Some(self.error_style.render(message))
    }

    /// Renders the character counter, `len` or `len/max`.
    pub(super) fn render_counter(&self, len: usize, max: Option<usize>) -> Option<String> {
        if !self.character_counter_enabled {
            return None;
        }
        let text = match max {
            Some(max) => format!("{}/{}", len, max),
            None => len.to_string(),
        };
        Some(self.counter_style.render(&text))
    }

    /// Renders the input row: start icon, the editable content, suffix and
    /// end icon, wrapped in the variant's background or border style.
    pub(super) fn render_input_row(&self, content: &str, suffix: &str) -> String {
        let mut row = String::new();
        if let Some(icon) = &self.start_icon {
            row.push_str(&self.start_icon_style.render(icon));
            row.push(' ');
        }
        row.push_str(content);
        if !suffix.is_empty() {
            row.push(' ');
            row.push_str(&self.suffix_style.render(suffix));
        }
        if self.end_icon_visible {
            if let Some(icon) = &self.end_icon {
                row.push(' ');
                row.push_str(&self.end_icon_style.render(icon));
            }
        }
        self.input_style.render(&row)
    }

    /// Captures the chrome's own keyed sub-state.
    pub(super) fn save_state(&self) -> Vec<(String, Vec<u8>)> {
        vec![
            (KEY_ERROR_ROW.to_string(), vec![u8::from(self.error_row_visible)]),
            (
                KEY_HINT_FLOATING.to_string(),
                vec![u8::from(self.hint_floating)],
            ),
        ]
    }

    /// Restores a keyed sub-state map. Unknown keys are ignored so that
    /// snapshots from newer revisions restore what they can.
    pub(super) fn restore_state(&mut self, state: &[(String, Vec<u8>)]) {
        for (key, bytes) in state {
            let flag = bytes.first().copied().unwrap_or(0) != 0;
            match key.as_str() {
                KEY_ERROR_ROW => self.error_row_visible = flag,
                KEY_HINT_FLOATING => self.hint_floating = flag,
                _ => {}
            }
        }
    }
}
