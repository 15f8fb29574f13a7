//! Key handling and the update pass.

use super::model::Model;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

impl Model {
    /// Processes a message against the field.
    ///
    /// Key messages edit the surface through the filter pipeline while the
    /// field is focused and enabled; registered watchers observe the
    /// committed change, and the text is then synced back into the
    /// canonical value. Deferred work queued up to this pass runs at the
    /// end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_formfield::textfield::Model;
    /// use bubbletea_formfield::Component;
    /// use bubbletea_rs::KeyMsg;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let mut field = Model::new();
    /// field.focus();
    /// field.update(Box::new(KeyMsg {
    ///     key: KeyCode::Char('h'),
    ///     modifiers: KeyModifiers::NONE,
    /// }));
    /// assert_eq!(field.value(), "h");
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.focused && self.is_enabled() {
                // One guarded pass per external event: an edit performed by
                // a change listener cannot re-enter the key handler.
                if let Some(_pass) = self.guard.try_enter() {
                    let previous = self.surface.text();
                    self.handle_key(key_msg);
                    let current = self.surface.text();
                    if current != previous {
                        self.notify_watchers(&previous, &current);
                    }
                    self.sync_from_surface();
                }
            }
        }
        self.drain_deferred();
        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) {
        match key_msg.key {
            KeyCode::Backspace => self.surface.delete_backward(),
            KeyCode::Delete => self.surface.delete_forward(),
            KeyCode::Left => self.surface.move_left(),
            KeyCode::Right => self.surface.move_right(),
            KeyCode::Home => self.surface.cursor_start(),
            KeyCode::End => self.surface.cursor_end(),
            KeyCode::Enter => {
                if !self.is_single_line() {
                    self.insert_from_input("\n");
                }
            }
            KeyCode::Char(ch) => {
                // Accept when no control/alt modifiers; shift is encoded in
                // the char case.
                if !key_msg.modifiers.contains(KeyModifiers::CONTROL)
                    && !key_msg.modifiers.contains(KeyModifiers::ALT)
                {
                    self.insert_from_input(&ch.to_string());
                }
            }
            _ => {}
        }
    }

    /// Commits a proposed insertion span: sanitize the span, insert it at
    /// the cursor, then clamp the resulting total to the character cap.
    pub(super) fn insert_from_input(&mut self, span: &str) {
        let sanitized = self.filters.filter_insertion(span);
        if sanitized.is_empty() {
            return;
        }
        self.surface.insert_at_cursor(&sanitized);
        let total = self.surface.text();
        let capped = self.filters.cap(&total);
        if capped != total {
            let cursor = self.surface.position();
            self.surface.set_text(&capped);
            self.surface.set_cursor(cursor);
        }
    }
}
