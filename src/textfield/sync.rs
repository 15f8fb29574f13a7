//! State synchronization between the canonical model, the editable surface,
//! the decorated chrome and the binding channel.
//!
//! These are the only mutation paths into the field state. Value changes
//! propagate in at most one direction per mutation: a programmatic set
//! pushes into the surface only when the surface text differs, and a
//! surface-originated edit feeds back into the model only when the model
//! value differs, so neither side ever echoes the other.

use super::filters::FilterFn;
use super::model::Model;
use super::types::{BindingListener, ChangedCallback, FocusChangedCallback};
use super::watcher::{GuardedWatcher, Watcher};
use tracing::trace;

impl Model {
    /// Returns the current value. Never absent; an unset value is the empty
    /// string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the value, running it through the filter pipeline.
    ///
    /// A no-op when both the canonical value and the displayed text already
    /// equal the filtered candidate, so repeated calls with the same value
    /// fire the change listeners at most once. Otherwise the model updates,
    /// pushes to the surface only if the surface differs, fires every change
    /// listener with `(new, old)`, notifies the binding listener, and
    /// re-validates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_formfield::textfield::Model;
    ///
    /// let mut field = Model::new();
    /// field.set_value("hello");
    /// assert_eq!(field.value(), "hello");
    /// ```
    pub fn set_value(&mut self, s: &str) {
        let candidate = self.filters.apply(s);
        if self.value == candidate && self.surface.text() == candidate {
            return;
        }
        trace!(len = candidate.len(), "field value changing");
        let old = std::mem::replace(&mut self.value, candidate.clone());
        if self.surface.text() != candidate {
            self.surface.set_text(&candidate);
            self.notify_watchers(&old, &candidate);
        }
        self.chrome.hint_floating = self.focused || !self.value.is_empty();

        for callback in self.changed_callbacks.iter_mut() {
            (callback.callback)(&candidate, &old);
        }
        if let Some(listener) = self.binding_listener.as_mut() {
            listener(&candidate);
        }
        self.validate();
    }

    /// Feeds a surface-originated edit back into the model. This is the only
    /// widget-to-state path; the equality check closes the propagation loop.
    pub(super) fn sync_from_surface(&mut self) {
        let current = self.surface.text();
        if current != self.value {
            self.set_value(&current);
        }
    }

    /// Returns the stored error message, or the empty string when none is
    /// set.
    pub fn error(&self) -> &str {
        &self.error_text
    }

    /// Sets the error message shown when validation fails. Idempotent; an
    /// empty string clears the message.
    pub fn set_error(&mut self, error: &str) {
        if self.error_text != error {
            self.error_text = error.to_string();
        }
    }

    /// Returns the hint label.
    pub fn hint_text(&self) -> &str {
        &self.hint_text
    }

    /// Sets the hint label. An empty hint collapses the hint row.
    pub fn set_hint_text(&mut self, hint: &str) {
        self.hint_text = hint.to_string();
        self.chrome.hint_floating = self.focused || !self.value.is_empty();
    }

    /// Returns the suffix decoration text.
    pub fn suffix_text(&self) -> &str {
        &self.suffix_text
    }

    /// Sets the suffix decoration text.
    pub fn set_suffix_text(&mut self, suffix: &str) {
        self.suffix_text = suffix.to_string();
    }

    /// Returns the inclusion filter alphabet, if one is set.
    pub fn allowed_characters(&self) -> Option<&str> {
        self.allowed_characters.as_deref()
    }

    /// Sets or clears the inclusion filter alphabet and re-derives the
    /// filter pipeline.
    pub fn set_allowed_characters(&mut self, allowed: Option<&str>) {
        self.allowed_characters = allowed.map(str::to_string);
        self.filters
            .rebuild(self.allowed_characters.as_deref(), self.max_characters);
    }

    /// Returns the character cap, if one is set.
    pub fn max_characters(&self) -> Option<usize> {
        self.max_characters
    }

    /// Sets or clears the character cap and re-derives the filter pipeline.
    pub fn set_max_characters(&mut self, max: Option<usize>) {
        self.max_characters = max;
        self.filters
            .rebuild(self.allowed_characters.as_deref(), max);
    }

    /// Replaces the caller-supplied input filters.
    pub fn set_input_filters(&mut self, filters: Vec<FilterFn>) {
        self.filters.set_custom(filters);
        self.filters
            .rebuild(self.allowed_characters.as_deref(), self.max_characters);
    }

    /// Enables or disables the character counter row.
    pub fn set_character_counter_enabled(&mut self, enabled: bool) {
        self.chrome.character_counter_enabled = enabled;
    }

    /// Sets the start icon glyph.
    pub fn set_start_icon(&mut self, icon: &str) {
        self.chrome.start_icon = Some(icon.to_string());
        self.chrome.refresh_styles(self.variant);
    }

    /// Sets the end icon glyph.
    pub fn set_end_icon(&mut self, icon: &str) {
        self.chrome.end_icon = Some(icon.to_string());
        self.chrome.refresh_styles(self.variant);
    }

    /// Sets the start icon color.
    pub fn set_start_icon_color(&mut self, color: &str) {
        self.chrome.start_icon_color = Some(color.to_string());
        self.chrome.refresh_styles(self.variant);
    }

    /// Sets the end icon color.
    pub fn set_end_icon_color(&mut self, color: &str) {
        self.chrome.end_icon_color = Some(color.to_string());
        self.chrome.refresh_styles(self.variant);
    }

    /// Shows or hides the end icon.
    pub fn set_end_icon_visible(&mut self, visible: bool) {
        self.chrome.end_icon_visible = visible;
    }

    /// Sets the box stroke color.
    pub fn set_box_stroke_color(&mut self, color: &str) {
        self.chrome.box_stroke_color = Some(color.to_string());
        self.chrome.refresh_styles(self.variant);
    }

    /// Sets the box stroke width; zero disables the stroke.
    pub fn set_box_stroke_width(&mut self, width: u32) {
        self.chrome.box_stroke_width = width;
        self.chrome.refresh_styles(self.variant);
    }

    /// Sets the background fill color for the boxed variant.
    pub fn set_background_color(&mut self, color: &str) {
        self.chrome.background_color = Some(color.to_string());
        self.chrome.refresh_styles(self.variant);
    }

    /// Returns the maximum line count. Stored independently of the
    /// single-line constraint and round-trips through persistence.
    pub fn max_lines(&self) -> u32 {
        self.max_lines
    }

    /// Sets the maximum line count.
    pub fn set_max_lines(&mut self, max_lines: u32) {
        self.max_lines = max_lines;
    }

    /// Returns the minimum line count.
    pub fn min_lines(&self) -> u32 {
        self.min_lines
    }

    /// Sets the minimum line count.
    pub fn set_min_lines(&mut self, min_lines: u32) {
        self.min_lines = min_lines;
    }

    /// Reports whether the field is single-line.
    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    /// Sets the single-line constraint. Newline input is refused while set;
    /// the stored line counts are unaffected.
    pub fn set_single_line(&mut self, single_line: bool) {
        self.single_line = single_line;
    }

    /// Returns the input-type passthrough flag set.
    pub fn input_type(&self) -> u32 {
        self.input_type
    }

    /// Sets the input-type passthrough flag set.
    pub fn set_input_type(&mut self, input_type: u32) {
        self.input_type = input_type;
    }

    /// Sets the IME options passthrough flag set.
    pub fn set_ime_options(&mut self, ime_options: u32) {
        self.ime_options = ime_options;
    }

    /// Sets the text alignment passthrough flag set.
    pub fn set_text_alignment(&mut self, alignment: u32) {
        self.text_alignment = alignment;
    }

    /// Sets the text direction passthrough flag set.
    pub fn set_text_direction(&mut self, direction: u32) {
        self.text_direction = direction;
    }

    /// Sets the viewport width of the editable area in characters.
    pub fn set_width(&mut self, width: i32) {
        self.surface.set_width(width);
    }

    /// Reports whether the field accepts input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the field, cascading to the chrome and the
    /// surface. While disabled, edits are ignored and `validate()` always
    /// reports valid.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.chrome.enabled = enabled;
        self.chrome.refresh_styles(self.variant);
    }

    /// Moves the cursor to the start of the text.
    pub fn move_cursor_to_start(&mut self) {
        self.surface.cursor_start();
    }

    /// Moves the cursor to the end of the text.
    pub fn move_cursor_to_end(&mut self) {
        self.surface.cursor_end();
    }

    /// Moves the cursor to a character index, clamped to the text length.
    pub fn move_cursor_at_index(&mut self, index: usize) {
        self.surface.set_cursor(index);
    }

    /// Returns the cursor position as a character index.
    pub fn cursor_position(&self) -> usize {
        self.surface.position()
    }

    /// Requests focus on the next update pass, after the current layout
    /// pass has completed. A no-op if the field is detached by the time the
    /// pass runs.
    pub fn show_keyboard(&mut self) {
        self.defer(|field| {
            field.set_focused(true);
        });
    }

    /// Applies a focus change and queues its side effects for the next
    /// update pass.
    pub(super) fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        self.chrome.hint_floating = focused || !self.value.is_empty();
        self.defer(move |field| {
            if let Some(callback) = field.focus_changed.as_mut() {
                callback(focused);
            }
        });
    }

    /// Registers a focus-change callback, replacing any existing one.
    pub fn set_on_focus_changed(&mut self, callback: FocusChangedCallback) {
        self.focus_changed = Some(callback);
    }

    /// Registers an edit-lifecycle watcher.
    ///
    /// Watchers observe committed text changes from both keyboard edits and
    /// programmatic sets, receiving the before/during/after hooks once per
    /// change. Each watcher is wrapped in a
    /// [`GuardedWatcher`](super::watcher::GuardedWatcher), so a change
    /// landing while one of its hooks is mid-flight cannot re-invoke the
    /// hooks.
    pub fn add_watcher(&mut self, watcher: impl Watcher + Send + 'static) {
        self.watchers
            .push(GuardedWatcher::new(Box::new(watcher) as Box<dyn Watcher + Send>));
    }

    /// Dispatches the edit-lifecycle hooks for a committed text change.
    pub(super) fn notify_watchers(&mut self, before: &str, after: &str) {
        for watcher in self.watchers.iter_mut() {
            watcher.before_changed(before);
            watcher.text_changed(after);
            watcher.after_changed(after);
        }
    }

    /// Registers a value-change callback.
    pub fn add_changed_callback(&mut self, callback: ChangedCallback) {
        self.changed_callbacks.push(callback);
    }

    /// Registers a value-change callback, removing any existing callback
    /// with the same name first.
    pub fn add_or_replace_changed_callback(&mut self, callback: ChangedCallback) {
        self.changed_callbacks.retain(|c| c.name != callback.name);
        self.changed_callbacks.push(callback);
    }

    /// Removes the value-change callback with the given name, if present.
    pub fn remove_changed_callback(&mut self, name: &str) {
        self.changed_callbacks.retain(|c| c.name != name);
    }

    /// Pushes a value in through the two-way binding channel. `None` coerces
    /// to the empty string.
    pub fn push_value(&mut self, value: Option<&str>) {
        self.set_value(value.unwrap_or(""));
    }

    /// Pulls the current value out through the binding channel.
    pub fn pull_value(&self) -> &str {
        &self.value
    }

    /// Subscribes the binding channel's change-notification hook. It fires
    /// exactly once per externally observable value change, never for
    /// internal echo.
    pub fn set_binding_listener(&mut self, listener: BindingListener) {
        self.binding_listener = Some(listener);
    }
}
