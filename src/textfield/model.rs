//! Core model for the textfield component.

use super::chrome::Chrome;
use super::filters::FilterPipeline;
use super::snapshot::Snapshot;
use super::surface::EditSurface;
use super::tasks::DeferredQueue;
use super::types::{
    BindingListener, ChangedCallback, FocusChangedCallback, ValidationCheck, Variant,
};
use super::watcher::{EditGuard, GuardedWatcher, Watcher};
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use tracing::debug;

/// Construction-time configuration for a field.
///
/// Every option has a default; a plain `Options::default()` yields an empty,
/// enabled, single-line boxed field with validation disabled.
///
/// # Examples
///
/// ```rust
/// use bubbletea_formfield::textfield::{Model, Options, Variant};
///
/// let field = Model::with_options(Options {
///     hint_text: "Name".to_string(),
///     initial_value: "Ada".to_string(),
///     validation_enabled: true,
///     variant: Variant::Outlined,
///     ..Options::default()
/// });
/// assert_eq!(field.value(), "Ada");
/// ```
pub struct Options {
    /// Hint label shown above the input row.
    pub hint_text: String,
    /// Initial text content.
    pub initial_value: String,
    /// Initial error message (shown only once validation fails).
    pub error_text: String,
    /// Trailing decoration text.
    pub suffix_text: String,
    /// Inclusion filter alphabet; `None` leaves input unrestricted.
    pub allowed_characters: Option<String>,
    /// Maximum number of characters; `None` is unbounded.
    pub max_characters: Option<usize>,
    /// Start icon glyph.
    pub start_icon: Option<String>,
    /// End icon glyph.
    pub end_icon: Option<String>,
    /// Start icon color.
    pub start_icon_color: Option<String>,
    /// End icon color.
    pub end_icon_color: Option<String>,
    /// Background fill color for the boxed variant.
    pub background_color: Option<String>,
    /// Box stroke color for the outlined variant.
    pub box_stroke_color: Option<String>,
    /// Box stroke width; zero disables the stroke.
    pub box_stroke_width: u32,
    /// Whether `validate()` runs the registered checks.
    pub validation_enabled: bool,
    /// Single-line layout constraint.
    pub single_line: bool,
    /// Minimum line count.
    pub min_lines: u32,
    /// Maximum line count. Stored independently of `single_line` and
    /// round-trips through persistence unchanged.
    pub max_lines: u32,
    /// Whether the character counter row renders.
    pub character_counter_enabled: bool,
    /// Whether the field accepts input.
    pub enabled: bool,
    /// Visual variant. Raw configuration codes go through
    /// [`Variant::from_code`], which rejects unknown codes.
    pub variant: Variant,
    /// Passthrough platform flag set; carried and persisted unchanged.
    pub input_type: u32,
    /// Passthrough platform flag set; carried and persisted unchanged.
    pub ime_options: u32,
    /// Passthrough platform flag set; carried and persisted unchanged.
    pub text_alignment: u32,
    /// Passthrough platform flag set; carried and persisted unchanged.
    pub text_direction: u32,
    /// Text size passthrough.
    pub text_size: u32,
    /// Viewport width of the editable area in characters; zero is unbounded.
    pub width: i32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hint_text: String::new(),
            initial_value: String::new(),
            error_text: String::new(),
            suffix_text: String::new(),
            allowed_characters: None,
            max_characters: None,
            start_icon: None,
            end_icon: None,
            start_icon_color: None,
            end_icon_color: None,
            background_color: None,
            box_stroke_color: None,
            box_stroke_width: 1,
            validation_enabled: false,
            single_line: true,
            min_lines: 1,
            max_lines: 1,
            character_counter_enabled: false,
            enabled: true,
            variant: Variant::default(),
            input_type: 0,
            ime_options: 0,
            text_alignment: 0,
            text_direction: 0,
            text_size: 14,
            width: 0,
        }
    }
}

/// A material-style form text field.
///
/// The model is the canonical owner of the field's value and configuration.
/// It composes two capability-scoped collaborators, the editable
/// [`EditSurface`](super::surface::EditSurface) and the decorative
/// [`Chrome`](super::chrome::Chrome), and is the only component that
/// mutates either in response to external or widget-originated events,
/// which is what keeps the three in sync without feedback loops.
///
/// # Examples
///
/// ```rust
/// use bubbletea_formfield::textfield::{Model, ValidationCheck};
///
/// let mut field = Model::new();
/// field.set_validation_enabled(true);
/// field.add_validation_check(ValidationCheck::new("not-empty", |s| !s.is_empty()));
/// field.set_error("value is required");
///
/// assert!(!field.validate());
/// field.set_value("hello");
/// assert!(field.validate());
/// ```
pub struct Model {
    // Canonical field state.
    pub(super) value: String,
    pub(super) hint_text: String,
    pub(super) error_text: String,
    pub(super) suffix_text: String,
    pub(super) allowed_characters: Option<String>,
    pub(super) max_characters: Option<usize>,
    pub(super) min_lines: u32,
    pub(super) max_lines: u32,
    pub(super) single_line: bool,
    pub(super) input_type: u32,
    pub(super) ime_options: u32,
    pub(super) text_alignment: u32,
    pub(super) text_direction: u32,
    pub(super) text_size: u32,
    pub(super) variant: Variant,
    pub(super) validation_enabled: bool,
    pub(super) error_visible: bool,
    pub(super) enabled: bool,
    pub(super) focused: bool,

    // Collaborators.
    pub(super) surface: EditSurface,
    pub(super) chrome: Chrome,

    // Machinery.
    pub(super) guard: EditGuard,
    pub(super) watchers: Vec<GuardedWatcher<Box<dyn Watcher + Send>>>,
    pub(super) filters: FilterPipeline,
    pub(super) checks: Vec<ValidationCheck>,
    pub(super) changed_callbacks: Vec<ChangedCallback>,
    pub(super) binding_listener: Option<BindingListener>,
    pub(super) focus_changed: Option<FocusChangedCallback>,
    pub(super) deferred: DeferredQueue,
    pub(super) attached: bool,
}

/// Creates a field with default options.
pub fn new() -> Model {
    Model::new()
}

impl Model {
    /// Creates a field with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates a field from a full option set and runs the construction-time
    /// initialization pass.
    pub fn with_options(options: Options) -> Self {
        let mut chrome = Chrome::new();
        chrome.start_icon = options.start_icon;
        chrome.end_icon = options.end_icon;
        chrome.start_icon_color = options.start_icon_color;
        chrome.end_icon_color = options.end_icon_color;
        chrome.box_stroke_color = options.box_stroke_color;
        chrome.box_stroke_width = options.box_stroke_width;
        chrome.background_color = options.background_color;
        chrome.character_counter_enabled = options.character_counter_enabled;

        let initial_error = options.error_text;
        let mut model = Self {
            value: String::new(),
            hint_text: options.hint_text,
            error_text: String::new(),
            suffix_text: options.suffix_text,
            allowed_characters: options.allowed_characters,
            max_characters: options.max_characters,
            min_lines: options.min_lines,
            max_lines: options.max_lines,
            single_line: options.single_line,
            input_type: options.input_type,
            ime_options: options.ime_options,
            text_alignment: options.text_alignment,
            text_direction: options.text_direction,
            text_size: options.text_size,
            variant: options.variant,
            validation_enabled: options.validation_enabled,
            error_visible: false,
            enabled: true,
            focused: false,
            surface: EditSurface::new(),
            chrome,
            guard: EditGuard::new(),
            watchers: Vec::new(),
            filters: FilterPipeline::default(),
            checks: Vec::new(),
            changed_callbacks: Vec::new(),
            binding_listener: None,
            focus_changed: None,
            deferred: DeferredQueue::default(),
            attached: true,
        };
        model.surface.set_width(options.width);
        model.init_decoration();
        model.set_value(&options.initial_value);
        // Applied after the initial value pass so a successful validate()
        // does not wipe the configured message.
        model.error_text = initial_error;
        model.set_enabled(options.enabled);
        model
    }

    /// Re-runs the construction-time decoration and filter setup from the
    /// current state. Also replayed after a snapshot restore.
    pub(super) fn init_decoration(&mut self) {
        self.chrome.refresh_styles(self.variant);
        self.chrome.hint_floating = self.focused || !self.value.is_empty();
        self.filters
            .rebuild(self.allowed_characters.as_deref(), self.max_characters);
    }

    /// Captures the full field state for lifecycle persistence.
    pub fn capture(&self) -> Snapshot {
        Snapshot {
            value: self.value.clone(),
            hint_text: self.hint_text.clone(),
            error_text: self.error_text.clone(),
            suffix_text: self.suffix_text.clone(),
            allowed_characters: self.allowed_characters.clone(),
            max_characters: self.max_characters.map(|m| m as u64),
            min_lines: self.min_lines,
            max_lines: self.max_lines,
            single_line: self.single_line,
            input_type: self.input_type,
            ime_options: self.ime_options,
            text_alignment: self.text_alignment,
            text_direction: self.text_direction,
            text_size: self.text_size,
            variant_code: self.variant.code(),
            start_icon: self.chrome.start_icon.clone(),
            end_icon: self.chrome.end_icon.clone(),
            start_icon_color: self.chrome.start_icon_color.clone(),
            end_icon_color: self.chrome.end_icon_color.clone(),
            box_stroke_color: self.chrome.box_stroke_color.clone(),
            box_stroke_width: self.chrome.box_stroke_width,
            background_color: self.chrome.background_color.clone(),
            end_icon_visible: self.chrome.end_icon_visible,
            character_counter_enabled: self.chrome.character_counter_enabled,
            enabled: self.enabled,
            validation_enabled: self.validation_enabled,
            error_visible: self.error_visible,
            focused: self.focused,
            surface: self.surface.state(),
            chrome: self.chrome.save_state(),
        }
    }

    /// Restores a previously captured field state.
    ///
    /// Reconstructs the canonical state wholesale, replays the
    /// construction-time decoration pass, reapplies the enabled state and
    /// refocuses when the field was focused at capture time. Unknown variant
    /// codes in the snapshot surface as a configuration error.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), super::types::ConfigError> {
        let variant = Variant::from_code(snapshot.variant_code)?;
        debug!(value_len = snapshot.value.len(), "restoring field snapshot");

        self.value = snapshot.value;
        self.hint_text = snapshot.hint_text;
        self.error_text = snapshot.error_text;
        self.suffix_text = snapshot.suffix_text;
        self.allowed_characters = snapshot.allowed_characters;
        self.max_characters = snapshot
            .max_characters
            .map(|m| usize::try_from(m).unwrap_or(usize::MAX));
        self.min_lines = snapshot.min_lines;
        self.max_lines = snapshot.max_lines;
        self.single_line = snapshot.single_line;
        self.input_type = snapshot.input_type;
        self.ime_options = snapshot.ime_options;
        self.text_alignment = snapshot.text_alignment;
        self.text_direction = snapshot.text_direction;
        self.text_size = snapshot.text_size;
        self.variant = variant;
        self.validation_enabled = snapshot.validation_enabled;
        self.error_visible = snapshot.error_visible;

        self.chrome.start_icon = snapshot.start_icon;
        self.chrome.end_icon = snapshot.end_icon;
        self.chrome.start_icon_color = snapshot.start_icon_color;
        self.chrome.end_icon_color = snapshot.end_icon_color;
        self.chrome.box_stroke_color = snapshot.box_stroke_color;
        self.chrome.box_stroke_width = snapshot.box_stroke_width;
        self.chrome.background_color = snapshot.background_color;
        self.chrome.end_icon_visible = snapshot.end_icon_visible;
        self.chrome.character_counter_enabled = snapshot.character_counter_enabled;

        self.surface.set_text(&self.value);
        self.surface.restore_state(snapshot.surface);
        self.chrome.restore_state(&snapshot.chrome);

        self.focused = snapshot.focused;
        self.init_decoration();
        self.chrome.error_row_visible = self.error_visible;
        self.set_enabled(snapshot.enabled);
        if snapshot.focused {
            self.show_keyboard();
        }
        Ok(())
    }

    /// Marks the field as torn down. Deferred tasks queued before or after
    /// this point become no-ops.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Reports whether the field is still attached.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Queues work for the next update pass.
    pub(super) fn defer(&mut self, task: impl FnOnce(&mut Model) + Send + 'static) {
        self.deferred.push(Box::new(task));
    }

    /// Runs the tasks queued up to this pass. Every task checks the
    /// attached flag, so work deferred against a torn-down field is skipped.
    pub(super) fn drain_deferred(&mut self) {
        if self.deferred.is_empty() {
            return;
        }
        for task in self.deferred.take() {
            if self.attached {
                task(self);
            }
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl crate::Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.set_focused(true);
        None
    }

    fn blur(&mut self) {
        self.set_focused(false);
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
