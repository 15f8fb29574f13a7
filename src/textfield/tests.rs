//! Tests for the textfield component.

use super::*;
use crate::Component;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn press(field: &mut Model, key: KeyCode) {
    field.update(Box::new(KeyMsg {
        key,
        modifiers: KeyModifiers::NONE,
    }));
}

fn type_str(field: &mut Model, text: &str) {
    for ch in text.chars() {
        press(field, KeyCode::Char(ch));
    }
}

#[test]
fn value_is_never_absent() {
    let mut field = Model::new();
    assert_eq!(field.value(), "");

    field.push_value(None);
    assert_eq!(field.value(), "");

    field.set_value("hello");
    assert_eq!(field.value(), "hello");
    assert_eq!(field.pull_value(), "hello");

    field.push_value(None);
    assert_eq!(field.value(), "");
}

#[test]
fn set_value_is_idempotent_for_listeners() {
    let mut field = Model::new();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    field.add_changed_callback(ChangedCallback::new("count", move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));

    field.set_value("v");
    field.set_value("v");
    assert_eq!(fired.load(Ordering::Relaxed), 1);
}

#[test]
fn change_listeners_receive_new_and_old() {
    let mut field = Model::new();
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    field.add_changed_callback(ChangedCallback::new("record", move |new, old| {
        sink.lock().unwrap().push((new.to_string(), old.to_string()));
    }));

    field.set_value("a");
    field.set_value("ab");
    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            ("a".to_string(), "".to_string()),
            ("ab".to_string(), "a".to_string()),
        ]
    );
}

#[test]
fn add_or_replace_changed_callback_deduplicates_by_name() {
    let mut field = Model::new();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&first);
    field.add_changed_callback(ChangedCallback::new("cb", move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    let counter = Arc::clone(&second);
    field.add_or_replace_changed_callback(ChangedCallback::new("cb", move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));

    field.set_value("x");
    assert_eq!(first.load(Ordering::Relaxed), 0);
    assert_eq!(second.load(Ordering::Relaxed), 1);

    field.remove_changed_callback("cb");
    field.set_value("y");
    assert_eq!(second.load(Ordering::Relaxed), 1);
}

#[test]
fn typed_input_respects_allow_list() {
    let mut field = Model::with_options(Options {
        allowed_characters: Some("abc".to_string()),
        ..Options::default()
    });
    field.focus();
    type_str(&mut field, "a1b2c3");
    assert_eq!(field.value(), "abc");
}

#[test]
fn typed_input_respects_character_cap() {
    let mut field = Model::with_options(Options {
        max_characters: Some(5),
        ..Options::default()
    });
    field.focus();
    type_str(&mut field, "abcdef");
    assert_eq!(field.value(), "abcde");
}

#[test]
fn programmatic_set_runs_the_pipeline() {
    let mut field = Model::new();
    field.set_allowed_characters(Some("abc"));
    field.set_max_characters(Some(2));
    field.set_value("a1b2c3");
    assert_eq!(field.value(), "ab");
}

#[test]
fn filter_pipeline_is_rederived_not_accumulated() {
    let mut field = Model::new();
    field.set_max_characters(Some(2));
    field.set_max_characters(None);
    field.set_allowed_characters(Some("xyz"));
    field.set_allowed_characters(None);
    // No stale stage from the earlier constraints may linger.
    field.set_value("hello world");
    assert_eq!(field.value(), "hello world");
}

#[test]
fn validation_runs_every_check_and_aggregates() {
    for reversed in [false, true] {
        let mut field = Model::new();
        field.set_validation_enabled(true);
        let ran = Arc::new(AtomicUsize::new(0));

        let passing = {
            let ran = Arc::clone(&ran);
            ValidationCheck::new("pass", move |_| {
                ran.fetch_add(1, Ordering::Relaxed);
                true
            })
        };
        let failing = {
            let ran = Arc::clone(&ran);
            ValidationCheck::new("fail", move |_| {
                ran.fetch_add(1, Ordering::Relaxed);
                false
            })
        };
        if reversed {
            field.add_validation_check(failing);
            field.add_validation_check(passing);
        } else {
            field.add_validation_check(passing);
            field.add_validation_check(failing);
        }

        assert!(!field.validate());
        assert!(field.is_error_visible());
        // A failing check must not short-circuit the rest.
        assert_eq!(ran.load(Ordering::Relaxed), 2);
    }
}

#[test]
fn disabling_validation_clears_error() {
    let mut field = Model::new();
    field.set_validation_enabled(true);
    field.add_validation_check(ValidationCheck::new("never", |_| false));

    assert!(!field.validate());
    assert!(field.is_error_visible());

    field.set_validation_enabled(false);
    assert!(field.validate());
    assert!(!field.is_error_visible());
}

#[test]
fn disabled_field_always_validates() {
    let mut field = Model::new();
    field.set_validation_enabled(true);
    field.add_validation_check(ValidationCheck::new("never", |_| false));
    field.set_enabled(false);

    assert!(field.validate());
    assert!(!field.is_error_visible());
}

#[test]
fn failing_validate_surfaces_stored_message() {
    let mut field = Model::new();
    field.set_validation_enabled(true);
    field.add_validation_check(ValidationCheck::new("never", |_| false));
    field.set_error("value is required");

    assert!(!field.validate());
    assert!(field.is_error_visible());
    assert_eq!(field.error(), "value is required");

    field.remove_validation_check("never");
    assert!(field.validate());
    // Success clears both the row and the message.
    assert!(!field.is_error_visible());
    assert_eq!(field.error(), "");
}

#[test]
fn error_visible_without_message_is_allowed() {
    let mut field = Model::new();
    field.set_validation_enabled(true);
    field.add_validation_check(ValidationCheck::new("never", |_| false));

    assert!(!field.validate());
    assert!(field.is_error_visible());
    // No message was ever set; the row is a display toggle.
    assert_eq!(field.error(), "");
}

#[test]
fn add_or_replace_validation_check_deduplicates_by_name() {
    let mut field = Model::new();
    field.set_validation_enabled(true);
    field.add_validation_check(ValidationCheck::new("check", |_| false));
    field.add_or_replace_validation_check(ValidationCheck::new("check", |_| true));
    assert!(field.validate());
}

#[test]
fn disabled_field_ignores_key_input() {
    let mut field = Model::new();
    field.focus();
    field.set_enabled(false);
    type_str(&mut field, "abc");
    assert_eq!(field.value(), "");
}

#[test]
fn one_key_event_fires_one_change() {
    let mut field = Model::new();
    field.focus();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    field.add_changed_callback(ChangedCallback::new("count", move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));

    press(&mut field, KeyCode::Char('x'));
    assert_eq!(fired.load(Ordering::Relaxed), 1);
    assert_eq!(field.value(), "x");
}

#[test]
fn binding_listener_fires_once_per_observable_change() {
    let mut field = Model::new();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    field.set_binding_listener(Box::new(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));

    field.push_value(Some("a"));
    field.push_value(Some("a"));
    field.set_value("a");
    assert_eq!(fired.load(Ordering::Relaxed), 1);
    assert_eq!(field.pull_value(), "a");
}

#[test]
fn cursor_positioning_is_clamped() {
    let mut field = Model::new();
    field.set_value("hello");
    field.move_cursor_to_start();
    assert_eq!(field.cursor_position(), 0);
    field.move_cursor_to_end();
    assert_eq!(field.cursor_position(), 5);
    field.move_cursor_at_index(2);
    assert_eq!(field.cursor_position(), 2);
    field.move_cursor_at_index(99);
    assert_eq!(field.cursor_position(), 5);
}

#[test]
fn show_keyboard_defers_focus_to_next_pass() {
    let mut field = Model::new();
    field.show_keyboard();
    assert!(!field.focused());

    // Any update pass drains the deferred queue.
    field.update(Box::new(()));
    assert!(field.focused());
}

#[test]
fn deferred_work_is_a_noop_after_detach() {
    let mut field = Model::new();
    field.show_keyboard();
    field.detach();
    field.update(Box::new(()));
    assert!(!field.focused());
}

#[test]
fn focus_change_side_effects_run_on_next_pass() {
    let mut field = Model::new();
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    field.set_on_focus_changed(Box::new(move |focused| {
        sink.lock().unwrap().push(focused);
    }));

    field.focus();
    assert!(seen.lock().unwrap().is_empty());
    field.update(Box::new(()));
    assert_eq!(*seen.lock().unwrap(), vec![true]);

    field.blur();
    field.update(Box::new(()));
    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[test]
fn line_constraints_are_stored_independently() {
    let mut field = Model::new();
    field.set_single_line(true);
    field.set_max_lines(4);
    field.set_min_lines(2);
    assert!(field.is_single_line());
    assert_eq!(field.max_lines(), 4);
    assert_eq!(field.min_lines(), 2);
}

#[test]
fn single_line_refuses_newline_input() {
    let mut field = Model::new();
    field.focus();
    type_str(&mut field, "ab");
    press(&mut field, KeyCode::Enter);
    assert_eq!(field.value(), "ab");

    field.set_single_line(false);
    press(&mut field, KeyCode::Enter);
    assert_eq!(field.value(), "ab\n");
}

#[test]
fn editing_keys_modify_the_value() {
    let mut field = Model::new();
    field.focus();
    type_str(&mut field, "abc");
    press(&mut field, KeyCode::Backspace);
    assert_eq!(field.value(), "ab");

    press(&mut field, KeyCode::Home);
    press(&mut field, KeyCode::Delete);
    assert_eq!(field.value(), "b");
}

#[test]
fn restore_reproduces_observable_state() {
    let mut field = Model::with_options(Options {
        hint_text: "Amount".to_string(),
        suffix_text: "EUR".to_string(),
        allowed_characters: Some("0123456789.".to_string()),
        max_characters: Some(10),
        start_icon: Some("$".to_string()),
        start_icon_color: Some("#AD58B4".to_string()),
        box_stroke_color: Some("240".to_string()),
        validation_enabled: true,
        character_counter_enabled: true,
        variant: Variant::Outlined,
        max_lines: 3,
        single_line: false,
        ..Options::default()
    });
    field.add_validation_check(ValidationCheck::new("never", |_| false));
    field.set_value("12.50");
    field.set_error("too low");
    field.validate();
    field.focus();
    field.update(Box::new(()));

    let snapshot = field.capture();
    let mut restored = Model::new();
    restored.restore(snapshot.clone()).unwrap();

    assert_eq!(restored.value(), "12.50");
    assert_eq!(restored.hint_text(), "Amount");
    assert_eq!(restored.suffix_text(), "EUR");
    assert_eq!(restored.allowed_characters(), Some("0123456789."));
    assert_eq!(restored.max_characters(), Some(10));
    assert!(restored.is_validation_enabled());
    assert!(restored.is_error_visible());
    assert_eq!(restored.error(), "too low");
    assert!(restored.is_enabled());
    assert!(!restored.is_single_line());
    assert_eq!(restored.max_lines(), 3);
    assert!(restored.focused());

    // The observable state captures identically on the restored field.
    assert_eq!(restored.capture(), snapshot);
}

#[test]
fn restored_filters_apply_to_new_input() {
    let mut field = Model::with_options(Options {
        allowed_characters: Some("ab".to_string()),
        max_characters: Some(3),
        ..Options::default()
    });
    field.set_value("ab");

    let mut restored = Model::new();
    restored.restore(field.capture()).unwrap();
    restored.focus();
    type_str(&mut restored, "xba");
    assert_eq!(restored.value(), "abb");
}

#[test]
fn watchers_observe_committed_changes_once() {
    struct Recording {
        events: Arc<std::sync::Mutex<Vec<String>>>,
    }
    impl Watcher for Recording {
        fn before_change(&mut self, text: &str) {
            self.events.lock().unwrap().push(format!("before:{text}"));
        }
        fn on_change(&mut self, text: &str) {
            self.events.lock().unwrap().push(format!("on:{text}"));
        }
        fn after_change(&mut self, text: &str) {
            self.events.lock().unwrap().push(format!("after:{text}"));
        }
    }

    let mut field = Model::new();
    let events = Arc::new(std::sync::Mutex::new(Vec::new()));
    field.add_watcher(Recording {
        events: Arc::clone(&events),
    });
    field.focus();

    press(&mut field, KeyCode::Char('a'));
    assert_eq!(*events.lock().unwrap(), ["before:", "on:a", "after:a"]);

    // Cursor movement commits no change and fires nothing.
    press(&mut field, KeyCode::Left);
    assert_eq!(events.lock().unwrap().len(), 3);

    // A programmatic set pushes into the surface and notifies once.
    field.set_value("ab");
    assert_eq!(events.lock().unwrap()[3..], ["before:a", "on:ab", "after:ab"]);

    // A repeated set is a no-op and stays silent.
    field.set_value("ab");
    assert_eq!(events.lock().unwrap().len(), 6);
}

#[test]
fn huge_character_cap_survives_capture() {
    let mut field = Model::new();
    field.set_max_characters(Some(usize::MAX));

    let snapshot = Snapshot::decode(&field.capture().encode()).unwrap();
    assert_eq!(snapshot.max_characters, Some(usize::MAX as u64));

    let mut restored = Model::new();
    restored.restore(snapshot).unwrap();
    assert_eq!(restored.max_characters(), Some(usize::MAX));
}

#[test]
fn restore_rejects_unknown_variant_code() {
    let field = Model::new();
    let mut snapshot = field.capture();
    snapshot.variant_code = 7;

    let mut fresh = Model::new();
    assert_eq!(
        fresh.restore(snapshot),
        Err(ConfigError::UnknownVariant(7))
    );
    // The failed restore left the field untouched.
    assert_eq!(fresh.value(), "");
}

#[test]
fn view_reflects_error_and_counter_rows() {
    let mut field = Model::with_options(Options {
        hint_text: "Name".to_string(),
        character_counter_enabled: true,
        max_characters: Some(8),
        validation_enabled: true,
        ..Options::default()
    });
    field.add_validation_check(ValidationCheck::new("never", |_| false));
    field.set_value("abc");
    field.set_error("nope");
    field.validate();

    let view = field.view();
    assert!(view.contains("nope"));
    assert!(view.contains("3/8"));
}

proptest! {
    #[test]
    fn captured_state_survives_restore(
        initial in "[ -~]{0,16}",
        hint in "[ -~]{0,8}",
        error in "[ -~]{0,8}",
        suffix in "[ -~]{0,4}",
        allowed in proptest::option::of("[a-z0-9]{1,12}"),
        max_characters in proptest::option::of(0usize..32),
        single_line in any::<bool>(),
        validation_enabled in any::<bool>(),
        character_counter_enabled in any::<bool>(),
        enabled in any::<bool>(),
        outlined in any::<bool>(),
    ) {
        let field = Model::with_options(Options {
            hint_text: hint,
            initial_value: initial,
            error_text: error,
            suffix_text: suffix,
            allowed_characters: allowed,
            max_characters,
            single_line,
            validation_enabled,
            character_counter_enabled,
            enabled,
            variant: if outlined { Variant::Outlined } else { Variant::Boxed },
            ..Options::default()
        });
        let snapshot = field.capture();
        let mut restored = Model::new();
        restored.restore(snapshot.clone()).unwrap();
        prop_assert_eq!(restored.capture(), snapshot);
    }

    #[test]
    fn snapshot_codec_round_trips(
        value in ".{0,24}",
        hint in ".{0,12}",
        error in ".{0,12}",
        suffix in ".{0,8}",
        allowed in proptest::option::of("[a-z0-9]{1,16}"),
        max_characters in proptest::option::of(0u64..512),
        min_lines in 0u32..8,
        max_lines in 0u32..8,
        single_line in any::<bool>(),
        flags in any::<[bool; 6]>(),
        input_type in any::<u32>(),
        variant_code in any::<i32>(),
        stroke_width in 0u32..8,
        cursor in 0u32..64,
        offset in 0u32..64,
        chrome in proptest::collection::vec(
            ("[a-z_]{1,12}", proptest::collection::vec(any::<u8>(), 0..8)),
            0..4,
        ),
    ) {
        let snapshot = Snapshot {
            value,
            hint_text: hint,
            error_text: error,
            suffix_text: suffix,
            allowed_characters: allowed,
            max_characters,
            min_lines,
            max_lines,
            single_line,
            input_type,
            ime_options: input_type.rotate_left(3),
            text_alignment: min_lines,
            text_direction: max_lines,
            text_size: stroke_width + 10,
            variant_code,
            start_icon: None,
            end_icon: Some("x".to_string()),
            start_icon_color: None,
            end_icon_color: None,
            box_stroke_color: None,
            box_stroke_width: stroke_width,
            background_color: None,
            end_icon_visible: flags[0],
            character_counter_enabled: flags[1],
            enabled: flags[2],
            validation_enabled: flags[3],
            error_visible: flags[4],
            focused: flags[5],
            surface: SurfaceState { cursor, offset },
            chrome,
        };
        let decoded = Snapshot::decode(&snapshot.encode()).unwrap();
        prop_assert_eq!(decoded, snapshot);
    }
}
