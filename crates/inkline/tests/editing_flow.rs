//! End-to-end editing flows against a mock host.
//!
//! The mock implements the measurement protocol the way a real renderer
//! would: it lays out whatever `measure_requested` delivers, answers width
//! queries from that layout, and hit-tests against the displayed window it
//! received from `display_changed`.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use inkline::{
    EchoMode, InputField, Key, KeyEvent, KeyboardModifiers, Point, PointerEvent,
    SharedTimerManager, TextMetrics, TimerBlinkScheduler,
};

/// A proportional-width layout engine: narrow `i`/`l`, wide `w`/`m`.
struct HostLayout {
    budget: f32,
    laid_out: Mutex<String>,
    displayed: Mutex<String>,
}

impl HostLayout {
    fn new(budget: f32) -> Arc<Self> {
        Arc::new(Self {
            budget,
            laid_out: Mutex::new(String::new()),
            displayed: Mutex::new(String::new()),
        })
    }

    fn glyph_width(c: char) -> f32 {
        match c {
            'i' | 'l' => 0.5,
            'w' | 'm' => 2.0,
            _ => 1.0,
        }
    }
}

impl TextMetrics for HostLayout {
    fn grapheme_width(&self, index: usize) -> f32 {
        self.laid_out
            .lock()
            .chars()
            .nth(index)
            .map(Self::glyph_width)
            .unwrap_or(0.0)
    }

    fn display_width(&self) -> f32 {
        self.budget
    }

    fn grapheme_index_at(&self, x: f32) -> usize {
        // Nearest caret boundary within the displayed text.
        let displayed = self.displayed.lock();
        let mut cursor = 0.0;
        for (i, c) in displayed.chars().enumerate() {
            let width = Self::glyph_width(c);
            if x < cursor + width / 2.0 {
                return i;
            }
            cursor += width;
        }
        displayed.chars().count()
    }
}

struct Harness {
    field: InputField,
    layout: Arc<HostLayout>,
    display_log: Arc<Mutex<Vec<String>>>,
    event_log: Arc<Mutex<Vec<String>>>,
}

/// Route core traces through the test writer. Honors `RUST_LOG`; repeated
/// calls across tests are fine.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn harness(budget: f32) -> Harness {
    init_tracing();
    let layout = HostLayout::new(budget);
    let field = InputField::new(
        layout.clone(),
        Arc::new(inkline::NullBlinkScheduler),
    )
    .expect("valid budget");

    let display_log = Arc::new(Mutex::new(Vec::new()));
    let event_log = Arc::new(Mutex::new(Vec::new()));

    let layout_clone = layout.clone();
    let events = event_log.clone();
    field.measure_requested.connect(move |text| {
        *layout_clone.laid_out.lock() = text.clone();
        events.lock().push(format!("measure:{text}"));
    });

    let layout_clone = layout.clone();
    let log = display_log.clone();
    let events = event_log.clone();
    field.display_changed.connect(move |text| {
        *layout_clone.displayed.lock() = text.clone();
        log.lock().push(text.clone());
        events.lock().push(format!("display:{text}"));
    });

    Harness {
        field,
        layout,
        display_log,
        event_log,
    }
}

fn typed(text: &str) -> KeyEvent {
    KeyEvent::new(Key::Unknown(0), KeyboardModifiers::NONE, text)
}

#[test]
fn typing_past_the_budget_scrolls_the_window() {
    // Budget fits five unit-width glyphs; type six characters.
    let mut h = harness(5.0);
    h.field.activate();

    for ch in ["a", "b", "c", "d", "e", "f"] {
        assert!(h.field.process_key(&typed(ch)));
    }

    assert_eq!(h.field.text(), "abcdef");
    assert_eq!(h.field.caret_index(), 6);
    assert_eq!(h.field.display_text(), "bcdef");
    assert_eq!(h.display_log.lock().last().map(String::as_str), Some("bcdef"));
}

#[test]
fn select_all_then_backspace_empties_the_buffer() {
    let mut h = harness(100.0);
    h.field.set_text("hello world");
    h.field.activate();
    assert_eq!(h.field.caret_index(), 11);

    h.field
        .process_key(&KeyEvent::bare(Key::A, KeyboardModifiers::CTRL));
    assert_eq!(h.field.caret_index(), 11);
    assert_eq!(h.field.selection_index(), 0);

    h.field
        .process_key(&KeyEvent::bare(Key::Backspace, KeyboardModifiers::NONE));
    assert_eq!(h.field.text(), "");
    assert_eq!(h.field.caret_index(), 0);
    assert_eq!(h.field.display_text(), "");
}

#[test]
fn shift_left_extends_a_selection_from_the_caret() {
    let mut h = harness(100.0);
    h.field.set_text("hello");
    h.field.activate();

    // Park the caret at index 3 with no selection.
    h.field.process_key(&KeyEvent::bare(Key::Home, KeyboardModifiers::NONE));
    for _ in 0..3 {
        h.field
            .process_key(&KeyEvent::bare(Key::ArrowRight, KeyboardModifiers::NONE));
    }
    assert_eq!(h.field.caret_index(), 3);
    assert!(!h.field.has_selection());

    for _ in 0..2 {
        h.field
            .process_key(&KeyEvent::bare(Key::ArrowLeft, KeyboardModifiers::SHIFT));
    }
    assert_eq!(h.field.selection_index(), 3);
    assert_eq!(h.field.caret_index(), 1);
    assert_eq!(h.field.selected_text(), "el");
}

#[test]
fn deactivated_field_ignores_key_events() {
    let mut h = harness(100.0);
    h.field.set_text("hello");
    assert!(!h.field.is_active());

    let displays_before = h.display_log.lock().len();
    h.field.process_key(&typed("x"));

    assert_eq!(h.field.text(), "hello");
    assert_eq!(h.field.caret_index(), 5);
    assert_eq!(h.field.selection_index(), 0);
    assert_eq!(h.display_log.lock().len(), displays_before);
}

#[test]
fn set_text_round_trips_through_select_all_delete() {
    let mut h = harness(100.0);
    h.field.activate();
    h.field.set_text("hello");

    h.field
        .process_key(&KeyEvent::bare(Key::Delete, KeyboardModifiers::NONE));
    assert_eq!(h.field.text(), "");
}

#[test]
fn window_is_stable_while_the_caret_stays_inside() {
    let mut h = harness(5.0);
    h.field.activate();
    for ch in ["a", "b", "c", "d", "e", "f"] {
        h.field.process_key(&typed(ch));
    }
    assert_eq!(h.field.draw_window(), 1..6);

    // Arrow left keeps the caret inside the window: no jump.
    h.field
        .process_key(&KeyEvent::bare(Key::ArrowLeft, KeyboardModifiers::NONE));
    assert_eq!(h.field.caret_index(), 5);
    assert_eq!(h.field.draw_window(), 1..6);
    assert_eq!(h.field.display_text(), "bcdef");
}

#[test]
fn proportional_widths_fit_more_narrow_glyphs() {
    let mut h = harness(2.0);
    h.field.activate();

    for _ in 0..6 {
        h.field.process_key(&typed("i"));
    }

    // Four half-width glyphs fill the two-pixel budget.
    assert_eq!(h.field.draw_window(), 2..6);
    assert_eq!(h.field.display_text(), "iiii");

    // A wide glyph displaces three narrow ones.
    h.field.process_key(&typed("w"));
    assert_eq!(h.field.text(), "iiiiiiw");
    assert_eq!(h.field.display_text(), "w");
}

#[test]
fn measurement_always_precedes_display() {
    let mut h = harness(5.0);
    h.field.activate();
    h.field.set_text("abc");
    h.field.process_key(&typed("d"));

    let log = h.event_log.lock();
    assert!(!log.is_empty());
    for pair in log.windows(2) {
        if pair[1].starts_with("display:") {
            assert!(
                pair[0].starts_with("measure:"),
                "display pushed without a preceding measurement: {pair:?}"
            );
        }
    }
}

#[test]
fn pointer_press_and_drag_select_against_the_window() {
    let mut h = harness(3.0);
    h.field.set_text("abcdef");
    h.field.activate();
    assert_eq!(h.field.draw_window(), 3..6);
    assert_eq!(h.field.display_text(), "def");

    // Press between 'd' and 'e' (displayed offset 1) -> buffer index 4.
    h.field.pointer_down(&PointerEvent::new(Point::new(1.0, 0.0)));
    assert_eq!(h.field.caret_index(), 4);
    assert!(!h.field.has_selection());

    // Drag off the left edge until the window scrolls back to the start.
    for _ in 0..4 {
        h.field.pointer_drag(&PointerEvent::new(Point::new(-1.0, 0.0)));
    }
    assert_eq!(h.field.caret_index(), 0);
    assert_eq!(h.field.selection_index(), 4);
    assert_eq!(h.field.selected_text(), "abcd");
    assert_eq!(h.field.draw_start(), 0);
}

#[test]
fn finishing_reports_the_final_text() {
    let mut h = harness(100.0);
    let finished = Arc::new(Mutex::new(Vec::new()));
    let finished_clone = finished.clone();
    h.field.editing_finished.connect(move |text| {
        finished_clone.lock().push(text.clone());
    });

    h.field.set_text("done");
    h.field.activate();

    // Return ends editing; the host then asks for the final text.
    let keep_editing = h
        .field
        .process_key(&KeyEvent::bare(Key::Enter, KeyboardModifiers::NONE));
    assert!(!keep_editing);
    assert!(!h.field.is_active());

    h.field.finish_input();
    assert_eq!(finished.lock().as_slice(), ["done"]);
}

#[test]
fn password_mode_measures_and_displays_the_mask() {
    let mut h = harness(100.0);
    h.field.set_echo_mode(EchoMode::Password);
    h.field.set_text("secret");

    assert_eq!(h.field.text(), "secret");
    assert_eq!(h.layout.laid_out.lock().as_str(), "••••••");
    assert_eq!(h.field.display_text(), "••••••");
}

#[test]
fn blink_ticks_toggle_until_deactivation() {
    init_tracing();
    let timers = Arc::new(SharedTimerManager::new());
    let blink = Arc::new(
        TimerBlinkScheduler::new(timers.clone(), Duration::from_millis(1)).unwrap(),
    );
    let layout = HostLayout::new(100.0);
    let mut field = InputField::new(layout, blink.clone()).expect("valid budget");

    field.activate();
    assert!(field.is_caret_visible());

    std::thread::sleep(Duration::from_millis(2));
    for id in timers.process_expired() {
        if blink.is_tick(id) {
            field.toggle_caret_visibility();
        }
    }
    assert!(!field.is_caret_visible());

    field.deactivate();
    assert_eq!(timers.active_count(), 0);

    // A straggling tick after deactivation changes nothing.
    field.toggle_caret_visibility();
    assert!(!field.is_caret_visible());
}
