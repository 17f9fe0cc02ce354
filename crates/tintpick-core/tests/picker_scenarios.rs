//! End-to-end picker sessions driven the way a host application would.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use kurbo::Point;
use tintpick_core::{
    Color, ColorPicker, ColorRole, ColoredElement, Focus, KeyInput, ListenerRegistry, Modifiers,
    MouseButton, Palette, PickerConfig, PickerHost, PickerType, PixelCanvas, PointerEvent, Section,
    SelectionSink,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn c(value: &str) -> Color {
    value.parse().unwrap()
}

fn key(key: &str) -> KeyInput {
    KeyInput::from_key(key, "", Modifiers::NONE)
}

#[derive(Default)]
struct Host {
    changes: Vec<Color>,
    popup_updates: Vec<Option<PickerType>>,
}

impl PickerHost for Host {
    fn on_change(&mut self, color: Color) {
        self.changes.push(color);
    }

    fn update_data(&mut self, open_popup: Option<PickerType>) {
        self.popup_updates.push(open_popup);
    }
}

struct Shape {
    stroke: Color,
    background: Color,
    deleted: bool,
}

impl Shape {
    fn new(stroke: &str, background: &str) -> Self {
        Self {
            stroke: c(stroke),
            background: c(background),
            deleted: false,
        }
    }
}

impl ColoredElement for Shape {
    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn color(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Stroke => self.stroke,
            ColorRole::Background => self.background,
        }
    }
}

/// A canvas painted one solid color.
struct Solid([u8; 3]);

impl PixelCanvas for Solid {
    fn read_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        (x < 800 && y < 600).then_some(self.0)
    }
}

#[derive(Default)]
struct Selection {
    shapes: Vec<Shape>,
    invalidated: Vec<usize>,
    redraws: usize,
}

impl SelectionSink for Selection {
    fn selection_len(&self) -> usize {
        self.shapes.len()
    }

    fn apply_color(&mut self, index: usize, role: ColorRole, color: Color) {
        let shape = &mut self.shapes[index];
        match role {
            ColorRole::Stroke => shape.stroke = color,
            ColorRole::Background => shape.background = color,
        }
    }

    fn invalidate(&mut self, index: usize) {
        self.invalidated.push(index);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

fn picker(picker_type: PickerType) -> (ColorPicker, ListenerRegistry) {
    let registry = ListenerRegistry::new();
    let picker = ColorPicker::new(
        picker_type,
        Palette::default(),
        PickerConfig::default(),
        registry.clone(),
    )
    .unwrap();
    (picker, registry)
}

#[test]
fn eyedropper_drag_paints_selection_and_commits() {
    init();
    let (mut p, registry) = picker(PickerType::ElementBackground);
    let mut host = Host::default();
    let mut selection = Selection {
        shapes: vec![Shape::new("#1e1e1e", "transparent")],
        ..Default::default()
    };
    let red = Solid([255, 0, 0]);

    p.open::<Shape>(Some(Color::Transparent), &[]);
    p.toggle_eyedropper(None);
    assert!(p.eyedropper().is_some());

    let start = Instant::now();
    assert!(p.pointer_down(start));
    let sampled = p.pointer_move(Point::new(100.0, 100.0), Some(&red), &mut selection);
    assert_eq!(sampled, Some(c("#ff0000")));
    assert_eq!(selection.shapes[0].background, c("#ff0000"));
    assert_eq!(selection.invalidated, vec![0]);
    assert_eq!(selection.redraws, 1);

    let preview = p.eyedropper().unwrap().preview().unwrap();
    assert_eq!(preview.position, Point::new(120.0, 120.0));

    assert_eq!(p.pointer_up(&mut host), Some(c("#ff0000")));
    assert_eq!(host.changes, vec![c("#ff0000")]);
    assert_eq!(p.color(), Some(c("#ff0000")));

    // Single-shot session closed, only the popup's keyup listener remains
    assert!(p.eyedropper().is_none());
    assert_eq!(registry.len(), 1);

    // The hex field refocus outlives the single-shot session
    assert!(p.tick(start + Duration::from_secs(1)));
    assert_eq!(p.focus(), Some(Focus::HexInput));
    assert!(!p.tick(start + Duration::from_secs(2)));
}

#[test]
fn trigger_pick_refocuses_hex_field_after_session_closes() {
    init();
    let (mut p, _) = picker(PickerType::ElementStroke);
    let mut host = Host::default();
    let mut selection = Selection::default();

    p.open::<Shape>(Some(c("#1e1e1e")), &[]);
    p.key_down(key("i"), &mut host);
    assert!(!p.eyedropper().unwrap().keep_open());

    p.pointer_move(Point::new(3.0, 3.0), Some(&Solid([10, 20, 30])), &mut selection);
    let start = Instant::now();
    p.pointer_down(start);
    p.pointer_up(&mut host);
    assert!(p.eyedropper().is_none());
    assert_eq!(p.focus(), Some(Focus::Content));

    assert!(!p.tick(start + Duration::from_millis(100)));
    assert!(p.tick(start + Duration::from_millis(600)));
    assert_eq!(p.focus(), Some(Focus::HexInput));
    assert_eq!(p.active_section(), Some(Section::Hex));
}

#[test]
fn closing_the_popup_cancels_pending_refocus() {
    init();
    let (mut p, _) = picker(PickerType::ElementStroke);
    let mut host = Host::default();

    p.open::<Shape>(Some(c("#1e1e1e")), &[]);
    p.toggle_eyedropper(None);
    let start = Instant::now();
    p.pointer_down(start);
    p.pointer_up(&mut host);

    p.close();
    p.open::<Shape>(Some(c("#1e1e1e")), &[]);
    assert!(!p.tick(start + Duration::from_secs(1)));
    assert_eq!(p.focus(), Some(Focus::Content));
}

#[test]
fn release_without_sample_commits_nothing() {
    init();
    let (mut p, registry) = picker(PickerType::ElementStroke);
    let mut host = Host::default();

    // Single-shot: the session closes even though nothing was sampled
    p.open::<Shape>(Some(c("#1e1e1e")), &[]);
    p.toggle_eyedropper(None);
    assert!(p.pointer_down(Instant::now()));
    assert_eq!(p.pointer_up(&mut host), None);
    assert!(host.changes.is_empty());
    assert!(p.eyedropper().is_none());
    assert_eq!(registry.len(), 1);

    // Keep-open: the session stays
    p.toggle_eyedropper(Some(true));
    p.pointer_down(Instant::now());
    assert_eq!(p.pointer_up(&mut host), None);
    assert!(host.changes.is_empty());
    assert!(p.eyedropper().is_some());
}

#[test]
fn keep_open_session_survives_selection() {
    init();
    let (mut p, registry) = picker(PickerType::ElementStroke);
    let mut host = Host::default();
    let mut selection = Selection::default();
    let blue = Solid([0, 0, 255]);

    p.open::<Shape>(Some(c("#1e1e1e")), &[]);
    p.toggle_eyedropper(Some(true));
    p.pointer_move(Point::new(1.0, 1.0), Some(&blue), &mut selection);
    let start = Instant::now();
    p.pointer_down(start);
    p.pointer_up(&mut host);

    assert_eq!(host.changes, vec![c("#0000ff")]);
    assert!(p.eyedropper().is_some());

    // Hex field refocus is deferred
    assert!(!p.tick(start + Duration::from_millis(100)));
    assert!(p.tick(start + Duration::from_millis(500)));
    assert_eq!(p.focus(), Some(Focus::HexInput));
    assert_eq!(p.active_section(), Some(Section::Hex));

    p.outside_click();
    assert!(p.eyedropper().is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn eyedropper_callback_replaces_commit() {
    init();
    let (mut p, _) = picker(PickerType::ElementStroke);
    let mut host = Host::default();
    let mut selection = Selection::default();
    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = picked.clone();

    p.open::<Shape>(Some(c("#1e1e1e")), &[]);
    p.open_eyedropper(false, Some(Box::new(move |color| sink.borrow_mut().push(color))));
    p.pointer_move(Point::new(1.0, 1.0), Some(&Solid([1, 2, 3])), &mut selection);
    p.pointer_down(Instant::now());
    p.pointer_up(&mut host);

    assert_eq!(*picked.borrow(), vec![c("#010203")]);
    assert!(host.changes.is_empty());
    assert!(p.eyedropper().is_none());
}

#[test]
fn pointer_events_without_session_change_nothing() {
    init();
    let (mut p, registry) = picker(PickerType::ElementBackground);
    let mut host = Host::default();
    let mut selection = Selection {
        shapes: vec![Shape::new("#1e1e1e", "transparent")],
        ..Default::default()
    };

    p.open::<Shape>(Some(Color::Transparent), &[]);
    assert!(!p.pointer_down(Instant::now()));
    assert_eq!(
        p.pointer_move(Point::new(1.0, 1.0), Some(&Solid([9, 9, 9])), &mut selection),
        None
    );
    assert_eq!(p.pointer_up(&mut host), None);
    assert_eq!(selection.shapes[0].background, Color::Transparent);
    assert!(host.changes.is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn tab_cycles_through_eligible_sections() {
    init();
    let (mut p, _) = picker(PickerType::ElementStroke);
    let mut host = Host::default();
    let shapes = [
        Shape::new("#abcdef", "transparent"),
        Shape::new("#abcdef", "transparent"),
        Shape::new("#123456", "transparent"),
    ];

    p.open(Some(c("#e03131")), &shapes);
    assert_eq!(p.custom_colors(), &[c("#abcdef"), c("#123456")]);
    assert_eq!(p.active_section(), Some(Section::Shades));

    let tab = key("Tab");
    p.key_down(tab, &mut host);
    assert_eq!(p.active_section(), Some(Section::Hex));
    assert_eq!(p.focus(), Some(Focus::HexInput));

    p.key_down(tab, &mut host);
    assert_eq!(p.active_section(), Some(Section::Custom));
    assert_eq!(host.changes, vec![c("#abcdef")]);

    // #abcdef is not a palette color, so BaseColors falls back to black
    p.key_down(tab, &mut host);
    assert_eq!(p.active_section(), Some(Section::BaseColors));
    assert_eq!(host.changes.last(), Some(&c("#1e1e1e")));

    // Black has no shades: Shades is skipped
    p.key_down(tab, &mut host);
    assert_eq!(p.active_section(), Some(Section::Hex));

    let back = KeyInput::from_key("Tab", "Tab", Modifiers::SHIFT);
    p.key_down(back, &mut host);
    assert_eq!(p.active_section(), Some(Section::BaseColors));
}

#[test]
fn hotkeys_and_arrows() {
    init();
    let (mut p, _) = picker(PickerType::ElementStroke);
    let mut host = Host::default();

    p.open::<Shape>(Some(c("#1e1e1e")), &[]);
    assert_eq!(p.active_shade(), Some(4));

    // 'r' is bound to the fourth entry: gray at shade 4
    p.key_down(key("r"), &mut host);
    assert_eq!(host.changes, vec![c("#343a40")]);
    assert_eq!(p.active_section(), Some(Section::BaseColors));

    // Shift+2 picks the second shade of the gray ramp
    let shift_two = KeyInput::from_key("@", "Digit2", Modifiers::SHIFT);
    p.key_down(shift_two, &mut host);
    assert_eq!(p.color(), Some(c("#e9ecef")));
    assert_eq!(p.active_section(), Some(Section::Shades));
    assert_eq!(p.active_shade(), Some(1));

    p.key_down(key("ArrowRight"), &mut host);
    assert_eq!(p.color(), Some(c("#ced4da")));
    assert_eq!(p.active_shade(), Some(2));
}

#[test]
fn shifted_digit_layout_selects_custom_color() {
    init();
    let (mut p, _) = picker(PickerType::ElementStroke);
    let mut host = Host::default();
    let shapes = [
        Shape::new("#abcdef", "transparent"),
        Shape::new("#abcdef", "transparent"),
        Shape::new("#abcdef", "transparent"),
        Shape::new("#123456", "transparent"),
        Shape::new("#123456", "transparent"),
        Shape::new("#654321", "transparent"),
    ];

    p.open(Some(c("#1e1e1e")), &shapes);
    assert_eq!(p.custom_colors(), &[c("#abcdef"), c("#123456"), c("#654321")]);

    // AZERTY types "3" with Shift held on the Digit3 key
    let three = KeyInput::from_key("3", "Digit3", Modifiers::SHIFT);
    assert!(p.key_down(three, &mut host));
    assert_eq!(host.changes, vec![c("#654321")]);
    assert_eq!(p.active_section(), Some(Section::Custom));
}

#[test]
fn no_current_color_closes_on_any_key() {
    init();
    let (mut p, _) = picker(PickerType::ElementStroke);
    let mut host = Host::default();

    p.open::<Shape>(None, &[]);
    assert_eq!(p.active_section(), Some(Section::BaseColors));
    assert!(p.key_down(key("q"), &mut host));
    assert_eq!(host.popup_updates, vec![None]);
    assert!(host.changes.is_empty());
}

#[test]
fn escape_unwinds_one_layer_at_a_time() {
    init();
    let (mut p, registry) = picker(PickerType::ElementStroke);
    let mut host = Host::default();

    p.open::<Shape>(Some(c("#1e1e1e")), &[]);
    p.focus_hex();
    p.toggle_eyedropper(None);
    assert_eq!(registry.len(), 4);

    p.key_down(key("Escape"), &mut host);
    assert!(p.eyedropper().is_none());
    assert_eq!(p.focus(), Some(Focus::HexInput));

    p.key_down(key("Escape"), &mut host);
    assert_eq!(p.focus(), Some(Focus::Content));
    assert!(host.popup_updates.is_empty());

    p.key_down(key("Escape"), &mut host);
    assert_eq!(host.popup_updates, vec![None]);

    p.close();
    assert!(registry.is_empty());
}

#[test]
fn canvas_background_has_no_custom_colors() {
    init();
    let (mut p, _) = picker(PickerType::CanvasBackground);
    let shapes = [Shape::new("#abcdef", "#abcdef")];
    p.open(Some(c("#ffffff")), &shapes);
    assert!(p.custom_colors().is_empty());
}

#[test]
fn deleted_elements_are_ignored() {
    init();
    let (mut p, _) = picker(PickerType::ElementBackground);
    let mut gone = Shape::new("#1e1e1e", "#abcdef");
    gone.deleted = true;
    p.open(Some(Color::Transparent), &[gone, Shape::new("#1e1e1e", "#fedcba")]);
    assert_eq!(p.custom_colors(), &[c("#fedcba")]);
}

#[test]
fn closed_session_ignores_routed_pointer_events() {
    init();
    let (mut p, registry) = picker(PickerType::ElementBackground);
    let mut host = Host::default();
    let mut selection = Selection {
        shapes: vec![Shape::new("#1e1e1e", "transparent")],
        ..Default::default()
    };
    let green = Solid([0, 255, 0]);
    let at = Point::new(5.0, 5.0);
    let down = PointerEvent::Down {
        position: at,
        button: MouseButton::Left,
    };
    let up = PointerEvent::Up {
        position: at,
        button: MouseButton::Left,
    };

    p.open::<Shape>(Some(Color::Transparent), &[]);
    let alt = KeyInput::from_key("Alt", "AltLeft", Modifiers::NONE);
    p.key_down(alt, &mut host);

    let now = Instant::now();
    p.pointer_event(PointerEvent::Move { position: at }, now, Some(&green), &mut selection, &mut host);
    assert!(p.pointer_event(down, now, Some(&green), &mut selection, &mut host));
    assert!(p.pointer_event(up, now, Some(&green), &mut selection, &mut host));
    assert_eq!(host.changes, vec![c("#00ff00")]);

    // Releasing Alt ends the keep-open session
    p.key_up(alt);
    assert!(p.eyedropper().is_none());
    assert_eq!(registry.len(), 1);

    let blue = Solid([0, 0, 255]);
    assert!(!p.pointer_event(down, now, Some(&blue), &mut selection, &mut host));
    p.pointer_event(PointerEvent::Move { position: at }, now, Some(&blue), &mut selection, &mut host);
    p.pointer_event(up, now, Some(&blue), &mut selection, &mut host);
    assert_eq!(host.changes, vec![c("#00ff00")]);
    assert_eq!(selection.shapes[0].background, Color::Transparent);

    p.close();
    assert!(registry.is_empty());
}
