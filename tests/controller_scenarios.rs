use rusty_hands::cursor::{CursorFilter, PointerState};
use rusty_hands::pipeline::synthetic_hand;
use rusty_hands::{ControlEvent, GestureLabel, HandController, Landmarks, Surface};

const SURFACE: Surface = Surface { width: 1920, height: 1080 };

fn open_at(x: f32, y: f32) -> Vec<Landmarks> {
    vec![synthetic_hand(x, y, true)]
}

fn closed_at(x: f32, y: f32) -> Vec<Landmarks> {
    vec![synthetic_hand(x, y, false)]
}

fn is_button(e: &ControlEvent) -> bool {
    !matches!(e, ControlEvent::MoveTo(..))
}

// =========================================================================
// Open x3, dropout, Closed x3
// =========================================================================

#[test]
fn open_dropout_closed_presses_once_on_seventh_frame() {
    let mut c = HandController::new(SURFACE, 3, 0.7);
    let frames = vec![
        open_at(0.2, 0.5),
        open_at(0.3, 0.5),
        open_at(0.4, 0.5),
        Vec::new(),
        closed_at(0.5, 0.6),
        closed_at(0.6, 0.6),
        closed_at(0.7, 0.6),
    ];

    let reports: Vec<_> = frames.iter().map(|hands| c.process_frame(hands)).collect();

    // Through frame 4 the pointer never changes state
    for r in &reports[..4] {
        assert!(!r.events.iter().any(is_button), "unexpected button event: {:?}", r.events);
    }
    // Frame 4: nothing at all
    assert!(reports[3].events.is_empty());

    // Frames 5-6 rebuild the run without firing
    assert_eq!(reports[4].confirmed_change, None);
    assert_eq!(reports[5].confirmed_change, None);

    // Frame 7 presses
    assert_eq!(reports[6].confirmed_change, Some(GestureLabel::Closed));
    let buttons: Vec<_> = reports.iter().flat_map(|r| r.events.iter().copied()).filter(is_button).collect();
    assert_eq!(buttons, vec![ControlEvent::Press]);
    assert!(reports[6].events.contains(&ControlEvent::Press));

    // A move on every frame with a hand, positions distinct
    let moves: Vec<_> = reports
        .iter()
        .map(|r| r.events.iter().find(|e| matches!(e, ControlEvent::MoveTo(..))).copied())
        .collect();
    for (i, m) in moves.iter().enumerate() {
        assert_eq!(m.is_some(), i != 3, "frame {}", i + 1);
    }
    let first_three: Vec<_> = moves[..3].iter().flatten().collect();
    assert_ne!(first_three[0], first_three[1]);
    assert_ne!(first_three[1], first_three[2]);

    assert_eq!(c.pointer_state(), PointerState::Pressed);
}

#[test]
fn dropout_freezes_cursor_instead_of_recentering() {
    let mut c = HandController::new(SURFACE, 3, 0.7);
    for _ in 0..10 {
        c.process_frame(&open_at(0.1, 0.1));
    }
    let held = c.cursor_position();
    let report = c.process_frame(&[]);
    assert!(report.events.is_empty());
    assert_eq!(c.cursor_position(), held);
    assert_ne!(held, SURFACE.center());

    // Next detection continues from the held position
    let report = c.process_frame(&open_at(0.1, 0.1));
    match report.events[0] {
        ControlEvent::MoveTo(x, _) => assert!((x as f32) <= held.0 + 1.0),
        other => panic!("expected MoveTo, got {:?}", other),
    }
}

#[test]
fn grab_and_release_cycle() {
    let mut c = HandController::new(SURFACE, 3, 0.7);
    let mut buttons = Vec::new();
    let script = [(true, 4), (false, 4), (true, 4), (false, 1), (true, 2)];
    for (open, n) in script {
        for _ in 0..n {
            let hands = if open { open_at(0.5, 0.5) } else { closed_at(0.5, 0.5) };
            buttons.extend(c.process_frame(&hands).events.into_iter().filter(is_button));
        }
    }
    assert_eq!(buttons, vec![ControlEvent::Press, ControlEvent::Release]);
    assert_eq!(c.confirmed(), Some(GestureLabel::Open));
}

#[test]
fn release_after_dropout_while_pressed() {
    let mut c = HandController::new(SURFACE, 3, 0.7);
    for _ in 0..3 {
        c.process_frame(&closed_at(0.5, 0.5));
    }
    assert_eq!(c.pointer_state(), PointerState::Pressed);

    c.process_frame(&[]);
    assert_eq!(c.confirmed(), None);
    // Button stays held across the gap
    assert_eq!(c.pointer_state(), PointerState::Pressed);

    let mut events = Vec::new();
    for _ in 0..3 {
        events.extend(c.process_frame(&open_at(0.5, 0.5)).events);
    }
    assert_eq!(events.into_iter().filter(is_button).collect::<Vec<_>>(), vec![ControlEvent::Release]);
}

#[test]
fn smoothing_from_origin_converges_on_target() {
    let surface = Surface::new(1000, 1000);
    let cursor = CursorFilter::with_position(surface, 0.7, 0.0, 0.0);
    let mut c = HandController::with_cursor(cursor, 3);

    let mut last = 0;
    for _ in 0..60 {
        let report = c.process_frame(&open_at(0.1, 0.1));
        if let Some(ControlEvent::MoveTo(x, y)) = report.events.first().copied() {
            assert!(x >= last && x <= 100 && y <= 100);
            last = x;
        }
    }
    assert_eq!(last, 100);
}

#[test]
fn demo_recording_replays() {
    let frames: Vec<Vec<Landmarks>> =
        serde_json::from_str(include_str!("../demos/open_dropout_closed.json")).unwrap();
    assert_eq!(frames.len(), 10);

    let mut c = HandController::new(SURFACE, 3, 0.7);
    let buttons: Vec<_> = frames
        .iter()
        .flat_map(|hands| c.process_frame(hands).events)
        .filter(is_button)
        .collect();
    assert_eq!(buttons, vec![ControlEvent::Press, ControlEvent::Release]);
}
