//! Hit-testing and pointer event dispatch.

use anchorage_test_utils::UiFixture;
use anchorage_ui::{
    Anchor, AnchorPoint, FrameBehavior, FrameStrata, Insets, ObjectId, PointerId, PointerPhase,
    Rect, UiConfig, UiEvent, UiEventKind, UiManager, Vec2,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const MOUSE: PointerId = PointerId::MOUSE;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn kinds(events: &[UiEvent]) -> Vec<(UiEventKind, ObjectId)> {
    events.iter().map(|e| (e.kind, e.target)).collect()
}

/// Two overlapping frames: `bottom` at (0,0,200,200), `top` at (100,100,200,200).
fn overlapping() -> (UiFixture, ObjectId, ObjectId) {
    let mut fixture = UiFixture::new();
    let bottom = fixture.frame_at(None, 0.0, 0.0, 200.0, 200.0);
    let top = fixture.frame_at(None, 100.0, 100.0, 200.0, 200.0);
    fixture.ui.update();
    (fixture, bottom, top)
}

#[test]
fn test_topmost_hit_wins() {
    let (mut fixture, bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    assert_eq!(ui.hit_test(Vec2::new(150.0, 150.0)), Some(top));
    assert_eq!(ui.hit_test(Vec2::new(50.0, 50.0)), Some(bottom));
    assert_eq!(ui.hit_test(Vec2::new(500.0, 500.0)), None);

    ui.set_strata(bottom, FrameStrata::High).unwrap();
    assert_eq!(ui.hit_test(Vec2::new(150.0, 150.0)), Some(bottom));
}

#[test]
fn test_mouse_disabled_frames_are_transparent() {
    let (mut fixture, bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    ui.set_mouse_enabled(top, false).unwrap();
    assert_eq!(ui.hit_test(Vec2::new(150.0, 150.0)), Some(bottom));
}

#[test]
fn test_hit_rect_insets() {
    let (mut fixture, bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    ui.set_hit_rect_insets(top, Insets::new(20.0, 0.0, 20.0, 0.0))
        .unwrap();
    assert_eq!(ui.hit_test(Vec2::new(110.0, 110.0)), Some(bottom));
    assert_eq!(ui.hit_test(Vec2::new(130.0, 130.0)), Some(top));
}

#[test]
fn test_hidden_parent_hides_subtree_but_keeps_geometry() {
    let mut fixture = UiFixture::new();
    let parent = fixture.frame_at(None, 0.0, 0.0, 300.0, 300.0);
    let child = fixture.frame_at(Some(parent), 10.0, 10.0, 50.0, 50.0);
    let ui = &mut fixture.ui;
    ui.update();
    let cached = ui.rect(child);
    assert_eq!(ui.hit_test(Vec2::new(20.0, 20.0)), Some(child));

    ui.hide(parent).unwrap();
    ui.update();
    assert!(!ui.is_visible(child));
    assert_eq!(ui.hit_test(Vec2::new(20.0, 20.0)), None);
    assert!(!ui.draw_order().contains(&child));
    assert_eq!(ui.rect(child), cached);

    ui.show(parent).unwrap();
    ui.update();
    assert_eq!(ui.hit_test(Vec2::new(20.0, 20.0)), Some(child));
    assert_eq!(ui.rect(child), cached);
}

#[test]
fn test_hidden_subtree_is_not_resolved_until_shown() {
    let mut fixture = UiFixture::new();
    let parent = fixture.frame_at(None, 0.0, 0.0, 300.0, 300.0);
    let child = fixture.frame_at(Some(parent), 10.0, 10.0, 50.0, 50.0);
    let ui = &mut fixture.ui;
    ui.update();

    ui.hide(parent).unwrap();
    ui.set_point(
        parent,
        anchorage_ui::Anchor::to_parent(anchorage_ui::AnchorPoint::TopLeft).offset(100.0, 0.0),
    )
    .unwrap();
    ui.update();
    assert_eq!(ui.metrics().objects_resolved, 0);
    assert_eq!(ui.metrics().resolve_skips, 2);
    assert_eq!(ui.rect(child).map(|r| r.x), Some(10.0));

    ui.show(parent).unwrap();
    ui.update();
    assert_eq!(ui.rect(child).map(|r| r.x), Some(110.0));
}

#[test]
fn test_enter_leave_and_click() {
    let (mut fixture, bottom, top) = overlapping();
    let ui = &mut fixture.ui;

    let events = ui.on_pointer_move(MOUSE, Vec2::new(50.0, 50.0), ms(0));
    assert_eq!(kinds(&events), vec![(UiEventKind::Enter, bottom)]);
    assert_eq!(ui.pointer_phase(MOUSE), PointerPhase::Hovering { frame: bottom });

    let events = ui.on_pointer_move(MOUSE, Vec2::new(150.0, 150.0), ms(10));
    assert_eq!(
        kinds(&events),
        vec![(UiEventKind::Leave, bottom), (UiEventKind::Enter, top)]
    );

    let events = ui.on_pointer_down(MOUSE, Vec2::new(150.0, 150.0), ms(20));
    assert_eq!(kinds(&events), vec![(UiEventKind::Down, top)]);
    let events = ui.on_pointer_up(MOUSE, Vec2::new(151.0, 150.0), ms(40));
    assert_eq!(
        kinds(&events),
        vec![(UiEventKind::Up, top), (UiEventKind::Click, top)]
    );
    assert_eq!(ui.pointer_phase(MOUSE), PointerPhase::Hovering { frame: top });
}

#[test]
fn test_release_elsewhere_is_not_a_click() {
    let (mut fixture, _bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    ui.on_pointer_down(MOUSE, Vec2::new(250.0, 250.0), ms(0));
    let events = ui.on_pointer_up(MOUSE, Vec2::new(700.0, 20.0), ms(10));
    assert_eq!(
        kinds(&events),
        vec![(UiEventKind::Up, top), (UiEventKind::Leave, top)]
    );
    assert_eq!(ui.pointer_phase(MOUSE), PointerPhase::Idle);
}

#[test]
fn test_drag_past_threshold() {
    let (mut fixture, _bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    ui.on_pointer_down(MOUSE, Vec2::new(250.0, 250.0), ms(0));

    // Within the 4px threshold: still a press.
    assert!(ui.on_pointer_move(MOUSE, Vec2::new(252.0, 250.0), ms(10)).is_empty());

    let events = ui.on_pointer_move(MOUSE, Vec2::new(260.0, 250.0), ms(20));
    assert_eq!(
        events.iter().map(|e| e.kind).collect::<Vec<_>>(),
        vec![
            UiEventKind::DragStart,
            UiEventKind::DragMove {
                delta: Vec2::new(10.0, 0.0)
            },
        ]
    );

    // Dragging keeps targeting the pressed frame, even off its rectangle.
    let events = ui.on_pointer_move(MOUSE, Vec2::new(700.0, 20.0), ms(30));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target, top);

    // Released away from the frame, so hover moves on too.
    let events = ui.on_pointer_up(MOUSE, Vec2::new(700.0, 20.0), ms(40));
    assert_eq!(
        kinds(&events),
        vec![
            (UiEventKind::Up, top),
            (UiEventKind::DragStop, top),
            (UiEventKind::Leave, top),
        ]
    );
    assert_eq!(ui.pointer_phase(MOUSE), PointerPhase::Idle);
}

#[test]
fn test_double_click_window() {
    let mut fixture = UiFixture::with_config(
        UiConfig::default().with_double_click_time(ms(250)),
    );
    let frame = fixture.frame_at(None, 0.0, 0.0, 100.0, 100.0);
    let ui = &mut fixture.ui;
    ui.update();
    let point = Vec2::new(10.0, 10.0);

    ui.on_pointer_down(MOUSE, point, ms(0));
    ui.on_pointer_up(MOUSE, point, ms(50));
    let events = ui.on_pointer_down(MOUSE, point, ms(200));
    assert_eq!(
        kinds(&events),
        vec![(UiEventKind::Down, frame), (UiEventKind::DoubleClick, frame)]
    );
    ui.on_pointer_up(MOUSE, point, ms(220));

    // A third press right after starts a new sequence.
    let events = ui.on_pointer_down(MOUSE, point, ms(300));
    assert_eq!(kinds(&events), vec![(UiEventKind::Down, frame)]);
    ui.on_pointer_up(MOUSE, point, ms(310));

    let events = ui.on_pointer_down(MOUSE, point, ms(900));
    assert_eq!(kinds(&events), vec![(UiEventKind::Down, frame)]);
}

#[test]
fn test_long_press_suppresses_click() {
    let (mut fixture, _bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    let point = Vec2::new(250.0, 250.0);
    ui.on_pointer_down(MOUSE, point, ms(0));

    assert!(ui.poll(ms(100)).is_empty());
    assert_eq!(kinds(&ui.poll(ms(600))), vec![(UiEventKind::LongPress, top)]);
    assert!(ui.poll(ms(700)).is_empty());

    let events = ui.on_pointer_up(MOUSE, point, ms(800));
    assert_eq!(kinds(&events), vec![(UiEventKind::Up, top)]);
}

#[test]
fn test_wheel_needs_opt_in() {
    let (mut fixture, bottom, _top) = overlapping();
    let ui = &mut fixture.ui;
    let point = Vec2::new(150.0, 150.0);
    assert!(ui.on_pointer_wheel(MOUSE, point, 1.0).is_empty());

    ui.set_wheel_enabled(bottom, true).unwrap();
    let events = ui.on_pointer_wheel(MOUSE, point, -2.0);
    assert_eq!(
        kinds(&events),
        vec![(UiEventKind::Wheel { delta: -2.0 }, bottom)]
    );
}

#[test]
fn test_focus_loss_releases_pointer() {
    let (mut fixture, _bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    ui.on_pointer_down(MOUSE, Vec2::new(250.0, 250.0), ms(0));
    ui.on_pointer_move(MOUSE, Vec2::new(280.0, 250.0), ms(10));

    let events = ui.on_focus_lost();
    assert_eq!(
        kinds(&events),
        vec![(UiEventKind::DragStop, top), (UiEventKind::Leave, top)]
    );
    assert_eq!(ui.pointer_phase(MOUSE), PointerPhase::Idle);
}

#[test]
fn test_update_refreshes_hover_after_layout_change() {
    let (mut fixture, bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    ui.on_pointer_move(MOUSE, Vec2::new(150.0, 150.0), ms(0));
    assert_eq!(ui.pointer_phase(MOUSE), PointerPhase::Hovering { frame: top });

    ui.hide(top).unwrap();
    let events = ui.update();
    assert_eq!(
        kinds(&events),
        vec![(UiEventKind::Leave, top), (UiEventKind::Enter, bottom)]
    );
}

#[test]
fn test_destroyed_frame_is_forgotten() {
    let (mut fixture, _bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    ui.on_pointer_down(MOUSE, Vec2::new(250.0, 250.0), ms(0));
    ui.destroy(top).unwrap();
    assert_eq!(ui.pointer_phase(MOUSE), PointerPhase::Idle);
    assert!(ui.on_pointer_up(MOUSE, Vec2::new(250.0, 250.0), ms(10)).is_empty());
}

#[derive(Default)]
struct Recorder {
    seen: Rc<RefCell<Vec<UiEventKind>>>,
}

impl FrameBehavior for Recorder {
    fn on_event(&mut self, ui: &mut UiManager, frame: ObjectId, event: &UiEvent) {
        self.seen.borrow_mut().push(event.kind);
        if event.kind == UiEventKind::Click {
            // Behaviours may mutate the manager from inside a callback.
            ui.set_top_level(frame, true).unwrap();
            ui.raise(frame).unwrap();
        }
    }
}

#[test]
fn test_behavior_receives_events() {
    let mut fixture = UiFixture::new();
    let behind = fixture.frame_at(None, 0.0, 0.0, 100.0, 100.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let ui = &mut fixture.ui;
    let button = ui
        .create_frame_with(None, Some("Button"), Box::new(Recorder { seen: seen.clone() }))
        .unwrap();
    ui.set_all_points(button, anchorage_ui::AnchorTarget::Object(behind))
        .unwrap();
    ui.set_level(behind, 5).unwrap();
    ui.update();
    assert_eq!(ui.hit_test(Vec2::new(10.0, 10.0)), Some(behind));
    ui.set_mouse_enabled(behind, false).unwrap();

    let point = Vec2::new(10.0, 10.0);
    ui.on_pointer_down(MOUSE, point, ms(0));
    ui.on_pointer_up(MOUSE, point, ms(10));

    assert_eq!(
        *seen.borrow(),
        vec![
            UiEventKind::Enter,
            UiEventKind::Down,
            UiEventKind::Up,
            UiEventKind::Click,
        ]
    );
    assert_eq!(ui.draw_order(), &[behind, button]);
    assert!(ui.frame(button).unwrap().has_behavior());
}

#[test]
fn test_auto_focus_on_press() {
    let (mut fixture, bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    ui.set_auto_focus(top, true).unwrap();

    ui.on_pointer_down(MOUSE, Vec2::new(50.0, 50.0), ms(0));
    ui.on_pointer_up(MOUSE, Vec2::new(50.0, 50.0), ms(10));
    assert_eq!(ui.focused(), None);

    let events = ui.on_pointer_down(MOUSE, Vec2::new(250.0, 250.0), ms(20));
    assert!(events.iter().any(|e| e.kind == UiEventKind::FocusGained && e.target == top));
    assert_eq!(ui.focused(), Some(top));

    let events = ui.set_focus(bottom).unwrap();
    assert_eq!(
        kinds(&events),
        vec![(UiEventKind::FocusLost, top), (UiEventKind::FocusGained, bottom)]
    );
    ui.destroy(bottom).unwrap();
    assert_eq!(ui.focused(), Some(top));
}

#[test]
fn test_queries_see_pending_layout() {
    let mut fixture = UiFixture::new();
    let frame = fixture.frame_at(None, 0.0, 0.0, 100.0, 100.0);
    let ui = &mut fixture.ui;
    ui.update();

    ui.set_point(frame, Anchor::to_screen(AnchorPoint::TopLeft).offset(300.0, 300.0))
        .unwrap();
    assert_eq!(ui.hit_test(Vec2::new(10.0, 10.0)), None);
    assert_eq!(ui.hit_test(Vec2::new(310.0, 310.0)), Some(frame));
    assert_eq!(
        ui.snapshot().rect(frame),
        Some(Rect::new(300.0, 300.0, 100.0, 100.0))
    );

    ui.set_point(frame, Anchor::to_screen(AnchorPoint::TopLeft).offset(500.0, 0.0))
        .unwrap();
    let events = ui.on_pointer_move(MOUSE, Vec2::new(550.0, 50.0), ms(0));
    assert_eq!(kinds(&events), vec![(UiEventKind::Enter, frame)]);
}

#[test]
fn test_press_raises_top_level_ancestor() {
    let (mut fixture, bottom, top) = overlapping();
    let button = fixture.frame_at(Some(bottom), 10.0, 10.0, 50.0, 50.0);
    let ui = &mut fixture.ui;
    ui.set_top_level(bottom, true).unwrap();
    assert_eq!(ui.hit_test(Vec2::new(150.0, 150.0)), Some(top));

    let events = ui.on_pointer_down(MOUSE, Vec2::new(20.0, 20.0), ms(0));
    assert_eq!(kinds(&events), vec![(UiEventKind::Enter, button), (UiEventKind::Down, button)]);
    assert_eq!(ui.draw_order(), &[top, bottom, button]);
    assert_eq!(ui.hit_test(Vec2::new(150.0, 150.0)), Some(bottom));
    ui.on_pointer_up(MOUSE, Vec2::new(20.0, 20.0), ms(10));

    // Frames without a top-level ancestor stay put.
    ui.on_pointer_down(MOUSE, Vec2::new(250.0, 250.0), ms(20));
    assert_eq!(ui.draw_order(), &[top, bottom, button]);
}

#[test]
fn test_drag_moves_movable_frame() {
    let mut fixture = UiFixture::new();
    let window = fixture.frame_at(None, 100.0, 100.0, 200.0, 100.0);
    let label = fixture.frame_at(Some(window), 10.0, 10.0, 50.0, 20.0);
    let ui = &mut fixture.ui;
    ui.set_mouse_enabled(label, false).unwrap();
    ui.set_movable(window, true).unwrap();
    ui.update();

    ui.on_pointer_down(MOUSE, Vec2::new(150.0, 150.0), ms(0));
    ui.on_pointer_move(MOUSE, Vec2::new(160.0, 150.0), ms(10));
    assert!(ui.is_moving(window));
    ui.on_pointer_move(MOUSE, Vec2::new(180.0, 170.0), ms(20));
    ui.update();
    assert_eq!(ui.rect(window), Some(Rect::new(130.0, 120.0, 200.0, 100.0)));
    assert_eq!(ui.rect(label), Some(Rect::new(140.0, 130.0, 50.0, 20.0)));

    ui.on_pointer_up(MOUSE, Vec2::new(180.0, 170.0), ms(30));
    assert!(!ui.is_moving(window));
    ui.on_pointer_move(MOUSE, Vec2::new(400.0, 400.0), ms(40));
    ui.update();
    assert_eq!(ui.rect(window), Some(Rect::new(130.0, 120.0, 200.0, 100.0)));
}

#[test]
fn test_drag_leaves_fixed_frame_alone() {
    let (mut fixture, _bottom, top) = overlapping();
    let ui = &mut fixture.ui;
    assert_eq!(ui.start_moving(top), Ok(false));

    ui.on_pointer_down(MOUSE, Vec2::new(250.0, 250.0), ms(0));
    ui.on_pointer_move(MOUSE, Vec2::new(290.0, 250.0), ms(10));
    ui.update();
    assert!(!ui.is_moving(top));
    assert_eq!(ui.rect(top), Some(Rect::new(100.0, 100.0, 200.0, 200.0)));
}

#[test]
fn test_moving_frame_stays_clamped() {
    let mut fixture = UiFixture::new();
    let window = fixture.frame_at(None, 700.0, 0.0, 100.0, 100.0);
    let ui = &mut fixture.ui;
    ui.set_movable(window, true).unwrap();
    ui.set_clamped_to_screen(window, true).unwrap();
    ui.update();

    ui.on_pointer_down(MOUSE, Vec2::new(750.0, 50.0), ms(0));
    ui.on_pointer_move(MOUSE, Vec2::new(790.0, 20.0), ms(10));
    ui.update();
    assert_eq!(ui.rect(window), Some(Rect::new(700.0, 0.0, 100.0, 100.0)));

    ui.on_pointer_move(MOUSE, Vec2::new(650.0, 250.0), ms(20));
    ui.on_focus_lost();
    ui.update();
    assert!(!ui.is_moving(window));
    assert_eq!(ui.rect(window), Some(Rect::new(600.0, 200.0, 100.0, 100.0)));
}
