//! Pointer hit-testing and the per-pointer interaction state machine.

use crate::capability::Interactive;
use crate::config::UiConfig;
use crate::object::ObjectId;
use crate::tree::UiTree;
use anchorage_core::math::Vec2;
use anchorage_core::profiling::profile_function;
use indexmap::IndexMap;
use std::time::Duration;

/// Identifies one pointing device (mouse, finger, pen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

impl PointerId {
    pub const MOUSE: PointerId = PointerId(0);
}

/// What happened to a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEventKind {
    /// Pointer entered the frame's hit rectangle.
    Enter,
    /// Pointer left the frame's hit rectangle.
    Leave,
    /// Button pressed on the frame.
    Down,
    /// Button released after a press on the frame.
    Up,
    /// Press and release on the same frame, without drag or long press.
    Click,
    /// Second press on the same frame within the double-click time.
    DoubleClick,
    /// Button held without moving past the drag threshold.
    LongPress,
    DragStart,
    /// Movement since the previous drag event.
    DragMove { delta: Vec2 },
    DragStop,
    Wheel { delta: f32 },
    FocusGained,
    FocusLost,
}

/// Event targeted at a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiEvent {
    pub target: ObjectId,
    pub kind: UiEventKind,
    /// `None` for focus events.
    pub pointer: Option<PointerId>,
    pub position: Vec2,
}

impl UiEvent {
    pub fn pointer(target: ObjectId, kind: UiEventKind, pointer: PointerId, position: Vec2) -> Self {
        Self {
            target,
            kind,
            pointer: Some(pointer),
            position,
        }
    }

    pub fn focus(target: ObjectId, gained: bool) -> Self {
        Self {
            target,
            kind: if gained {
                UiEventKind::FocusGained
            } else {
                UiEventKind::FocusLost
            },
            pointer: None,
            position: Vec2::ZERO,
        }
    }
}

/// Interaction phase of one pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPhase {
    Idle,
    Hovering {
        frame: ObjectId,
    },
    Pressed {
        frame: ObjectId,
        down_point: Vec2,
        down_time: Duration,
        long_press_fired: bool,
    },
    Dragging {
        frame: ObjectId,
        last_point: Vec2,
    },
}

impl PointerPhase {
    /// Frame the pointer is over or captured by.
    pub fn frame(&self) -> Option<ObjectId> {
        match *self {
            PointerPhase::Idle => None,
            PointerPhase::Hovering { frame }
            | PointerPhase::Pressed { frame, .. }
            | PointerPhase::Dragging { frame, .. } => Some(frame),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PointerState {
    phase: PointerPhase,
    position: Vec2,
    /// Frame and time of the last press, for double-click detection.
    last_press: Option<(ObjectId, Duration)>,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            phase: PointerPhase::Idle,
            position: Vec2::ZERO,
            last_press: None,
        }
    }
}

/// Which frames a hit-test may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitFilter {
    Mouse,
    Wheel,
}

/// Topmost frame under `point`, walking `order` from last drawn to first.
///
/// Only shown, input-enabled frames with valid geometry are candidates; their
/// rectangle is shrunk by the hit-rect insets before testing.
pub fn hit_test(tree: &UiTree, order: &[ObjectId], point: Vec2, filter: HitFilter) -> Option<ObjectId> {
    profile_function!();

    order.iter().rev().copied().find(|&id| {
        let Some(node) = tree.node(id) else {
            return false;
        };
        let Some(frame) = node.as_frame() else {
            return false;
        };
        let enabled = match filter {
            HitFilter::Mouse => frame.is_mouse_enabled(),
            HitFilter::Wheel => frame.is_wheel_enabled(),
        };
        enabled
            && node.object.shown
            && node.object.has_valid_geometry
            && frame.hit_rect(node.object.rect).contains(point)
    })
}

/// Translates raw pointer input plus hit-test results into frame events.
#[derive(Debug)]
pub struct EventDispatcher {
    pointers: IndexMap<PointerId, PointerState>,
    drag_threshold: f32,
    double_click_time: Duration,
    long_press_time: Duration,
}

impl EventDispatcher {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            pointers: IndexMap::new(),
            drag_threshold: config.drag_threshold,
            double_click_time: config.double_click_time,
            long_press_time: config.long_press_time,
        }
    }

    pub fn phase(&self, pointer: PointerId) -> PointerPhase {
        self.pointers
            .get(&pointer)
            .map_or(PointerPhase::Idle, |state| state.phase)
    }

    /// Frame under the pointer, if it is hovering or pressing one.
    pub fn hovered(&self, pointer: PointerId) -> Option<ObjectId> {
        self.phase(pointer).frame()
    }

    pub fn position(&self, pointer: PointerId) -> Option<Vec2> {
        self.pointers.get(&pointer).map(|state| state.position)
    }

    /// Pointers that are not holding a button, with their last position.
    pub fn free_pointers(&self) -> Vec<(PointerId, Vec2)> {
        self.pointers
            .iter()
            .filter(|(_, state)| {
                matches!(
                    state.phase,
                    PointerPhase::Idle | PointerPhase::Hovering { .. }
                )
            })
            .map(|(&id, state)| (id, state.position))
            .collect()
    }

    /// Hover transition shared by moves, releases and refreshes.
    fn hover(
        state: &mut PointerState,
        pointer: PointerId,
        point: Vec2,
        hit: Option<ObjectId>,
        events: &mut Vec<UiEvent>,
    ) {
        let current = state.phase.frame();
        if current == hit {
            if let Some(frame) = hit {
                state.phase = PointerPhase::Hovering { frame };
            }
            return;
        }
        if let Some(old) = current {
            events.push(UiEvent::pointer(old, UiEventKind::Leave, pointer, point));
        }
        state.phase = match hit {
            Some(frame) => {
                events.push(UiEvent::pointer(frame, UiEventKind::Enter, pointer, point));
                PointerPhase::Hovering { frame }
            }
            None => PointerPhase::Idle,
        };
    }

    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        point: Vec2,
        time: Duration,
        hit: Option<ObjectId>,
    ) -> Vec<UiEvent> {
        let drag_threshold = self.drag_threshold;
        let long_press_time = self.long_press_time;
        let state = self.pointers.entry(pointer).or_default();
        state.position = point;
        let mut events = Vec::new();

        match state.phase {
            PointerPhase::Idle | PointerPhase::Hovering { .. } => {
                Self::hover(state, pointer, point, hit, &mut events);
            }
            PointerPhase::Pressed {
                frame,
                down_point,
                down_time,
                long_press_fired,
            } => {
                let mut long_press_fired = long_press_fired;
                if !long_press_fired && time.saturating_sub(down_time) >= long_press_time {
                    events.push(UiEvent::pointer(frame, UiEventKind::LongPress, pointer, point));
                    long_press_fired = true;
                }
                if point.distance(down_point) > drag_threshold {
                    events.push(UiEvent::pointer(frame, UiEventKind::DragStart, pointer, down_point));
                    events.push(UiEvent::pointer(
                        frame,
                        UiEventKind::DragMove {
                            delta: point - down_point,
                        },
                        pointer,
                        point,
                    ));
                    state.phase = PointerPhase::Dragging {
                        frame,
                        last_point: point,
                    };
                } else {
                    state.phase = PointerPhase::Pressed {
                        frame,
                        down_point,
                        down_time,
                        long_press_fired,
                    };
                }
            }
            PointerPhase::Dragging { frame, last_point } => {
                events.push(UiEvent::pointer(
                    frame,
                    UiEventKind::DragMove {
                        delta: point - last_point,
                    },
                    pointer,
                    point,
                ));
                state.phase = PointerPhase::Dragging {
                    frame,
                    last_point: point,
                };
            }
        }
        events
    }

    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        point: Vec2,
        time: Duration,
        hit: Option<ObjectId>,
    ) -> Vec<UiEvent> {
        let double_click_time = self.double_click_time;
        let state = self.pointers.entry(pointer).or_default();
        state.position = point;
        let mut events = Vec::new();

        if matches!(
            state.phase,
            PointerPhase::Pressed { .. } | PointerPhase::Dragging { .. }
        ) {
            return events;
        }
        Self::hover(state, pointer, point, hit, &mut events);
        let Some(frame) = hit else {
            return events;
        };

        events.push(UiEvent::pointer(frame, UiEventKind::Down, pointer, point));
        let is_double = matches!(
            state.last_press,
            Some((last, at)) if last == frame && time.saturating_sub(at) <= double_click_time
        );
        if is_double {
            events.push(UiEvent::pointer(frame, UiEventKind::DoubleClick, pointer, point));
            state.last_press = None;
        } else {
            state.last_press = Some((frame, time));
        }
        state.phase = PointerPhase::Pressed {
            frame,
            down_point: point,
            down_time: time,
            long_press_fired: false,
        };
        events
    }

    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        point: Vec2,
        time: Duration,
        hit: Option<ObjectId>,
    ) -> Vec<UiEvent> {
        let mut events = self.poll_pointer(pointer, time);
        let state = self.pointers.entry(pointer).or_default();
        state.position = point;

        match state.phase {
            PointerPhase::Pressed {
                frame,
                long_press_fired,
                ..
            } => {
                events.push(UiEvent::pointer(frame, UiEventKind::Up, pointer, point));
                if hit == Some(frame) && !long_press_fired {
                    events.push(UiEvent::pointer(frame, UiEventKind::Click, pointer, point));
                }
            }
            PointerPhase::Dragging { frame, .. } => {
                events.push(UiEvent::pointer(frame, UiEventKind::Up, pointer, point));
                events.push(UiEvent::pointer(frame, UiEventKind::DragStop, pointer, point));
            }
            PointerPhase::Idle | PointerPhase::Hovering { .. } => {}
        }
        Self::hover(state, pointer, point, hit, &mut events);
        events
    }

    fn poll_pointer(&mut self, pointer: PointerId, time: Duration) -> Vec<UiEvent> {
        let long_press_time = self.long_press_time;
        let Some(state) = self.pointers.get_mut(&pointer) else {
            return Vec::new();
        };
        if let PointerPhase::Pressed {
            frame,
            down_time,
            long_press_fired,
            ..
        } = &mut state.phase
        {
            if !*long_press_fired && time.saturating_sub(*down_time) >= long_press_time {
                *long_press_fired = true;
                return vec![UiEvent::pointer(
                    *frame,
                    UiEventKind::LongPress,
                    pointer,
                    state.position,
                )];
            }
        }
        Vec::new()
    }

    /// Fire long presses that became due without pointer movement.
    pub fn poll(&mut self, time: Duration) -> Vec<UiEvent> {
        let pointers: Vec<PointerId> = self.pointers.keys().copied().collect();
        pointers
            .into_iter()
            .flat_map(|pointer| self.poll_pointer(pointer, time))
            .collect()
    }

    pub fn wheel(
        &mut self,
        pointer: PointerId,
        point: Vec2,
        delta: f32,
        hit: Option<ObjectId>,
    ) -> Vec<UiEvent> {
        self.pointers.entry(pointer).or_default().position = point;
        hit.map(|frame| UiEvent::pointer(frame, UiEventKind::Wheel { delta }, pointer, point))
            .into_iter()
            .collect()
    }

    /// Re-run hover for a pointer that did not move, after geometry or order changed.
    pub fn refresh(&mut self, pointer: PointerId, hit: Option<ObjectId>) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if let Some(state) = self.pointers.get_mut(&pointer) {
            if matches!(
                state.phase,
                PointerPhase::Idle | PointerPhase::Hovering { .. }
            ) {
                let point = state.position;
                Self::hover(state, pointer, point, hit, &mut events);
            }
        }
        events
    }

    /// The host window lost input focus: every pointer goes idle.
    pub fn focus_lost(&mut self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        for (&pointer, state) in self.pointers.iter_mut() {
            let point = state.position;
            match state.phase {
                PointerPhase::Idle => {}
                PointerPhase::Hovering { frame } | PointerPhase::Pressed { frame, .. } => {
                    events.push(UiEvent::pointer(frame, UiEventKind::Leave, pointer, point));
                }
                PointerPhase::Dragging { frame, .. } => {
                    events.push(UiEvent::pointer(frame, UiEventKind::DragStop, pointer, point));
                    events.push(UiEvent::pointer(frame, UiEventKind::Leave, pointer, point));
                }
            }
            state.phase = PointerPhase::Idle;
            state.last_press = None;
        }
        events
    }

    /// Drop every reference to destroyed frames, without events.
    pub fn forget(&mut self, frame: ObjectId) {
        for state in self.pointers.values_mut() {
            if state.phase.frame() == Some(frame) {
                state.phase = PointerPhase::Idle;
            }
            if state.last_press.is_some_and(|(last, _)| last == frame) {
                state.last_press = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchorage_core::alloc::sparse_set::IndexSlot;

    const P: PointerId = PointerId::MOUSE;

    fn id(index: u32) -> ObjectId {
        ObjectId::from_slot(IndexSlot::new(0, index))
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn kinds(events: &[UiEvent]) -> Vec<(UiEventKind, ObjectId)> {
        events.iter().map(|e| (e.kind, e.target)).collect()
    }

    fn dispatcher() -> EventDispatcher {
        EventDispatcher::new(&UiConfig::default())
    }

    #[test]
    fn test_enter_leave() {
        let mut d = dispatcher();
        let (a, b) = (id(1), id(2));
        let p = Vec2::new(1.0, 1.0);

        assert_eq!(kinds(&d.pointer_move(P, p, ms(0), Some(a))), vec![(UiEventKind::Enter, a)]);
        assert!(d.pointer_move(P, p, ms(1), Some(a)).is_empty());
        assert_eq!(
            kinds(&d.pointer_move(P, p, ms(2), Some(b))),
            vec![(UiEventKind::Leave, a), (UiEventKind::Enter, b)]
        );
        assert_eq!(kinds(&d.pointer_move(P, p, ms(3), None)), vec![(UiEventKind::Leave, b)]);
        assert_eq!(d.phase(P), PointerPhase::Idle);
    }

    #[test]
    fn test_click() {
        let mut d = dispatcher();
        let a = id(1);
        let p = Vec2::new(5.0, 5.0);
        d.pointer_move(P, p, ms(0), Some(a));
        assert_eq!(kinds(&d.pointer_down(P, p, ms(10), Some(a))), vec![(UiEventKind::Down, a)]);
        assert_eq!(
            kinds(&d.pointer_up(P, p, ms(20), Some(a))),
            vec![(UiEventKind::Up, a), (UiEventKind::Click, a)]
        );
        assert_eq!(d.phase(P), PointerPhase::Hovering { frame: a });
    }

    #[test]
    fn test_release_elsewhere_is_not_a_click() {
        let mut d = dispatcher();
        let (a, b) = (id(1), id(2));
        d.pointer_down(P, Vec2::ZERO, ms(0), Some(a));
        let events = d.pointer_up(P, Vec2::new(2.0, 0.0), ms(10), Some(b));
        assert_eq!(
            kinds(&events),
            vec![(UiEventKind::Up, a), (UiEventKind::Leave, a), (UiEventKind::Enter, b)]
        );
    }

    #[test]
    fn test_double_click() {
        let mut d = dispatcher();
        let a = id(1);
        d.pointer_down(P, Vec2::ZERO, ms(0), Some(a));
        d.pointer_up(P, Vec2::ZERO, ms(50), Some(a));
        let second = d.pointer_down(P, Vec2::ZERO, ms(200), Some(a));
        assert_eq!(
            kinds(&second),
            vec![(UiEventKind::Down, a), (UiEventKind::DoubleClick, a)]
        );
        d.pointer_up(P, Vec2::ZERO, ms(220), Some(a));
        // Too late for a second double click.
        let third = d.pointer_down(P, Vec2::ZERO, ms(900), Some(a));
        assert_eq!(kinds(&third), vec![(UiEventKind::Down, a)]);
    }

    #[test]
    fn test_drag() {
        let mut d = dispatcher();
        let a = id(1);
        d.pointer_down(P, Vec2::ZERO, ms(0), Some(a));
        assert!(d.pointer_move(P, Vec2::new(2.0, 0.0), ms(10), Some(a)).is_empty());

        let start = d.pointer_move(P, Vec2::new(10.0, 0.0), ms(20), None);
        assert_eq!(
            kinds(&start),
            vec![
                (UiEventKind::DragStart, a),
                (UiEventKind::DragMove { delta: Vec2::new(10.0, 0.0) }, a),
            ]
        );
        let moved = d.pointer_move(P, Vec2::new(15.0, 5.0), ms(30), None);
        assert_eq!(
            kinds(&moved),
            vec![(UiEventKind::DragMove { delta: Vec2::new(5.0, 5.0) }, a)]
        );
        let stop = d.pointer_up(P, Vec2::new(15.0, 5.0), ms(40), None);
        assert_eq!(
            kinds(&stop),
            vec![(UiEventKind::Up, a), (UiEventKind::DragStop, a), (UiEventKind::Leave, a)]
        );
        assert_eq!(d.phase(P), PointerPhase::Idle);
    }

    #[test]
    fn test_long_press_suppresses_click() {
        let mut d = dispatcher();
        let a = id(1);
        d.pointer_down(P, Vec2::ZERO, ms(0), Some(a));
        assert!(d.poll(ms(100)).is_empty());
        assert_eq!(kinds(&d.poll(ms(600))), vec![(UiEventKind::LongPress, a)]);
        assert!(d.poll(ms(700)).is_empty());
        assert_eq!(kinds(&d.pointer_up(P, Vec2::ZERO, ms(800), Some(a))), vec![(UiEventKind::Up, a)]);
    }

    #[test]
    fn test_focus_lost_resets() {
        let mut d = dispatcher();
        let a = id(1);
        d.pointer_down(P, Vec2::ZERO, ms(0), Some(a));
        d.pointer_move(P, Vec2::new(20.0, 0.0), ms(10), Some(a));
        assert_eq!(
            kinds(&d.focus_lost()),
            vec![(UiEventKind::DragStop, a), (UiEventKind::Leave, a)]
        );
        assert_eq!(d.phase(P), PointerPhase::Idle);
    }

    #[test]
    fn test_forget_destroyed_frame() {
        let mut d = dispatcher();
        let a = id(1);
        d.pointer_move(P, Vec2::ZERO, ms(0), Some(a));
        d.forget(a);
        assert_eq!(d.phase(P), PointerPhase::Idle);
        assert!(d.pointer_move(P, Vec2::ZERO, ms(1), None).is_empty());
    }
}
