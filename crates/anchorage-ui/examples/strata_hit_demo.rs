//! Strata Hit Testing Demo
//!
//! Headless demo showing that the draw order drives hit-testing as well as
//! drawing. Three overlapping panes sit at different levels, each counting the
//! clicks it receives. A tooltip in the TOOLTIP strata covers all of them but
//! ignores the mouse, so clicks fall through it.
//!
//! Layout:
//! - Pane 0 (level 0):  Leftmost
//! - Pane 1 (level 10): Middle, overlaps pane 0
//! - Pane 2 (level 20): Rightmost, overlaps pane 1
//!
//! Run with `RUST_LOG=anchorage_ui=debug` to see resolution and order logs.

use anchorage_core::logging;
use anchorage_core::profiling::{ProfilingBackend, init_profiling};
use anchorage_ui::{
    Anchor, AnchorPoint, FrameBehavior, FrameStrata, Length, ObjectId, PointerId, UiConfig,
    UiEvent, UiEventKind, UiManager, Vec2,
};
use std::sync::{Arc, RwLock};
use std::time::Duration;

// ── Shared state ────────────────────────────────────────────────────────────

#[derive(Clone)]
struct DemoState {
    last_clicked: Arc<RwLock<Option<u8>>>,
    click_counts: Arc<RwLock<[u32; 3]>>,
}

impl DemoState {
    fn new() -> Self {
        Self {
            last_clicked: Arc::new(RwLock::new(None)),
            click_counts: Arc::new(RwLock::new([0; 3])),
        }
    }

    fn click(&self, pane: u8) {
        *self.last_clicked.write().unwrap() = Some(pane);
        self.click_counts.write().unwrap()[pane as usize] += 1;
    }

    fn last_clicked(&self) -> Option<u8> {
        *self.last_clicked.read().unwrap()
    }

    fn counts(&self) -> [u32; 3] {
        *self.click_counts.read().unwrap()
    }
}

// ── Behaviour ───────────────────────────────────────────────────────────────

struct PaneBehavior {
    pane: u8,
    state: DemoState,
}

impl FrameBehavior for PaneBehavior {
    fn on_event(&mut self, _ui: &mut UiManager, _frame: ObjectId, event: &UiEvent) {
        if event.kind == UiEventKind::Click {
            self.state.click(self.pane);
        }
    }
}

fn build(ui: &mut UiManager, state: &DemoState) -> Vec<ObjectId> {
    let mut panes = Vec::new();
    for pane in 0..3u8 {
        let frame = ui
            .create_frame_with(
                None,
                Some(&format!("Pane{}", pane)),
                Box::new(PaneBehavior {
                    pane,
                    state: state.clone(),
                }),
            )
            .unwrap();
        ui.set_size(frame, Length::Percent(40.0), Length::Percent(50.0))
            .unwrap();
        ui.set_point(
            frame,
            Anchor::to_screen(AnchorPoint::TopLeft).offset(40.0 + pane as f32 * 200.0, 100.0),
        )
        .unwrap();
        ui.set_level(frame, pane as i32 * 10).unwrap();
        panes.push(frame);
    }

    let tooltip = ui.create_frame(None, Some("Tooltip")).unwrap();
    ui.set_strata(tooltip, FrameStrata::Tooltip).unwrap();
    ui.set_mouse_enabled(tooltip, false).unwrap();
    ui.set_size(tooltip, Length::Px(600.0), Length::Px(40.0)).unwrap();
    ui.set_point(
        tooltip,
        Anchor::to_named(AnchorPoint::Top, "Pane1").relative_to(AnchorPoint::Center),
    )
    .unwrap();
    panes
}

fn click(ui: &mut UiManager, point: Vec2, at: Duration) {
    ui.on_pointer_move(PointerId::MOUSE, point, at);
    ui.on_pointer_down(PointerId::MOUSE, point, at);
    ui.on_pointer_up(PointerId::MOUSE, point, at + Duration::from_millis(30));
}

fn main() {
    logging::init();
    init_profiling(ProfilingBackend::InProcess);

    let state = DemoState::new();
    let mut ui = UiManager::new(UiConfig::default().with_screen_size(1024.0, 768.0));
    let panes = build(&mut ui, &state);
    ui.update();

    for (i, &pane) in panes.iter().enumerate() {
        tracing::info!("Pane {} at {:?}", i, ui.rect(pane));
    }
    tracing::info!("Draw order: {:?}", ui.draw_order());

    // One click per overlap band plus one in each exclusive area.
    let points = [
        Vec2::new(100.0, 200.0),
        Vec2::new(300.0, 200.0),
        Vec2::new(500.0, 200.0),
        Vec2::new(800.0, 200.0),
    ];
    for (i, point) in points.into_iter().enumerate() {
        click(&mut ui, point, Duration::from_secs(i as u64));
        tracing::info!(
            "Click at {:?} landed on pane {:?}",
            point,
            state.last_clicked()
        );
    }

    // Raising pane 0 makes it win the band it shares with pane 1. From now on
    // pressing it raises it again.
    ui.set_top_level(panes[0], true).unwrap();
    ui.raise(panes[0]).unwrap();
    click(&mut ui, Vec2::new(300.0, 200.0), Duration::from_secs(10));
    tracing::info!("After raise, click landed on pane {:?}", state.last_clicked());

    let counts = state.counts();
    tracing::info!(
        "Clicks per pane: {:?} | {}",
        counts,
        ui.metrics().format_summary()
    );
}
