//! Draw calls issued to a renderer.

use anchorage_test_utils::{MockRenderer, RenderCall, UiFixture};
use anchorage_ui::{AnchorTarget, Drawable, FrameStrata, Layer, Rect};

#[test]
fn test_frames_then_their_regions() {
    let mut fixture = UiFixture::new();
    let back = fixture.named_frame_at(None, Some("Back"), 0.0, 0.0, 100.0, 100.0);
    let front = fixture.frame_at(None, 50.0, 50.0, 100.0, 100.0);
    let ui = &mut fixture.ui;
    let overlay = ui
        .create_region(back, Layer::Overlay, None, Drawable::Color([1.0, 0.0, 0.0, 1.0]))
        .unwrap();
    let fill = ui
        .create_region(back, Layer::Background, None, Drawable::Color([0.0, 0.0, 0.0, 1.0]))
        .unwrap();
    for region in [overlay, fill] {
        ui.set_all_points(region, AnchorTarget::Parent).unwrap();
    }
    ui.update();

    let renderer = MockRenderer::new();
    ui.render(&renderer);
    let ids: Vec<_> = renderer.calls().iter().map(RenderCall::id).collect();
    assert_eq!(ids, vec![back, fill, overlay, front]);
    assert_eq!(
        renderer.calls()[0],
        RenderCall::Frame {
            id: back,
            name: Some("Back".to_string()),
            rect: Rect::new(0.0, 0.0, 100.0, 100.0),
        }
    );
}

#[test]
fn test_render_follows_strata() {
    let mut fixture = UiFixture::new();
    let tooltip = fixture.frame_at(None, 0.0, 0.0, 10.0, 10.0);
    let panel = fixture.frame_at(None, 0.0, 0.0, 10.0, 10.0);
    let ui = &mut fixture.ui;
    ui.set_strata(tooltip, FrameStrata::Tooltip).unwrap();
    ui.update();

    let renderer = MockRenderer::new();
    ui.snapshot().render(&renderer);
    assert_eq!(renderer.frames(), vec![panel, tooltip]);
}

#[test]
fn test_unresolved_and_hidden_objects_are_skipped() {
    let mut fixture = UiFixture::new();
    let frame = fixture.frame_at(None, 0.0, 0.0, 100.0, 100.0);
    let ui = &mut fixture.ui;
    let floating = ui.create_frame(None, None).unwrap();
    let hidden = ui
        .create_region(frame, Layer::Artwork, None, Drawable::Color([0.0; 4]))
        .unwrap();
    let unplaced = ui
        .create_region(frame, Layer::Artwork, None, Drawable::Color([0.0; 4]))
        .unwrap();
    ui.set_all_points(hidden, AnchorTarget::Parent).unwrap();
    ui.hide(hidden).unwrap();
    ui.update();

    let renderer = MockRenderer::new();
    ui.render(&renderer);
    assert_eq!(renderer.frames(), vec![frame]);
    assert!(renderer.regions().is_empty());
    assert!(ui.object(floating).is_some());
    assert!(ui.object(unplaced).is_some());

    ui.show(hidden).unwrap();
    ui.update();
    renderer.clear_calls();
    ui.render(&renderer);
    assert_eq!(renderer.regions(), vec![hidden]);
}

#[test]
fn test_snapshot_is_consistent_view() {
    let mut fixture = UiFixture::new();
    let frame = fixture.named_frame_at(None, Some("Root"), 10.0, 20.0, 30.0, 40.0);
    fixture.ui.update();

    let snapshot = fixture.ui.snapshot();
    assert_eq!(snapshot.draw_order(), &[frame]);
    assert_eq!(snapshot.find("Root"), Some(frame));
    assert_eq!(snapshot.rect(frame), Some(Rect::new(10.0, 20.0, 30.0, 40.0)));
    assert_eq!(
        snapshot.hit_test(anchorage_ui::Vec2::new(15.0, 25.0)),
        Some(frame)
    );
}
