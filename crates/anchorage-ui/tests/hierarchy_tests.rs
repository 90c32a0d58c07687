//! Ownership, naming, destruction and dirty tracking across the tree.

use anchorage_test_utils::UiFixture;
use anchorage_ui::{
    Anchor, AnchorPoint, DirtyFlags, Drawable, Layer, Length, Rect, UiError,
};

#[test]
fn test_parent_placeholder_in_names() {
    let mut fixture = UiFixture::new();
    let ui = &mut fixture.ui;
    let bag = ui.create_frame(None, Some("Bag")).unwrap();
    let slot = ui.create_frame(Some(bag), Some("$parentSlot1")).unwrap();
    assert_eq!(ui.find("BagSlot1"), Some(slot));
    assert_eq!(ui.object(slot).unwrap().name(), Some("BagSlot1"));

    let anonymous = ui.create_frame(None, None).unwrap();
    assert_eq!(ui.object(anonymous).unwrap().name(), None);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut fixture = UiFixture::new();
    let ui = &mut fixture.ui;
    ui.create_frame(None, Some("Main")).unwrap();
    assert_eq!(
        ui.create_frame(None, Some("Main")),
        Err(UiError::DuplicateName("Main".to_string()))
    );
    // The failed frame left nothing behind.
    assert_eq!(ui.tree().len(), 1);
    assert_eq!(ui.order().len(), 1);
}

#[test]
fn test_name_is_free_after_destroy() {
    let mut fixture = UiFixture::new();
    let ui = &mut fixture.ui;
    let first = ui.create_frame(None, Some("Popup")).unwrap();
    ui.destroy(first).unwrap();
    assert_eq!(ui.find("Popup"), None);
    let second = ui.create_frame(None, Some("Popup")).unwrap();
    assert_ne!(first, second);
    assert!(ui.object(first).is_none());
}

#[test]
fn test_destroy_child_checks_ownership() {
    let mut fixture = UiFixture::new();
    let a = fixture.frame_at(None, 0.0, 0.0, 10.0, 10.0);
    let b = fixture.frame_at(None, 0.0, 0.0, 10.0, 10.0);
    let child = fixture.frame_at(Some(a), 0.0, 0.0, 5.0, 5.0);
    let ui = &mut fixture.ui;

    assert_eq!(
        ui.destroy_child(b, child),
        Err(UiError::InvalidOwnership { parent: b, child })
    );
    assert!(ui.object(child).is_some());
    assert_eq!(
        ui.remove_child(b, child),
        Err(UiError::InvalidOwnership { parent: b, child })
    );

    ui.destroy_child(a, child).unwrap();
    assert!(ui.object(child).is_none());
    assert!(ui.children(a).is_empty());
}

#[test]
fn test_add_child_rejects_cycles() {
    let mut fixture = UiFixture::new();
    let a = fixture.frame_at(None, 0.0, 0.0, 10.0, 10.0);
    let b = fixture.frame_at(Some(a), 0.0, 0.0, 10.0, 10.0);
    let ui = &mut fixture.ui;
    assert_eq!(
        ui.add_child(b, a),
        Err(UiError::HierarchyCycle { parent: b, child: a })
    );
    assert_eq!(
        ui.add_child(a, a),
        Err(UiError::HierarchyCycle { parent: a, child: a })
    );
    assert_eq!(ui.children(a), &[b]);
}

#[test]
fn test_reparent_moves_relative_geometry() {
    let mut fixture = UiFixture::new();
    let left = fixture.frame_at(None, 0.0, 0.0, 100.0, 100.0);
    let right = fixture.frame_at(None, 400.0, 0.0, 100.0, 100.0);
    let child = fixture.frame_at(Some(left), 10.0, 10.0, 20.0, 20.0);
    let ui = &mut fixture.ui;
    ui.update();
    assert_eq!(ui.rect(child), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));

    ui.add_child(right, child).unwrap();
    assert_eq!(ui.object(child).unwrap().parent(), Some(right));
    assert!(ui.children(left).is_empty());
    ui.update();
    assert_eq!(ui.rect(child), Some(Rect::new(410.0, 10.0, 20.0, 20.0)));

    ui.remove_child(right, child).unwrap();
    assert_eq!(ui.tree().roots().last(), Some(&child));
    ui.update();
    assert_eq!(ui.rect(child), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
}

#[test]
fn test_destroying_anchor_target_invalidates_dependents() {
    let mut fixture = UiFixture::new();
    let target = fixture.frame_at(None, 50.0, 50.0, 10.0, 10.0);
    let ui = &mut fixture.ui;
    let follower = ui.create_frame(None, None).unwrap();
    ui.set_size(follower, Length::Px(10.0), Length::Px(10.0)).unwrap();
    ui.set_point(follower, Anchor::to_object(AnchorPoint::TopLeft, target))
        .unwrap();
    ui.update();
    assert_eq!(ui.rect(follower), Some(Rect::new(50.0, 50.0, 10.0, 10.0)));

    ui.destroy(target).unwrap();
    assert!(ui
        .object(follower)
        .unwrap()
        .dirty_flags()
        .needs_layout());
    ui.update();
    assert!(matches!(
        ui.object(follower).unwrap().last_error(),
        Some(UiError::UnresolvedAnchor { .. })
    ));
    // The old rectangle stays available.
    assert_eq!(ui.rect(follower), Some(Rect::new(50.0, 50.0, 10.0, 10.0)));
}

#[test]
fn test_named_target_survives_recreation() {
    let mut fixture = UiFixture::new();
    let ui = &mut fixture.ui;
    let make_target = |ui: &mut anchorage_ui::UiManager, x: f32| {
        let target = ui.create_frame(None, Some("Target")).unwrap();
        ui.set_size(target, Length::Px(10.0), Length::Px(10.0)).unwrap();
        ui.set_point(target, Anchor::to_screen(AnchorPoint::TopLeft).offset(x, 0.0))
            .unwrap();
        target
    };
    let first = make_target(ui, 100.0);
    let follower = ui.create_frame(None, None).unwrap();
    ui.set_size(follower, Length::Px(5.0), Length::Px(5.0)).unwrap();
    ui.set_point(
        follower,
        Anchor::to_named(AnchorPoint::TopLeft, "Target").relative_to(AnchorPoint::BottomLeft),
    )
    .unwrap();
    ui.update();
    assert_eq!(ui.rect(follower), Some(Rect::new(100.0, 10.0, 5.0, 5.0)));

    ui.destroy(first).unwrap();
    make_target(ui, 300.0);
    ui.update();
    assert_eq!(ui.rect(follower), Some(Rect::new(300.0, 10.0, 5.0, 5.0)));
}

#[test]
fn test_paint_changes_skip_layout() {
    let mut fixture = UiFixture::new();
    let frame = fixture.frame_at(None, 0.0, 0.0, 100.0, 100.0);
    let ui = &mut fixture.ui;
    let region = ui
        .create_region(frame, Layer::Artwork, Some("Icon"), Drawable::Color([1.0; 4]))
        .unwrap();
    ui.set_all_points(region, anchorage_ui::AnchorTarget::Parent)
        .unwrap();
    ui.update();
    assert!(ui.diagnostics().is_empty());

    ui.set_drawable(
        region,
        Drawable::Texture {
            key: "icons/gear".to_string(),
        },
    )
    .unwrap();
    let flags = ui.object(region).unwrap().dirty_flags();
    assert!(flags.is_paint_only());
    assert_eq!(ui.tree().dirty_count(), 0);

    ui.update();
    assert_eq!(ui.metrics().objects_resolved, 0);
    assert_eq!(ui.object(region).unwrap().dirty_flags(), DirtyFlags::NONE);
    assert_eq!(ui.set_drawable(frame, Drawable::Color([0.0; 4])), Err(UiError::NotARegion(frame)));
}

#[test]
fn test_region_layers() {
    let mut fixture = UiFixture::new();
    let frame = fixture.frame_at(None, 0.0, 0.0, 100.0, 100.0);
    let ui = &mut fixture.ui;
    let text = ui
        .create_region(frame, Layer::Overlay, None, Drawable::Text { content: "Hi".into() })
        .unwrap();
    let fill = ui
        .create_region(frame, Layer::Background, None, Drawable::Color([0.0; 4]))
        .unwrap();
    assert_eq!(ui.region(text).unwrap().layer(), Layer::Overlay);

    ui.set_layer(text, Layer::Border).unwrap();
    let frame_state = ui.frame(frame).unwrap();
    use anchorage_ui::Layered;
    assert_eq!(frame_state.regions(Layer::Border), &[text]);
    assert!(frame_state.regions(Layer::Overlay).is_empty());
    assert_eq!(
        frame_state.iter_regions().map(|(_, id)| id).collect::<Vec<_>>(),
        vec![fill, text]
    );
    assert_eq!(ui.set_layer(frame, Layer::Border), Err(UiError::NotARegion(frame)));
    assert!(matches!(
        ui.create_region(text, Layer::Artwork, None, Drawable::Color([0.0; 4])),
        Err(UiError::NotAFrame(_))
    ));
}

#[test]
fn test_unknown_handles_are_errors() {
    let mut fixture = UiFixture::new();
    let frame = fixture.frame_at(None, 0.0, 0.0, 10.0, 10.0);
    let ui = &mut fixture.ui;
    ui.destroy(frame).unwrap();
    assert_eq!(ui.set_level(frame, 1), Err(UiError::UnknownObject(frame)));
    assert_eq!(ui.hide(frame), Err(UiError::UnknownObject(frame)));
    assert_eq!(
        ui.set_point(frame, Anchor::to_screen(AnchorPoint::Center)),
        Err(UiError::UnknownObject(frame))
    );
    assert_eq!(ui.rect(frame), None);
}
