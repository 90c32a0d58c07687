//! Anchor Layout Demo
//!
//! Builds a small window with a title bar, a list of rows hanging below each
//! other, and a close button pinned to the title bar's corner. Prints every
//! resolved rectangle, then resizes the screen and shows that only the
//! affected objects were recomputed.

use anchorage_core::logging;
use anchorage_ui::{
    Anchor, AnchorPoint, AnchorTarget, Drawable, Layer, Length, UiConfig, UiManager,
};

fn main() {
    logging::init_with_filter("info,anchorage_ui=debug");

    let mut ui = UiManager::new(UiConfig::default().with_screen_size(800.0, 600.0));

    let window = ui.create_frame(None, Some("Window")).unwrap();
    ui.set_size(window, Length::Px(320.0), Length::Percent(60.0)).unwrap();
    ui.set_point(window, Anchor::to_parent(AnchorPoint::Center)).unwrap();
    let backdrop = ui
        .create_region(window, Layer::Background, Some("$parentBg"), Drawable::Color([0.1, 0.1, 0.1, 0.9]))
        .unwrap();
    ui.set_all_points(backdrop, AnchorTarget::Parent).unwrap();

    let title = ui.create_frame(Some(window), Some("$parentTitle")).unwrap();
    ui.set_height(title, Length::Px(24.0)).unwrap();
    ui.set_point(title, Anchor::to_parent(AnchorPoint::TopLeft)).unwrap();
    ui.set_point(title, Anchor::to_parent(AnchorPoint::TopRight)).unwrap();

    let close = ui.create_frame(Some(title), Some("$parentClose")).unwrap();
    ui.set_size(close, Length::Px(20.0), Length::Px(20.0)).unwrap();
    ui.set_point(
        close,
        Anchor::to_named(AnchorPoint::TopRight, "WindowTitle").offset(-2.0, 2.0),
    )
    .unwrap();

    let mut previous = title;
    for i in 0..5 {
        let row = ui
            .create_frame(Some(window), Some(&format!("$parentRow{}", i)))
            .unwrap();
        ui.set_height(row, Length::Px(30.0)).unwrap();
        ui.set_point(
            row,
            Anchor::to_object(AnchorPoint::TopLeft, previous)
                .relative_to(AnchorPoint::BottomLeft)
                .offset(0.0, 4.0),
        )
        .unwrap();
        ui.set_point(
            row,
            Anchor::to_object(AnchorPoint::TopRight, previous)
                .relative_to(AnchorPoint::BottomRight)
                .offset(0.0, 4.0),
        )
        .unwrap();
        previous = row;
    }

    ui.update();
    for (id, node) in ui.tree().iter() {
        println!(
            "{:<16} {:?}",
            node.object.name().unwrap_or("<anonymous>"),
            ui.rect(id)
        );
    }
    println!("{}", ui.metrics().format_summary());

    ui.set_screen_size(1280.0, 720.0);
    ui.update();
    println!("After resize: {}", ui.metrics().format_summary());
    for error in ui.diagnostics() {
        println!("diagnostic: {}", error);
    }
}
