//! Renderer seam.
//!
//! The core never rasterizes. It walks the draw order and hands each frame
//! and region to a [`UiRenderer`] together with its resolved rectangle.

use crate::capability::Layered;
use crate::frame::{Drawable, FrameStrata, Layer};
use crate::object::ObjectId;
use crate::tree::UiTree;
use anchorage_core::geometry::Rect;
use anchorage_core::profiling::profile_function;

/// A frame about to be drawn.
#[derive(Debug, Clone, Copy)]
pub struct FrameDraw<'a> {
    pub id: ObjectId,
    pub name: Option<&'a str>,
    pub rect: Rect<f32>,
    pub strata: FrameStrata,
    pub level: i32,
}

/// A region about to be drawn, right after its frame.
#[derive(Debug, Clone, Copy)]
pub struct RegionDraw<'a> {
    pub id: ObjectId,
    pub frame: ObjectId,
    pub layer: Layer,
    pub rect: Rect<f32>,
    pub drawable: &'a Drawable,
}

/// Backend that turns draw calls into pixels.
pub trait UiRenderer {
    fn draw_frame(&self, frame: &FrameDraw<'_>);

    fn draw_region(&self, region: &RegionDraw<'_>);
}

/// Issue draw calls for `order`. Objects without valid geometry are skipped,
/// as are hidden regions.
pub fn render_order(tree: &UiTree, order: &[ObjectId], renderer: &dyn UiRenderer) {
    profile_function!();

    for &id in order {
        let Some(node) = tree.node(id) else {
            continue;
        };
        let Some(frame) = node.as_frame() else {
            continue;
        };
        if !node.object.has_valid_geometry {
            continue;
        }
        renderer.draw_frame(&FrameDraw {
            id,
            name: node.object.name(),
            rect: node.object.rect,
            strata: frame.effective_strata(),
            level: frame.level(),
        });

        for (layer, region_id) in frame.iter_regions() {
            let Some(region_node) = tree.node(region_id) else {
                continue;
            };
            let Some(region) = region_node.as_region() else {
                continue;
            };
            if !region_node.object.shown || !region_node.object.has_valid_geometry {
                continue;
            }
            renderer.draw_region(&RegionDraw {
                id: region_id,
                frame: id,
                layer,
                rect: region_node.object.rect,
                drawable: region.drawable(),
            });
        }
    }
}
