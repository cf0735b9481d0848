//! Clipping region layout
//!
//! The clipping region is the part of the capture target actually captured,
//! in the target's client coordinates. In fit mode the whole client area is
//! captured and the stored origin/extent are kept only as the starting point
//! for manual mode. In manual mode the stored rectangle is kept inside the
//! target's client area.

use serde::{Deserialize, Serialize};

use crate::config::layout::MIN_CLIPPING_EXTENT;
use crate::target::CaptureTarget;

/// A resolved rectangle in target client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ClipRect {
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClippingRegion {
    origin_x: i32,
    origin_y: i32,
    width: i32,
    height: i32,
    fit: bool,
}

impl Default for ClippingRegion {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            width: 0,
            height: 0,
            fit: true,
        }
    }
}

impl ClippingRegion {
    /// Fit region covering the whole target.
    pub fn fitted(target: &CaptureTarget) -> Self {
        Self {
            width: target.window_width(),
            height: target.window_height(),
            ..Self::default()
        }
    }

    pub fn origin_x(&self) -> i32 {
        self.origin_x
    }

    pub fn origin_y(&self) -> i32 {
        self.origin_y
    }

    /// Manual extent. While [`fit`](Self::fit) is on this is not what gets
    /// captured; use [`bounds`](Self::bounds) for that.
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn fit(&self) -> bool {
        self.fit
    }

    /// The rectangle captured from `target`.
    pub fn bounds(&self, target: &CaptureTarget) -> ClipRect {
        if self.fit {
            ClipRect {
                x: 0,
                y: 0,
                width: target.window_width(),
                height: target.window_height(),
            }
        } else {
            ClipRect {
                x: self.origin_x,
                y: self.origin_y,
                width: self.width,
                height: self.height,
            }
        }
    }

    /// Whether the captured rectangle has any area. A zero-sized target
    /// yields an unusable region until it is normalized again.
    pub fn is_usable(&self, target: &CaptureTarget) -> bool {
        !self.bounds(target).is_empty()
    }

    /// Toggle fit mode. Leaving fit mode starts manual clipping from the
    /// stored rectangle, clamped into the target.
    pub fn set_fit(&mut self, enabled: bool, target: &CaptureTarget) {
        self.fit = enabled;
        if !enabled {
            self.clamp_to(target);
        }
    }

    /// Switch to manual clipping with the given rectangle, clamped into the
    /// target.
    pub fn set_manual(&mut self, x: i32, y: i32, width: i32, height: i32, target: &CaptureTarget) {
        self.origin_x = x;
        self.origin_y = y;
        self.width = width;
        self.height = height;
        self.fit = false;
        self.clamp_to(target);
    }

    /// Pull the stored rectangle inside the target's client area. Extents are
    /// at least [`MIN_CLIPPING_EXTENT`] unless the target itself is empty.
    pub fn clamp_to(&mut self, target: &CaptureTarget) {
        let (x, w) = clamp_axis(self.origin_x, self.width, target.window_width());
        let (y, h) = clamp_axis(self.origin_y, self.height, target.window_height());
        self.origin_x = x;
        self.width = w;
        self.origin_y = y;
        self.height = h;
    }
}

fn clamp_axis(origin: i32, extent: i32, limit: i32) -> (i32, i32) {
    if limit < MIN_CLIPPING_EXTENT {
        return (0, 0);
    }
    let origin = origin.clamp(0, limit - MIN_CLIPPING_EXTENT);
    let extent = extent.clamp(MIN_CLIPPING_EXTENT, limit - origin);
    (origin, extent)
}

/// Recompute the clipping region after a target switch.
///
/// Fit is forced on, the origin is reset (an offset into the previous target
/// means nothing in the new one) and the manual extent is capped by the new
/// target's size. A zero-sized new target gives a zero-sized region; callers
/// normalize again once real geometry is available.
pub fn renormalize(
    previous_target: &CaptureTarget,
    new_target: &CaptureTarget,
    previous_region: &ClippingRegion,
) -> ClippingRegion {
    let region = ClippingRegion {
        origin_x: 0,
        origin_y: 0,
        width: previous_region.width.min(new_target.window_width()).max(0),
        height: previous_region.height.min(new_target.window_height()).max(0),
        fit: true,
    };

    if previous_target.kind() != new_target.kind() || previous_target.handle() != new_target.handle()
    {
        tracing::debug!(
            from = ?previous_target.kind(),
            to = ?new_target.kind(),
            width = region.width,
            height = region.height,
            "Clipping renormalized for new target"
        );
    }
    if new_target.size().is_empty() {
        log::debug!("[Layout] New target has no geometry yet, clipping region is empty");
    }

    region
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedDesktop;

    fn window_target(ws: &mut SimulatedDesktop, width: i32, height: i32) -> CaptureTarget {
        let window = ws.add_top_level("Window");
        ws.set_client_size(window, width, height);
        let mut target = CaptureTarget::default();
        target.set_to_window(&*ws, window).unwrap();
        target
    }

    #[test]
    fn fit_bounds_track_target_size() {
        let mut ws = SimulatedDesktop::new();
        let target = window_target(&mut ws, 640, 480);
        let mut region = ClippingRegion::default();
        region.set_manual(10, 10, 20, 20, &target);
        region.set_fit(true, &target);

        assert_eq!(
            region.bounds(&target),
            ClipRect {
                x: 0,
                y: 0,
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn manual_rectangle_is_clamped_into_target() {
        let mut ws = SimulatedDesktop::new();
        let target = window_target(&mut ws, 100, 50);
        let mut region = ClippingRegion::default();
        region.set_manual(-5, 40, 500, 0, &target);

        assert_eq!(region.origin_x(), 0);
        assert_eq!(region.width(), 100);
        assert_eq!(region.origin_y(), 40);
        assert_eq!(region.height(), 1);
        assert!(!region.fit());
    }

    #[test]
    fn origin_past_the_edge_keeps_one_pixel() {
        let mut ws = SimulatedDesktop::new();
        let target = window_target(&mut ws, 100, 100);
        let mut region = ClippingRegion::default();
        region.set_manual(250, 99, 10, 10, &target);

        assert_eq!(region.bounds(&target), ClipRect { x: 99, y: 99, width: 1, height: 1 });
    }

    #[test]
    fn leaving_fit_on_empty_target_is_unusable() {
        let target = CaptureTarget::default();
        let mut region = ClippingRegion::default();
        region.set_fit(false, &target);

        assert_eq!(region.bounds(&target), ClipRect::default());
        assert!(!region.is_usable(&target));
    }

    #[test]
    fn renormalize_to_empty_target_gives_zero_extent() {
        let mut ws = SimulatedDesktop::new();
        let old = window_target(&mut ws, 800, 600);
        let new = window_target(&mut ws, 0, 0);
        let mut region = ClippingRegion::fitted(&old);
        region.set_manual(0, 0, 400, 300, &old);

        let next = renormalize(&old, &new, &region);
        assert_eq!(next.width(), 0);
        assert_eq!(next.height(), 0);
        assert!(next.fit());
    }
}
