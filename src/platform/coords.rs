use super::window_tree::{DesktopPoint, ScreenPoint, WindowSystem};

/// Convert a virtual-desktop point to screen space (primary monitor origin).
/// The virtual screen origin is queried on every call.
///
/// Arithmetic wraps, so out-of-range inputs never panic. Real desktop
/// coordinates stay far from the `i32` limits.
pub fn to_screen_space<W: WindowSystem + ?Sized>(ws: &W, point: DesktopPoint) -> ScreenPoint {
    let origin = ws.virtual_screen();
    ScreenPoint {
        x: point.x.wrapping_add(origin.x),
        y: point.y.wrapping_add(origin.y),
    }
}

/// Inverse of [`to_screen_space`].
pub fn to_desktop_space<W: WindowSystem + ?Sized>(ws: &W, point: ScreenPoint) -> DesktopPoint {
    let origin = ws.virtual_screen();
    DesktopPoint {
        x: point.x.wrapping_sub(origin.x),
        y: point.y.wrapping_sub(origin.y),
    }
}
