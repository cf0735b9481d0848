use capture_target::{renormalize, CaptureTarget, ClipRect, ClippingRegion, SimulatedDesktop};

fn window_target(ws: &mut SimulatedDesktop, width: i32, height: i32) -> CaptureTarget {
    let window = ws.add_top_level("App");
    ws.set_client_size(window, width, height);
    let mut target = CaptureTarget::default();
    target.set_to_window(&*ws, window).unwrap();
    target
}

fn manual_region(target: &CaptureTarget, x: i32, y: i32, width: i32, height: i32) -> ClippingRegion {
    let mut region = ClippingRegion::fitted(target);
    region.set_manual(x, y, width, height, target);
    region
}

#[test]
fn switch_clamps_extent_and_resets_origin() {
    let mut ws = SimulatedDesktop::new();
    let old = window_target(&mut ws, 800, 600);
    let new = window_target(&mut ws, 300, 700);
    let region = manual_region(&old, 50, 40, 400, 300);

    let next = renormalize(&old, &new, &region);
    assert_eq!((next.width(), next.height()), (300, 300));
    assert_eq!((next.origin_x(), next.origin_y()), (0, 0));
    assert!(next.fit());
}

#[test]
fn renormalize_is_idempotent() {
    let mut ws = SimulatedDesktop::new();
    let old = window_target(&mut ws, 1024, 768);
    let new = window_target(&mut ws, 640, 900);
    let region = manual_region(&old, 10, 10, 1000, 700);

    let once = renormalize(&old, &new, &region);
    let twice = renormalize(&new, &new, &once);
    assert_eq!(once, twice);
}

#[test]
fn clamped_extent_becomes_manual_size_when_fit_is_dropped() {
    let mut ws = SimulatedDesktop::new();
    let old = window_target(&mut ws, 800, 600);
    let new = window_target(&mut ws, 500, 500);
    let region = manual_region(&old, 100, 100, 200, 550);

    let mut next = renormalize(&old, &new, &region);
    assert_eq!(
        next.bounds(&new),
        ClipRect {
            x: 0,
            y: 0,
            width: 500,
            height: 500
        }
    );

    next.set_fit(false, &new);
    assert_eq!(
        next.bounds(&new),
        ClipRect {
            x: 0,
            y: 0,
            width: 200,
            height: 500
        }
    );
}

#[test]
fn zero_sized_target_propagates_empty_region() {
    let mut ws = SimulatedDesktop::new();
    let old = window_target(&mut ws, 800, 600);
    let minimized = window_target(&mut ws, 0, 0);
    let region = manual_region(&old, 0, 0, 400, 300);

    let next = renormalize(&old, &minimized, &region);
    assert_eq!((next.width(), next.height()), (0, 0));
    assert!(!next.is_usable(&minimized));
}

#[test]
fn manual_region_never_exceeds_target() {
    let mut ws = SimulatedDesktop::new();
    let target = window_target(&mut ws, 320, 240);

    for (x, y, w, h) in [(0, 0, 1000, 1000), (300, 200, 100, 100), (-10, -10, 5, 5), (319, 239, 0, 0)] {
        let region = manual_region(&target, x, y, w, h);
        let rect = region.bounds(&target);
        assert!(rect.x >= 0 && rect.y >= 0, "{:?}", rect);
        assert!(rect.width >= 1 && rect.height >= 1, "{:?}", rect);
        assert!(rect.x + rect.width <= 320, "{:?}", rect);
        assert!(rect.y + rect.height <= 240, "{:?}", rect);
    }
}
