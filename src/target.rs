//! Capture target model
//!
//! Tracks what is being captured (a specific window, the desktop list view or
//! the whole virtual desktop) together with the last known client size of that
//! target. Every switch re-reads the geometry from the window system.

use serde::{Deserialize, Serialize};

use crate::desktop_resolver;
use crate::error::TargetError;
use crate::platform::{ClientSize, WindowHandle, WindowSystem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    SpecificWindow,
    DesktopListView,
    FullDesktop,
}

/// The currently selected capture target.
///
/// `handle` is `Some` exactly when `kind` is not [`TargetKind::FullDesktop`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureTarget {
    kind: TargetKind,
    handle: Option<WindowHandle>,
    caption: String,
    window_width: i32,
    window_height: i32,
}

impl Default for CaptureTarget {
    fn default() -> Self {
        Self {
            kind: TargetKind::FullDesktop,
            handle: None,
            caption: String::new(),
            window_width: 0,
            window_height: 0,
        }
    }
}

impl CaptureTarget {
    /// Target the full virtual desktop, sized from the current monitor layout.
    pub fn full_desktop<W: WindowSystem + ?Sized>(ws: &W) -> Self {
        let mut target = Self::default();
        target.set_to_full_desktop(ws);
        target
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn handle(&self) -> Option<WindowHandle> {
        self.handle
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn window_width(&self) -> i32 {
        self.window_width
    }

    pub fn window_height(&self) -> i32 {
        self.window_height
    }

    pub fn size(&self) -> ClientSize {
        ClientSize::new(self.window_width, self.window_height)
    }

    /// Switch to a specific window.
    ///
    /// Leaves the target untouched when `handle` is not a live window.
    pub fn set_to_window<W: WindowSystem + ?Sized>(
        &mut self,
        ws: &W,
        handle: WindowHandle,
    ) -> Result<(), TargetError> {
        if !ws.is_window(handle) {
            log::warn!(
                "[Target] Window {} is gone, keeping current target",
                handle.stable_id()
            );
            return Err(TargetError::WindowGone(handle));
        }

        let size = ws.client_size(handle).unwrap_or_default();
        let caption = ws.caption(handle).unwrap_or_default();

        self.kind = TargetKind::SpecificWindow;
        self.handle = Some(handle);
        self.caption = caption;
        self.apply_size(size);
        log::debug!(
            "[Target] Window {} ({}x{})",
            handle.stable_id(),
            size.width,
            size.height
        );
        Ok(())
    }

    /// Switch to the desktop icon layer, whatever window currently hosts it.
    pub fn set_to_desktop_list_view<W: WindowSystem + ?Sized>(&mut self, ws: &W) {
        let handle = desktop_resolver::resolve_desktop_list_view(ws);
        let size = ws.client_size(handle).unwrap_or_default();

        self.kind = TargetKind::DesktopListView;
        self.handle = Some(handle);
        self.caption.clear();
        self.apply_size(size);
        log::debug!(
            "[Target] Desktop list view {} ({}x{})",
            handle.stable_id(),
            size.width,
            size.height
        );
    }

    /// Switch to the full virtual desktop.
    pub fn set_to_full_desktop<W: WindowSystem + ?Sized>(&mut self, ws: &W) {
        let vs = ws.virtual_screen();
        let size = ClientSize::new(vs.width, vs.height);

        self.kind = TargetKind::FullDesktop;
        self.handle = None;
        self.caption.clear();
        self.apply_size(size);
        log::debug!("[Target] Full desktop ({}x{})", size.width, size.height);
    }

    /// Re-read the size of the current target.
    ///
    /// Returns `true` when the size changed. A target window that has gone
    /// away keeps its last known size.
    pub fn refresh_geometry<W: WindowSystem + ?Sized>(&mut self, ws: &W) -> bool {
        let size = match (self.kind, self.handle) {
            (TargetKind::FullDesktop, _) | (_, None) => {
                let vs = ws.virtual_screen();
                ClientSize::new(vs.width, vs.height)
            }
            (_, Some(handle)) => {
                if !ws.is_window(handle) {
                    return false;
                }
                ws.client_size(handle).unwrap_or_default()
            }
        };

        let changed = size != self.size();
        self.apply_size(size);
        changed
    }

    fn apply_size(&mut self, size: ClientSize) {
        self.window_width = size.width;
        self.window_height = size.height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedDesktop;

    #[test]
    fn default_is_full_desktop_without_handle() {
        let target = CaptureTarget::default();
        assert_eq!(target.kind(), TargetKind::FullDesktop);
        assert!(target.handle().is_none());
        assert_eq!(target.size(), ClientSize::default());
    }

    #[test]
    fn window_with_unreadable_size_is_zero_sized() {
        let mut ws = SimulatedDesktop::new();
        let window = ws.add_top_level("Notepad");

        let mut target = CaptureTarget::default();
        target.set_to_window(&ws, window).unwrap();
        assert_eq!(target.size(), ClientSize::new(0, 0));
    }

    #[test]
    fn refresh_picks_up_late_geometry() {
        let mut ws = SimulatedDesktop::new();
        let window = ws.add_top_level("Notepad");

        let mut target = CaptureTarget::default();
        target.set_to_window(&ws, window).unwrap();

        ws.set_client_size(window, 640, 480);
        assert!(target.refresh_geometry(&ws));
        assert_eq!(target.size(), ClientSize::new(640, 480));
        assert!(!target.refresh_geometry(&ws));
    }

    #[test]
    fn refresh_keeps_size_of_closed_window() {
        let mut ws = SimulatedDesktop::new();
        let window = ws.add_top_level("Notepad");
        ws.set_client_size(window, 300, 200);

        let mut target = CaptureTarget::default();
        target.set_to_window(&ws, window).unwrap();
        ws.close(window);

        assert!(!target.refresh_geometry(&ws));
        assert_eq!(target.size(), ClientSize::new(300, 200));
    }
}
