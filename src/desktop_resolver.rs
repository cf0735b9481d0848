//! Desktop list view resolution
//!
//! Locates the window that renders the desktop icons. Its place in the window
//! tree depends on the shell and on whether desktop composition is active, so
//! several structurally distinct shapes are tried in order (cheapest and most
//! common first, full top-level enumeration last):
//!
//! 1. `Progman` > `SHELLDLL_DefView` > `SysListView32` (or, on the same
//!    `SHELLDLL_DefView`, `Internet Exproler_Server` for the active desktop)
//! 2. top-level `EdgeUiInputWndClass` (start-screen shell)
//! 3. first top-level `WorkerW` in z-order owning a `SHELLDLL_DefView`, whose
//!    `SysListView32` is the answer (composited desktop)
//! 4. the root desktop window
//!
//! A missing class at any depth only means "try the next shape".

use serde::{Deserialize, Serialize};

use crate::config::class;
use crate::platform::{WindowHandle, WindowSystem};

/// Which window-tree shape produced the resolved handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesktopShape {
    /// `Progman` > `SHELLDLL_DefView` > `SysListView32`
    ClassicListView,
    /// `Progman` > `SHELLDLL_DefView` > `Internet Exproler_Server`
    ActiveDesktop,
    /// Top-level `EdgeUiInputWndClass`
    EdgeUiInput,
    /// `WorkerW` > `SHELLDLL_DefView` > `SysListView32`
    WorkerWListView,
    /// Nothing matched; root desktop window
    RootFallback,
}

impl std::fmt::Display for DesktopShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            DesktopShape::ClassicListView => "classic list view",
            DesktopShape::ActiveDesktop => "active desktop",
            DesktopShape::EdgeUiInput => "edge ui input",
            DesktopShape::WorkerWListView => "worker list view",
            DesktopShape::RootFallback => "root fallback",
        };
        write!(f, "{}", value)
    }
}

/// Outcome of a resolution: the handle to capture and how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub handle: WindowHandle,
    pub shape: DesktopShape,
}

impl Resolution {
    fn new(handle: WindowHandle, shape: DesktopShape) -> Self {
        Self { handle, shape }
    }
}

/// Resolve the desktop list view, reporting which shape matched.
///
/// Never fails: when no shape matches the root desktop window is returned.
pub fn resolve<W: WindowSystem + ?Sized>(ws: &W) -> Resolution {
    let resolution = progman_shape(ws)
        .or_else(|| edge_ui_shape(ws))
        .or_else(|| worker_shape(ws))
        .unwrap_or_else(|| {
            log::info!("[Resolver] No desktop list view shape matched, using root window");
            Resolution::new(ws.desktop_window(), DesktopShape::RootFallback)
        });

    tracing::debug!(
        shape = %resolution.shape,
        handle = %resolution.handle.stable_id(),
        "Resolved desktop list view"
    );
    resolution
}

/// Resolve the desktop list view handle.
pub fn resolve_desktop_list_view<W: WindowSystem + ?Sized>(ws: &W) -> WindowHandle {
    resolve(ws).handle
}

fn progman_shape<W: WindowSystem + ?Sized>(ws: &W) -> Option<Resolution> {
    let progman = ws.find_child(None, class::PROGMAN)?;
    let def_view = ws.find_child(Some(progman), class::SHELL_DEF_VIEW)?;

    if let Some(list_view) = ws.find_child(Some(def_view), class::SYS_LIST_VIEW) {
        return Some(Resolution::new(list_view, DesktopShape::ClassicListView));
    }
    if let Some(server) = ws.find_child(Some(def_view), class::ACTIVE_DESKTOP_SERVER) {
        return Some(Resolution::new(server, DesktopShape::ActiveDesktop));
    }

    log::debug!("[Resolver] Progman has a shell view but no list view, trying next shape");
    None
}

fn edge_ui_shape<W: WindowSystem + ?Sized>(ws: &W) -> Option<Resolution> {
    ws.find_child(None, class::EDGE_UI_INPUT)
        .map(|edge| Resolution::new(edge, DesktopShape::EdgeUiInput))
}

fn worker_shape<W: WindowSystem + ?Sized>(ws: &W) -> Option<Resolution> {
    // Stops at the first WorkerW owning a shell view even if its list view is
    // missing; later WorkerW windows are not considered.
    let def_view = ws.top_level_windows().find_map(|window| {
        if ws.class_name(window).as_deref() != Some(class::WORKER_W) {
            return None;
        }
        ws.find_child(Some(window), class::SHELL_DEF_VIEW)
    })?;

    let list_view = ws.find_child(Some(def_view), class::SYS_LIST_VIEW);
    if list_view.is_none() {
        log::debug!("[Resolver] WorkerW shell view has no list view");
    }
    list_view.map(|lv| Resolution::new(lv, DesktopShape::WorkerWListView))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedDesktop;

    #[test]
    fn empty_desktop_falls_back_to_root() {
        let ws = SimulatedDesktop::new();
        let resolution = resolve(&ws);
        assert_eq!(resolution.shape, DesktopShape::RootFallback);
        assert_eq!(resolution.handle, ws.root());
    }

    #[test]
    fn progman_without_shell_view_falls_through_to_edge_ui() {
        let mut ws = SimulatedDesktop::new();
        ws.add_top_level(class::PROGMAN);
        let edge = ws.add_top_level(class::EDGE_UI_INPUT);

        let resolution = resolve(&ws);
        assert_eq!(resolution.shape, DesktopShape::EdgeUiInput);
        assert_eq!(resolution.handle, edge);
    }

    #[test]
    fn list_view_wins_over_active_desktop_sibling() {
        let mut ws = SimulatedDesktop::new();
        let progman = ws.add_top_level(class::PROGMAN);
        let def_view = ws.add_child(progman, class::SHELL_DEF_VIEW);
        ws.add_child(def_view, class::ACTIVE_DESKTOP_SERVER);
        let list_view = ws.add_child(def_view, class::SYS_LIST_VIEW);

        let resolution = resolve(&ws);
        assert_eq!(resolution.shape, DesktopShape::ClassicListView);
        assert_eq!(resolution.handle, list_view);
    }

    #[test]
    fn worker_without_list_view_does_not_try_later_workers() {
        let mut ws = SimulatedDesktop::new();
        let first = ws.add_top_level(class::WORKER_W);
        ws.add_child(first, class::SHELL_DEF_VIEW);
        let second = ws.add_top_level(class::WORKER_W);
        let def_view = ws.add_child(second, class::SHELL_DEF_VIEW);
        ws.add_child(def_view, class::SYS_LIST_VIEW);

        let resolution = resolve(&ws);
        assert_eq!(resolution.shape, DesktopShape::RootFallback);
        assert_eq!(ws.enumerated_count(), 1);
    }

    #[test]
    fn worker_without_shell_view_is_skipped() {
        let mut ws = SimulatedDesktop::new();
        ws.add_top_level(class::WORKER_W);
        let second = ws.add_top_level(class::WORKER_W);
        let def_view = ws.add_child(second, class::SHELL_DEF_VIEW);
        let list_view = ws.add_child(def_view, class::SYS_LIST_VIEW);

        assert_eq!(resolve_desktop_list_view(&ws), list_view);
    }
}
