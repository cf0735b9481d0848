//! Native window tree capability
//!
//! Provides the query surface the resolver and the capture target model need
//! (class lookups, z-order enumeration, geometry) as a trait, plus the live
//! Win32 implementation.

use serde::{Deserialize, Serialize};

/// Opaque native window identifier (HWND on Windows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle {
    handle: isize,
}

impl WindowHandle {
    pub const fn from_raw_handle(raw_handle: isize) -> Self {
        Self { handle: raw_handle }
    }

    pub const fn raw_handle(&self) -> isize {
        self.handle
    }

    pub fn stable_id(&self) -> String {
        format!("{:016x}", self.handle as usize as u64)
    }
}

/// A point in virtual-desktop space: (0, 0) is the top-left corner of the
/// bounding box of all monitors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopPoint {
    pub x: i32,
    pub y: i32,
}

impl DesktopPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point in screen space: (0, 0) is the top-left corner of the primary
/// monitor, so coordinates may be negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Bounding box of all monitors, positioned relative to the primary monitor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualScreen {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Client-area size of a window in its own pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSize {
    pub width: i32,
    pub height: i32,
}

impl ClientSize {
    /// Build a size, flooring negative extents at zero.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Windowing queries consumed by the capture target core.
///
/// Implementations answer against the live window set every time; nothing
/// here is expected to be cached.
pub trait WindowSystem {
    /// Root desktop window. Never null.
    fn desktop_window(&self) -> WindowHandle;

    /// First direct child of `parent` with the given class, or the first
    /// top-level window of that class when `parent` is `None`.
    fn find_child(&self, parent: Option<WindowHandle>, class_name: &str) -> Option<WindowHandle>;

    /// Top-level windows in z-order, topmost first.
    ///
    /// The iterator is lazy: dropping it ends the walk, so consumers stop
    /// enumeration simply by not asking for more.
    fn top_level_windows(&self) -> Box<dyn Iterator<Item = WindowHandle> + '_>;

    /// Registered class name of a window.
    fn class_name(&self, window: WindowHandle) -> Option<String>;

    /// Whether the handle still refers to a live window.
    fn is_window(&self, window: WindowHandle) -> bool;

    /// Client-area size of a window.
    fn client_size(&self, window: WindowHandle) -> Option<ClientSize>;

    /// Caption (title text) of a window.
    fn caption(&self, window: WindowHandle) -> Option<String>;

    /// Current virtual screen bounds. Monitor layout can change at runtime.
    fn virtual_screen(&self) -> VirtualScreen;

    /// Window under a screen-space point.
    fn window_from_point(&self, point: ScreenPoint) -> Option<WindowHandle>;
}

impl<T: WindowSystem + ?Sized> WindowSystem for &T {
    fn desktop_window(&self) -> WindowHandle {
        (**self).desktop_window()
    }

    fn find_child(&self, parent: Option<WindowHandle>, class_name: &str) -> Option<WindowHandle> {
        (**self).find_child(parent, class_name)
    }

    fn top_level_windows(&self) -> Box<dyn Iterator<Item = WindowHandle> + '_> {
        (**self).top_level_windows()
    }

    fn class_name(&self, window: WindowHandle) -> Option<String> {
        (**self).class_name(window)
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        (**self).is_window(window)
    }

    fn client_size(&self, window: WindowHandle) -> Option<ClientSize> {
        (**self).client_size(window)
    }

    fn caption(&self, window: WindowHandle) -> Option<String> {
        (**self).caption(window)
    }

    fn virtual_screen(&self) -> VirtualScreen {
        (**self).virtual_screen()
    }

    fn window_from_point(&self, point: ScreenPoint) -> Option<WindowHandle> {
        (**self).window_from_point(point)
    }
}

// --- Windows implementation -----------------------------------------------

#[cfg(windows)]
mod windows_impl {
    use super::{ClientSize, ScreenPoint, VirtualScreen, WindowHandle, WindowSystem};
    use crate::config::native::{CAPTION_BUFFER_LEN, CLASS_NAME_BUFFER_LEN};

    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{HWND, POINT, RECT};
    use windows::Win32::UI::WindowsAndMessaging::{
        FindWindowExW, GetClassNameW, GetClientRect, GetDesktopWindow, GetSystemMetrics,
        GetTopWindow, GetWindow, GetWindowTextW, IsWindow, WindowFromPoint, GW_HWNDNEXT,
        SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
    };

    fn to_hwnd(window: WindowHandle) -> HWND {
        HWND(window.raw_handle() as *mut std::ffi::c_void)
    }

    fn from_hwnd(hwnd: HWND) -> Option<WindowHandle> {
        if hwnd.0.is_null() {
            None
        } else {
            Some(WindowHandle::from_raw_handle(hwnd.0 as isize))
        }
    }

    fn wide_null(text: &str) -> Vec<u16> {
        text.encode_utf16().chain(std::iter::once(0)).collect()
    }

    /// Live desktop backed by user32.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Win32WindowSystem;

    impl Win32WindowSystem {
        pub fn new() -> Self {
            Self
        }
    }

    /// Lazy z-order walk via `GetWindow(GW_HWNDNEXT)`.
    struct ZOrderWindows {
        next: Option<HWND>,
    }

    impl Iterator for ZOrderWindows {
        type Item = WindowHandle;

        fn next(&mut self) -> Option<WindowHandle> {
            let current = self.next.take()?;
            self.next = unsafe { GetWindow(current, GW_HWNDNEXT) }
                .ok()
                .filter(|next| !next.0.is_null());
            from_hwnd(current)
        }
    }

    impl WindowSystem for Win32WindowSystem {
        fn desktop_window(&self) -> WindowHandle {
            let hwnd = unsafe { GetDesktopWindow() };
            WindowHandle::from_raw_handle(hwnd.0 as isize)
        }

        fn find_child(
            &self,
            parent: Option<WindowHandle>,
            class_name: &str,
        ) -> Option<WindowHandle> {
            let class = wide_null(class_name);
            let found = unsafe {
                FindWindowExW(
                    parent.map(to_hwnd),
                    None,
                    PCWSTR(class.as_ptr()),
                    PCWSTR::null(),
                )
            };
            found.ok().and_then(from_hwnd)
        }

        fn top_level_windows(&self) -> Box<dyn Iterator<Item = WindowHandle> + '_> {
            let first = unsafe { GetTopWindow(None) }
                .ok()
                .filter(|hwnd| !hwnd.0.is_null());
            Box::new(ZOrderWindows { next: first })
        }

        fn class_name(&self, window: WindowHandle) -> Option<String> {
            let mut buffer = [0u16; CLASS_NAME_BUFFER_LEN];
            let len = unsafe { GetClassNameW(to_hwnd(window), &mut buffer) };
            if len <= 0 {
                return None;
            }
            Some(String::from_utf16_lossy(&buffer[..len as usize]))
        }

        fn is_window(&self, window: WindowHandle) -> bool {
            unsafe { IsWindow(Some(to_hwnd(window))) }.as_bool()
        }

        fn client_size(&self, window: WindowHandle) -> Option<ClientSize> {
            let mut rect = RECT::default();
            unsafe { GetClientRect(to_hwnd(window), &mut rect) }.ok()?;
            Some(ClientSize::new(
                rect.right - rect.left,
                rect.bottom - rect.top,
            ))
        }

        fn caption(&self, window: WindowHandle) -> Option<String> {
            let mut buffer = vec![0u16; CAPTION_BUFFER_LEN];
            let read = unsafe { GetWindowTextW(to_hwnd(window), &mut buffer) };
            if read < 0 {
                return None;
            }
            buffer.truncate(read as usize);
            Some(String::from_utf16_lossy(&buffer))
        }

        fn virtual_screen(&self) -> VirtualScreen {
            unsafe {
                VirtualScreen {
                    x: GetSystemMetrics(SM_XVIRTUALSCREEN),
                    y: GetSystemMetrics(SM_YVIRTUALSCREEN),
                    width: GetSystemMetrics(SM_CXVIRTUALSCREEN),
                    height: GetSystemMetrics(SM_CYVIRTUALSCREEN),
                }
            }
        }

        fn window_from_point(&self, point: ScreenPoint) -> Option<WindowHandle> {
            let hwnd = unsafe {
                WindowFromPoint(POINT {
                    x: point.x,
                    y: point.y,
                })
            };
            from_hwnd(hwnd)
        }
    }
}

#[cfg(windows)]
pub use windows_impl::Win32WindowSystem;
