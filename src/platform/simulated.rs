//! In-memory window tree
//!
//! Models the parts of a desktop the capture target core queries: parent/child
//! structure with class names, top-level z-order, captions, client sizes and the
//! virtual screen. Used to exercise the resolver and the layout model without a
//! live windowing environment, and by callers running headless.

use std::cell::Cell;

use super::window_tree::{ClientSize, ScreenPoint, VirtualScreen, WindowHandle, WindowSystem};

const ROOT_HANDLE: isize = 0x10010;
const FIRST_CHILD_HANDLE: isize = 0x20000;
const HANDLE_STRIDE: isize = 0x10;

#[derive(Debug, Clone)]
struct SimWindow {
    handle: WindowHandle,
    parent: WindowHandle,
    class_name: String,
    caption: String,
    size: ClientSize,
    /// Screen-space top-left, used for point hit tests
    position: Option<ScreenPoint>,
    alive: bool,
}

impl SimWindow {
    fn contains(&self, point: ScreenPoint) -> bool {
        let Some(origin) = self.position else {
            return false;
        };
        point.x >= origin.x
            && point.y >= origin.y
            && point.x < origin.x + self.size.width
            && point.y < origin.y + self.size.height
    }
}

/// A simulated desktop. Top-level z-order is creation order, topmost first.
#[derive(Debug)]
pub struct SimulatedDesktop {
    root: WindowHandle,
    windows: Vec<SimWindow>,
    next_handle: isize,
    virtual_screen: Cell<VirtualScreen>,
    visited: Cell<usize>,
}

impl Default for SimulatedDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedDesktop {
    /// Empty desktop with a single 1920x1080 primary monitor.
    pub fn new() -> Self {
        Self::with_virtual_screen(VirtualScreen {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
        })
    }

    pub fn with_virtual_screen(virtual_screen: VirtualScreen) -> Self {
        Self {
            root: WindowHandle::from_raw_handle(ROOT_HANDLE),
            windows: Vec::new(),
            next_handle: FIRST_CHILD_HANDLE,
            virtual_screen: Cell::new(virtual_screen),
            visited: Cell::new(0),
        }
    }

    /// Root desktop window handle.
    pub fn root(&self) -> WindowHandle {
        self.root
    }

    /// Add a top-level window below every existing one in z-order.
    pub fn add_top_level(&mut self, class_name: &str) -> WindowHandle {
        let root = self.root;
        self.add_child(root, class_name)
    }

    /// Add a child window under `parent`.
    pub fn add_child(&mut self, parent: WindowHandle, class_name: &str) -> WindowHandle {
        let handle = WindowHandle::from_raw_handle(self.next_handle);
        self.next_handle += HANDLE_STRIDE;
        self.windows.push(SimWindow {
            handle,
            parent,
            class_name: class_name.to_string(),
            caption: String::new(),
            size: ClientSize::default(),
            position: None,
            alive: true,
        });
        handle
    }

    pub fn set_caption(&mut self, window: WindowHandle, caption: &str) {
        if let Some(w) = self.window_mut(window) {
            w.caption = caption.to_string();
        }
    }

    pub fn set_client_size(&mut self, window: WindowHandle, width: i32, height: i32) {
        if let Some(w) = self.window_mut(window) {
            w.size = ClientSize::new(width, height);
        }
    }

    /// Place a window on screen so point queries can hit it.
    pub fn place(&mut self, window: WindowHandle, x: i32, y: i32, width: i32, height: i32) {
        if let Some(w) = self.window_mut(window) {
            w.position = Some(ScreenPoint::new(x, y));
            w.size = ClientSize::new(width, height);
        }
    }

    /// Destroy a window and all of its descendants.
    pub fn close(&mut self, window: WindowHandle) {
        let mut doomed = vec![window];
        while let Some(handle) = doomed.pop() {
            for w in self.windows.iter_mut().filter(|w| w.alive) {
                if w.handle == handle {
                    w.alive = false;
                } else if w.parent == handle {
                    doomed.push(w.handle);
                }
            }
        }
    }

    /// Move the virtual screen origin, as when monitors are rearranged.
    pub fn set_virtual_origin(&self, x: i32, y: i32) {
        let mut vs = self.virtual_screen.get();
        vs.x = x;
        vs.y = y;
        self.virtual_screen.set(vs);
    }

    /// Number of top-level windows handed out by enumeration so far.
    pub fn enumerated_count(&self) -> usize {
        self.visited.get()
    }

    pub fn reset_enumerated_count(&self) {
        self.visited.set(0);
    }

    fn window(&self, handle: WindowHandle) -> Option<&SimWindow> {
        self.windows.iter().find(|w| w.alive && w.handle == handle)
    }

    fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut SimWindow> {
        self.windows.iter_mut().find(|w| w.alive && w.handle == handle)
    }
}

impl WindowSystem for SimulatedDesktop {
    fn desktop_window(&self) -> WindowHandle {
        self.root
    }

    fn find_child(&self, parent: Option<WindowHandle>, class_name: &str) -> Option<WindowHandle> {
        let parent = parent.unwrap_or(self.root);
        self.windows
            .iter()
            .find(|w| w.alive && w.parent == parent && w.class_name == class_name)
            .map(|w| w.handle)
    }

    fn top_level_windows(&self) -> Box<dyn Iterator<Item = WindowHandle> + '_> {
        let root = self.root;
        let visited = &self.visited;
        Box::new(
            self.windows
                .iter()
                .filter(move |w| w.alive && w.parent == root)
                .map(|w| w.handle)
                .inspect(move |_| visited.set(visited.get() + 1)),
        )
    }

    fn class_name(&self, window: WindowHandle) -> Option<String> {
        if window == self.root {
            return Some("#32769".to_string());
        }
        self.window(window).map(|w| w.class_name.clone())
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        window == self.root || self.window(window).is_some()
    }

    fn client_size(&self, window: WindowHandle) -> Option<ClientSize> {
        if window == self.root {
            let vs = self.virtual_screen.get();
            return Some(ClientSize::new(vs.width, vs.height));
        }
        self.window(window).map(|w| w.size)
    }

    fn caption(&self, window: WindowHandle) -> Option<String> {
        if window == self.root {
            return Some(String::new());
        }
        self.window(window).map(|w| w.caption.clone())
    }

    fn virtual_screen(&self) -> VirtualScreen {
        self.virtual_screen.get()
    }

    fn window_from_point(&self, point: ScreenPoint) -> Option<WindowHandle> {
        self.windows
            .iter()
            .find(|w| w.alive && w.contains(point))
            .map(|w| w.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_find_ignores_nested_windows() {
        let mut ws = SimulatedDesktop::new();
        let outer = ws.add_top_level("Outer");
        ws.add_child(outer, "Nested");

        assert_eq!(ws.find_child(None, "Nested"), None);
        assert!(ws.find_child(Some(outer), "Nested").is_some());
    }

    #[test]
    fn closing_a_window_closes_descendants() {
        let mut ws = SimulatedDesktop::new();
        let outer = ws.add_top_level("Outer");
        let inner = ws.add_child(outer, "Inner");
        let leaf = ws.add_child(inner, "Leaf");

        ws.close(outer);

        assert!(!ws.is_window(outer));
        assert!(!ws.is_window(inner));
        assert!(!ws.is_window(leaf));
        assert!(ws.is_window(ws.root()));
    }

    #[test]
    fn enumeration_counts_only_consumed_windows() {
        let mut ws = SimulatedDesktop::new();
        for _ in 0..5 {
            ws.add_top_level("Any");
        }

        let taken: Vec<_> = ws.top_level_windows().take(2).collect();
        assert_eq!(taken.len(), 2);
        assert_eq!(ws.enumerated_count(), 2);
    }
}
