//! Platform Abstraction Layer
//!
//! Everything this crate needs from the windowing environment goes through the
//! [`WindowSystem`] capability in `window_tree`, so the resolver and the layout
//! model run the same against a live desktop or a [`SimulatedDesktop`].

pub mod coords;
pub mod simulated;
pub mod window_tree;

pub use coords::{to_desktop_space, to_screen_space};
pub use simulated::SimulatedDesktop;
pub use window_tree::{
    ClientSize, DesktopPoint, ScreenPoint, VirtualScreen, WindowHandle, WindowSystem,
};

#[cfg(windows)]
pub use window_tree::Win32WindowSystem;
