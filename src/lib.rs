//! Capture target resolution and clipping-region layout
//!
//! Picks the native window to capture (a specific window, the desktop icon
//! layer, or the whole virtual desktop) and keeps the clipping region of each
//! layout element consistent with its target across target changes.

// Configuration constants
pub mod config;

pub mod error;
pub mod logging;

// Windowing capability and coordinate transforms
pub mod platform;

pub mod desktop_resolver;
pub mod layout;
pub mod profile;
pub mod target;

// Persistence
pub mod settings;
pub mod settings_io;

// Re-export commonly used types
pub use desktop_resolver::{resolve_desktop_list_view, DesktopShape, Resolution};
pub use error::{ProfileError, TargetError};
pub use layout::{renormalize, ClipRect, ClippingRegion};
pub use platform::{
    to_screen_space, ClientSize, DesktopPoint, ScreenPoint, SimulatedDesktop, VirtualScreen,
    WindowHandle, WindowSystem,
};
pub use profile::{LayoutElement, Profile};
pub use target::{CaptureTarget, TargetKind};

#[cfg(windows)]
pub use platform::Win32WindowSystem;
