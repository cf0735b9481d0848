//! Configuration Constants
//!
//! Centralized window-class names, limits, file names and environment variables
//! used by the resolver, the layout model and the settings layer.

/// Native window class names that make up the desktop hierarchy
///
/// The hierarchy differs per shell and composition mode:
/// - root desktop window
///   - `Progman` (classic shell, composition off)
///     - `SHELLDLL_DefView`
///       - `SysListView32` (icon list view)
///       - `Internet Exproler_Server` (legacy active desktop)
///   - `WorkerW` [`WorkerW`]* (composited desktop)
///     - `SHELLDLL_DefView`
///       - `SysListView32`
///   - `EdgeUiInputWndClass` (start-screen shell)
pub mod class {
    pub const PROGMAN: &str = "Progman";
    pub const SHELL_DEF_VIEW: &str = "SHELLDLL_DefView";
    pub const SYS_LIST_VIEW: &str = "SysListView32";
    /// Spelled exactly as the shell registers it.
    pub const ACTIVE_DESKTOP_SERVER: &str = "Internet Exproler_Server";
    pub const EDGE_UI_INPUT: &str = "EdgeUiInputWndClass";
    pub const WORKER_W: &str = "WorkerW";
}

/// Native query limits
pub mod native {
    /// Buffer length (UTF-16 units) for class name reads
    pub const CLASS_NAME_BUFFER_LEN: usize = 256;

    /// Upper bound for caption reads (UTF-16 units)
    pub const CAPTION_BUFFER_LEN: usize = 512;
}

/// Layout Configuration
pub mod layout {
    /// Maximum number of layout elements held by one profile
    pub const MAX_LAYOUT_ELEMENTS: usize = 8;

    /// Minimum manual clipping extent when the target has usable geometry
    pub const MIN_CLIPPING_EXTENT: i32 = 1;
}

/// Files and directories
pub mod files {
    /// Directory name under the platform config dir
    pub const APP_DIR_NAME: &str = "CaptureTarget";

    /// Settings file inside the config dir
    pub const SETTINGS_FILE: &str = "settings.json";

    /// Profiles directory inside the config dir
    pub const PROFILES_DIR: &str = "Profiles";

    /// Rolling log file prefix
    pub const LOG_FILE_PREFIX: &str = "capture_target.log";

    /// Log retention period in days
    pub const LOG_RETENTION_DAYS: u32 = 30;
}

/// Environment variables
pub mod env {
    /// Overrides the configured log level, e.g. `CAPTURE_TARGET_LOG=debug`
    pub const LOG_LEVEL_ENV: &str = "CAPTURE_TARGET_LOG";
}
