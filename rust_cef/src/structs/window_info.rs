use cef_wrapper::cef_capi_sys::{cef_window_handle_t, cef_window_info_t};
#[cfg(target_os = "windows")]
use cef_wrapper::cef_capi_sys::{
    CW_USEDEFAULT, WS_CHILD, WS_CLIPCHILDREN, WS_CLIPSIBLINGS, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
};

use crate::util::{cef_string::StringArena, wrap_boolean::wrap_boolean};

use super::geometry::Rect;

/// A native window handle: an X11 window id on linux, an `HWND` on windows
/// and an `NSView*` on macos.
pub type WindowHandle = cef_window_handle_t;

/// How the runtime should host a new browser.
#[derive(Debug, Clone)]
pub struct WindowInfo {
    pub window_name: String,
    pub bounds: Rect,
    /// Parent of the browser's own window. `None` creates a top-level window.
    pub parent_window: Option<WindowHandle>,
    /// Deliver pixels through the render handler instead of a native window.
    pub windowless_rendering_enabled: bool,
    pub external_begin_frame_enabled: bool,
    /// Win32 window style bits.
    #[cfg(target_os = "windows")]
    pub style: u32,
    #[cfg(target_os = "windows")]
    pub ex_style: u32,
}

impl WindowInfo {
    /// An off-screen browser; `bounds` are ignored in favour of the render
    /// handler's view rectangle.
    pub fn windowless(window_name: impl Into<String>) -> Self {
        Self {
            window_name: window_name.into(),
            bounds: Rect::default(),
            parent_window: None,
            windowless_rendering_enabled: true,
            external_begin_frame_enabled: false,
            #[cfg(target_os = "windows")]
            style: 0,
            #[cfg(target_os = "windows")]
            ex_style: 0,
        }
    }

    /// A browser embedded as a child of an existing native window.
    pub fn child(window_name: impl Into<String>, parent: WindowHandle, bounds: Rect) -> Self {
        Self {
            window_name: window_name.into(),
            bounds,
            parent_window: Some(parent),
            windowless_rendering_enabled: false,
            external_begin_frame_enabled: false,
            #[cfg(target_os = "windows")]
            style: WS_CHILD | WS_CLIPCHILDREN | WS_CLIPSIBLINGS | WS_VISIBLE,
            #[cfg(target_os = "windows")]
            ex_style: 0,
        }
    }

    /// A visible top-level window owned by the runtime, placed by the system.
    #[cfg(target_os = "windows")]
    pub fn popup(window_name: impl Into<String>) -> Self {
        Self {
            window_name: window_name.into(),
            bounds: Rect::new(CW_USEDEFAULT, CW_USEDEFAULT, CW_USEDEFAULT, CW_USEDEFAULT),
            parent_window: None,
            windowless_rendering_enabled: false,
            external_begin_frame_enabled: false,
            style: WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN | WS_CLIPSIBLINGS | WS_VISIBLE,
            ex_style: 0,
        }
    }
}

/// The C view of [`WindowInfo`], owning the window name it points into.
pub(crate) struct RawWindowInfo {
    pub(crate) raw: cef_window_info_t,
    _strings: StringArena,
}

#[cfg(target_os = "linux")]
fn no_window() -> WindowHandle {
    0
}

#[cfg(not(target_os = "linux"))]
fn no_window() -> WindowHandle {
    std::ptr::null_mut()
}

impl From<&WindowInfo> for RawWindowInfo {
    fn from(val: &WindowInfo) -> Self {
        let mut strings = StringArena::default();

        #[cfg(target_os = "linux")]
        let raw = cef_window_info_t {
            window_name: strings.view(&val.window_name),
            bounds: val.bounds.into(),
            parent_window: val.parent_window.unwrap_or_else(no_window),
            windowless_rendering_enabled: wrap_boolean(val.windowless_rendering_enabled),
            shared_texture_enabled: wrap_boolean(false),
            external_begin_frame_enabled: wrap_boolean(val.external_begin_frame_enabled),
            window: no_window(),
        };

        #[cfg(target_os = "windows")]
        let raw = cef_window_info_t {
            ex_style: val.ex_style,
            window_name: strings.view(&val.window_name),
            style: val.style,
            bounds: val.bounds.into(),
            parent_window: val.parent_window.unwrap_or_else(no_window),
            menu: std::ptr::null_mut(),
            windowless_rendering_enabled: wrap_boolean(val.windowless_rendering_enabled),
            shared_texture_enabled: wrap_boolean(false),
            external_begin_frame_enabled: wrap_boolean(val.external_begin_frame_enabled),
            window: no_window(),
        };

        #[cfg(target_os = "macos")]
        let raw = cef_window_info_t {
            window_name: strings.view(&val.window_name),
            bounds: val.bounds.into(),
            hidden: wrap_boolean(false),
            parent_view: val.parent_window.unwrap_or_else(no_window),
            windowless_rendering_enabled: wrap_boolean(val.windowless_rendering_enabled),
            shared_texture_enabled: wrap_boolean(false),
            external_begin_frame_enabled: wrap_boolean(val.external_begin_frame_enabled),
            view: no_window(),
        };

        Self {
            raw,
            _strings: strings,
        }
    }
}
