use std::os::raw::{c_int, c_uint};

#[cfg(not(target_os = "windows"))]
use std::os::raw::c_char;
#[cfg(any(target_os = "windows", target_os = "macos"))]
use std::os::raw::c_void;

#[cfg(target_os = "linux")]
use std::os::raw::c_ulong;

use super::types::{cef_color_t, cef_log_items_t, cef_log_severity_t, cef_rect_t, cef_state_t, cef_string_t};

#[cfg(target_os = "linux")]
pub type cef_window_handle_t = c_ulong;
#[cfg(any(target_os = "windows", target_os = "macos"))]
pub type cef_window_handle_t = *mut c_void;

#[cfg(not(target_os = "windows"))]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_main_args_t {
    pub argc: c_int,
    pub argv: *mut *mut c_char,
}

#[cfg(target_os = "windows")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_main_args_t {
    pub instance: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_settings_t {
    pub size: usize,
    pub no_sandbox: c_int,
    pub browser_subprocess_path: cef_string_t,
    pub framework_dir_path: cef_string_t,
    pub main_bundle_path: cef_string_t,
    pub chrome_runtime: c_int,
    pub multi_threaded_message_loop: c_int,
    pub external_message_pump: c_int,
    pub windowless_rendering_enabled: c_int,
    pub command_line_args_disabled: c_int,
    pub cache_path: cef_string_t,
    pub root_cache_path: cef_string_t,
    pub persist_session_cookies: c_int,
    pub persist_user_preferences: c_int,
    pub user_agent: cef_string_t,
    pub user_agent_product: cef_string_t,
    pub locale: cef_string_t,
    pub log_file: cef_string_t,
    pub log_severity: cef_log_severity_t,
    pub log_items: cef_log_items_t,
    pub javascript_flags: cef_string_t,
    pub resources_dir_path: cef_string_t,
    pub locales_dir_path: cef_string_t,
    pub pack_loading_disabled: c_int,
    pub remote_debugging_port: c_int,
    pub uncaught_exception_stack_size: c_int,
    pub background_color: cef_color_t,
    pub accept_language_list: cef_string_t,
    pub cookieable_schemes_list: cef_string_t,
    pub cookieable_schemes_exclude_defaults: c_int,
    pub chrome_policy_id: cef_string_t,
    pub chrome_app_icon_id: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_browser_settings_t {
    pub size: usize,
    pub windowless_frame_rate: c_int,
    pub standard_font_family: cef_string_t,
    pub fixed_font_family: cef_string_t,
    pub serif_font_family: cef_string_t,
    pub sans_serif_font_family: cef_string_t,
    pub cursive_font_family: cef_string_t,
    pub fantasy_font_family: cef_string_t,
    pub default_font_size: c_int,
    pub default_fixed_font_size: c_int,
    pub minimum_font_size: c_int,
    pub minimum_logical_font_size: c_int,
    pub default_encoding: cef_string_t,
    pub remote_fonts: cef_state_t,
    pub javascript: cef_state_t,
    pub javascript_close_windows: cef_state_t,
    pub javascript_access_clipboard: cef_state_t,
    pub javascript_dom_paste: cef_state_t,
    pub image_loading: cef_state_t,
    pub image_shrink_standalone_to_fit: cef_state_t,
    pub text_area_resize: cef_state_t,
    pub tab_to_links: cef_state_t,
    pub local_storage: cef_state_t,
    pub databases: cef_state_t,
    pub webgl: cef_state_t,
    pub background_color: cef_color_t,
    pub chrome_status_bubble: cef_state_t,
    pub chrome_zoom_bubble: cef_state_t,
}

#[cfg(target_os = "linux")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_window_info_t {
    pub window_name: cef_string_t,
    pub bounds: cef_rect_t,
    pub parent_window: cef_window_handle_t,
    pub windowless_rendering_enabled: c_int,
    pub shared_texture_enabled: c_int,
    pub external_begin_frame_enabled: c_int,
    pub window: cef_window_handle_t,
}

#[cfg(target_os = "windows")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_window_info_t {
    pub ex_style: c_uint,
    pub window_name: cef_string_t,
    pub style: c_uint,
    pub bounds: cef_rect_t,
    pub parent_window: cef_window_handle_t,
    pub menu: *mut c_void,
    pub windowless_rendering_enabled: c_int,
    pub shared_texture_enabled: c_int,
    pub external_begin_frame_enabled: c_int,
    pub window: cef_window_handle_t,
}

#[cfg(target_os = "macos")]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_window_info_t {
    pub window_name: cef_string_t,
    pub bounds: cef_rect_t,
    pub hidden: c_int,
    pub parent_view: cef_window_handle_t,
    pub windowless_rendering_enabled: c_int,
    pub shared_texture_enabled: c_int,
    pub external_begin_frame_enabled: c_int,
    pub view: cef_window_handle_t,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct cef_screen_info_t {
    pub device_scale_factor: f32,
    pub depth: c_int,
    pub depth_per_component: c_int,
    pub is_monochrome: c_int,
    pub rect: cef_rect_t,
    pub available_rect: cef_rect_t,
}

/// Win32 window styles used by the windowed example.
pub const WS_OVERLAPPEDWINDOW: c_uint = 0x00CF_0000;
pub const WS_CHILD: c_uint = 0x4000_0000;
pub const WS_CLIPCHILDREN: c_uint = 0x0200_0000;
pub const WS_CLIPSIBLINGS: c_uint = 0x0400_0000;
pub const WS_VISIBLE: c_uint = 0x1000_0000;
pub const CW_USEDEFAULT: c_int = i32::MIN;
