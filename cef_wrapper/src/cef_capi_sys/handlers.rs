//! Callback tables the host allocates and the runtime calls into.

use std::os::raw::{c_int, c_void};

use super::objects::{cef_browser_t, cef_command_line_t, cef_frame_t, cef_v8value_t};
use super::structs::cef_screen_info_t;
use super::types::{
    cef_base_ref_counted_t, cef_browser_process_handler_t, cef_errorcode_t,
    cef_paint_element_type_t, cef_rect_t, cef_string_t, cef_transition_type_t, cef_v8context_t,
};
use super::UnusedSlot;

#[repr(C)]
pub struct cef_app_t {
    pub base: cef_base_ref_counted_t,
    pub on_before_command_line_processing: Option<
        unsafe extern "C" fn(
            self_: *mut cef_app_t,
            process_type: *const cef_string_t,
            command_line: *mut cef_command_line_t,
        ),
    >,
    pub on_register_custom_schemes: UnusedSlot,
    pub get_resource_bundle_handler: UnusedSlot,
    pub get_browser_process_handler:
        Option<unsafe extern "C" fn(self_: *mut cef_app_t) -> *mut cef_browser_process_handler_t>,
    pub get_render_process_handler:
        Option<unsafe extern "C" fn(self_: *mut cef_app_t) -> *mut cef_render_process_handler_t>,
}

#[repr(C)]
pub struct cef_client_t {
    pub base: cef_base_ref_counted_t,
    pub get_audio_handler: UnusedSlot,
    pub get_command_handler: UnusedSlot,
    pub get_context_menu_handler: UnusedSlot,
    pub get_dialog_handler: UnusedSlot,
    pub get_display_handler: UnusedSlot,
    pub get_download_handler: UnusedSlot,
    pub get_drag_handler: UnusedSlot,
    pub get_find_handler: UnusedSlot,
    pub get_focus_handler: UnusedSlot,
    pub get_frame_handler: UnusedSlot,
    pub get_permission_handler: UnusedSlot,
    pub get_jsdialog_handler: UnusedSlot,
    pub get_keyboard_handler: UnusedSlot,
    pub get_life_span_handler:
        Option<unsafe extern "C" fn(self_: *mut cef_client_t) -> *mut cef_life_span_handler_t>,
    pub get_load_handler:
        Option<unsafe extern "C" fn(self_: *mut cef_client_t) -> *mut cef_load_handler_t>,
    pub get_print_handler: UnusedSlot,
    pub get_render_handler:
        Option<unsafe extern "C" fn(self_: *mut cef_client_t) -> *mut cef_render_handler_t>,
    pub get_request_handler: UnusedSlot,
    pub on_process_message_received: UnusedSlot,
}

#[repr(C)]
pub struct cef_load_handler_t {
    pub base: cef_base_ref_counted_t,
    pub on_loading_state_change: Option<
        unsafe extern "C" fn(
            self_: *mut cef_load_handler_t,
            browser: *mut cef_browser_t,
            is_loading: c_int,
            can_go_back: c_int,
            can_go_forward: c_int,
        ),
    >,
    pub on_load_start: Option<
        unsafe extern "C" fn(
            self_: *mut cef_load_handler_t,
            browser: *mut cef_browser_t,
            frame: *mut cef_frame_t,
            transition_type: cef_transition_type_t,
        ),
    >,
    pub on_load_end: Option<
        unsafe extern "C" fn(
            self_: *mut cef_load_handler_t,
            browser: *mut cef_browser_t,
            frame: *mut cef_frame_t,
            http_status_code: c_int,
        ),
    >,
    pub on_load_error: Option<
        unsafe extern "C" fn(
            self_: *mut cef_load_handler_t,
            browser: *mut cef_browser_t,
            frame: *mut cef_frame_t,
            error_code: cef_errorcode_t,
            error_text: *const cef_string_t,
            failed_url: *const cef_string_t,
        ),
    >,
}

#[repr(C)]
pub struct cef_render_handler_t {
    pub base: cef_base_ref_counted_t,
    pub get_accessibility_handler: UnusedSlot,
    pub get_root_screen_rect: UnusedSlot,
    pub get_view_rect: Option<
        unsafe extern "C" fn(
            self_: *mut cef_render_handler_t,
            browser: *mut cef_browser_t,
            rect: *mut cef_rect_t,
        ),
    >,
    pub get_screen_point: UnusedSlot,
    pub get_screen_info: Option<
        unsafe extern "C" fn(
            self_: *mut cef_render_handler_t,
            browser: *mut cef_browser_t,
            screen_info: *mut cef_screen_info_t,
        ) -> c_int,
    >,
    pub on_popup_show: UnusedSlot,
    pub on_popup_size: UnusedSlot,
    pub on_paint: Option<
        unsafe extern "C" fn(
            self_: *mut cef_render_handler_t,
            browser: *mut cef_browser_t,
            type_: cef_paint_element_type_t,
            dirty_rects_count: usize,
            dirty_rects: *const cef_rect_t,
            buffer: *const c_void,
            width: c_int,
            height: c_int,
        ),
    >,
    pub on_accelerated_paint: UnusedSlot,
    pub get_touch_handle_size: UnusedSlot,
    pub on_touch_handle_state_changed: UnusedSlot,
    pub start_dragging: UnusedSlot,
    pub update_drag_cursor: UnusedSlot,
    pub on_scroll_offset_changed: UnusedSlot,
    pub on_ime_composition_range_changed: UnusedSlot,
    pub on_text_selection_changed: UnusedSlot,
    pub on_virtual_keyboard_requested: UnusedSlot,
}

#[repr(C)]
pub struct cef_life_span_handler_t {
    pub base: cef_base_ref_counted_t,
    pub on_before_popup: UnusedSlot,
    pub on_after_created: Option<
        unsafe extern "C" fn(self_: *mut cef_life_span_handler_t, browser: *mut cef_browser_t),
    >,
    pub do_close: Option<
        unsafe extern "C" fn(
            self_: *mut cef_life_span_handler_t,
            browser: *mut cef_browser_t,
        ) -> c_int,
    >,
    pub on_before_close: Option<
        unsafe extern "C" fn(self_: *mut cef_life_span_handler_t, browser: *mut cef_browser_t),
    >,
}

#[repr(C)]
pub struct cef_render_process_handler_t {
    pub base: cef_base_ref_counted_t,
    pub on_web_kit_initialized:
        Option<unsafe extern "C" fn(self_: *mut cef_render_process_handler_t)>,
    pub on_browser_created: UnusedSlot,
    pub on_browser_destroyed: UnusedSlot,
    pub get_load_handler: UnusedSlot,
    pub on_context_created: Option<
        unsafe extern "C" fn(
            self_: *mut cef_render_process_handler_t,
            browser: *mut cef_browser_t,
            frame: *mut cef_frame_t,
            context: *mut cef_v8context_t,
        ),
    >,
    pub on_context_released: UnusedSlot,
    pub on_uncaught_exception: UnusedSlot,
    pub on_focused_node_changed: UnusedSlot,
    pub on_process_message_received: UnusedSlot,
}

#[repr(C)]
pub struct cef_v8handler_t {
    pub base: cef_base_ref_counted_t,
    pub execute: Option<
        unsafe extern "C" fn(
            self_: *mut cef_v8handler_t,
            name: *const cef_string_t,
            object: *mut cef_v8value_t,
            arguments_count: usize,
            arguments: *const *mut cef_v8value_t,
            retval: *mut *mut cef_v8value_t,
            exception: *mut cef_string_t,
        ) -> c_int,
    >,
}

#[repr(C)]
pub struct cef_task_t {
    pub base: cef_base_ref_counted_t,
    pub execute: Option<unsafe extern "C" fn(self_: *mut cef_task_t)>,
}
