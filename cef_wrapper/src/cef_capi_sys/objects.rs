//! Records allocated by the runtime. The host calls into their slots but never
//! allocates them, so each struct stops after the last slot the workspace uses.

use std::os::raw::{c_char, c_int};

use super::handlers::cef_client_t;
use super::structs::cef_window_handle_t;
use super::types::{
    cef_base_ref_counted_t, cef_basetime_t, cef_request_t, cef_string_list_t, cef_string_map_t,
    cef_string_t, cef_string_userfree_t, cef_string_visitor_t,
};
use super::UnusedSlot;

#[repr(C)]
pub struct cef_browser_t {
    pub base: cef_base_ref_counted_t,
    pub is_valid: Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int>,
    pub get_host:
        Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> *mut cef_browser_host_t>,
    pub can_go_back: Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int>,
    pub go_back: Option<unsafe extern "C" fn(self_: *mut cef_browser_t)>,
    pub can_go_forward: Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int>,
    pub go_forward: Option<unsafe extern "C" fn(self_: *mut cef_browser_t)>,
    pub is_loading: Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int>,
    pub reload: Option<unsafe extern "C" fn(self_: *mut cef_browser_t)>,
    pub reload_ignore_cache: Option<unsafe extern "C" fn(self_: *mut cef_browser_t)>,
    pub stop_load: Option<unsafe extern "C" fn(self_: *mut cef_browser_t)>,
    pub get_identifier: Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int>,
    pub is_same:
        Option<unsafe extern "C" fn(self_: *mut cef_browser_t, that: *mut cef_browser_t) -> c_int>,
    pub is_popup: Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int>,
    pub has_document: Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int>,
    pub get_main_frame: Option<unsafe extern "C" fn(self_: *mut cef_browser_t) -> *mut cef_frame_t>,
}

#[repr(C)]
pub struct cef_browser_host_t {
    pub base: cef_base_ref_counted_t,
    pub get_browser:
        Option<unsafe extern "C" fn(self_: *mut cef_browser_host_t) -> *mut cef_browser_t>,
    pub close_browser:
        Option<unsafe extern "C" fn(self_: *mut cef_browser_host_t, force_close: c_int)>,
    pub try_close_browser: Option<unsafe extern "C" fn(self_: *mut cef_browser_host_t) -> c_int>,
    pub set_focus: Option<unsafe extern "C" fn(self_: *mut cef_browser_host_t, focus: c_int)>,
    pub get_window_handle:
        Option<unsafe extern "C" fn(self_: *mut cef_browser_host_t) -> cef_window_handle_t>,
    pub get_opener_window_handle:
        Option<unsafe extern "C" fn(self_: *mut cef_browser_host_t) -> cef_window_handle_t>,
    pub has_view: Option<unsafe extern "C" fn(self_: *mut cef_browser_host_t) -> c_int>,
    pub get_client:
        Option<unsafe extern "C" fn(self_: *mut cef_browser_host_t) -> *mut cef_client_t>,
}

#[repr(C)]
pub struct cef_frame_t {
    pub base: cef_base_ref_counted_t,
    pub is_valid: Option<unsafe extern "C" fn(self_: *mut cef_frame_t) -> c_int>,
    pub undo: Option<unsafe extern "C" fn(self_: *mut cef_frame_t)>,
    pub redo: Option<unsafe extern "C" fn(self_: *mut cef_frame_t)>,
    pub cut: Option<unsafe extern "C" fn(self_: *mut cef_frame_t)>,
    pub copy: Option<unsafe extern "C" fn(self_: *mut cef_frame_t)>,
    pub paste: Option<unsafe extern "C" fn(self_: *mut cef_frame_t)>,
    pub del: Option<unsafe extern "C" fn(self_: *mut cef_frame_t)>,
    pub select_all: Option<unsafe extern "C" fn(self_: *mut cef_frame_t)>,
    pub view_source: Option<unsafe extern "C" fn(self_: *mut cef_frame_t)>,
    pub get_source: Option<
        unsafe extern "C" fn(self_: *mut cef_frame_t, visitor: *mut cef_string_visitor_t),
    >,
    pub get_text: Option<
        unsafe extern "C" fn(self_: *mut cef_frame_t, visitor: *mut cef_string_visitor_t),
    >,
    pub load_request:
        Option<unsafe extern "C" fn(self_: *mut cef_frame_t, request: *mut cef_request_t)>,
    pub load_url: Option<unsafe extern "C" fn(self_: *mut cef_frame_t, url: *const cef_string_t)>,
    pub execute_java_script: Option<
        unsafe extern "C" fn(
            self_: *mut cef_frame_t,
            code: *const cef_string_t,
            script_url: *const cef_string_t,
            start_line: c_int,
        ),
    >,
    pub is_main: Option<unsafe extern "C" fn(self_: *mut cef_frame_t) -> c_int>,
    pub is_focused: Option<unsafe extern "C" fn(self_: *mut cef_frame_t) -> c_int>,
    pub get_name: Option<unsafe extern "C" fn(self_: *mut cef_frame_t) -> cef_string_userfree_t>,
    pub get_identifier: Option<unsafe extern "C" fn(self_: *mut cef_frame_t) -> i64>,
    pub get_parent: Option<unsafe extern "C" fn(self_: *mut cef_frame_t) -> *mut cef_frame_t>,
    pub get_url: Option<unsafe extern "C" fn(self_: *mut cef_frame_t) -> cef_string_userfree_t>,
}

#[repr(C)]
pub struct cef_v8value_t {
    pub base: cef_base_ref_counted_t,
    pub is_valid: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_undefined: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_null: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_bool: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_int: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_uint: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_double: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_date: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_string: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_object: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_array: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_array_buffer: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_function: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_promise: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub is_same:
        Option<unsafe extern "C" fn(self_: *mut cef_v8value_t, that: *mut cef_v8value_t) -> c_int>,
    pub get_bool_value: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> c_int>,
    pub get_int_value: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> i32>,
    pub get_uint_value: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> u32>,
    pub get_double_value: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> f64>,
    pub get_date_value: Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> cef_basetime_t>,
    pub get_string_value:
        Option<unsafe extern "C" fn(self_: *mut cef_v8value_t) -> cef_string_userfree_t>,
}

#[repr(C)]
pub struct cef_command_line_t {
    pub base: cef_base_ref_counted_t,
    pub is_valid: Option<unsafe extern "C" fn(self_: *mut cef_command_line_t) -> c_int>,
    pub is_read_only: Option<unsafe extern "C" fn(self_: *mut cef_command_line_t) -> c_int>,
    pub copy:
        Option<unsafe extern "C" fn(self_: *mut cef_command_line_t) -> *mut cef_command_line_t>,
    pub init_from_argv: Option<
        unsafe extern "C" fn(self_: *mut cef_command_line_t, argc: c_int, argv: *const *const c_char),
    >,
    pub init_from_string: Option<
        unsafe extern "C" fn(self_: *mut cef_command_line_t, command_line: *const cef_string_t),
    >,
    pub reset: Option<unsafe extern "C" fn(self_: *mut cef_command_line_t)>,
    pub get_argv:
        Option<unsafe extern "C" fn(self_: *mut cef_command_line_t, argv: cef_string_list_t)>,
    pub get_command_line_string:
        Option<unsafe extern "C" fn(self_: *mut cef_command_line_t) -> cef_string_userfree_t>,
    pub get_program:
        Option<unsafe extern "C" fn(self_: *mut cef_command_line_t) -> cef_string_userfree_t>,
    pub set_program: Option<
        unsafe extern "C" fn(self_: *mut cef_command_line_t, program: *const cef_string_t),
    >,
    pub has_switches: Option<unsafe extern "C" fn(self_: *mut cef_command_line_t) -> c_int>,
    pub has_switch: Option<
        unsafe extern "C" fn(self_: *mut cef_command_line_t, name: *const cef_string_t) -> c_int,
    >,
    pub get_switch_value: Option<
        unsafe extern "C" fn(
            self_: *mut cef_command_line_t,
            name: *const cef_string_t,
        ) -> cef_string_userfree_t,
    >,
    pub get_switches:
        Option<unsafe extern "C" fn(self_: *mut cef_command_line_t, switches: cef_string_map_t)>,
    pub append_switch:
        Option<unsafe extern "C" fn(self_: *mut cef_command_line_t, name: *const cef_string_t)>,
    pub append_switch_with_value: Option<
        unsafe extern "C" fn(
            self_: *mut cef_command_line_t,
            name: *const cef_string_t,
            value: *const cef_string_t,
        ),
    >,
    pub has_arguments: Option<unsafe extern "C" fn(self_: *mut cef_command_line_t) -> c_int>,
    pub get_arguments:
        Option<unsafe extern "C" fn(self_: *mut cef_command_line_t, arguments: cef_string_list_t)>,
    pub append_argument: Option<
        unsafe extern "C" fn(self_: *mut cef_command_line_t, argument: *const cef_string_t),
    >,
    pub prepend_wrapper: UnusedSlot,
}
