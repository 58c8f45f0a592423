use std::os::raw::{c_int, c_uint, c_void};

pub type cef_char16_t = u16;
pub type cef_color_t = u32;
pub type cef_errorcode_t = c_int;
pub type cef_string_list_t = *mut c_void;
pub type cef_string_map_t = *mut c_void;

pub type cef_log_severity_t = c_uint;
pub const cef_log_severity_t_LOGSEVERITY_DEFAULT: cef_log_severity_t = 0;
pub const cef_log_severity_t_LOGSEVERITY_VERBOSE: cef_log_severity_t = 1;
pub const cef_log_severity_t_LOGSEVERITY_DEBUG: cef_log_severity_t = 1;
pub const cef_log_severity_t_LOGSEVERITY_INFO: cef_log_severity_t = 2;
pub const cef_log_severity_t_LOGSEVERITY_WARNING: cef_log_severity_t = 3;
pub const cef_log_severity_t_LOGSEVERITY_ERROR: cef_log_severity_t = 4;
pub const cef_log_severity_t_LOGSEVERITY_FATAL: cef_log_severity_t = 5;
pub const cef_log_severity_t_LOGSEVERITY_DISABLE: cef_log_severity_t = 99;

pub type cef_log_items_t = c_uint;
pub const cef_log_items_t_LOG_ITEMS_DEFAULT: cef_log_items_t = 0;
pub const cef_log_items_t_LOG_ITEMS_NONE: cef_log_items_t = 1;
pub const cef_log_items_t_LOG_ITEMS_FLAG_PROCESS_ID: cef_log_items_t = 1 << 1;
pub const cef_log_items_t_LOG_ITEMS_FLAG_THREAD_ID: cef_log_items_t = 1 << 2;
pub const cef_log_items_t_LOG_ITEMS_FLAG_TIME_STAMP: cef_log_items_t = 1 << 3;
pub const cef_log_items_t_LOG_ITEMS_FLAG_TICK_COUNT: cef_log_items_t = 1 << 4;

pub type cef_state_t = c_uint;
pub const cef_state_t_STATE_DEFAULT: cef_state_t = 0;
pub const cef_state_t_STATE_ENABLED: cef_state_t = 1;
pub const cef_state_t_STATE_DISABLED: cef_state_t = 2;

pub type cef_paint_element_type_t = c_uint;
pub const cef_paint_element_type_t_PET_VIEW: cef_paint_element_type_t = 0;
pub const cef_paint_element_type_t_PET_POPUP: cef_paint_element_type_t = 1;

pub type cef_thread_id_t = c_uint;
pub const cef_thread_id_t_TID_UI: cef_thread_id_t = 0;
pub const cef_thread_id_t_TID_FILE_BACKGROUND: cef_thread_id_t = 1;
pub const cef_thread_id_t_TID_FILE_USER_VISIBLE: cef_thread_id_t = 2;
pub const cef_thread_id_t_TID_FILE_USER_BLOCKING: cef_thread_id_t = 3;
pub const cef_thread_id_t_TID_PROCESS_LAUNCHER: cef_thread_id_t = 4;
pub const cef_thread_id_t_TID_IO: cef_thread_id_t = 5;
pub const cef_thread_id_t_TID_RENDERER: cef_thread_id_t = 6;

pub type cef_transition_type_t = c_uint;
pub type cef_process_id_t = c_uint;

/// Entries accepted by `cef_version_info`.
pub const CEF_VERSION_INFO_CEF_MAJOR: c_int = 0;
pub const CEF_VERSION_INFO_CEF_MINOR: c_int = 1;
pub const CEF_VERSION_INFO_CEF_PATCH: c_int = 2;
pub const CEF_VERSION_INFO_CEF_COMMIT: c_int = 3;
pub const CEF_VERSION_INFO_CHROME_MAJOR: c_int = 4;
pub const CEF_VERSION_INFO_CHROME_MINOR: c_int = 5;
pub const CEF_VERSION_INFO_CHROME_BUILD: c_int = 6;
pub const CEF_VERSION_INFO_CHROME_PATCH: c_int = 7;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_string_utf16_t {
    pub str_: *mut cef_char16_t,
    pub length: usize,
    pub dtor: Option<unsafe extern "C" fn(str_: *mut cef_char16_t)>,
}

pub type cef_string_t = cef_string_utf16_t;
pub type cef_string_userfree_utf16_t = *mut cef_string_utf16_t;
pub type cef_string_userfree_t = cef_string_userfree_utf16_t;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct cef_rect_t {
    pub x: c_int,
    pub y: c_int,
    pub width: c_int,
    pub height: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct cef_point_t {
    pub x: c_int,
    pub y: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct cef_size_t {
    pub width: c_int,
    pub height: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct cef_basetime_t {
    pub val: i64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_base_ref_counted_t {
    pub size: usize,
    pub add_ref: Option<unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t)>,
    pub release: Option<unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t) -> c_int>,
    pub has_one_ref: Option<unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t) -> c_int>,
    pub has_at_least_one_ref:
        Option<unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t) -> c_int>,
}

/// Opaque runtime types that are only ever passed through by pointer.
macro_rules! opaque {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )*
    };
}

opaque!(
    cef_dictionary_value_t,
    cef_request_context_t,
    cef_request_t,
    cef_process_message_t,
    cef_v8context_t,
    cef_v8exception_t,
    cef_v8stack_trace_t,
    cef_domnode_t,
    cef_string_visitor_t,
    cef_scheme_registrar_t,
    cef_resource_bundle_handler_t,
    cef_browser_process_handler_t,
    cef_audio_handler_t,
    cef_command_handler_t,
    cef_context_menu_handler_t,
    cef_dialog_handler_t,
    cef_display_handler_t,
    cef_download_handler_t,
    cef_drag_handler_t,
    cef_find_handler_t,
    cef_focus_handler_t,
    cef_frame_handler_t,
    cef_permission_handler_t,
    cef_jsdialog_handler_t,
    cef_keyboard_handler_t,
    cef_print_handler_t,
    cef_request_handler_t,
    cef_accessibility_handler_t,
);
