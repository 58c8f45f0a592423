//! Signatures of the exported `libcef` entry points.

use std::os::raw::{c_int, c_void};

use super::handlers::{cef_app_t, cef_client_t, cef_task_t, cef_v8handler_t};
use super::objects::cef_v8value_t;
use super::structs::{cef_browser_settings_t, cef_main_args_t, cef_settings_t, cef_window_info_t};
use super::types::{
    cef_dictionary_value_t, cef_request_context_t, cef_string_t, cef_string_userfree_utf16_t,
    cef_thread_id_t,
};

pub type cef_initialize_fn = unsafe extern "C" fn(
    args: *const cef_main_args_t,
    settings: *const cef_settings_t,
    application: *mut cef_app_t,
    windows_sandbox_info: *mut c_void,
) -> c_int;

pub type cef_execute_process_fn = unsafe extern "C" fn(
    args: *const cef_main_args_t,
    application: *mut cef_app_t,
    windows_sandbox_info: *mut c_void,
) -> c_int;

pub type cef_shutdown_fn = unsafe extern "C" fn();
pub type cef_run_message_loop_fn = unsafe extern "C" fn();
pub type cef_quit_message_loop_fn = unsafe extern "C" fn();

pub type cef_post_task_fn =
    unsafe extern "C" fn(thread_id: cef_thread_id_t, task: *mut cef_task_t) -> c_int;

pub type cef_post_delayed_task_fn = unsafe extern "C" fn(
    thread_id: cef_thread_id_t,
    task: *mut cef_task_t,
    delay_ms: i64,
) -> c_int;

pub type cef_currently_on_fn = unsafe extern "C" fn(thread_id: cef_thread_id_t) -> c_int;

pub type cef_browser_host_create_browser_fn = unsafe extern "C" fn(
    window_info: *const cef_window_info_t,
    client: *mut cef_client_t,
    url: *const cef_string_t,
    settings: *const cef_browser_settings_t,
    extra_info: *mut cef_dictionary_value_t,
    request_context: *mut cef_request_context_t,
) -> c_int;

pub type cef_register_extension_fn = unsafe extern "C" fn(
    extension_name: *const cef_string_t,
    javascript_code: *const cef_string_t,
    handler: *mut cef_v8handler_t,
) -> c_int;

pub type cef_v8value_create_string_fn =
    unsafe extern "C" fn(value: *const cef_string_t) -> *mut cef_v8value_t;

pub type cef_string_userfree_utf16_free_fn =
    unsafe extern "C" fn(str_: cef_string_userfree_utf16_t);

pub type cef_version_info_fn = unsafe extern "C" fn(entry: c_int) -> c_int;
