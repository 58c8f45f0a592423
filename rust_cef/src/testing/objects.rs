//! Runtime-side objects handed to callbacks: browsers, hosts, frames, V8
//! values and command lines, built on the same vtable machinery as the host
//! tables.

use std::os::raw::c_int;

use cef_wrapper::cef_capi_sys::{
    cef_browser_host_t, cef_browser_t, cef_command_line_t, cef_frame_t, cef_string_t,
    cef_string_userfree_t, cef_v8value_t,
};
use parking_lot::Mutex;

use crate::{
    c_to_rust::{
        browser::Browser, browser_host::BrowserHost, command_line::CommandLine, frame::Frame,
        v8value::V8Value,
    },
    util::{
        cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
        cef_string::{CefString, cef_string_to_string},
        wrap_boolean::{unwrap_boolean, wrap_boolean},
    },
};

use super::state;

/// A JavaScript value as the simulated V8 sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimValue {
    Undefined,
    Int(i32),
    String(String),
}

impl SimValue {
    /// Reads a value through the wrapper's own accessors.
    pub fn read(value: &V8Value) -> Self {
        if let Some(string) = value.string_value() {
            Self::String(string)
        } else if let Some(int) = value.int_value() {
            Self::Int(int)
        } else {
            Self::Undefined
        }
    }
}

impl From<&str> for SimValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<i32> for SimValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

pub(super) fn userfree(value: &str) -> cef_string_userfree_t {
    Box::into_raw(Box::new(CefString::new(value).into_raw()))
}

pub(super) unsafe extern "C" fn userfree_free(value: cef_string_userfree_t) {
    if value.is_null() {
        return;
    }
    let value = unsafe { Box::from_raw(value) };
    if let Some(dtor) = value.dtor {
        unsafe { dtor(value.str_) };
    }
}

pub(super) struct SimBrowser {
    pub(super) id: i32,
}

type BrowserImpl = CefArcFromRust<Browser, SimBrowser>;

pub(super) fn browser(id: i32) -> CefArc<Browser> {
    let v_table = Browser(cef_browser_t {
        base: uninit_arc_vtable(),
        is_valid: Some(browser_is_valid),
        get_host: Some(browser_get_host),
        can_go_back: None,
        go_back: None,
        can_go_forward: None,
        go_forward: None,
        is_loading: Some(browser_is_loading),
        reload: None,
        reload_ignore_cache: None,
        stop_load: None,
        get_identifier: Some(browser_get_identifier),
        is_same: None,
        is_popup: None,
        has_document: None,
        get_main_frame: Some(browser_get_main_frame),
    });
    CefArc::new(v_table, SimBrowser { id }).type_erase()
}

unsafe fn browser_id(ptr: *mut cef_browser_t) -> i32 {
    unsafe { BrowserImpl::rust_impl_from_ptr(ptr.cast()) }.id
}

unsafe extern "C" fn browser_is_valid(ptr: *mut cef_browser_t) -> c_int {
    let id = unsafe { browser_id(ptr) };
    wrap_boolean(state::with(|state| state.browser(id).is_some_and(|b| b.valid)))
}

unsafe extern "C" fn browser_is_loading(ptr: *mut cef_browser_t) -> c_int {
    let id = unsafe { browser_id(ptr) };
    wrap_boolean(state::with(|state| state.browser(id).is_some_and(|b| b.loading)))
}

unsafe extern "C" fn browser_get_identifier(ptr: *mut cef_browser_t) -> c_int {
    unsafe { browser_id(ptr) }
}

unsafe extern "C" fn browser_get_host(ptr: *mut cef_browser_t) -> *mut cef_browser_host_t {
    host(unsafe { browser_id(ptr) }).into_raw().cast()
}

unsafe extern "C" fn browser_get_main_frame(ptr: *mut cef_browser_t) -> *mut cef_frame_t {
    main_frame(unsafe { browser_id(ptr) }).into_raw().cast()
}

struct SimHost {
    browser_id: i32,
}

type HostImpl = CefArcFromRust<BrowserHost, SimHost>;

fn host(browser_id: i32) -> CefArc<BrowserHost> {
    let v_table = BrowserHost(cef_browser_host_t {
        base: uninit_arc_vtable(),
        get_browser: Some(host_get_browser),
        close_browser: Some(host_close_browser),
        try_close_browser: Some(host_try_close_browser),
        set_focus: None,
        get_window_handle: None,
        get_opener_window_handle: None,
        has_view: None,
        get_client: None,
    });
    CefArc::new(v_table, SimHost { browser_id }).type_erase()
}

unsafe extern "C" fn host_get_browser(ptr: *mut cef_browser_host_t) -> *mut cef_browser_t {
    let host = unsafe { HostImpl::rust_impl_from_ptr(ptr.cast()) };
    browser(host.browser_id).into_raw().cast()
}

unsafe extern "C" fn host_close_browser(ptr: *mut cef_browser_host_t, force_close: c_int) {
    let host = unsafe { HostImpl::rust_impl_from_ptr(ptr.cast()) };
    state::with(|state| state.request_close(host.browser_id, unwrap_boolean(force_close)));
}

unsafe extern "C" fn host_try_close_browser(ptr: *mut cef_browser_host_t) -> c_int {
    let host = unsafe { HostImpl::rust_impl_from_ptr(ptr.cast()) };
    state::with(|state| state.request_close(host.browser_id, false));
    // the close completes asynchronously.
    wrap_boolean(false)
}

struct SimFrame {
    browser_id: i32,
    main: bool,
}

type FrameImpl = CefArcFromRust<Frame, SimFrame>;

pub(super) fn main_frame(browser_id: i32) -> CefArc<Frame> {
    frame(browser_id, true)
}

/// A frame of the browser's page; `main` tells the top-level frame from a
/// sub-frame such as an iframe.
pub(super) fn frame(browser_id: i32, main: bool) -> CefArc<Frame> {
    let v_table = Frame(cef_frame_t {
        base: uninit_arc_vtable(),
        is_valid: Some(frame_is_valid),
        undo: None,
        redo: None,
        cut: None,
        copy: None,
        paste: None,
        del: None,
        select_all: None,
        view_source: None,
        get_source: None,
        get_text: None,
        load_request: None,
        load_url: None,
        execute_java_script: Some(frame_execute_java_script),
        is_main: Some(frame_is_main),
        is_focused: None,
        get_name: None,
        get_identifier: Some(frame_get_identifier),
        get_parent: None,
        get_url: Some(frame_get_url),
    });
    CefArc::new(v_table, SimFrame { browser_id, main }).type_erase()
}

unsafe fn sim_frame<'a>(ptr: *mut cef_frame_t) -> &'a SimFrame {
    unsafe { FrameImpl::rust_impl_from_ptr(ptr.cast()) }
}

unsafe fn frame_browser_id(ptr: *mut cef_frame_t) -> i32 {
    unsafe { sim_frame(ptr) }.browser_id
}

unsafe extern "C" fn frame_is_valid(ptr: *mut cef_frame_t) -> c_int {
    let id = unsafe { frame_browser_id(ptr) };
    wrap_boolean(state::with(|state| state.browser(id).is_some_and(|b| b.valid)))
}

unsafe extern "C" fn frame_is_main(ptr: *mut cef_frame_t) -> c_int {
    wrap_boolean(unsafe { sim_frame(ptr) }.main)
}

unsafe extern "C" fn frame_get_identifier(ptr: *mut cef_frame_t) -> i64 {
    i64::from(unsafe { frame_browser_id(ptr) })
}

unsafe extern "C" fn frame_get_url(ptr: *mut cef_frame_t) -> cef_string_userfree_t {
    let id = unsafe { frame_browser_id(ptr) };
    match state::with(|state| state.browser(id).map(|b| b.url.clone())) {
        Some(url) => userfree(&url),
        None => std::ptr::null_mut(),
    }
}

unsafe extern "C" fn frame_execute_java_script(
    ptr: *mut cef_frame_t,
    code: *const cef_string_t,
    _script_url: *const cef_string_t,
    _start_line: c_int,
) {
    let id = unsafe { frame_browser_id(ptr) };
    let code = unsafe { cef_string_to_string(code) }.unwrap_or_default();
    state::with(|state| state.record_script(id, code));
}

type V8ValueImpl = CefArcFromRust<V8Value, SimValue>;

pub(super) fn v8value(value: SimValue) -> CefArc<V8Value> {
    let v_table = V8Value(cef_v8value_t {
        base: uninit_arc_vtable(),
        is_valid: Some(v8_is_valid),
        is_undefined: None,
        is_null: None,
        is_bool: None,
        is_int: Some(v8_is_int),
        is_uint: None,
        is_double: None,
        is_date: None,
        is_string: Some(v8_is_string),
        is_object: None,
        is_array: None,
        is_array_buffer: None,
        is_function: None,
        is_promise: None,
        is_same: None,
        get_bool_value: None,
        get_int_value: Some(v8_get_int_value),
        get_uint_value: None,
        get_double_value: None,
        get_date_value: None,
        get_string_value: Some(v8_get_string_value),
    });
    CefArc::new(v_table, value).type_erase()
}

unsafe fn v8<'a>(ptr: *mut cef_v8value_t) -> &'a SimValue {
    unsafe { V8ValueImpl::rust_impl_from_ptr(ptr.cast()) }
}

unsafe extern "C" fn v8_is_valid(_ptr: *mut cef_v8value_t) -> c_int {
    wrap_boolean(true)
}

unsafe extern "C" fn v8_is_int(ptr: *mut cef_v8value_t) -> c_int {
    wrap_boolean(matches!(unsafe { v8(ptr) }, SimValue::Int(_)))
}

unsafe extern "C" fn v8_is_string(ptr: *mut cef_v8value_t) -> c_int {
    wrap_boolean(matches!(unsafe { v8(ptr) }, SimValue::String(_)))
}

unsafe extern "C" fn v8_get_int_value(ptr: *mut cef_v8value_t) -> i32 {
    match unsafe { v8(ptr) } {
        SimValue::Int(value) => *value,
        _ => 0,
    }
}

unsafe extern "C" fn v8_get_string_value(ptr: *mut cef_v8value_t) -> cef_string_userfree_t {
    match unsafe { v8(ptr) } {
        // V8 hands back no string at all for "".
        SimValue::String(value) if !value.is_empty() => userfree(value),
        _ => std::ptr::null_mut(),
    }
}

/// The switches and arguments a command line collected.
#[derive(Debug, Default)]
pub(super) struct SimCommandLine {
    pub(super) program: String,
    pub(super) switches: Mutex<Vec<(String, Option<String>)>>,
    pub(super) arguments: Mutex<Vec<String>>,
}

pub(super) type CommandLineImpl = CefArcFromRust<CommandLine, SimCommandLine>;

pub(super) fn command_line(program: &str) -> CefArc<CommandLineImpl> {
    let v_table = CommandLine(cef_command_line_t {
        base: uninit_arc_vtable(),
        is_valid: Some(command_line_is_valid),
        is_read_only: Some(command_line_is_read_only),
        copy: None,
        init_from_argv: None,
        init_from_string: None,
        reset: None,
        get_argv: None,
        get_command_line_string: None,
        get_program: Some(command_line_get_program),
        set_program: None,
        has_switches: Some(command_line_has_switches),
        has_switch: Some(command_line_has_switch),
        get_switch_value: Some(command_line_get_switch_value),
        get_switches: None,
        append_switch: Some(command_line_append_switch),
        append_switch_with_value: Some(command_line_append_switch_with_value),
        has_arguments: None,
        get_arguments: None,
        append_argument: Some(command_line_append_argument),
        prepend_wrapper: None,
    });
    CefArc::new(
        v_table,
        SimCommandLine {
            program: program.to_owned(),
            ..Default::default()
        },
    )
}

unsafe fn cl<'a>(ptr: *mut cef_command_line_t) -> &'a SimCommandLine {
    unsafe { CommandLineImpl::rust_impl_from_ptr(ptr.cast()) }
}

unsafe extern "C" fn command_line_is_valid(_ptr: *mut cef_command_line_t) -> c_int {
    wrap_boolean(true)
}

unsafe extern "C" fn command_line_is_read_only(_ptr: *mut cef_command_line_t) -> c_int {
    wrap_boolean(false)
}

unsafe extern "C" fn command_line_get_program(
    ptr: *mut cef_command_line_t,
) -> cef_string_userfree_t {
    userfree(&unsafe { cl(ptr) }.program)
}

unsafe extern "C" fn command_line_has_switches(ptr: *mut cef_command_line_t) -> c_int {
    wrap_boolean(!unsafe { cl(ptr) }.switches.lock().is_empty())
}

unsafe extern "C" fn command_line_has_switch(
    ptr: *mut cef_command_line_t,
    name: *const cef_string_t,
) -> c_int {
    let name = unsafe { cef_string_to_string(name) }.unwrap_or_default();
    let switches = unsafe { cl(ptr) }.switches.lock();
    wrap_boolean(switches.iter().any(|(switch, _)| *switch == name))
}

unsafe extern "C" fn command_line_get_switch_value(
    ptr: *mut cef_command_line_t,
    name: *const cef_string_t,
) -> cef_string_userfree_t {
    let name = unsafe { cef_string_to_string(name) }.unwrap_or_default();
    let switches = unsafe { cl(ptr) }.switches.lock();
    match switches.iter().rev().find(|(switch, _)| *switch == name) {
        Some((_, Some(value))) => userfree(value),
        _ => std::ptr::null_mut(),
    }
}

unsafe extern "C" fn command_line_append_switch(
    ptr: *mut cef_command_line_t,
    name: *const cef_string_t,
) {
    let name = unsafe { cef_string_to_string(name) }.unwrap_or_default();
    unsafe { cl(ptr) }.switches.lock().push((name, None));
}

unsafe extern "C" fn command_line_append_switch_with_value(
    ptr: *mut cef_command_line_t,
    name: *const cef_string_t,
    value: *const cef_string_t,
) {
    let name = unsafe { cef_string_to_string(name) }.unwrap_or_default();
    let value = unsafe { cef_string_to_string(value) };
    unsafe { cl(ptr) }.switches.lock().push((name, value));
}

unsafe extern "C" fn command_line_append_argument(
    ptr: *mut cef_command_line_t,
    argument: *const cef_string_t,
) {
    let argument = unsafe { cef_string_to_string(argument) }.unwrap_or_default();
    unsafe { cl(ptr) }.arguments.lock().push(argument);
}
