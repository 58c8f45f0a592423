//! The simulated `libcef` exports.

use std::{os::raw::c_int, os::raw::c_void, time::Duration};

use cef_wrapper::{
    CefApi,
    cef_capi_sys::{
        cef_app_t, cef_browser_settings_t, cef_client_t, cef_dictionary_value_t,
        cef_main_args_t, cef_request_context_t, cef_settings_t, cef_string_t, cef_task_t,
        cef_thread_id_t, cef_v8handler_t, cef_v8value_t, cef_window_info_t,
    },
};
use log::warn;

use crate::{
    c_to_rust::command_line::CommandLine,
    enums::thread_id::ThreadId,
    rust_to_c::{app::App, client::Client, task::Task, v8handler::V8Handler},
    util::{
        cef_arc::CefArc,
        cef_string::{cef_string_to_string, empty_cef_string},
        wrap_boolean::wrap_boolean,
    },
};

use super::{
    SimValue,
    dispatch,
    objects::{self, userfree_free},
    record::{PostedTask, SimSettings},
    state::{self, Extension, Work},
};

/// Upper bound on work items a single loop run processes, so a task that
/// keeps re-posting itself cannot hang a test.
const MAX_LOOP_ITERATIONS: usize = 100_000;

/// Reported by `cef_version_info`, in entry order.
const VERSION: [c_int; 8] = [121, 3, 2, 0, 121, 0, 6167, 75];

pub(super) fn api() -> CefApi {
    CefApi {
        initialize,
        execute_process,
        shutdown,
        run_message_loop,
        quit_message_loop,
        post_task,
        post_delayed_task,
        currently_on,
        browser_host_create_browser,
        register_extension,
        v8value_create_string,
        string_userfree_utf16_free: userfree_free,
        version_info,
    }
}

unsafe extern "C" fn initialize(
    _args: *const cef_main_args_t,
    settings: *const cef_settings_t,
    application: *mut cef_app_t,
    _windows_sandbox_info: *mut c_void,
) -> c_int {
    let settings = unsafe { settings.as_ref() }.map(SimSettings::from);
    let app = unsafe { CefArc::<App>::try_from_raw(application.cast()) };
    state::with(|state| {
        state.record.initialize_calls += 1;
        state.record.settings = settings;
        state.app = app.clone();
    });

    if let Some(app) = app {
        process_command_line(&app);
    }
    wrap_boolean(true)
}

fn process_command_line(app: &CefArc<App>) {
    let Some(on_before_command_line_processing) = app.0.on_before_command_line_processing else {
        return;
    };
    let command_line = objects::command_line("sim");
    // the browser process has an empty process type.
    let process_type = empty_cef_string();
    unsafe {
        on_before_command_line_processing(
            app.as_ptr().cast(),
            &process_type,
            command_line.clone().type_erase::<CommandLine>().into_raw().cast(),
        )
    };

    let switches = command_line.rust_impl.switches.lock().clone();
    state::with(|state| state.record.command_line_switches = switches);
}

unsafe extern "C" fn execute_process(
    _args: *const cef_main_args_t,
    application: *mut cef_app_t,
    _windows_sandbox_info: *mut c_void,
) -> c_int {
    drop(unsafe { CefArc::<App>::try_from_raw(application.cast()) });
    // always the browser process.
    -1
}

unsafe extern "C" fn shutdown() {
    let (app, browsers) = state::with(|state| {
        state.record.shutdown_calls += 1;
        (state.app.take(), state.take_browsers())
    });
    drop(app);
    drop(browsers);
}

unsafe extern "C" fn run_message_loop() {
    state::with(|state| {
        state.record.message_loop_runs += 1;
        state.quit_requested = false;
    });

    for _ in 0..MAX_LOOP_ITERATIONS {
        let next = state::with(|state| {
            if state.quit_requested {
                None
            } else {
                state.pop_next()
            }
        });
        match next {
            Some(work) => dispatch::run(work),
            None => {
                state::with(|state| state.quit_requested = false);
                return;
            }
        }
    }
    warn!("message loop gave up after {MAX_LOOP_ITERATIONS} work items");
}

unsafe extern "C" fn quit_message_loop() {
    state::with(|state| {
        state.record.quit_calls += 1;
        state.quit_requested = true;
    });
}

unsafe extern "C" fn post_task(thread_id: cef_thread_id_t, task: *mut cef_task_t) -> c_int {
    unsafe { post(thread_id, task, Duration::ZERO) }
}

unsafe extern "C" fn post_delayed_task(
    thread_id: cef_thread_id_t,
    task: *mut cef_task_t,
    delay_ms: i64,
) -> c_int {
    let delay = Duration::from_millis(u64::try_from(delay_ms).unwrap_or(0));
    unsafe { post(thread_id, task, delay) }
}

unsafe fn post(thread_id: cef_thread_id_t, task: *mut cef_task_t, delay: Duration) -> c_int {
    let Some(task) = (unsafe { CefArc::<Task>::try_from_raw(task.cast()) }) else {
        return wrap_boolean(false);
    };
    let Ok(thread) = ThreadId::try_from(thread_id) else {
        warn!("task posted to unknown thread {thread_id}");
        return wrap_boolean(false);
    };

    let outcome = state::with(|state| {
        if !state.accepts(thread) {
            state.record.rejected_posts.push(thread);
            return Some(Err(task));
        }
        state.record.posted.push(PostedTask {
            thread,
            delay,
            posted_at: state.now,
        });
        state.schedule(delay, Work::Task(task));
        Some(Ok(()))
    });

    // a rejected task is released here, outside the state borrow.
    wrap_boolean(matches!(outcome, Some(Ok(()))))
}

unsafe extern "C" fn currently_on(thread_id: cef_thread_id_t) -> c_int {
    let on = ThreadId::try_from(thread_id)
        .is_ok_and(|thread| state::with(|state| state.accepts(thread)));
    wrap_boolean(on)
}

unsafe extern "C" fn browser_host_create_browser(
    _window_info: *const cef_window_info_t,
    client: *mut cef_client_t,
    url: *const cef_string_t,
    _settings: *const cef_browser_settings_t,
    _extra_info: *mut cef_dictionary_value_t,
    _request_context: *mut cef_request_context_t,
) -> c_int {
    let Some(client) = (unsafe { CefArc::<Client>::try_from_raw(client.cast()) }) else {
        return wrap_boolean(false);
    };
    let url = unsafe { cef_string_to_string(url) }.unwrap_or_default();

    state::with(|state| {
        state.create_browser(client, url);
        wrap_boolean(true)
    })
}

unsafe extern "C" fn register_extension(
    extension_name: *const cef_string_t,
    javascript_code: *const cef_string_t,
    handler: *mut cef_v8handler_t,
) -> c_int {
    let name = unsafe { cef_string_to_string(extension_name) }.unwrap_or_default();
    let code = unsafe { cef_string_to_string(javascript_code) }.unwrap_or_default();
    let handler = unsafe { CefArc::<V8Handler>::try_from_raw(handler.cast()) };
    if name.is_empty() {
        return wrap_boolean(false);
    }

    state::with(|state| {
        state.record.extensions.push(name.clone());
        state.extensions.push(Extension {
            name,
            code,
            handler,
        });
        wrap_boolean(true)
    })
}

unsafe extern "C" fn v8value_create_string(value: *const cef_string_t) -> *mut cef_v8value_t {
    let value = unsafe { cef_string_to_string(value) }.unwrap_or_default();
    objects::v8value(SimValue::String(value)).into_raw().cast()
}

unsafe extern "C" fn version_info(entry: c_int) -> c_int {
    usize::try_from(entry)
        .ok()
        .and_then(|entry| VERSION.get(entry).copied())
        .unwrap_or(0)
}
