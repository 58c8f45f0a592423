use std::time::Duration;

use rust_cef::{
    CefError, api,
    enums::thread_id::ThreadId,
    functions::{
        message_loop::run_message_loop,
        post_task::{currently_on, post_delayed_task},
        version::version_info,
    },
    rust_to_c::task::Task,
};

#[test]
fn entry_points_fail_before_the_runtime_is_loaded() {
    assert!(!api::is_loaded());

    assert!(matches!(run_message_loop(), Err(CefError::NotLoaded)));
    assert!(matches!(currently_on(ThreadId::Ui), Err(CefError::NotLoaded)));
    assert!(matches!(version_info(), Err(CefError::NotLoaded)));

    let task = Task::once(|| unreachable!("never posted"));
    assert!(matches!(
        post_delayed_task(ThreadId::Ui, task, Duration::from_millis(10)),
        Err(CefError::NotLoaded)
    ));
}

#[test]
fn loading_a_missing_library_is_a_load_error() {
    let result = unsafe { api::load("/nonexistent/libcef.so") };

    assert!(matches!(result, Err(CefError::Load(_))));
    assert!(!api::is_loaded());
}
