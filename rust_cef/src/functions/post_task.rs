use std::time::Duration;

use crate::{
    CefError, api,
    enums::thread_id::ThreadId,
    rust_to_c::task::Task,
    util::{cef_arc::CefArc, wrap_boolean::unwrap_boolean},
};

/// Posts `task` to run on `thread`. The runtime takes the only reference.
pub fn post_task(thread: ThreadId, task: CefArc<Task>) -> Result<(), CefError> {
    let api = api::get()?;
    let posted = unsafe { (api.post_task)(thread.into(), task.into_raw().cast()) };
    if posted == 0 {
        return Err(CefError::PostTask { thread });
    }
    Ok(())
}

/// Posts `task` to run on `thread` once `delay` has passed. Delays are
/// rounded down to whole milliseconds.
pub fn post_delayed_task(
    thread: ThreadId,
    task: CefArc<Task>,
    delay: Duration,
) -> Result<(), CefError> {
    let api = api::get()?;
    let delay_ms = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
    let posted =
        unsafe { (api.post_delayed_task)(thread.into(), task.into_raw().cast(), delay_ms) };
    if posted == 0 {
        return Err(CefError::PostTask { thread });
    }
    Ok(())
}

pub fn currently_on(thread: ThreadId) -> Result<bool, CefError> {
    let api = api::get()?;
    Ok(unwrap_boolean(unsafe { (api.currently_on)(thread.into()) }))
}

/// Where application code sends deferred work.
pub trait TaskPoster: Send + Sync {
    fn post(&self, thread: ThreadId, task: CefArc<Task>) -> Result<(), CefError>;

    fn post_delayed(
        &self,
        thread: ThreadId,
        task: CefArc<Task>,
        delay: Duration,
    ) -> Result<(), CefError>;

    /// Posts a closure to the UI thread.
    fn post_ui<F>(&self, delay: Duration, f: F) -> Result<(), CefError>
    where
        F: FnOnce() + Send + 'static,
        Self: Sized,
    {
        let task = Task::once(f);
        if delay.is_zero() {
            self.post(ThreadId::Ui, task)
        } else {
            self.post_delayed(ThreadId::Ui, task, delay)
        }
    }
}

/// Posts through the loaded runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeTaskPoster;

impl TaskPoster for RuntimeTaskPoster {
    fn post(&self, thread: ThreadId, task: CefArc<Task>) -> Result<(), CefError> {
        post_task(thread, task)
    }

    fn post_delayed(
        &self,
        thread: ThreadId,
        task: CefArc<Task>,
        delay: Duration,
    ) -> Result<(), CefError> {
        post_delayed_task(thread, task, delay)
    }
}
