use std::time::Duration;

use cef_wrapper::cef_capi_sys::{cef_log_severity_t, cef_settings_t};

use crate::{enums::thread_id::ThreadId, util::wrap_boolean::unwrap_boolean};

/// Everything the host asked the runtime to do.
#[derive(Debug, Clone, Default)]
pub struct SimRecord {
    pub initialize_calls: usize,
    pub shutdown_calls: usize,
    pub quit_calls: usize,
    pub message_loop_runs: usize,
    /// Settings passed to the last `initialize`.
    pub settings: Option<SimSettings>,
    /// Switches the app added in `on_before_command_line_processing`.
    pub command_line_switches: Vec<(String, Option<String>)>,
    pub posted: Vec<PostedTask>,
    /// Threads that refused a task.
    pub rejected_posts: Vec<ThreadId>,
    pub closes: Vec<CloseRequest>,
    pub scripts: Vec<ExecutedScript>,
    pub created_urls: Vec<String>,
    pub extensions: Vec<String>,
}

impl SimRecord {
    pub fn has_switch(&self, name: &str) -> bool {
        self.command_line_switches
            .iter()
            .any(|(switch, _)| switch == name)
    }

    /// Closes requested from inside a load or paint callback.
    pub fn reentrant_closes(&self) -> impl Iterator<Item = &CloseRequest> {
        self.closes.iter().filter(|close| close.inside_callback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostedTask {
    pub thread: ThreadId,
    pub delay: Duration,
    pub posted_at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseRequest {
    pub browser_id: i32,
    pub force: bool,
    pub at: Duration,
    pub inside_callback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedScript {
    pub browser_id: i32,
    pub code: String,
    pub at: Duration,
}

/// The fields of `cef_settings_t` the demos set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSettings {
    pub no_sandbox: bool,
    pub windowless_rendering_enabled: bool,
    pub log_severity: cef_log_severity_t,
    pub remote_debugging_port: i32,
}

impl From<&cef_settings_t> for SimSettings {
    fn from(settings: &cef_settings_t) -> Self {
        Self {
            no_sandbox: unwrap_boolean(settings.no_sandbox),
            windowless_rendering_enabled: unwrap_boolean(settings.windowless_rendering_enabled),
            log_severity: settings.log_severity,
            remote_debugging_port: settings.remote_debugging_port,
        }
    }
}
