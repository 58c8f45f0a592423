use cef_wrapper::cef_capi_sys::{
    cef_thread_id_t, cef_thread_id_t_TID_FILE_BACKGROUND, cef_thread_id_t_TID_FILE_USER_BLOCKING,
    cef_thread_id_t_TID_FILE_USER_VISIBLE, cef_thread_id_t_TID_IO,
    cef_thread_id_t_TID_PROCESS_LAUNCHER, cef_thread_id_t_TID_RENDERER, cef_thread_id_t_TID_UI,
};

/// Named threads of the runtime that tasks can be posted to.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadId {
    /// The browser process main thread.
    Ui = cef_thread_id_t_TID_UI,
    FileBackground = cef_thread_id_t_TID_FILE_BACKGROUND,
    FileUserVisible = cef_thread_id_t_TID_FILE_USER_VISIBLE,
    FileUserBlocking = cef_thread_id_t_TID_FILE_USER_BLOCKING,
    ProcessLauncher = cef_thread_id_t_TID_PROCESS_LAUNCHER,
    Io = cef_thread_id_t_TID_IO,
    /// The render process main thread.
    Renderer = cef_thread_id_t_TID_RENDERER,
}

impl From<ThreadId> for cef_thread_id_t {
    fn from(value: ThreadId) -> Self {
        value as _
    }
}

impl TryFrom<cef_thread_id_t> for ThreadId {
    type Error = cef_thread_id_t;

    fn try_from(value: cef_thread_id_t) -> Result<Self, Self::Error> {
        Ok(match value {
            cef_thread_id_t_TID_UI => Self::Ui,
            cef_thread_id_t_TID_FILE_BACKGROUND => Self::FileBackground,
            cef_thread_id_t_TID_FILE_USER_VISIBLE => Self::FileUserVisible,
            cef_thread_id_t_TID_FILE_USER_BLOCKING => Self::FileUserBlocking,
            cef_thread_id_t_TID_PROCESS_LAUNCHER => Self::ProcessLauncher,
            cef_thread_id_t_TID_IO => Self::Io,
            cef_thread_id_t_TID_RENDERER => Self::Renderer,
            other => return Err(other),
        })
    }
}
