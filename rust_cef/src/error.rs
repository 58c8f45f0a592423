use cef_wrapper::LoadError;

use crate::enums::thread_id::ThreadId;

#[derive(Debug, thiserror::Error)]
pub enum CefError {
    #[error("the CEF runtime is not loaded")]
    NotLoaded,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cef_initialize failed")]
    Initialize,

    #[error("cef_browser_host_create_browser failed")]
    CreateBrowser,

    #[error("failed to post a task to the {thread:?} thread")]
    PostTask { thread: ThreadId },

    #[error("failed to register the V8 extension `{name}`")]
    RegisterExtension { name: String },

    #[error("CEF returned a null {0}")]
    NullHandle(&'static str),
}
