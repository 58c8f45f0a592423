use std::path::{Path, PathBuf};

use libloading::Library;
use log::debug;

use crate::cef_capi_sys::{
    cef_browser_host_create_browser_fn, cef_currently_on_fn,
    cef_execute_process_fn, cef_initialize_fn, cef_post_delayed_task_fn, cef_post_task_fn,
    cef_quit_message_loop_fn, cef_register_extension_fn, cef_run_message_loop_fn,
    cef_shutdown_fn, cef_string_userfree_utf16_free_fn, cef_v8value_create_string_fn,
    cef_version_info_fn,
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open CEF library at {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("CEF library does not export `{name}`")]
    Symbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },
}

/// The CEF entry points this workspace calls, as plain function pointers.
///
/// A table is either resolved from `libcef` by [`CefLibrary::open`] or
/// assembled by hand from functions with the same signatures.
#[derive(Debug, Clone, Copy)]
pub struct CefApi {
    pub initialize: cef_initialize_fn,
    pub execute_process: cef_execute_process_fn,
    pub shutdown: cef_shutdown_fn,
    pub run_message_loop: cef_run_message_loop_fn,
    pub quit_message_loop: cef_quit_message_loop_fn,
    pub post_task: cef_post_task_fn,
    pub post_delayed_task: cef_post_delayed_task_fn,
    pub currently_on: cef_currently_on_fn,
    pub browser_host_create_browser: cef_browser_host_create_browser_fn,
    pub register_extension: cef_register_extension_fn,
    pub v8value_create_string: cef_v8value_create_string_fn,
    pub string_userfree_utf16_free: cef_string_userfree_utf16_free_fn,
    pub version_info: cef_version_info_fn,
}

/// An opened `libcef` together with the entry points resolved from it.
///
/// The function pointers in [`CefLibrary::api`] are only valid while the
/// library stays loaded.
pub struct CefLibrary {
    _library: Library,
    api: CefApi,
}

impl CefLibrary {
    /// Platform file name of the CEF shared library.
    #[cfg(target_os = "windows")]
    pub const FILE_NAME: &'static str = "libcef.dll";
    #[cfg(target_os = "macos")]
    pub const FILE_NAME: &'static str = "Chromium Embedded Framework";
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    pub const FILE_NAME: &'static str = "libcef.so";

    /// # Safety
    ///
    /// Loading a library runs its initialisers. `path` must name a CEF build
    /// whose C API matches the layouts in [`crate::cef_capi_sys`].
    pub unsafe fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!("loading CEF from {}", path.display());

        let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let api = unsafe {
            CefApi {
                initialize: symbol(&library, "cef_initialize")?,
                execute_process: symbol(&library, "cef_execute_process")?,
                shutdown: symbol(&library, "cef_shutdown")?,
                run_message_loop: symbol(&library, "cef_run_message_loop")?,
                quit_message_loop: symbol(&library, "cef_quit_message_loop")?,
                post_task: symbol(&library, "cef_post_task")?,
                post_delayed_task: symbol(&library, "cef_post_delayed_task")?,
                currently_on: symbol(&library, "cef_currently_on")?,
                browser_host_create_browser: symbol(&library, "cef_browser_host_create_browser")?,
                register_extension: symbol(&library, "cef_register_extension")?,
                v8value_create_string: symbol(&library, "cef_v8value_create_string")?,
                string_userfree_utf16_free: symbol(&library, "cef_string_userfree_utf16_free")?,
                version_info: symbol(&library, "cef_version_info")?,
            }
        };

        Ok(Self {
            _library: library,
            api,
        })
    }

    pub fn api(&self) -> &CefApi {
        &self.api
    }
}

/// # Safety
///
/// `T` must be the function pointer type of the exported symbol `name`.
unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T, LoadError> {
    let symbol = unsafe { library.get::<T>(name.as_bytes()) }
        .map_err(|source| LoadError::Symbol { name, source })?;
    Ok(*symbol)
}
