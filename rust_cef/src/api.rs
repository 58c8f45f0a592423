//! The process-wide table of CEF entry points.
//!
//! Every wrapper in [`crate::functions`] resolves its entry point here, so
//! nothing in this crate links against `libcef` directly.

use std::{path::Path, sync::OnceLock};

use cef_wrapper::{CefApi, CefLibrary};
use log::info;

use crate::CefError;

/// Platform file name of the CEF shared library.
pub const LIBRARY_FILE_NAME: &str = CefLibrary::FILE_NAME;

static LIBRARY: OnceLock<CefLibrary> = OnceLock::new();
static API: OnceLock<CefApi> = OnceLock::new();

/// Loads `libcef` from `path` and installs its entry points.
///
/// Loading is done once per process; later calls return the table that is
/// already installed.
///
/// # Safety
///
/// See [`CefLibrary::open`].
pub unsafe fn load(path: impl AsRef<Path>) -> Result<&'static CefApi, CefError> {
    if let Some(api) = API.get() {
        return Ok(api);
    }

    let library = unsafe { CefLibrary::open(path.as_ref()) }?;
    let library = LIBRARY.get_or_init(|| library);
    info!("loaded CEF from {}", path.as_ref().display());

    Ok(API.get_or_init(|| *library.api()))
}

/// Installs a hand-assembled table. Returns the table already installed if
/// there is one.
pub fn install(api: CefApi) -> Result<&'static CefApi, &'static CefApi> {
    let mut fresh = false;
    let installed = API.get_or_init(|| {
        fresh = true;
        api
    });
    if fresh { Ok(installed) } else { Err(installed) }
}

pub fn get() -> Result<&'static CefApi, CefError> {
    API.get().ok_or(CefError::NotLoaded)
}

pub fn is_loaded() -> bool {
    API.get().is_some()
}
