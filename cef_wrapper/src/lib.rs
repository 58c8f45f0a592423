//! Raw bindings to the CEF C API and the loader that resolves them from `libcef`.

pub mod cef_capi_sys;
mod library;

pub use library::{CefApi, CefLibrary, LoadError};
