use crate::{
    CefError, api,
    rust_to_c::v8handler::V8Handler,
    util::{cef_arc::CefArc, cef_string::CefString},
};

/// Registers a V8 extension. `javascript_code` may declare
/// `native function Name();`, which calls into `handler`. Must be called on
/// the render process main thread, from `on_web_kit_initialized`.
pub fn register_extension(
    extension_name: &str,
    javascript_code: &str,
    handler: Option<CefArc<V8Handler>>,
) -> Result<(), CefError> {
    let api = api::get()?;
    let name = CefString::new(extension_name);
    let code = CefString::new(javascript_code);
    let handler = handler.map_or(std::ptr::null_mut(), |handler| handler.into_raw().cast());

    let registered = unsafe { (api.register_extension)(name.as_raw(), code.as_raw(), handler) };
    if registered == 0 {
        return Err(CefError::RegisterExtension {
            name: extension_name.to_owned(),
        });
    }
    Ok(())
}
