pub mod cef_arc;
pub mod cef_string;
pub mod starts_with;
pub(crate) mod wrap_boolean;
