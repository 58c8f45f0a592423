use std::os::raw::c_int;

pub(crate) fn wrap_boolean(value: bool) -> c_int {
    if value { 1 } else { 0 }
}

pub(crate) fn unwrap_boolean(value: c_int) -> bool {
    value != 0
}
