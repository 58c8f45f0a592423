#![allow(non_upper_case_globals)]
#![allow(clippy::new_ret_no_self)]

#[macro_use]
mod macros;

pub mod api;
pub mod c_to_rust;
pub mod enums;
mod error;
pub mod functions;
pub mod rust_to_c;
pub mod structs;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod util;

pub use error::CefError;
