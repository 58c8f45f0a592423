//! `#[repr(C)]` mirror of the CEF C API headers (`include/capi`, CEF 121).
//!
//! Structs the runtime allocates and the host only reads are declared as a
//! layout-compatible prefix ending at the last slot this workspace calls.
//! Callback tables the host allocates are declared in full; slots that are
//! never installed are typed as [`UnusedSlot`].
#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]
#![allow(non_snake_case)]

mod functions;
mod handlers;
mod objects;
mod structs;
mod types;

pub use functions::*;
pub use handlers::*;
pub use objects::*;
pub use structs::*;
pub use types::*;

/// A function pointer slot this workspace never installs.
///
/// Always `None` on host-allocated tables; it only reserves the slot's space.
pub type UnusedSlot = Option<unsafe extern "C" fn()>;
