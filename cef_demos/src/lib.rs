//! Example programs driving the Chromium Embedded Framework through
//! `rust_cef`, and the pieces they share.

pub mod cef_app;
pub mod config;
pub mod driver;
pub mod javascript;
pub mod offscreen;
pub mod retry;
pub mod screenshot;
pub mod static_server;
pub mod window;
