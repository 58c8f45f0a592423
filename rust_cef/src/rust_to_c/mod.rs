pub mod app;
pub mod client;
pub mod life_span_handler;
pub mod load_handler;
pub mod render_handler;
pub mod render_process_handler;
pub mod task;
pub mod v8handler;
