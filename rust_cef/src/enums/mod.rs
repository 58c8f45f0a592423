pub mod log_item;
pub mod log_severity;
pub mod paint_element_type;
pub mod state;
pub mod thread_id;
