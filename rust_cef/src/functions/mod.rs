pub mod create_browser;
pub mod execute_process;
pub mod initialize;
pub mod message_loop;
pub mod post_task;
pub mod register_extension;
pub mod try_start_subprocess;
pub mod version;
