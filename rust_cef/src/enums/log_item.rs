use cef_wrapper::cef_capi_sys::{
    cef_log_items_t, cef_log_items_t_LOG_ITEMS_FLAG_PROCESS_ID,
    cef_log_items_t_LOG_ITEMS_FLAG_THREAD_ID, cef_log_items_t_LOG_ITEMS_FLAG_TICK_COUNT,
    cef_log_items_t_LOG_ITEMS_FLAG_TIME_STAMP, cef_log_items_t_LOG_ITEMS_NONE,
};
use flagset::{FlagSet, flags};

flags! {
    pub enum LogItem: cef_log_items_t {
        None = cef_log_items_t_LOG_ITEMS_NONE,
        ProcessId = cef_log_items_t_LOG_ITEMS_FLAG_PROCESS_ID,
        ThreadId = cef_log_items_t_LOG_ITEMS_FLAG_THREAD_ID,
        TimeStamp = cef_log_items_t_LOG_ITEMS_FLAG_TIME_STAMP,
        TickCount = cef_log_items_t_LOG_ITEMS_FLAG_TICK_COUNT,
    }
}

/// Prefix items of each runtime log line. The empty set is the runtime default.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LogItems(FlagSet<LogItem>);

impl LogItems {
    pub fn new(items: impl Into<FlagSet<LogItem>>) -> Self {
        Self(items.into())
    }

    /// No prefix at all, as opposed to the runtime default.
    pub fn none() -> Self {
        Self(LogItem::None.into())
    }
}

impl From<LogItems> for cef_log_items_t {
    fn from(value: LogItems) -> Self {
        value.0.bits()
    }
}
