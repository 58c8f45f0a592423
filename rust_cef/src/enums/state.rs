use cef_wrapper::cef_capi_sys::{
    cef_state_t, cef_state_t_STATE_DEFAULT, cef_state_t_STATE_DISABLED, cef_state_t_STATE_ENABLED,
};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    #[default]
    Default = cef_state_t_STATE_DEFAULT,
    Enabled = cef_state_t_STATE_ENABLED,
    Disabled = cef_state_t_STATE_DISABLED,
}

impl From<State> for cef_state_t {
    fn from(val: State) -> Self {
        val as _
    }
}
