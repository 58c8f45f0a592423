use cef_wrapper::cef_capi_sys::{
    cef_paint_element_type_t, cef_paint_element_type_t_PET_POPUP,
    cef_paint_element_type_t_PET_VIEW,
};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintElementType {
    View = cef_paint_element_type_t_PET_VIEW,
    Popup = cef_paint_element_type_t_PET_POPUP,
}

impl From<cef_paint_element_type_t> for PaintElementType {
    fn from(value: cef_paint_element_type_t) -> Self {
        match value {
            cef_paint_element_type_t_PET_POPUP => Self::Popup,
            _ => Self::View,
        }
    }
}

impl From<PaintElementType> for cef_paint_element_type_t {
    fn from(value: PaintElementType) -> Self {
        value as _
    }
}
