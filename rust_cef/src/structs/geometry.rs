use cef_wrapper::cef_capi_sys::{cef_point_t, cef_rect_t, cef_size_t};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl From<cef_point_t> for Point {
    fn from(point: cef_point_t) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<Point> for cef_point_t {
    fn from(val: Point) -> Self {
        cef_point_t { x: val.x, y: val.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Byte length of a 32-bit-per-pixel image of this size.
    pub fn bgra_len(&self) -> usize {
        let width = usize::try_from(self.width).unwrap_or(0);
        let height = usize::try_from(self.height).unwrap_or(0);
        width * height * 4
    }
}

impl From<cef_size_t> for Size {
    fn from(size: cef_size_t) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<cef_rect_t> for Rect {
    fn from(rect: cef_rect_t) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

impl From<Rect> for cef_rect_t {
    fn from(val: Rect) -> Self {
        cef_rect_t {
            x: val.x,
            y: val.y,
            width: val.width,
            height: val.height,
        }
    }
}
