use std::sync::Arc;

use log::{trace, warn};
use parking_lot::Mutex;
use rust_cef::{
    c_to_rust::browser::Browser,
    enums::paint_element_type::PaintElementType,
    rust_to_c::render_handler::{RenderHandler, RenderHandlerConfig},
    structs::geometry::{Rect, Size},
    util::cef_arc::CefArc,
};

/// Viewport of the off-screen demos.
pub const VIEWPORT: Size = Size::new(800, 600);

/// A copy of one painted view, BGRA with an upper-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub bgra: Vec<u8>,
}

impl Bitmap {
    /// Converts to RGBA in place of a copy.
    pub fn into_rgba(mut self) -> Vec<u8> {
        for pixel in self.bgra.chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
        self.bgra
    }
}

/// The latest painted view. The runtime's buffer is only valid during the
/// paint callback, so it is copied in.
#[derive(Debug, Clone, Default)]
pub struct PaintBuffer(Arc<Mutex<Option<Bitmap>>>);

impl PaintBuffer {
    pub fn latest(&self) -> Option<Bitmap> {
        self.0.lock().clone()
    }

    pub fn is_painted(&self) -> bool {
        self.0.lock().is_some()
    }

    fn store(&self, buffer: &[u8], width: usize, height: usize) {
        let mut latest = self.0.lock();
        match latest.as_mut() {
            Some(bitmap) if bitmap.width == width && bitmap.height == height => {
                bitmap.bgra.clear();
                bitmap.bgra.extend_from_slice(buffer);
            }
            _ => {
                *latest = Some(Bitmap {
                    width,
                    height,
                    bgra: buffer.to_vec(),
                })
            }
        }
    }
}

/// Render handler of a fixed-size off-screen browser, optionally keeping
/// what it paints.
pub struct OffscreenView {
    size: Size,
    paint: Option<PaintBuffer>,
}

impl OffscreenView {
    pub fn new(size: Size) -> Self {
        Self { size, paint: None }
    }

    pub fn capturing_into(size: Size, paint: PaintBuffer) -> Self {
        Self {
            size,
            paint: Some(paint),
        }
    }

    pub fn build(self) -> CefArc<RenderHandler> {
        RenderHandler::new(self)
    }
}

impl RenderHandlerConfig for OffscreenView {
    fn get_view_rect(&self, _browser: CefArc<Browser>) -> Rect {
        Rect::from_size(self.size)
    }

    fn on_paint(
        &self,
        _browser: CefArc<Browser>,
        paint_element_type: PaintElementType,
        _dirty_rects: &[Rect],
        buffer: &[u8],
        width: usize,
        height: usize,
    ) {
        trace!("on_paint {paint_element_type:?} {width}x{height}");
        let Some(paint) = &self.paint else {
            return;
        };
        if paint_element_type != PaintElementType::View {
            return;
        }
        if buffer.len() != width * height * 4 {
            warn!(
                "ignoring a {width}x{height} paint with {} bytes",
                buffer.len()
            );
            return;
        }
        paint.store(buffer, width, height);
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use rust_cef::{
        functions::create_browser::browser_host_create_browser,
        structs::{browser_settings::BrowserSettings, window_info::WindowInfo},
        testing::{LOAD_DURATION, PAINT_PIXEL, PageScript, SimRuntime},
    };

    use super::*;
    use crate::cef_app::{DemoClient, QuitOnClose};

    fn open(view: OffscreenView) {
        browser_host_create_browser(
            &WindowInfo::windowless("offscreen"),
            DemoClient::new(QuitOnClose::new().build())
                .with_render_handler(view.build())
                .build(),
            "https://example.test/",
            &BrowserSettings::default(),
        )
        .unwrap();
    }

    #[test]
    fn paints_of_the_view_are_copied() {
        let sim = SimRuntime::install();
        let paint = PaintBuffer::default();
        open(OffscreenView::capturing_into(VIEWPORT, paint.clone()));

        sim.advance(LOAD_DURATION);
        assert!(!paint.is_painted());
        sim.advance(Duration::from_secs(1));

        let bitmap = paint.latest().unwrap();
        assert_eq!((bitmap.width, bitmap.height), (800, 600));
        assert_eq!(bitmap.bgra.len(), 800 * 600 * 4);
        assert_eq!(bitmap.bgra[..4], PAINT_PIXEL);
    }

    #[test]
    fn nothing_is_kept_without_a_paint() {
        let sim = SimRuntime::install();
        sim.set_default_page(PageScript::Load { paint_after: None });
        let paint = PaintBuffer::default();
        open(OffscreenView::capturing_into(VIEWPORT, paint.clone()));

        sim.advance(Duration::from_secs(5));
        assert!(paint.latest().is_none());
    }

    #[test]
    fn rgba_conversion_swaps_red_and_blue() {
        let bitmap = Bitmap {
            width: 2,
            height: 1,
            bgra: vec![1, 2, 3, 255, 10, 20, 30, 128],
        };
        assert_eq!(bitmap.into_rgba(), [3, 2, 1, 255, 30, 20, 10, 128]);
    }
}
