//! Loads a page in an off-screen browser and saves its first painted view
//! as a PNG.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use image::{ImageFormat, RgbaImage};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use rust_cef::{
    CefError,
    c_to_rust::{browser::Browser, frame::Frame},
    functions::{
        message_loop::quit_message_loop,
        post_task::{RuntimeTaskPoster, TaskPoster},
    },
    rust_to_c::{
        client::Client,
        load_handler::{LoadHandler, LoadHandlerConfig},
    },
    util::cef_arc::CefArc,
};

use crate::{
    cef_app::{BrowserError, DemoClient, LoadFailure, QuitOnClose, SavedBrowser, main_frame_failure},
    offscreen::{Bitmap, OffscreenView, PaintBuffer, VIEWPORT},
    retry::{MAX_RETRY, RETRY_DELAY, RetryState},
};

/// Time given to the first paint after loading completes.
pub const FIRST_ATTEMPT_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("save_screenshot timeout")]
    Timeout,

    #[error("{0}")]
    LoadFailed(LoadFailure),

    #[error("a {width}x{height} paint does not form an image")]
    Buffer { width: usize, height: usize },

    #[error("failed to write {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Cef(#[from] CefError),
}

struct Inner<P> {
    path: PathBuf,
    poster: P,
    browser: SavedBrowser,
    paint: PaintBuffer,
    started: AtomicBool,
    state: Mutex<RetryState>,
    outcome: Mutex<Option<Result<PathBuf, ScreenshotError>>>,
}

/// The screenshot flow. Clones share the same state.
pub struct Screenshot<P = RuntimeTaskPoster> {
    inner: Arc<Inner<P>>,
}

impl<P> Clone for Screenshot<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Screenshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_poster(path, RuntimeTaskPoster)
    }
}

impl<P: TaskPoster + 'static> Screenshot<P> {
    pub fn with_poster(path: impl Into<PathBuf>, poster: P) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                poster,
                browser: SavedBrowser::default(),
                paint: PaintBuffer::default(),
                started: AtomicBool::new(false),
                state: Mutex::new(RetryState::Waiting),
                outcome: Mutex::new(None),
            }),
        }
    }

    /// The client table of the off-screen browser.
    pub fn client(&self) -> CefArc<Client> {
        DemoClient::new(QuitOnClose::new().build())
            .with_load_handler(LoadHandler::new(ScreenshotLoad(self.clone())))
            .with_render_handler(
                OffscreenView::capturing_into(VIEWPORT, self.inner.paint.clone()).build(),
            )
            .build()
    }

    pub fn retry_state(&self) -> RetryState {
        *self.inner.state.lock()
    }

    /// How the flow ended: the path of the written image, or why there is
    /// none. `None` while the flow is still running.
    pub fn take_outcome(&self) -> Option<Result<PathBuf, ScreenshotError>> {
        self.inner.outcome.lock().take()
    }

    fn has_outcome(&self) -> bool {
        self.inner.outcome.lock().is_some()
    }

    // the first outcome wins.
    fn finish(&self, outcome: Result<PathBuf, ScreenshotError>) {
        let mut slot = self.inner.outcome.lock();
        match &*slot {
            Some(_) => {
                if let Err(err) = outcome {
                    warn!("screenshot already finished, dropping: {err}");
                }
            }
            None => *slot = Some(outcome),
        }
    }

    fn post(&self, delay: Duration, work: impl FnOnce(Self) + Send + 'static) {
        let this = self.clone();
        if let Err(err) = self.inner.poster.post_ui(delay, move || work(this)) {
            error!("{err}");
            self.finish(Err(err.into()));
            if let Err(err) = quit_message_loop() {
                error!("failed to quit the message loop: {err}");
            }
        }
    }

    fn on_load_complete(&self, browser: CefArc<Browser>) {
        if self.has_outcome() {
            return;
        }
        if self.inner.started.swap(true, Ordering::SeqCst) {
            debug!("screenshot already scheduled");
            return;
        }
        info!("Web page loading is complete");
        self.inner.browser.save(browser);
        self.post(FIRST_ATTEMPT_DELAY, |this| this.save_screenshot(0));
    }

    fn on_load_failed(&self, browser: CefArc<Browser>, failure: LoadFailure) {
        self.inner.browser.save(browser);
        self.finish(Err(ScreenshotError::LoadFailed(failure)));
        self.post(Duration::ZERO, |this| this.exit_app());
    }

    /// Attempt `attempt` at saving the painted view. Retries after
    /// [`RETRY_DELAY`] while nothing has been painted, up to [`MAX_RETRY`]
    /// times.
    pub fn save_screenshot(&self, attempt: u32) {
        debug!("save_screenshot attempt {attempt}");
        let bitmap = self.inner.paint.latest();
        let next = RetryState::for_attempt(attempt).advance(bitmap.is_some());
        *self.inner.state.lock() = next;

        match (next, bitmap) {
            (RetryState::Retrying(retry), _) => {
                info!("save_screenshot retry {retry}/{MAX_RETRY}");
                self.post(RETRY_DELAY, move |this| this.save_screenshot(retry));
            }
            (RetryState::Succeeded, Some(bitmap)) => {
                let path = self.inner.path.clone();
                match write_png(&path, bitmap) {
                    Ok(()) => {
                        info!("Screenshot image saved: {}", path.display());
                        self.finish(Ok(path));
                    }
                    Err(err) => {
                        error!("{err}");
                        self.finish(Err(err));
                    }
                }
                self.post(Duration::ZERO, |this| this.exit_app());
            }
            _ => {
                error!("save_screenshot timeout");
                self.finish(Err(ScreenshotError::Timeout));
                self.post(Duration::ZERO, |this| this.exit_app());
            }
        }
    }

    fn exit_app(&self) {
        info!("exit_app");
        if let Err(err) = self.inner.browser.close() {
            error!("exit_app: {err}");
            self.finish(Err(err.into()));
            if let Err(err) = quit_message_loop() {
                error!("failed to quit the message loop: {err}");
            }
        }
    }
}

struct ScreenshotLoad<P>(Screenshot<P>);

impl<P: TaskPoster + 'static> LoadHandlerConfig for ScreenshotLoad<P> {
    fn on_loading_state_change(
        &self,
        browser: CefArc<Browser>,
        is_loading: bool,
        _can_go_back: bool,
        _can_go_forward: bool,
    ) {
        debug!("on_loading_state_change loading={is_loading}");
        if !is_loading {
            self.0.on_load_complete(browser);
        }
    }

    fn on_load_error(
        &self,
        browser: CefArc<Browser>,
        frame: CefArc<Frame>,
        error_code: i32,
        error_text: &str,
        failed_url: &str,
    ) {
        if let Some(failure) = main_frame_failure(&frame, error_code, error_text, failed_url) {
            self.0.on_load_failed(browser, failure);
        }
    }
}

fn write_png(path: &Path, bitmap: Bitmap) -> Result<(), ScreenshotError> {
    let (width, height) = (bitmap.width, bitmap.height);
    let buffer_error = || ScreenshotError::Buffer { width, height };

    let image_width = u32::try_from(width).map_err(|_| buffer_error())?;
    let image_height = u32::try_from(height).map_err(|_| buffer_error())?;
    let image = RgbaImage::from_raw(image_width, image_height, bitmap.into_rgba())
        .ok_or_else(buffer_error)?;

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ScreenshotError::Image {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod test;
