//! Delivers scheduled work to the host's tables through their C slots.

use cef_wrapper::cef_capi_sys::{
    cef_paint_element_type_t_PET_VIEW, cef_rect_t, cef_transition_type_t,
};
use log::{debug, warn};

use crate::{
    c_to_rust::v8context::V8Context,
    rust_to_c::{
        client::Client, life_span_handler::LifeSpanHandler, load_handler::LoadHandler,
        render_handler::RenderHandler, render_process_handler::RenderProcessHandler,
    },
    structs::geometry::Rect,
    util::{
        cef_arc::{CefArc, uninit_arc_vtable},
        cef_string::CefString,
        wrap_boolean::wrap_boolean,
    },
};

use super::{
    PAINT_PIXEL,
    objects::{browser, frame, main_frame},
    state::{self, Event, Work},
};

const TT_EXPLICIT: cef_transition_type_t = 1;
const HTTP_OK: i32 = 200;

pub(super) fn run(work: Work) {
    match work {
        Work::Task(task) => {
            if let Some(execute) = task.0.execute {
                unsafe { execute(task.as_ptr().cast()) };
            }
        }
        Work::Event(event) => handle(event),
    }
}

fn handle(event: Event) {
    debug!("sim event {event:?}");
    match event {
        Event::WebKitInitialized => {
            let Some(handler) = render_process_handler() else {
                return;
            };
            if let Some(on_web_kit_initialized) = handler.0.on_web_kit_initialized {
                unsafe { on_web_kit_initialized(handler.as_ptr().cast()) };
            }
        }
        Event::AfterCreated(id) => {
            let Some(handler) = client(id).and_then(|client| life_span_handler(&client)) else {
                return;
            };
            if let Some(on_after_created) = handler.0.on_after_created {
                unsafe { on_after_created(handler.as_ptr().cast(), browser(id).into_raw().cast()) };
            }
        }
        Event::LoadStart(id) => {
            if !set_loading(id, true) {
                return;
            }
            inside_callback(|| {
                if let Some(handler) = client(id).and_then(|client| load_handler(&client)) {
                    loading_state_change(&handler, id, true);
                    if let Some(on_load_start) = handler.0.on_load_start {
                        unsafe {
                            on_load_start(
                                handler.as_ptr().cast(),
                                browser(id).into_raw().cast(),
                                main_frame(id).into_raw().cast(),
                                TT_EXPLICIT,
                            )
                        };
                    }
                }
                context_created(id);
            });
        }
        Event::LoadFinished(id) => {
            if !set_loading(id, false) {
                return;
            }
            inside_callback(|| {
                let Some(handler) = client(id).and_then(|client| load_handler(&client)) else {
                    return;
                };
                if let Some(on_load_end) = handler.0.on_load_end {
                    unsafe {
                        on_load_end(
                            handler.as_ptr().cast(),
                            browser(id).into_raw().cast(),
                            main_frame(id).into_raw().cast(),
                            HTTP_OK,
                        )
                    };
                }
                loading_state_change(&handler, id, false);
            });
        }
        Event::LoadFailed {
            browser_id: id,
            main_frame: main,
            error_code,
            error_text,
        } => {
            // a failing sub-frame leaves the page loading.
            if main && !set_loading(id, false) {
                return;
            }
            if !main && !is_open(id) {
                return;
            }
            let url = state::with(|state| state.browser(id).map(|b| b.url.clone()))
                .unwrap_or_default();
            inside_callback(|| {
                let Some(handler) = client(id).and_then(|client| load_handler(&client)) else {
                    return;
                };
                if let Some(on_load_error) = handler.0.on_load_error {
                    let error_text = CefString::new(&error_text);
                    let url = CefString::new(&url);
                    unsafe {
                        on_load_error(
                            handler.as_ptr().cast(),
                            browser(id).into_raw().cast(),
                            frame(id, main).into_raw().cast(),
                            error_code,
                            error_text.as_raw(),
                            url.as_raw(),
                        )
                    };
                }
                if main {
                    loading_state_change(&handler, id, false);
                }
            });
        }
        Event::Paint(id) => paint(id),
        Event::BeforeClose(id) => {
            let handler = client(id).and_then(|client| life_span_handler(&client));
            if let Some(handler) = &handler {
                if let Some(do_close) = handler.0.do_close {
                    unsafe { do_close(handler.as_ptr().cast(), browser(id).into_raw().cast()) };
                }
            }

            state::with(|state| {
                if let Some(browser) = state.browser_mut(id) {
                    browser.valid = false;
                    browser.loading = false;
                }
            });

            if let Some(handler) = handler {
                if let Some(on_before_close) = handler.0.on_before_close {
                    unsafe {
                        on_before_close(handler.as_ptr().cast(), browser(id).into_raw().cast())
                    };
                }
            }
        }
    }
}

fn paint(id: i32) {
    if !is_open(id) {
        return;
    }
    let Some(handler) = client(id).and_then(|client| render_handler(&client)) else {
        return;
    };

    let mut view_rect = cef_rect_t {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };
    if let Some(get_view_rect) = handler.0.get_view_rect {
        unsafe {
            get_view_rect(
                handler.as_ptr().cast(),
                browser(id).into_raw().cast(),
                &mut view_rect,
            )
        };
    }
    let view = Rect::from(view_rect);
    if view.is_empty() {
        warn!("browser {id} reported an empty view rect, skipping paint");
        return;
    }

    let buffer = PAINT_PIXEL.repeat(view.size().bgra_len() / PAINT_PIXEL.len());
    let dirty_rects = [cef_rect_t::from(Rect::from_size(view.size()))];

    inside_callback(|| {
        if let Some(on_paint) = handler.0.on_paint {
            unsafe {
                on_paint(
                    handler.as_ptr().cast(),
                    browser(id).into_raw().cast(),
                    cef_paint_element_type_t_PET_VIEW,
                    dirty_rects.len(),
                    dirty_rects.as_ptr(),
                    buffer.as_ptr().cast(),
                    view.width,
                    view.height,
                )
            };
        }
    });
}

fn loading_state_change(handler: &CefArc<LoadHandler>, id: i32, is_loading: bool) {
    if let Some(on_loading_state_change) = handler.0.on_loading_state_change {
        unsafe {
            on_loading_state_change(
                handler.as_ptr().cast(),
                browser(id).into_raw().cast(),
                wrap_boolean(is_loading),
                wrap_boolean(false),
                wrap_boolean(false),
            )
        };
    }
}

fn context_created(id: i32) {
    let Some(handler) = render_process_handler() else {
        return;
    };
    let Some(on_context_created) = handler.0.on_context_created else {
        return;
    };
    let context: CefArc<V8Context> = CefArc::new(V8Context(uninit_arc_vtable()), ()).type_erase();
    unsafe {
        on_context_created(
            handler.as_ptr().cast(),
            browser(id).into_raw().cast(),
            main_frame(id).into_raw().cast(),
            context.into_raw().cast(),
        )
    };
}

fn inside_callback(f: impl FnOnce()) {
    state::with(|state| state.callback_depth += 1);
    f();
    state::with(|state| state.callback_depth -= 1);
}

fn is_open(id: i32) -> bool {
    state::with(|state| state.browser(id).is_some_and(|browser| browser.valid))
}

/// Returns false if the browser is already closed.
fn set_loading(id: i32, loading: bool) -> bool {
    state::with(|state| match state.browser_mut(id) {
        Some(browser) if browser.valid => {
            browser.loading = loading;
            true
        }
        _ => false,
    })
}

fn client(id: i32) -> Option<CefArc<Client>> {
    state::with(|state| state.client(id))
}

fn render_process_handler() -> Option<CefArc<RenderProcessHandler>> {
    let app = state::with(|state| state.app.clone())?;
    let get = app.0.get_render_process_handler?;
    unsafe { CefArc::try_from_raw(get(app.as_ptr().cast()).cast()) }
}

fn life_span_handler(client: &CefArc<Client>) -> Option<CefArc<LifeSpanHandler>> {
    let get = client.0.get_life_span_handler?;
    unsafe { CefArc::try_from_raw(get(client.as_ptr().cast()).cast()) }
}

fn load_handler(client: &CefArc<Client>) -> Option<CefArc<LoadHandler>> {
    let get = client.0.get_load_handler?;
    unsafe { CefArc::try_from_raw(get(client.as_ptr().cast()).cast()) }
}

fn render_handler(client: &CefArc<Client>) -> Option<CefArc<RenderHandler>> {
    let get = client.0.get_render_handler?;
    unsafe { CefArc::try_from_raw(get(client.as_ptr().cast()).cast()) }
}
