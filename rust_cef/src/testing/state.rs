use std::{cell::RefCell, collections::HashMap, time::Duration};

use log::warn;

use crate::{
    enums::thread_id::ThreadId,
    rust_to_c::{app::App, client::Client, task::Task, v8handler::V8Handler},
    util::cef_arc::CefArc,
};

use super::{PageScript, SimRecord};
use super::record::{CloseRequest, ExecutedScript};

/// Time from a navigation starting to the page finishing or failing.
pub const LOAD_DURATION: Duration = Duration::from_millis(100);

thread_local! {
    static STATE: RefCell<Option<SimState>> = const { RefCell::new(None) };
}

/// Runs `f` against this thread's runtime state. Without an installed
/// runtime `f` is skipped and `T::default()` is returned.
///
/// Callbacks into host tables must never run inside `f`.
pub(super) fn with<T: Default>(f: impl FnOnce(&mut SimState) -> T) -> T {
    STATE.with(|state| match state.borrow_mut().as_mut() {
        Some(state) => f(state),
        None => {
            warn!("no SimRuntime is installed on this thread");
            T::default()
        }
    })
}

pub(super) fn replace(new: Option<SimState>) -> Option<SimState> {
    STATE.with(|state| state.replace(new))
}

pub(super) enum Work {
    Task(CefArc<Task>),
    Event(Event),
}

#[derive(Debug, Clone)]
pub(super) enum Event {
    WebKitInitialized,
    AfterCreated(i32),
    LoadStart(i32),
    LoadFinished(i32),
    LoadFailed {
        browser_id: i32,
        main_frame: bool,
        error_code: i32,
        error_text: String,
    },
    Paint(i32),
    BeforeClose(i32),
}

struct Scheduled {
    due: Duration,
    seq: u64,
    work: Work,
}

pub(super) struct BrowserState {
    pub(super) id: i32,
    pub(super) client: CefArc<Client>,
    pub(super) url: String,
    pub(super) valid: bool,
    pub(super) loading: bool,
    closing: bool,
}

pub(super) struct Extension {
    pub(super) name: String,
    pub(super) code: String,
    pub(super) handler: Option<CefArc<V8Handler>>,
}

pub(super) struct SimState {
    pub(super) now: Duration,
    next_seq: u64,
    queue: Vec<Scheduled>,
    pub(super) quit_requested: bool,
    pub(super) app: Option<CefArc<App>>,
    browsers: Vec<BrowserState>,
    next_browser_id: i32,
    pages: HashMap<String, PageScript>,
    pub(super) default_page: PageScript,
    pub(super) extensions: Vec<Extension>,
    web_kit_initialized: bool,
    /// Depth of load and paint callbacks currently on the stack.
    pub(super) callback_depth: usize,
    pub(super) record: SimRecord,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: Vec::new(),
            quit_requested: false,
            app: None,
            browsers: Vec::new(),
            next_browser_id: 1,
            pages: HashMap::new(),
            default_page: PageScript::default(),
            extensions: Vec::new(),
            web_kit_initialized: false,
            callback_depth: 0,
            record: SimRecord::default(),
        }
    }
}

impl SimState {
    pub(super) fn schedule(&mut self, delay: Duration, work: Work) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due: self.now + delay,
            seq,
            work,
        });
    }

    /// Removes the earliest work item, moving the clock forward to it.
    pub(super) fn pop_next(&mut self) -> Option<Work> {
        self.pop_due(None)
    }

    /// Like [`SimState::pop_next`], but only returns work due by `deadline`.
    pub(super) fn pop_due(&mut self, deadline: Option<Duration>) -> Option<Work> {
        let (index, due) = self
            .queue
            .iter()
            .enumerate()
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.seq))
            .map(|(index, scheduled)| (index, scheduled.due))?;
        if deadline.is_some_and(|deadline| due > deadline) {
            return None;
        }

        let scheduled = self.queue.swap_remove(index);
        self.now = self.now.max(scheduled.due);
        Some(scheduled.work)
    }

    pub(super) fn take_queue(&mut self) -> Vec<Work> {
        self.queue.drain(..).map(|scheduled| scheduled.work).collect()
    }

    pub(super) fn pending(&self) -> usize {
        self.queue.len()
    }

    pub(super) fn script_page(&mut self, url: String, script: PageScript) {
        self.pages.insert(url, script);
    }

    pub(super) fn browser(&self, id: i32) -> Option<&BrowserState> {
        self.browsers.iter().find(|browser| browser.id == id)
    }

    pub(super) fn browser_mut(&mut self, id: i32) -> Option<&mut BrowserState> {
        self.browsers.iter_mut().find(|browser| browser.id == id)
    }

    pub(super) fn open_browsers(&self) -> Vec<i32> {
        self.browsers
            .iter()
            .filter(|browser| browser.valid)
            .map(|browser| browser.id)
            .collect()
    }

    pub(super) fn take_browsers(&mut self) -> Vec<BrowserState> {
        std::mem::take(&mut self.browsers)
    }

    pub(super) fn client(&self, id: i32) -> Option<CefArc<Client>> {
        self.browser(id).map(|browser| browser.client.clone())
    }

    pub(super) fn create_browser(&mut self, client: CefArc<Client>, url: String) -> i32 {
        let id = self.next_browser_id;
        self.next_browser_id += 1;
        self.record.created_urls.push(url.clone());

        if !self.web_kit_initialized {
            self.web_kit_initialized = true;
            self.schedule(Duration::ZERO, Work::Event(Event::WebKitInitialized));
        }

        self.browsers.push(BrowserState {
            id,
            client,
            url: url.clone(),
            valid: true,
            loading: false,
            closing: false,
        });
        self.schedule(Duration::ZERO, Work::Event(Event::AfterCreated(id)));
        self.navigate(id, url);
        id
    }

    pub(super) fn navigate(&mut self, id: i32, url: String) {
        let Some(browser) = self.browser_mut(id) else {
            return;
        };
        browser.url = url.clone();

        let script = self
            .pages
            .get(&url)
            .cloned()
            .unwrap_or_else(|| self.default_page.clone());
        self.schedule(Duration::ZERO, Work::Event(Event::LoadStart(id)));
        match script {
            PageScript::Load { paint_after } => {
                self.schedule(LOAD_DURATION, Work::Event(Event::LoadFinished(id)));
                if let Some(paint_after) = paint_after {
                    self.schedule(LOAD_DURATION + paint_after, Work::Event(Event::Paint(id)));
                }
            }
            PageScript::Fail {
                error_code,
                error_text,
            } => {
                self.schedule(
                    LOAD_DURATION,
                    Work::Event(Event::LoadFailed {
                        browser_id: id,
                        main_frame: true,
                        error_code,
                        error_text,
                    }),
                );
            }
            PageScript::SubFrameFail {
                error_code,
                error_text,
                paint_after,
            } => {
                self.schedule(
                    LOAD_DURATION / 2,
                    Work::Event(Event::LoadFailed {
                        browser_id: id,
                        main_frame: false,
                        error_code,
                        error_text,
                    }),
                );
                self.schedule(LOAD_DURATION, Work::Event(Event::LoadFinished(id)));
                if let Some(paint_after) = paint_after {
                    self.schedule(LOAD_DURATION + paint_after, Work::Event(Event::Paint(id)));
                }
            }
        }
    }

    pub(super) fn request_close(&mut self, id: i32, force: bool) {
        let inside_callback = self.callback_depth > 0;
        if inside_callback {
            warn!("browser {id} closed from inside a load or paint callback");
        }
        self.record.closes.push(CloseRequest {
            browser_id: id,
            force,
            at: self.now,
            inside_callback,
        });

        let Some(browser) = self.browser_mut(id) else {
            return;
        };
        if !browser.valid || browser.closing {
            return;
        }
        browser.closing = true;
        self.schedule(Duration::ZERO, Work::Event(Event::BeforeClose(id)));
    }

    pub(super) fn record_script(&mut self, browser_id: i32, code: String) {
        self.record.scripts.push(ExecutedScript {
            browser_id,
            code,
            at: self.now,
        });
    }

    pub(super) fn accepts(&self, thread: ThreadId) -> bool {
        matches!(thread, ThreadId::Ui | ThreadId::Renderer)
    }
}
